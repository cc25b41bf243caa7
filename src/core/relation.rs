use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Set of ordered pairs `(left, right)` indexed from both sides.
///
/// This is the single source of truth for likes and follows. Every pair occurs at most
/// once; the per-side lists keep insertion order so listings are deterministic.
#[derive(Clone, Debug)]
pub struct Relation<L, R> {
    pairs: HashSet<(L, R)>,
    by_left: HashMap<L, Vec<R>>,
    by_right: HashMap<R, Vec<L>>,
}

impl<L, R> Default for Relation<L, R> {
    fn default() -> Self {
        Self {
            pairs: HashSet::new(),
            by_left: HashMap::new(),
            by_right: HashMap::new(),
        }
    }
}

impl<L, R> Relation<L, R>
where
    L: Clone + Eq + Hash,
    R: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the pair. Returns false when it was already present.
    pub fn insert(&mut self, left: L, right: R) -> bool {
        if !self.pairs.insert((left.clone(), right.clone())) {
            return false;
        }
        self.by_left
            .entry(left.clone())
            .or_default()
            .push(right.clone());
        self.by_right.entry(right).or_default().push(left);
        true
    }

    /// Removes the pair. Returns false when it was not present.
    pub fn remove(&mut self, left: &L, right: &R) -> bool {
        if !self.pairs.remove(&(left.clone(), right.clone())) {
            return false;
        }
        if let Some(rights) = self.by_left.get_mut(left) {
            rights.retain(|r| r != right);
            if rights.is_empty() {
                self.by_left.remove(left);
            }
        }
        if let Some(lefts) = self.by_right.get_mut(right) {
            lefts.retain(|l| l != left);
            if lefts.is_empty() {
                self.by_right.remove(right);
            }
        }
        true
    }

    pub fn contains(&self, left: &L, right: &R) -> bool {
        self.pairs.contains(&(left.clone(), right.clone()))
    }

    /// Right-hand members paired with `left`, in insertion order.
    pub fn rights_of(&self, left: &L) -> &[R] {
        self.by_left.get(left).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Left-hand members paired with `right`, in insertion order.
    pub fn lefts_of(&self, right: &R) -> &[L] {
        self.by_right.get(right).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_rights_of(&self, left: &L) -> usize {
        self.rights_of(left).len()
    }

    pub fn count_lefts_of(&self, right: &R) -> usize {
        self.lefts_of(right).len()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(L, R)> {
        self.pairs.iter()
    }
}

impl<L, R> FromIterator<(L, R)> for Relation<L, R>
where
    L: Clone + Eq + Hash,
    R: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut relation = Relation::new();
        for (left, right) in iter {
            relation.insert(left, right);
        }
        relation
    }
}
