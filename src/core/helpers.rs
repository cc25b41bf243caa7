use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Literal, case-sensitive prefix match used by the text searches.
pub fn matches_prefix(text: &str, search: &str) -> bool {
    text.starts_with(search)
}
