pub mod id;
pub mod models;
