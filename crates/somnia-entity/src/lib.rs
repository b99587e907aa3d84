pub mod dream_entry;
pub mod user;
