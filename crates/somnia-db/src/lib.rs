pub mod dream_entry;
pub mod user;

pub use sea_orm;
