pub mod mutation;
pub mod query;

pub use mutation::{DreamEntryData, DreamEntryPatch, InsertDreamEntryError, Mutation};
pub use query::Query;
