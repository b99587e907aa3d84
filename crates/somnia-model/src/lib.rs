pub mod convert;
pub mod dream;
pub mod search;
pub mod status;
