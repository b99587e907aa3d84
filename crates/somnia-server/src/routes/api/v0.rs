pub(crate) mod dreams;
pub(crate) mod status;
