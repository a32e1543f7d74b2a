pub(crate) mod assignments;
pub(crate) mod placement;
pub(crate) mod uuid_format;
