pub(crate) mod cache;
pub(crate) mod command;
pub(crate) mod engine;
pub(crate) mod fetch;
pub(crate) mod probe;
