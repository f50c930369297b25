pub(crate) mod ingest;
pub(crate) mod process;
pub(crate) mod snapshot;
