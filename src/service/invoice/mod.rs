mod ingest;

pub use ingest::*;
