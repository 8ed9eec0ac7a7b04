pub use errors::{ServiceError, ServiceResult};

pub mod collect;
pub mod errors;
pub mod ingest;
pub mod main;
pub mod vod;
