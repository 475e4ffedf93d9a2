mod config;
mod environment;
mod extractors;
mod response;

pub use config::{ConfigError, UploadConfig};
pub use environment::Environment;
pub use extractors::RawBody;
pub use response::{cors_headers, UploadResponse, UploadResponseBody};
