pub mod batch;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod output;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
