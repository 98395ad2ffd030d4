pub mod client;
pub mod converter;
pub mod error;
pub mod types;

pub use client::KeetaClient;
pub use converter::OperationConverter;
pub use error::KeetaError;
pub use types::*;
