pub mod client;
pub mod converter;
pub mod error;
pub mod types;

pub use client::BlockscoutClient;
pub use converter::EntryConverter;
pub use error::BlockscoutError;
pub use types::*;
