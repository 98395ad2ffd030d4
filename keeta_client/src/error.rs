use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeetaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ledger API error: {message}")]
    Api { message: String },

    #[error("Invalid Keeta address: {address}")]
    InvalidAddress { address: String },

    #[error("Amount conversion failed: {0}")]
    Amount(#[from] tax_core::LedgerError),
}

pub type Result<T> = std::result::Result<T, KeetaError>;
