use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Configuration for the Keeta ledger-node client
#[derive(Debug, Clone)]
pub struct KeetaConfig {
    /// Ledger API base (the `/api/node/ledger` root)
    pub api_base_url: String,

    /// Explorer web UI base
    pub explorer_url: String,

    /// History entries requested per account query
    pub history_limit: u32,

    /// Cap on blocks fetched per query; vote staples can reference far
    /// more blocks than a single export needs
    pub max_blocks: usize,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for KeetaConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://rep3.main.network.api.keeta.com/api/node/ledger".to_string(),
            explorer_url: "https://explorer.keeta.com".to_string(),
            history_limit: 100,
            max_blocks: 50,
            timeout_seconds: 30,
        }
    }
}

/// `account/{address}/history` response
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "$timestamp", default)]
    pub timestamp: Option<i64>,
    #[serde(rename = "voteStaple", default)]
    pub vote_staple: Option<VoteStaple>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteStaple {
    #[serde(default)]
    pub votes: Vec<VoteInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteInfo {
    #[serde(default)]
    pub blocks: Vec<String>,
}

/// `block/{hash}` response
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    pub block: Block,
}

/// A settled Keeta block. Only the fields the transform reads are
/// declared; the node returns more.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub date: DateTime<Utc>,
    pub account: String,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(rename = "$hash")]
    pub hash: String,
}

/// Operation within a block. Type 0 is a send/transfer.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub op_type: u32,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Operation type for transfers
pub const OP_SEND: u32 = 0;
