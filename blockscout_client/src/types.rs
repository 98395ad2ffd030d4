use serde::{Deserialize, Serialize};

/// Configuration for the Blockscout explorer client
#[derive(Debug, Clone)]
pub struct BlockscoutConfig {
    /// Explorer API endpoint (the `?module=account` query target)
    pub api_base_url: String,

    /// Explorer web UI base, for tx/address links
    pub explorer_url: String,

    /// Optional JSON-RPC endpoint for balance queries
    pub rpc_url: Option<String>,

    /// Native token symbol of the chain behind this explorer
    pub native_symbol: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for BlockscoutConfig {
    fn default() -> Self {
        // MegaETH mainnet (chain id 4326)
        Self {
            api_base_url: "https://megaeth.blockscout.com/api".to_string(),
            explorer_url: "https://megaeth.blockscout.com".to_string(),
            rpc_url: None,
            native_symbol: "ETH".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Response envelope of the Blockscout `account` module.
///
/// `result` is an array on success but a bare string on some error
/// paths, so it stays a `Value` until the status has been checked.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// Normal transaction record from `action=txlist`. All numeric fields
/// arrive as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub block_hash: String,
    #[serde(default)]
    pub transaction_index: String,
    pub from: String,
    #[serde(default)]
    pub to: String,
    pub value: String,
    #[serde(default)]
    pub gas: String,
    #[serde(default)]
    pub gas_price: String,
    #[serde(default)]
    pub is_error: String,
    #[serde(default, rename = "txreceipt_status")]
    pub txreceipt_status: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub cumulative_gas_used: String,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub confirmations: String,
    #[serde(default)]
    pub method_id: String,
    #[serde(default)]
    pub function_name: String,
}

/// ERC-20 token transfer record from `action=tokentx`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenTransfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub block_hash: String,
    pub from: String,
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub to: String,
    pub value: String,
    #[serde(default)]
    pub token_name: String,
    #[serde(default)]
    pub token_symbol: String,
    #[serde(default)]
    pub token_decimal: String,
    #[serde(default)]
    pub transaction_index: String,
    #[serde(default)]
    pub gas: String,
    #[serde(default)]
    pub gas_price: String,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub cumulative_gas_used: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub confirmations: String,
}

/// JSON-RPC response for `eth_getBalance`
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}
