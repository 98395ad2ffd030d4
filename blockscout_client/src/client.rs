use crate::{
    error::{BlockscoutError, Result},
    types::{AccountApiResponse, BlockscoutConfig, RawTokenTransfer, RawTransaction, RpcResponse},
};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tax_core::Chain;
use tracing::{error, info};
use url::Url;

/// Messages that mean "empty result", not failure. Blockscout signals
/// both real errors and empty pages with `status: "0"`.
const NO_RESULT_MESSAGES: [&str; 3] = [
    "No transactions found",
    "No records found",
    "No token transfers found",
];

/// Client for Blockscout-compatible explorer APIs (MegaETH mainnet by
/// default)
#[derive(Debug, Clone)]
pub struct BlockscoutClient {
    client: Client,
    config: BlockscoutConfig,
}

impl BlockscoutClient {
    /// Create a client with the default MegaETH configuration
    pub fn new() -> Result<Self> {
        Self::with_config(BlockscoutConfig::default())
    }

    pub fn with_config(config: BlockscoutConfig) -> Result<Self> {
        Url::parse(&config.api_base_url).map_err(|_| BlockscoutError::InvalidUrl {
            url: config.api_base_url.clone(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BlockscoutConfig {
        &self.config
    }

    /// Fetch normal transactions for an address, newest first
    pub async fn get_transactions(&self, address: &str) -> Result<Vec<RawTransaction>> {
        self.fetch_account_list("txlist", address).await
    }

    /// Fetch ERC-20 token transfers for an address, newest first
    pub async fn get_token_transfers(&self, address: &str) -> Result<Vec<RawTokenTransfer>> {
        self.fetch_account_list("tokentx", address).await
    }

    async fn fetch_account_list<T: DeserializeOwned>(
        &self,
        action: &str,
        address: &str,
    ) -> Result<Vec<T>> {
        Self::validate_wallet_address(address)?;

        info!("🔍 Blockscout {} request for {}", action, address);
        let started = std::time::Instant::now();

        let response = self
            .client
            .get(&self.config.api_base_url)
            .query(&[
                ("module", "account"),
                ("action", action),
                ("address", address),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("sort", "desc"),
            ])
            .send()
            .await?;

        let status = response.status();
        info!(
            "📨 {} response: {} in {:.2}s",
            action,
            status,
            started.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("❌ Blockscout API error - Status: {}, Body: {}", status, text);
            return Err(BlockscoutError::Api {
                message: format!("HTTP {}: {}", status, text),
            });
        }

        let envelope: AccountApiResponse = response.json().await?;

        if envelope.status == "0" && !is_no_result(&envelope.message) {
            error!("❌ Explorer rejected the query: {}", envelope.message);
            return Err(BlockscoutError::Api {
                message: envelope.message,
            });
        }

        // On "no results" (and some error shapes) `result` is not an array
        if !envelope.result.is_array() {
            info!("✅ No {} records for {}", action, address);
            return Ok(Vec::new());
        }

        let items: Vec<T> = serde_json::from_value(envelope.result)?;
        info!("✅ Fetched {} {} records", items.len(), action);
        Ok(items)
    }

    /// Native balance via JSON-RPC `eth_getBalance`, in whole ETH
    /// truncated to 6 decimals
    pub async fn get_native_balance(&self, address: &str) -> Result<Decimal> {
        Self::validate_wallet_address(address)?;

        let rpc_url = self
            .config
            .rpc_url
            .as_deref()
            .ok_or(BlockscoutError::RpcUnconfigured)?;

        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getBalance",
            "params": [address, "latest"],
        });

        info!("💰 eth_getBalance request for {}", address);
        let response = self.client.post(rpc_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BlockscoutError::Rpc {
                message: format!("HTTP {}: {}", status, text),
            });
        }

        let rpc: RpcResponse = response.json().await?;
        if let Some(err) = rpc.error {
            return Err(BlockscoutError::Rpc {
                message: format!("{} (code {})", err.message, err.code),
            });
        }

        let hex = rpc.result.ok_or_else(|| BlockscoutError::Rpc {
            message: "empty result".to_string(),
        })?;

        let balance = tax_core::units::hex_to_amount(&hex).map_err(|e| BlockscoutError::Rpc {
            message: e.to_string(),
        })?;

        Ok(balance.trunc_with_scale(6))
    }

    /// Validate an EVM wallet address (0x + 40 hex chars)
    pub fn validate_wallet_address(address: &str) -> Result<()> {
        Chain::MegaEth
            .validate_address(address)
            .map_err(|_| BlockscoutError::InvalidAddress {
                address: address.to_string(),
            })
    }

    pub fn explorer_tx_url(&self, hash: &str) -> String {
        Chain::MegaEth.explorer_tx_url(&self.config.explorer_url, hash)
    }

    pub fn explorer_address_url(&self, address: &str) -> String {
        Chain::MegaEth.explorer_address_url(&self.config.explorer_url, address)
    }
}

fn is_no_result(message: &str) -> bool {
    NO_RESULT_MESSAGES.iter().any(|m| message.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_result_messages_are_not_errors() {
        assert!(is_no_result("No transactions found"));
        assert!(is_no_result("No token transfers found"));
        assert!(is_no_result("No records found"));
        assert!(!is_no_result("Invalid API key"));
        assert!(!is_no_result("Error! Max rate limit reached"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(BlockscoutClient::validate_wallet_address(
            "0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3"
        )
        .is_ok());
        assert!(BlockscoutClient::validate_wallet_address("keeta_abc").is_err());
        assert!(BlockscoutClient::validate_wallet_address("0x1234").is_err());
    }

    #[tokio::test]
    async fn balance_query_without_rpc_url_is_an_error() {
        // Default config carries no RPC endpoint
        let client = BlockscoutClient::new().unwrap();
        let err = client
            .get_native_balance("0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3")
            .await
            .unwrap_err();
        assert!(matches!(err, BlockscoutError::RpcUnconfigured));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = BlockscoutConfig {
            api_base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(BlockscoutClient::with_config(config).is_err());
    }
}
