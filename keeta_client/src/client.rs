use crate::{
    converter::OperationConverter,
    error::{KeetaError, Result},
    types::{Block, BlockResponse, HistoryResponse, KeetaConfig},
};
use futures::future::join_all;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use tax_core::{ledger, Chain, LedgerEntry};
use tracing::{error, info, warn};

/// Client for the Keeta ledger-node API
#[derive(Debug, Clone)]
pub struct KeetaClient {
    client: Client,
    config: KeetaConfig,
}

impl KeetaClient {
    pub fn new() -> Result<Self> {
        Self::with_config(KeetaConfig::default())
    }

    pub fn with_config(config: KeetaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &KeetaConfig {
        &self.config
    }

    /// Fetch and normalize the transaction history for an account.
    ///
    /// The ledger API exposes history as vote staples referencing
    /// block hashes; the blocks themselves hold the operations. So:
    /// history, then the referenced blocks (bounded, concurrent), then
    /// one ledger entry per send operation.
    pub async fn get_account_history(&self, address: &str) -> Result<Vec<LedgerEntry>> {
        Self::validate_wallet_address(address)?;

        let url = format!("{}/account/{}/history", self.config.api_base_url, address);
        info!("🔍 Keeta history request for {}", address);
        let started = std::time::Instant::now();

        let response = self
            .client
            .get(&url)
            .query(&[("limit", self.config.history_limit.to_string())])
            .send()
            .await?;

        let status = response.status();
        info!(
            "📨 History response: {} in {:.2}s",
            status,
            started.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("❌ Keeta ledger API error - Status: {}, Body: {}", status, text);
            return Err(KeetaError::Api {
                message: format!("HTTP {}: {}", status, text),
            });
        }

        let history: HistoryResponse = response.json().await?;
        if history.history.is_empty() {
            info!("✅ No history entries for {}", address);
            return Ok(Vec::new());
        }

        let hashes = collect_block_hashes(&history, self.config.max_blocks);
        info!(
            "📦 Fetching {} blocks referenced by {} history entries",
            hashes.len(),
            history.history.len()
        );

        let blocks = join_all(hashes.iter().map(|h| self.fetch_block(h))).await;

        let converter = OperationConverter::new(address);
        let mut entries = Vec::new();
        for block in blocks.into_iter().flatten() {
            entries.extend(converter.convert_block(&block)?);
        }

        ledger::sort_entries(&mut entries);
        info!("✅ Converted {} ledger entries from Keeta history", entries.len());
        Ok(entries)
    }

    /// Fetch one block by hash. Failures are logged and skipped so a
    /// single missing block does not sink the whole export.
    async fn fetch_block(&self, hash: &str) -> Option<Block> {
        let url = format!("{}/block/{}", self.config.api_base_url, hash);

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<BlockResponse>().await {
                    Ok(body) => Some(body.block),
                    Err(e) => {
                        warn!("⚠️ Failed to decode block {}: {}", hash, e);
                        None
                    }
                }
            }
            Ok(response) => {
                warn!("⚠️ Block {} fetch returned {}", hash, response.status());
                None
            }
            Err(e) => {
                warn!("⚠️ Block {} fetch failed: {}", hash, e);
                None
            }
        }
    }

    /// Validate a Keeta address (`keeta_` + alphanumeric)
    pub fn validate_wallet_address(address: &str) -> Result<()> {
        Chain::Keeta
            .validate_address(address)
            .map_err(|_| KeetaError::InvalidAddress {
                address: address.to_string(),
            })
    }

    pub fn explorer_tx_url(&self, hash: &str) -> String {
        Chain::Keeta.explorer_tx_url(&self.config.explorer_url, hash)
    }

    pub fn explorer_address_url(&self, address: &str) -> String {
        Chain::Keeta.explorer_address_url(&self.config.explorer_url, address)
    }
}

/// Unique block hashes across all vote staples, first-seen order,
/// capped at `max`
fn collect_block_hashes(history: &HistoryResponse, max: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();

    for entry in &history.history {
        let Some(staple) = &entry.vote_staple else {
            continue;
        };
        for vote in &staple.votes {
            for hash in &vote.blocks {
                if seen.insert(hash.clone()) {
                    ordered.push(hash.clone());
                }
            }
        }
    }

    ordered.truncate(max);
    ordered
}
