use anyhow::{anyhow, bail, Context, Result};
use blockscout_client::{BlockscoutClient, BlockscoutConfig, EntryConverter};
use config_manager::ExporterConfig;
use keeta_client::{KeetaClient, KeetaConfig};
use std::path::{Path, PathBuf};
use tax_core::{export, ledger, Chain};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(address) = args.next() else {
        bail!("usage: tax_exporter <wallet-address> [output.csv]");
    };
    let output = args.next();

    let chain = Chain::detect(&address)
        .ok_or_else(|| anyhow!("Unrecognized address format: {}", address))?;
    chain.validate_address(&address)?;

    let config = ExporterConfig::load().context("failed to load configuration")?;

    info!(
        "🚀 Exporting {} history for {}",
        chain.display_name(),
        address
    );

    let entries = match chain {
        Chain::MegaEth => {
            let client = BlockscoutClient::with_config(BlockscoutConfig {
                api_base_url: config.megaeth.api_base_url.clone(),
                explorer_url: config.megaeth.explorer_url.clone(),
                rpc_url: config.megaeth.rpc_url.clone(),
                native_symbol: config.megaeth.native_symbol.clone(),
                timeout_seconds: config.megaeth.request_timeout_seconds,
            })?;

            // Normal transactions and token transfers in parallel
            let (txs, transfers) = tokio::try_join!(
                client.get_transactions(&address),
                client.get_token_transfers(&address),
            )?;

            let converter = EntryConverter::new(&address, &config.megaeth.native_symbol);
            ledger::merge_entries(
                converter.convert_transactions(&txs),
                converter.convert_token_transfers(&transfers),
            )
        }
        Chain::Keeta => {
            let client = KeetaClient::with_config(KeetaConfig {
                api_base_url: config.keeta.api_base_url.clone(),
                explorer_url: config.keeta.explorer_url.clone(),
                history_limit: config.keeta.history_limit,
                max_blocks: config.keeta.max_blocks,
                timeout_seconds: config.keeta.request_timeout_seconds,
            })?;

            client.get_account_history(&address).await?
        }
    };

    let summary = ledger::summarize(&entries, chain.native_symbol());
    info!(
        "📊 {} entries ({} in / {} out) across {} active days",
        summary.entries, summary.incoming, summary.outgoing, summary.active_days
    );
    info!(
        "💰 {} volume: {} | fees paid: {}",
        chain.native_symbol(),
        summary.native_volume,
        summary.total_fees
    );

    let csv = export::to_csv_string(&entries)?;

    let path = match output {
        Some(p) => PathBuf::from(p),
        None => Path::new(&config.export.output_dir).join(export::export_filename(chain)),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    std::fs::write(&path, csv).with_context(|| format!("failed to write {}", path.display()))?;
    info!("✅ Wrote {} rows to {}", entries.len(), path.display());

    Ok(())
}
