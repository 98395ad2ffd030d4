//! Verify parsing and conversion against realistic Blockscout payloads

use blockscout_client::{AccountApiResponse, EntryConverter, RawTokenTransfer, RawTransaction};
use tax_core::{merge_entries, to_csv_string, EntryKind};

const WALLET: &str = "0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3";

const TXLIST_RESPONSE: &str = r#"
{
  "status": "1",
  "message": "OK",
  "result": [
    {
      "blockNumber": "4500123",
      "timeStamp": "1717200000",
      "hash": "0xf00df00df00df00df00df00df00df00df00df00df00df00df00df00df00df00d",
      "nonce": "12",
      "blockHash": "0xb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10c",
      "transactionIndex": "3",
      "from": "0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3",
      "to": "0x1111111111111111111111111111111111111111",
      "value": "250000000000000000",
      "gas": "21000",
      "gasPrice": "2000000000",
      "isError": "0",
      "txreceipt_status": "1",
      "input": "0x",
      "contractAddress": "",
      "cumulativeGasUsed": "21000",
      "gasUsed": "21000",
      "confirmations": "1200",
      "methodId": "0x",
      "functionName": ""
    },
    {
      "blockNumber": "4500200",
      "timeStamp": "1717203600",
      "hash": "0xbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeef",
      "nonce": "13",
      "blockHash": "0xb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10d",
      "transactionIndex": "7",
      "from": "0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3",
      "to": "0x2222222222222222222222222222222222222222",
      "value": "0",
      "gas": "80000",
      "gasPrice": "2000000000",
      "isError": "0",
      "txreceipt_status": "1",
      "input": "0xa9059cbb0000000000000000000000001111111111111111111111111111111111111111",
      "contractAddress": "",
      "cumulativeGasUsed": "65000",
      "gasUsed": "52000",
      "confirmations": "1100",
      "methodId": "0xa9059cbb",
      "functionName": "transfer(address _to, uint256 _value)"
    }
  ]
}
"#;

const TOKENTX_RESPONSE: &str = r#"
{
  "status": "1",
  "message": "OK",
  "result": [
    {
      "blockNumber": "4500200",
      "timeStamp": "1717203600",
      "hash": "0xbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeefbeef",
      "nonce": "13",
      "blockHash": "0xb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10cb10d",
      "from": "0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3",
      "contractAddress": "0x2222222222222222222222222222222222222222",
      "to": "0x1111111111111111111111111111111111111111",
      "value": "15000000",
      "tokenName": "USD Coin",
      "tokenSymbol": "USDC",
      "tokenDecimal": "6",
      "transactionIndex": "7",
      "gas": "80000",
      "gasPrice": "2000000000",
      "gasUsed": "52000",
      "cumulativeGasUsed": "65000",
      "input": "deprecated",
      "confirmations": "1100"
    }
  ]
}
"#;

const EMPTY_RESPONSE: &str = r#"
{
  "status": "0",
  "message": "No transactions found",
  "result": []
}
"#;

#[test]
fn txlist_payload_round_trips_into_ledger_entries() {
    let envelope: AccountApiResponse = serde_json::from_str(TXLIST_RESPONSE).unwrap();
    assert_eq!(envelope.status, "1");

    let txs: Vec<RawTransaction> = serde_json::from_value(envelope.result).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].txreceipt_status, "1");

    let converter = EntryConverter::new(WALLET, "ETH");
    let entries = converter.convert_transactions(&txs);
    assert_eq!(entries.len(), 2);

    let transfer = &entries[0];
    assert_eq!(transfer.kind, EntryKind::TransferOut);
    assert_eq!(transfer.amount.to_string(), "-0.25000000");
    // 21000 gas * 2 gwei
    assert_eq!(transfer.fee.to_string(), "0.00004200");
    assert_eq!(transfer.date(), "2024-06-01");

    let contract = &entries[1];
    assert_eq!(contract.kind, EntryKind::ContractInteraction);
    assert_eq!(contract.tag(), "contract");
}

#[test]
fn token_leg_and_native_leg_share_hash_but_both_survive() {
    let tx_env: AccountApiResponse = serde_json::from_str(TXLIST_RESPONSE).unwrap();
    let token_env: AccountApiResponse = serde_json::from_str(TOKENTX_RESPONSE).unwrap();

    let txs: Vec<RawTransaction> = serde_json::from_value(tx_env.result).unwrap();
    let transfers: Vec<RawTokenTransfer> = serde_json::from_value(token_env.result).unwrap();

    let converter = EntryConverter::new(WALLET, "ETH");
    let merged = merge_entries(
        converter.convert_transactions(&txs),
        converter.convert_token_transfers(&transfers),
    );

    // 2 native + 1 token entry, no dedup: the token leg has a
    // different asset than the ETH leg of the same transaction
    assert_eq!(merged.len(), 3);

    let token = merged
        .iter()
        .find(|e| e.asset == "USDC")
        .expect("token leg present");
    assert_eq!(token.kind, EntryKind::TokenOut);
    assert_eq!(token.amount.to_string(), "-15.000000");

    // Newest first
    assert!(merged[0].timestamp >= merged[merged.len() - 1].timestamp);

    let csv = to_csv_string(&merged).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,Asset,Amount,Fee,P&L,Payment Token,ID,Notes,Tag,Transaction Hash"
    );
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn no_results_envelope_parses_as_empty() {
    let envelope: AccountApiResponse = serde_json::from_str(EMPTY_RESPONSE).unwrap();
    assert_eq!(envelope.status, "0");
    assert_eq!(envelope.message, "No transactions found");

    let txs: Vec<RawTransaction> = serde_json::from_value(envelope.result).unwrap();
    assert!(txs.is_empty());
}
