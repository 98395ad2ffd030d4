//! Verify block decoding and conversion against a realistic ledger
//! node payload (including the fields the transform does not read)

use keeta_client::{BlockResponse, OperationConverter};
use tax_core::EntryKind;

const USER: &str = "keeta_aabd2mkz3pyawnuqlryxwcpfnlu7ppi4kgkx4s";

const BLOCK_RESPONSE: &str = r#"
{
  "block": {
    "version": 1,
    "date": "2024-06-01T12:30:45.000Z",
    "previous": "0000000000000000000000000000000000000000000000000000000000000000",
    "account": "keeta_qqlryxwcpfnlu7ppi4kgkx4saabd2mkz3pyawnu",
    "purpose": 0,
    "signer": "keeta_qqlryxwcpfnlu7ppi4kgkx4saabd2mkz3pyawnu",
    "network": "main",
    "operations": [
      {
        "type": 0,
        "amount": "0x1bc16d674ec80000",
        "to": "keeta_aabd2mkz3pyawnuqlryxwcpfnlu7ppi4kgkx4s",
        "token": "keeta_token_base"
      },
      {
        "type": 5,
        "to": "keeta_aabd2mkz3pyawnuqlryxwcpfnlu7ppi4kgkx4s"
      }
    ],
    "$hash": "E5F6A7B8C9D0A1B2C3D4E5F6A7B8C9D0"
  }
}
"#;

#[test]
fn node_payload_decodes_and_converts() {
    let response: BlockResponse = serde_json::from_str(BLOCK_RESPONSE).unwrap();
    let block = response.block;
    assert_eq!(block.hash, "E5F6A7B8C9D0A1B2C3D4E5F6A7B8C9D0");
    assert_eq!(block.operations.len(), 2);

    let converter = OperationConverter::new(USER);
    let entries = converter.convert_block(&block).unwrap();

    // Only the type-0 send produces an entry
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.kind, EntryKind::TransferIn);
    // 0x1bc16d674ec80000 = 2 * 10^18
    assert_eq!(entry.amount.to_string(), "2.000000000000000000");
    assert_eq!(entry.date(), "2024-06-01");
    assert_eq!(entry.tx_hash, block.hash);
}
