//! Transfer transaction: move coins to another address.

use dpos_types::Address;
use serde::{Deserialize, Serialize};

/// Maximum length in bytes of the free-text vendor field.
pub const MAX_VENDOR_FIELD_LEN: usize = 64;

/// An unsigned transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferTx {
    pub recipient_id: Address,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_field: Option<String>,
}
