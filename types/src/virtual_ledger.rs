//! Local-only budgeting folders attached to an account.
//!
//! The network knows nothing about these. Only the folder → amount map is
//! persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::amount::{format_units, parse_units};
use crate::error::TypesError;

/// A named budget folder. `amount` is `None` when the user cleared it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub amount: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualLedger {
    folders: BTreeMap<String, Folder>,
}

impl VirtualLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folder names in sorted order.
    pub fn folders(&self) -> Vec<&str> {
        self.folders.keys().map(String::as_str).collect()
    }

    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.folders.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Create the folder or overwrite its amount.
    pub fn set_amount(&mut self, name: &str, amount: u64) {
        self.folders.entry(name.to_string()).or_default().amount = Some(amount);
    }

    pub fn remove(&mut self, name: &str) -> Option<Folder> {
        self.folders.remove(name)
    }

    /// Folder amount in coin units for display; `""` when cleared, `None`
    /// when there is no such folder.
    pub fn display_amount(&self, name: &str) -> Option<String> {
        self.folders
            .get(name)
            .map(|f| f.amount.map(format_units).unwrap_or_default())
    }

    /// Set an existing folder from a coin-unit string; `None` clears it.
    /// Unknown folders are left untouched and reported as `Ok(false)`.
    pub fn set_display_amount(
        &mut self,
        name: &str,
        value: Option<&str>,
    ) -> Result<bool, TypesError> {
        let amount = value.map(parse_units).transpose()?;
        match self.folders.get_mut(name) {
            Some(folder) => {
                folder.amount = amount;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Sum of all folder amounts, saturating.
    pub fn total(&self) -> u64 {
        self.folders
            .values()
            .filter_map(|f| f.amount)
            .fold(0u64, u64::saturating_add)
    }
}
