//! Common types shared across modules.
//!
//! Field names follow the backend's camelCase JSON. The reference backend also emits raw
//! snake_case rows, so every field accepts both spellings.

use serde::{Deserialize, Deserializer, Serialize};

/// Filter and paging parameters for `GET /api/v1/transactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<String>,
    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SearchParams {
    /// True when no filter or paging field is set
    pub fn is_empty(&self) -> bool {
        self.hash.is_none()
            && self.from_timestamp.is_none()
            && self.to_timestamp.is_none()
            && self.page.is_none()
            && self.page_size.is_none()
    }

    /// True when any of the filter fields (hash, from, to) is set
    pub fn has_filter(&self) -> bool {
        self.hash.is_some() || self.from_timestamp.is_some() || self.to_timestamp.is_some()
    }

    /// Copy only the filter fields, dropping paging
    pub fn filter_only(&self) -> Self {
        Self {
            hash: self.hash.clone(),
            from_timestamp: self.from_timestamp.clone(),
            to_timestamp: self.to_timestamp.clone(),
            page: None,
            page_size: None,
        }
    }
}

/// A swap-pool transaction as indexed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    #[serde(alias = "block_number")]
    pub block_number: u64,
    /// ISO-8601 timestamp as sent by the backend
    pub timestamp: String,
    #[serde(alias = "gas_used")]
    pub gas_used: u64,
    /// Gas price in wei
    #[serde(alias = "gas_price")]
    pub gas_price: f64,
    #[serde(alias = "eth_usdt_price")]
    pub eth_usdt_price: f64,
    #[serde(alias = "fee_in_eth")]
    pub fee_in_eth: f64,
    #[serde(alias = "fee_in_usdt")]
    pub fee_in_usdt: f64,
}

/// Aggregate fee statistics. Treated as an opaque snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default, alias = "total_fee_usdt", deserialize_with = "null_as_zero")]
    pub total_fee_usdt: f64,
    #[serde(default, alias = "total_fee_eth", deserialize_with = "null_as_zero")]
    pub total_fee_eth: f64,
    #[serde(default, alias = "current_eth_usdt_price", deserialize_with = "null_as_zero")]
    pub current_eth_usdt_price: f64,
}

// SUM() over an empty table comes back as null
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
