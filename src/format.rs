//! Display formatting for hashes, fees, prices and timestamps

use crate::types::Stats;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use ethers::types::U256;

/// Shorten a hash to its first 6 and last 4 characters
pub fn truncate_hash(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= 10 {
        return hash.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Fee in ETH, 6 decimal places
pub fn format_fee_eth(fee: f64) -> String {
    format!("Ξ{:.6}", fee)
}

/// Fee in USDT, 2 decimal places
pub fn format_fee_usdt(fee: f64) -> String {
    format!("${:.2}", fee)
}

/// Integer with thousands separators: 1234567 -> "1,234,567"
pub fn format_grouped_int(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Fixed-precision decimal with a grouped integer part
pub fn format_grouped_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    // No sign on values that round to zero
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format gas price in Gwei from wei
pub fn format_gwei(wei: f64) -> String {
    if !wei.is_finite() || wei < 0.0 {
        return "?".to_string();
    }
    let wei = U256::from(wei.round() as u128);
    let gwei = ethers::utils::format_units(wei, "gwei").unwrap_or_else(|_| "?".to_string());
    match gwei.parse::<f64>() {
        Ok(value) => format!("{:.2}", value),
        Err(_) => gwei,
    }
}

/// Parse a backend timestamp. Offset-less values are UTC.
pub fn parse_backend_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Render a backend timestamp in local time; unparseable input is shown as-is
pub fn format_local_timestamp(raw: &str) -> String {
    match parse_backend_timestamp(raw) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

/// The three figures shown in the statistics panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_fee_usdt: String,
    pub total_fee_eth: String,
    pub current_eth_usdt_price: String,
}

impl From<&Stats> for StatsSummary {
    fn from(stats: &Stats) -> Self {
        Self {
            total_fee_usdt: format!("${}", format_grouped_decimal(stats.total_fee_usdt, 2)),
            total_fee_eth: format!("Ξ{}", format_grouped_decimal(stats.total_fee_eth, 6)),
            current_eth_usdt_price: format!(
                "${}",
                format_grouped_decimal(stats.current_eth_usdt_price, 2)
            ),
        }
    }
}
