//! CSV export of the currently displayed page

use crate::types::Transaction;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

const HEADERS: [&str; 8] = [
    "hash",
    "block_number",
    "timestamp",
    "gas_used",
    "gas_price_wei",
    "eth_usdt_price",
    "fee_in_eth",
    "fee_in_usdt",
];

/// Write transactions as CSV (header row first) to any writer
pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;
    for tx in transactions {
        wtr.write_record([
            tx.hash.clone(),
            tx.block_number.to_string(),
            tx.timestamp.clone(),
            tx.gas_used.to_string(),
            tx.gas_price.to_string(),
            tx.eth_usdt_price.to_string(),
            tx.fee_in_eth.to_string(),
            tx.fee_in_usdt.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export transactions to a CSV file, replacing it if present
pub fn export_csv(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_transactions(file, transactions)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    tracing::info!("Exported {} transactions to {}", transactions.len(), path.display());
    Ok(())
}

/// Suggested file name for an export of the given page
pub fn default_file_name(page: u32) -> String {
    format!(
        "transactions_page{}_{}.csv",
        page,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(hash: &str, fee_in_usdt: f64) -> Transaction {
        Transaction {
            hash: hash.into(),
            block_number: 19_000_000,
            timestamp: "2024-01-15T12:30:00Z".into(),
            gas_used: 152_000,
            gas_price: 25_000_000_000.0,
            eth_usdt_price: 2500.0,
            fee_in_eth: 0.0038,
            fee_in_usdt,
        }
    }

    // ==================== write_transactions tests ====================

    #[test]
    fn test_write_header_and_rows() {
        let mut out = Vec::new();
        write_transactions(&mut out, &[tx("0xaa", 9.5), tx("0xbb", 1.25)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "hash,block_number,timestamp,gas_used,gas_price_wei,eth_usdt_price,fee_in_eth,fee_in_usdt"
        );
        assert_eq!(
            lines[1],
            "0xaa,19000000,2024-01-15T12:30:00Z,152000,25000000000,2500,0.0038,9.5"
        );
        assert!(lines[2].starts_with("0xbb,"));
        assert!(lines[2].ends_with(",1.25"));
    }

    #[test]
    fn test_write_empty_page_has_only_header() {
        let mut out = Vec::new();
        write_transactions(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    // ==================== export_csv tests ====================

    #[test]
    fn test_export_csv_round_trips_through_reader() {
        let path = std::env::temp_dir().join(format!("swapfees_export_{}.csv", std::process::id()));
        export_csv(&path, &[tx("0xaa", 9.5)]).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "0xaa");
        assert_eq!(&records[0][7], "9.5");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_csv_bad_path() {
        let path = std::env::temp_dir().join("swapfees_missing_dir").join("nested").join("out.csv");
        let err = export_csv(&path, &[]).unwrap_err();
        assert!(err.to_string().contains("Failed to create"));
    }

    #[test]
    fn test_default_file_name() {
        let name = default_file_name(3);
        assert!(name.starts_with("transactions_page3_"));
        assert!(name.ends_with(".csv"));
    }
}
