//! Transaction list paging state and table rows

use crate::config::{clamp_page_size, Config};
use crate::format::{format_fee_eth, format_fee_usdt, format_grouped_int, format_local_timestamp, truncate_hash};
use crate::types::{SearchParams, Transaction};

/// Paging plus the filter last applied from the search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionListState {
    page: u32,
    page_size: u32,
    filter: SearchParams,
    /// Row count of the most recent response for the current key
    last_row_count: Option<usize>,
}

impl TransactionListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: clamp_page_size(page_size),
            filter: SearchParams::default(),
            last_row_count: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filter(&self) -> &SearchParams {
        &self.filter
    }

    /// The parameter object the list query is keyed by
    pub fn query_key(&self) -> SearchParams {
        SearchParams {
            page: Some(self.page),
            page_size: Some(self.page_size),
            ..self.filter.filter_only()
        }
    }

    /// Replace the filter and go back to the first page
    pub fn apply_filter(&mut self, params: &SearchParams) {
        self.filter = params.filter_only();
        self.page = 1;
        self.last_row_count = None;
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        let page_size = clamp_page_size(page_size);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page = 1;
            self.last_row_count = None;
        }
    }

    /// Record how many rows the latest response for the current key held
    pub fn record_response(&mut self, row_count: usize) {
        self.last_row_count = Some(row_count);
    }

    pub fn can_go_previous(&self) -> bool {
        self.page != 1
    }

    /// A short page means there is nothing after it
    pub fn can_go_next(&self) -> bool {
        self.last_row_count
            .is_some_and(|count| count >= self.page_size as usize)
    }

    pub fn previous_page(&mut self) {
        if self.can_go_previous() {
            self.page -= 1;
            self.last_row_count = None;
        }
    }

    pub fn next_page(&mut self) {
        if self.can_go_next() {
            self.page = self.page.saturating_add(1);
            self.last_row_count = None;
        }
    }
}

impl Default for TransactionListState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub hash: String,
    pub short_hash: String,
    pub explorer_url: String,
    pub timestamp: String,
    pub gas_used: String,
    pub fee_eth: String,
    pub fee_usdt: String,
}

impl TransactionRow {
    pub fn new(tx: &Transaction, config: &Config) -> Self {
        Self {
            hash: tx.hash.clone(),
            short_hash: truncate_hash(&tx.hash),
            explorer_url: config.tx_explorer_url(&tx.hash),
            timestamp: format_local_timestamp(&tx.timestamp),
            gas_used: format_grouped_int(tx.gas_used),
            fee_eth: format_fee_eth(tx.fee_in_eth),
            fee_usdt: format_fee_usdt(tx.fee_in_usdt),
        }
    }
}

/// One row per transaction, in response order
pub fn rows(transactions: &[Transaction], config: &Config) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|tx| TransactionRow::new(tx, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(n: usize) -> Transaction {
        Transaction {
            hash: format!("0x{:064x}", n + 0xabcd),
            block_number: 19_000_000 + n as u64,
            timestamp: "2024-01-15T12:30:00Z".into(),
            gas_used: 152_000,
            gas_price: 25_000_000_000.0,
            eth_usdt_price: 2500.0,
            fee_in_eth: 0.0038,
            fee_in_usdt: 9.5,
        }
    }

    // ==================== TransactionListState tests ====================

    #[test]
    fn test_defaults() {
        let state = TransactionListState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 50);
        assert_eq!(
            state.query_key(),
            SearchParams {
                page: Some(1),
                page_size: Some(50),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(TransactionListState::new(0).page_size(), 1);
        assert_eq!(TransactionListState::new(1000).page_size(), 100);
    }

    #[test]
    fn test_previous_disabled_exactly_on_first_page() {
        let mut state = TransactionListState::new(2);
        assert!(!state.can_go_previous());

        state.record_response(2);
        state.next_page();
        assert_eq!(state.page(), 2);
        assert!(state.can_go_previous());

        state.previous_page();
        assert_eq!(state.page(), 1);
        assert!(!state.can_go_previous());

        // No-op on the first page
        state.previous_page();
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_next_requires_full_page() {
        let mut state = TransactionListState::new(50);
        assert!(!state.can_go_next(), "unknown until the first response");

        state.record_response(50);
        assert!(state.can_go_next());

        state.record_response(49);
        assert!(!state.can_go_next());
        state.next_page();
        assert_eq!(state.page(), 1);

        state.record_response(0);
        assert!(!state.can_go_next());
    }

    #[test]
    fn test_apply_filter_merges_into_key_and_resets_page() {
        let mut state = TransactionListState::new(10);
        state.record_response(10);
        state.next_page();
        state.record_response(10);
        state.next_page();
        assert_eq!(state.page(), 3);

        let submitted = SearchParams {
            hash: None,
            from_timestamp: Some("2024-01-01T00:00:00+00:00".into()),
            to_timestamp: Some("2024-01-02T00:00:00+00:00".into()),
            page: Some(7),
            page_size: Some(99),
        };
        state.apply_filter(&submitted);

        let key = state.query_key();
        assert_eq!(key.page, Some(1));
        assert_eq!(key.page_size, Some(10));
        assert_eq!(key.from_timestamp, submitted.from_timestamp);
        assert_eq!(key.to_timestamp, submitted.to_timestamp);
        assert!(!state.can_go_next());

        state.apply_filter(&SearchParams::default());
        assert!(!state.filter().has_filter());
        assert!(!state.query_key().has_filter());
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut state = TransactionListState::new(10);
        state.record_response(10);
        state.next_page();
        state.set_page_size(25);
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 25);

        // Same size keeps the page
        state.record_response(25);
        state.next_page();
        state.set_page_size(25);
        assert_eq!(state.page(), 2);
    }

    // ==================== TransactionRow tests ====================

    #[test]
    fn test_rows_one_per_transaction_with_truncated_hash() {
        let config = Config::default();
        let transactions: Vec<Transaction> = (0..7).map(tx).collect();
        let rendered = rows(&transactions, &config);

        assert_eq!(rendered.len(), 7);
        for (row, tx) in rendered.iter().zip(&transactions) {
            let expected = format!("{}...{}", &tx.hash[..6], &tx.hash[tx.hash.len() - 4..]);
            assert_eq!(row.short_hash, expected);
            assert_eq!(row.hash, tx.hash);
        }
    }

    #[test]
    fn test_rows_empty() {
        assert!(rows(&[], &Config::default()).is_empty());
    }

    #[test]
    fn test_row_fields() {
        let config = Config::default();
        let row = TransactionRow::new(&tx(0), &config);
        assert_eq!(row.gas_used, "152,000");
        assert_eq!(row.fee_eth, "Ξ0.003800");
        assert_eq!(row.fee_usdt, "$9.50");
        assert_eq!(row.explorer_url, format!("https://etherscan.io/tx/{}", row.hash));
        assert_eq!(row.timestamp, format_local_timestamp("2024-01-15T12:30:00Z"));
    }
}
