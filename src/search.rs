//! Search form state and validation
//!
//! Holds the editable hash / date-range inputs, validates them synchronously and
//! turns a valid submission into normalised [`SearchParams`]. Nothing here touches
//! the network; the dashboard decides what to do with the emitted parameters.

use crate::error::ValidationError;
use crate::types::SearchParams;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use ethers::types::TxHash;

/// Length of `0x` + 64 hex digits
const TX_HASH_LEN: usize = 66;

/// Offset-less formats accepted for date inputs, interpreted in local time
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a `0x`-prefixed, 64-hex-digit transaction hash
pub fn parse_tx_hash(input: &str) -> Result<TxHash, ValidationError> {
    let digits = input
        .strip_prefix("0x")
        .filter(|_| input.len() == TX_HASH_LEN)
        .ok_or(ValidationError::InvalidHash)?;
    let bytes = hex::decode(digits).map_err(|_| ValidationError::InvalidHash)?;
    Ok(TxHash::from_slice(&bytes))
}

/// Validate an optional hash input. Empty input is accepted (no filter).
pub fn validate_hash(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Ok(());
    }
    parse_tx_hash(input).map(|_| ())
}

/// Parse a date input. RFC 3339 keeps its offset; anything else is local time.
pub fn parse_date_input(input: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))?;

    // Spring-forward gaps have no local time; earliest() covers the fall-back overlap
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(DateTime::<FixedOffset>::from)
        .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))
}

/// Normalise a date input into an ISO-8601 string with offset
pub fn normalize_date_input(input: &str) -> Result<String, ValidationError> {
    parse_date_input(input).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// Check that `from <= to` when both are present. Empty bounds are accepted.
pub fn validate_date_range(from: &str, to: &str) -> Result<(), ValidationError> {
    if from.trim().is_empty() || to.trim().is_empty() {
        return Ok(());
    }
    let from = parse_date_input(from)?;
    let to = parse_date_input(to)?;
    if from > to {
        return Err(ValidationError::InvertedRange);
    }
    Ok(())
}

/// Which input the user edited
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Hash,
    FromTimestamp,
    ToTimestamp,
}

/// Inline error messages currently shown next to the inputs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub hash: Option<String>,
    pub from_timestamp: Option<String>,
    pub to_timestamp: Option<String>,
    pub date_range: Option<String>,
}

impl FormErrors {
    pub fn any(&self) -> bool {
        self.hash.is_some()
            || self.from_timestamp.is_some()
            || self.to_timestamp.is_some()
            || self.date_range.is_some()
    }
}

/// Editable search form state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub hash: String,
    pub from_timestamp: String,
    pub to_timestamp: String,
    errors: FormErrors,
}

impl SearchForm {
    /// Create a form pre-filled from initial values
    pub fn new(initial: &SearchParams) -> Self {
        Self {
            hash: initial.hash.clone().unwrap_or_default(),
            from_timestamp: initial.from_timestamp.clone().unwrap_or_default(),
            to_timestamp: initial.to_timestamp.clone().unwrap_or_default(),
            errors: FormErrors::default(),
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Clear the errors related to an edited input
    pub fn field_changed(&mut self, field: FormField) {
        match field {
            FormField::Hash => self.errors.hash = None,
            FormField::FromTimestamp => {
                self.errors.from_timestamp = None;
                self.errors.date_range = None;
            }
            FormField::ToTimestamp => {
                self.errors.to_timestamp = None;
                self.errors.date_range = None;
            }
        }
    }

    /// Search is disabled while a fetch is running or any error is shown
    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && !self.errors.any()
    }

    pub fn can_reset(&self, is_loading: bool) -> bool {
        !is_loading
    }

    /// Validate the inputs. Returns the parameters to search with, or `None` when an
    /// inline error was set.
    pub fn submit(&mut self) -> Option<SearchParams> {
        self.errors.hash = validate_hash(&self.hash).err().map(|e| e.to_string());

        let from = self.normalized_bound(FormField::FromTimestamp);
        let to = self.normalized_bound(FormField::ToTimestamp);

        self.errors.date_range = match (&from, &to) {
            (Ok(Some(_)), Ok(Some(_))) => validate_date_range(&self.from_timestamp, &self.to_timestamp)
                .err()
                .map(|e| e.to_string()),
            _ => None,
        };

        if self.errors.any() {
            tracing::debug!(errors = ?self.errors, "Search form rejected");
            return None;
        }

        Some(SearchParams {
            hash: Some(self.hash.clone()).filter(|h| !h.is_empty()),
            from_timestamp: from.ok().flatten(),
            to_timestamp: to.ok().flatten(),
            page: None,
            page_size: None,
        })
    }

    /// Clear every input and error; the caller searches with the returned empty params
    pub fn reset(&mut self) -> SearchParams {
        *self = Self::default();
        SearchParams::default()
    }

    fn normalized_bound(&mut self, field: FormField) -> Result<Option<String>, ValidationError> {
        let (input, slot) = match field {
            FormField::FromTimestamp => (&self.from_timestamp, &mut self.errors.from_timestamp),
            FormField::ToTimestamp => (&self.to_timestamp, &mut self.errors.to_timestamp),
            FormField::Hash => return Ok(None),
        };
        if input.trim().is_empty() {
            *slot = None;
            return Ok(None);
        }
        match normalize_date_input(input) {
            Ok(normalized) => {
                *slot = None;
                Ok(Some(normalized))
            }
            Err(e) => {
                *slot = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_hash() -> String {
        format!("0x{}", "a".repeat(64))
    }

    // ==================== hash validation tests ====================

    #[test]
    fn test_validate_hash_accepts_valid_hashes() {
        let samples = [
            valid_hash(),
            format!("0x{}", "F".repeat(64)),
            "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060".to_string(),
            "0x5C504ED432CB51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060".to_string(),
        ];
        for hash in samples {
            assert!(validate_hash(&hash).is_ok(), "{} should be valid", hash);
            assert!(parse_tx_hash(&hash).is_ok());
        }
    }

    #[test]
    fn test_validate_hash_rejects_invalid_hashes() {
        let samples = [
            "0xabc".to_string(),
            "a".repeat(66),
            format!("0X{}", "a".repeat(64)),
            format!("0x{}", "a".repeat(63)),
            format!("0x{}", "a".repeat(65)),
            format!("0x{}g", "a".repeat(63)),
            format!(" 0x{}", "a".repeat(64)),
            format!("0x{} ", "a".repeat(64)),
            format!("0x{}é", "a".repeat(62)),
            "0x".to_string(),
        ];
        for hash in samples {
            assert_eq!(
                validate_hash(&hash),
                Err(ValidationError::InvalidHash),
                "{:?} should be rejected",
                hash
            );
        }
    }

    #[test]
    fn test_validate_hash_empty_is_accepted() {
        assert!(validate_hash("").is_ok());
        assert!(parse_tx_hash("").is_err());
    }

    #[test]
    fn test_parse_tx_hash_bytes() {
        let hash = parse_tx_hash(&valid_hash()).unwrap();
        assert_eq!(hash.as_bytes(), &[0xaa; 32]);
    }

    // ==================== date tests ====================

    #[test]
    fn test_parse_date_input_formats() {
        assert!(parse_date_input("2024-01-02").is_ok());
        assert!(parse_date_input("2024-01-02T10:30").is_ok());
        assert!(parse_date_input("2024-01-02T10:30:15").is_ok());
        assert!(parse_date_input("2024-01-02 10:30").is_ok());
        assert!(parse_date_input("2024-01-02T10:30:00Z").is_ok());
        assert!(parse_date_input("2024-01-02T10:30:00+02:00").is_ok());
        assert!(parse_date_input("next tuesday").is_err());
        assert!(parse_date_input("2024-13-40").is_err());
    }

    #[test]
    fn test_parse_date_input_keeps_explicit_offset() {
        let dt = parse_date_input("2024-01-02T10:30:00+02:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_normalize_date_input_is_rfc3339() {
        let normalized = normalize_date_input("2024-01-02").unwrap();
        let reparsed = DateTime::parse_from_rfc3339(&normalized).unwrap();
        assert_eq!(reparsed, parse_date_input("2024-01-02").unwrap());
        assert!(normalized.starts_with("2024-01-0"));
    }

    #[test]
    fn test_validate_date_range() {
        assert_eq!(
            validate_date_range("2024-01-02", "2024-01-01"),
            Err(ValidationError::InvertedRange)
        );
        assert!(validate_date_range("2024-01-01", "2024-01-02").is_ok());
        assert!(validate_date_range("2024-01-01", "2024-01-01").is_ok());
        assert!(validate_date_range("2024-01-01T10:00", "2024-01-01T09:59").is_err());
        assert!(validate_date_range("", "2024-01-01").is_ok());
        assert!(validate_date_range("2024-01-01", "").is_ok());
        assert!(validate_date_range("", "").is_ok());
        assert!(validate_date_range("  ", "2024-01-01").is_ok());
        assert!(validate_date_range("2024-01-01", "\t").is_ok());
    }

    #[test]
    fn test_validate_date_range_compares_instants() {
        // 10:00+02:00 is 08:00Z, which is before 09:00Z
        assert!(validate_date_range("2024-01-01T10:00:00+02:00", "2024-01-01T09:00:00Z").is_ok());
        assert!(validate_date_range("2024-01-01T10:00:00Z", "2024-01-01T11:00:00+02:00").is_err());
    }

    // ==================== SearchForm tests ====================

    #[test]
    fn test_submit_short_hash_sets_error_and_emits_nothing() {
        let mut form = SearchForm::default();
        form.hash = "0xabc".into();
        assert!(form.submit().is_none());
        assert!(form.errors().hash.is_some());
        assert!(!form.can_submit(false));
    }

    #[test]
    fn test_submit_valid_hash_emits_params() {
        let mut form = SearchForm::default();
        form.hash = valid_hash();
        let params = form.submit().unwrap();
        assert_eq!(params.hash, Some(valid_hash()));
        assert!(params.from_timestamp.is_none());
        assert!(params.to_timestamp.is_none());
        assert!(!form.errors().any());
    }

    #[test]
    fn test_submit_inverted_range_sets_range_error() {
        let mut form = SearchForm::default();
        form.from_timestamp = "2024-01-02".into();
        form.to_timestamp = "2024-01-01".into();
        assert!(form.submit().is_none());
        assert_eq!(
            form.errors().date_range.as_deref(),
            Some("From date must be before or equal to To date")
        );
        assert!(form.errors().hash.is_none());
    }

    #[test]
    fn test_submit_normalizes_dates() {
        let mut form = SearchForm::default();
        form.from_timestamp = "2024-01-01".into();
        form.to_timestamp = "2024-01-02T12:00".into();
        let params = form.submit().unwrap();
        let from = params.from_timestamp.unwrap();
        let to = params.to_timestamp.unwrap();
        assert!(DateTime::parse_from_rfc3339(&from).is_ok());
        assert!(DateTime::parse_from_rfc3339(&to).is_ok());
        assert!(params.hash.is_none());
    }

    #[test]
    fn test_submit_single_bound() {
        let mut form = SearchForm::default();
        form.to_timestamp = "2024-03-01".into();
        let params = form.submit().unwrap();
        assert!(params.from_timestamp.is_none());
        assert!(params.to_timestamp.is_some());
    }

    #[test]
    fn test_submit_unparseable_date_sets_field_error() {
        let mut form = SearchForm::default();
        form.from_timestamp = "yesterday".into();
        form.to_timestamp = "2024-01-01".into();
        assert!(form.submit().is_none());
        assert!(form.errors().from_timestamp.is_some());
        assert!(form.errors().date_range.is_none());
    }

    #[test]
    fn test_field_changed_clears_related_errors() {
        let mut form = SearchForm::default();
        form.hash = "0xabc".into();
        form.from_timestamp = "2024-01-02".into();
        form.to_timestamp = "2024-01-01".into();
        assert!(form.submit().is_none());
        assert!(form.errors().hash.is_some());
        assert!(form.errors().date_range.is_some());

        form.field_changed(FormField::ToTimestamp);
        assert!(form.errors().date_range.is_none());
        assert!(form.errors().hash.is_some());

        form.field_changed(FormField::Hash);
        assert!(!form.errors().any());
        assert!(form.can_submit(false));
    }

    #[test]
    fn test_can_submit_blocked_while_loading() {
        let form = SearchForm::default();
        assert!(form.can_submit(false));
        assert!(!form.can_submit(true));
        assert!(!form.can_reset(true));
        assert!(form.can_reset(false));
    }

    #[test]
    fn test_reset_clears_everything_and_emits_empty_params() {
        let mut form = SearchForm::default();
        form.hash = "0xabc".into();
        form.from_timestamp = "2024-01-02".into();
        form.to_timestamp = "2024-01-01".into();
        assert!(form.submit().is_none());

        let params = form.reset();
        assert!(params.is_empty());
        assert_eq!(form, SearchForm::default());
        assert!(!form.errors().any());
    }

    #[test]
    fn test_new_prefills_initial_values() {
        let initial = SearchParams {
            hash: Some(valid_hash()),
            from_timestamp: Some("2024-01-01".into()),
            ..Default::default()
        };
        let form = SearchForm::new(&initial);
        assert_eq!(form.hash, valid_hash());
        assert_eq!(form.from_timestamp, "2024-01-01");
        assert!(form.to_timestamp.is_empty());
    }

    #[test]
    fn test_end_to_end_search_scenario() {
        let mut form = SearchForm::default();

        form.hash = "0xabc".into();
        assert!(form.submit().is_none());
        assert!(form.errors().hash.is_some());

        form.hash = valid_hash();
        form.field_changed(FormField::Hash);
        let params = form.submit().unwrap();
        assert_eq!(params.hash.as_deref(), Some(valid_hash().as_str()));
        assert!(!form.errors().any());

        form.hash.clear();
        form.field_changed(FormField::Hash);
        form.from_timestamp = "2024-01-02".into();
        form.to_timestamp = "2024-01-01".into();
        assert!(form.submit().is_none());
        assert!(form.errors().date_range.is_some());

        assert!(form.reset().is_empty());
        assert!(form.hash.is_empty() && form.from_timestamp.is_empty() && form.to_timestamp.is_empty());
    }
}
