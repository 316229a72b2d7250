//! Timestamp codec for text-encoded columns.
//!
//! SQLite hands timestamps back as text, and not always in the layout we
//! wrote: columns filled by a `datetime('now')` default use a bare
//! "date space time" layout, and legacy rows may carry a date alone. The
//! codec writes one canonical layout and reads all three.
//!
//! # Precision contract
//!
//! The canonical write layout carries second precision. Any sub-second
//! component of the in-memory value is truncated on write, so round-trips
//! are exact at second granularity and only there. Reads accept fractional
//! seconds (layout 1) and preserve them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::foundation::{RepositoryError, Timestamp};

/// Layout every write uses: RFC 3339 with the UTC designator, seconds.
const CANONICAL_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Layout of columns filled by the store's `datetime('now')` default.
/// No zone designator; the store's clock is taken as UTC.
const STORE_DEFAULT_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only layout, decoded as midnight UTC.
const DATE_ONLY_LAYOUT: &str = "%Y-%m-%d";

/// Encodes an instant into the canonical column text.
pub(crate) fn encode(ts: &Timestamp) -> String {
    ts.as_datetime().format(CANONICAL_LAYOUT).to_string()
}

/// Encodes an optional instant; absence becomes the store's NULL, never a
/// textual zero value.
pub(crate) fn encode_opt(ts: Option<&Timestamp>) -> Option<String> {
    ts.map(encode)
}

/// Decodes column text, trying each recognized layout in priority order.
///
/// # Errors
///
/// - `MalformedTimestamp` if no layout matches
pub(crate) fn decode(text: &str) -> Result<Timestamp, RepositoryError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(Timestamp::from_datetime(dt.with_timezone(&Utc)));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, STORE_DEFAULT_LAYOUT) {
        return Ok(Timestamp::from_datetime(naive.and_utc()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_ONLY_LAYOUT) {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        return Ok(Timestamp::from_datetime(midnight.and_utc()));
    }

    Err(RepositoryError::MalformedTimestamp {
        value: text.to_string(),
    })
}

/// Decodes an optional column; NULL becomes absence, not an error.
pub(crate) fn decode_opt(text: Option<&str>) -> Result<Option<Timestamp>, RepositoryError> {
    text.map(decode).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use proptest::prelude::*;

    #[test]
    fn canonical_layout_roundtrips_exactly_at_second_granularity() {
        let instant = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 19, 5, 0).unwrap());
        let encoded = encode(&instant);

        assert_eq!(encoded, "2024-01-15T19:05:00Z");
        assert_eq!(decode(&encoded).unwrap(), instant);
    }

    #[test]
    fn encode_truncates_subseconds() {
        let with_nanos = Timestamp::from_datetime(
            Utc.with_ymd_and_hms(2025, 11, 30, 14, 42, 19)
                .unwrap()
                .with_nanosecond(123_456_789)
                .unwrap(),
        );

        let decoded = decode(&encode(&with_nanos)).unwrap();

        assert_ne!(decoded, with_nanos);
        assert_eq!(decoded, with_nanos.truncated_to_seconds());
    }

    #[test]
    fn decode_accepts_store_default_layout() {
        let decoded = decode("2025-11-30 14:42:19").unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 11, 30, 14, 42, 19).unwrap();
        assert_eq!(decoded.as_datetime(), &expected);
    }

    #[test]
    fn decode_accepts_date_only_layout_as_midnight_utc() {
        let decoded = decode("2024-03-01").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(decoded.as_datetime(), &expected);
    }

    #[test]
    fn decode_accepts_fractional_seconds_and_offsets() {
        let fractional = decode("2025-11-30T14:42:19.123456789Z").unwrap();
        assert_eq!(fractional.as_datetime().nanosecond(), 123_456_789);

        let offset = decode("2025-11-30T16:42:19+02:00").unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 11, 30, 14, 42, 19).unwrap();
        assert_eq!(offset.as_datetime(), &expected);
    }

    #[test]
    fn decode_rejects_unrecognized_text() {
        let err = decode("30/11/2025 14:42").unwrap_err();
        assert!(matches!(err, RepositoryError::MalformedTimestamp { .. }));
    }

    #[test]
    fn null_column_decodes_to_absence() {
        assert_eq!(decode_opt(None).unwrap(), None);
    }

    #[test]
    fn absence_encodes_to_null_marker() {
        assert_eq!(encode_opt(None), None);
    }

    proptest! {
        #[test]
        fn every_second_precision_instant_roundtrips(secs in 0i64..4_000_000_000) {
            let instant = Timestamp::from_datetime(Utc.timestamp_opt(secs, 0).unwrap());
            prop_assert_eq!(decode(&encode(&instant)).unwrap(), instant);
        }
    }
}
