//! Date facet.

use tracing::warn;

use annotation_indexer_shared::{DateRange, Record};

use super::scalar_text;

/// The raw date values of a top-tier record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFields {
    pub actual: Option<String>,
    pub not_before: Option<String>,
    pub not_after: Option<String>,
}

impl DateFields {
    /// Read the date values at the given dotted paths.
    pub fn from_record(record: &Record, actual: &str, not_before: &str, not_after: &str) -> Self {
        let read = |path: &str| record.path(path).and_then(scalar_text);
        Self {
            actual: read(actual),
            not_before: read(not_before),
            not_after: read(not_after),
        }
    }
}

/// Build the date range of a record.
///
/// An exact date wins over the bounds; a record carrying both is logged as
/// inconsistent. Without an exact date the range is built from whichever
/// bounds exist. Returns `None` when there is no date information at all.
pub fn contrive_date(fields: &DateFields) -> Option<DateRange> {
    if let Some(actual) = &fields.actual {
        if fields.not_before.is_some() || fields.not_after.is_some() {
            warn!(
                date = %actual,
                not_before = ?fields.not_before,
                not_after = ?fields.not_after,
                "Exact date combined with date bounds, using the exact date"
            );
        }
        return Some(DateRange::exact(actual.clone()));
    }

    let range = DateRange::between(fields.not_before.clone(), fields.not_after.clone());
    (!range.is_empty()).then_some(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(actual: Option<&str>, not_before: Option<&str>, not_after: Option<&str>) -> DateFields {
        DateFields {
            actual: actual.map(str::to_string),
            not_before: not_before.map(str::to_string),
            not_after: not_after.map(str::to_string),
        }
    }

    #[test]
    fn test_exact_date_wins() {
        let expected = Some(DateRange::exact("1610-05-02"));

        assert_eq!(contrive_date(&fields(Some("1610-05-02"), None, None)), expected);
        assert_eq!(
            contrive_date(&fields(Some("1610-05-02"), Some("1609"), Some("1611"))),
            expected
        );
    }

    #[test]
    fn test_bounds_only() {
        assert_eq!(
            contrive_date(&fields(None, Some("1610"), None)),
            Some(DateRange::between(Some("1610".to_string()), None))
        );
        assert_eq!(
            contrive_date(&fields(None, Some("1610"), Some("1612-03"))),
            Some(DateRange::between(
                Some("1610".to_string()),
                Some("1612-03".to_string())
            ))
        );
    }

    #[test]
    fn test_no_date() {
        assert_eq!(contrive_date(&DateFields::default()), None);
    }

    #[test]
    fn test_from_record() {
        let record = Record::new(json!({
            "body": { "metadata": { "dateSent": "", "dateSentNotBefore": 1610 } }
        }));
        let fields = DateFields::from_record(
            &record,
            "body.metadata.dateSent",
            "body.metadata.dateSentNotBefore",
            "body.metadata.dateSentNotAfter",
        );

        assert_eq!(fields.actual, None);
        assert_eq!(fields.not_before.as_deref(), Some("1610"));
        assert_eq!(fields.not_after, None);
    }
}
