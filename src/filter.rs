//! Filter engine: name substring + minimum power threshold

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Raw filter inputs as typed by the user
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub threshold: String,
}

impl FilterState {
    pub fn new(search_text: impl Into<String>, threshold: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            threshold: threshold.into(),
        }
    }

    /// Parsed threshold, `None` when the power predicate is disabled
    pub fn threshold_value(&self) -> Option<f64> {
        parse_threshold(&self.threshold)
    }

    /// Whether a record passes both predicates
    pub fn matches(&self, record: &Record) -> bool {
        let needle = self.search_text.to_lowercase();
        matches_name(record, &needle) && matches_power(record, self.threshold_value())
    }
}

/// Parse threshold input. Empty or non-numeric input disables the filter.
pub fn parse_threshold(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    // `inf` and `NaN` parse as f64 but are not thresholds
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Indices of records passing the filter, in original order
pub fn filter_indices(records: &[Record], filter: &FilterState) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

fn matches_name(record: &Record, needle: &str) -> bool {
    needle.is_empty() || record.name.to_lowercase().contains(needle)
}

// Malformed power never satisfies an active threshold.
fn matches_power(record: &Record, threshold: Option<f64>) -> bool {
    match threshold {
        None => true,
        Some(min) => record
            .power()
            .is_some_and(|power| f64::from(power) >= min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset() -> Vec<Record> {
        vec![
            Record::new(1, "Pika", "Electric", 35, 55, 40, 50, 50, 90),
            Record::new(2, "Raichu", "Electric", 60, 90, 55, 90, 80, 110),
            Record::new(3, "Bulba", "Grass", 45, 49, 49, 65, 65, 45),
            Record::new(4, "Pikachu Libre", "Fighting", 50, 60, 50, 50, 50, 100),
            Record {
                hp: None,
                ..Record::new(5, "Missingno", "Bird", 0, 0, 0, 0, 0, 0)
            },
        ]
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let records = dataset();
        let indices = filter_indices(&records, &FilterState::default());
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn single_record_scenarios() {
        let records = vec![Record::new(1, "Pika", "Electric", 35, 55, 40, 50, 50, 90)];

        let all = filter_indices(&records, &FilterState::new("", ""));
        assert_eq!(all.len(), 1);
        assert_eq!(records[all[0]].power(), Some(320));

        let above = filter_indices(&records, &FilterState::new("", "350"));
        assert!(above.is_empty());

        let lower = filter_indices(&records, &FilterState::new("pika", ""));
        assert_eq!(lower, vec![0]);
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let records = dataset();
        assert_eq!(filter_indices(&records, &FilterState::new("PIKA", "")), vec![0, 3]);
        assert_eq!(filter_indices(&records, &FilterState::new("chu", "")), vec![1, 3]);
        assert!(filter_indices(&records, &FilterState::new("zzz", "")).is_empty());
    }

    #[test]
    fn threshold_is_inclusive_lower_bound() {
        let records = dataset();
        // Pika 320, Raichu 485, Bulba 318, Libre 360
        assert_eq!(filter_indices(&records, &FilterState::new("", "320")), vec![0, 1, 3]);
        assert_eq!(filter_indices(&records, &FilterState::new("", " 361 ")), vec![1]);
    }

    #[test]
    fn non_numeric_threshold_disables_filter() {
        let records = dataset();
        for input in ["", "   ", "abc", "NaN", "12abc", "inf", "-infinity"] {
            assert_eq!(parse_threshold(input), None, "input {input:?}");
            assert_eq!(filter_indices(&records, &FilterState::new("", input)).len(), 5);
        }
    }

    #[test]
    fn malformed_power_excluded_only_when_threshold_active() {
        let records = dataset();
        assert!(filter_indices(&records, &FilterState::new("missing", "")).contains(&4));
        assert!(filter_indices(&records, &FilterState::new("missing", "0")).is_empty());
    }

    #[test]
    fn filters_compose_as_and() {
        let records = dataset();
        let indices = filter_indices(&records, &FilterState::new("pika", "350"));
        assert_eq!(indices, vec![3]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = dataset();
        let filter = FilterState::new("a", "300");
        let once = filter_indices(&records, &filter);
        let kept: Vec<Record> = once.iter().map(|&idx| records[idx].clone()).collect();
        let twice = filter_indices(&kept, &filter);
        assert_eq!(twice.len(), once.len());
        assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
    }

    #[test]
    fn raising_threshold_never_grows_result() {
        let records = dataset();
        let mut previous = usize::MAX;
        for threshold in [0, 100, 318, 319, 320, 360, 400, 485, 486, 1000] {
            let count =
                filter_indices(&records, &FilterState::new("", threshold.to_string())).len();
            assert!(count <= previous, "threshold {threshold} grew result");
            previous = count;
        }
    }

    #[test]
    fn extending_search_never_grows_result() {
        let records = dataset();
        let mut previous = usize::MAX;
        for search in ["", "p", "pi", "pik", "pika", "pikac", "pikachu"] {
            let count = filter_indices(&records, &FilterState::new(search, "")).len();
            assert!(count <= previous, "search {search:?} grew result");
            previous = count;
        }
    }

    #[test]
    fn matches_single_record() {
        let pika = Record::new(1, "Pika", "Electric", 35, 55, 40, 50, 50, 90);
        assert!(FilterState::new("IK", "320").matches(&pika));
        assert!(!FilterState::new("ik", "321").matches(&pika));
        assert!(!FilterState::new("raichu", "").matches(&pika));
        assert!(FilterState::new("", "inf").matches(&pika));
    }
}
