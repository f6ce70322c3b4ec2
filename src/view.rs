//! Pagination cursor and power extrema over the visible records

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Allowed rows-per-page options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::TwentyFive, PageSize::Hundred];

    pub fn rows(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Hundred => 100,
        }
    }

    pub fn from_rows(rows: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.rows() == rows)
    }

    pub fn next(self) -> Self {
        match self {
            PageSize::Ten => PageSize::TwentyFive,
            PageSize::TwentyFive | PageSize::Hundred => PageSize::Hundred,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PageSize::Ten | PageSize::TwentyFive => PageSize::Ten,
            PageSize::Hundred => PageSize::TwentyFive,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows())
    }
}

/// Page cursor. The page index is not bounded here; a page past the end
/// simply selects zero rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: PageSize,
}

impl Pagination {
    pub fn new(page_size: PageSize) -> Self {
        Self { page: 0, page_size }
    }

    /// Index range of the current page within the filtered sequence
    pub fn range(&self, filtered_count: usize) -> Range<usize> {
        let size = self.page_size.rows();
        let start = self.page.saturating_mul(size).min(filtered_count);
        let end = start.saturating_add(size).min(filtered_count);
        start..end
    }

    /// Number of pages needed for `filtered_count` rows
    pub fn page_count(&self, filtered_count: usize) -> usize {
        filtered_count.div_ceil(self.page_size.rows())
    }

    pub fn last_page(&self, filtered_count: usize) -> usize {
        self.page_count(filtered_count).saturating_sub(1)
    }

    pub fn has_next(&self, filtered_count: usize) -> bool {
        self.page.saturating_add(1) < self.page_count(filtered_count)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// "from–to of count" as shown next to pagination controls
    pub fn label(&self, filtered_count: usize) -> String {
        let range = self.range(filtered_count);
        let from = if range.is_empty() { 0 } else { range.start + 1 };
        let to = if range.is_empty() { 0 } else { range.end };
        format!("{from}\u{2013}{to} of {filtered_count}")
    }
}

/// Which records the observed power extrema are folded over
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremaScope {
    /// Only the records on the current page
    #[default]
    Page,
    /// Every record in the filtered sequence
    Filtered,
}

impl ExtremaScope {
    pub fn toggle(self) -> Self {
        match self {
            ExtremaScope::Page => ExtremaScope::Filtered,
            ExtremaScope::Filtered => ExtremaScope::Page,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExtremaScope::Page => "page",
            ExtremaScope::Filtered => "filtered",
        }
    }
}

/// Observed minimum/maximum power; both unset until a well-formed record is seen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerExtrema {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl PowerExtrema {
    pub fn is_unset(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Fold over records, skipping malformed power
    pub fn fold<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        records
            .into_iter()
            .filter_map(Record::power)
            .fold(Self::default(), |acc, power| Self {
                min: Some(acc.min.map_or(power, |min| min.min(power))),
                max: Some(acc.max.map_or(power, |max| max.max(power))),
            })
    }

    /// Extrema for the given scope over `filtered` (indices into `records`)
    pub fn observe(
        records: &[Record],
        filtered: &[usize],
        pagination: &Pagination,
        scope: ExtremaScope,
    ) -> Self {
        let in_scope = match scope {
            ExtremaScope::Page => filtered.get(pagination.range(filtered.len())).unwrap_or(&[]),
            ExtremaScope::Filtered => filtered,
        };
        Self::fold(in_scope.iter().filter_map(|&idx| records.get(idx)))
    }
}
