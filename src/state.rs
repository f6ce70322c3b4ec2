//! Application state - single source of truth

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::filter::{filter_indices, FilterState};
use crate::loader::DataSource;
use crate::record::Record;
use crate::view::{ExtremaScope, PageSize, Pagination, PowerExtrema};

/// Which widget receives key input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFocus {
    #[default]
    Table,
    Search,
    Threshold,
}

impl InputFocus {
    pub fn is_editing(self) -> bool {
        self != InputFocus::Table
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    /// Where the dataset is retrieved from
    pub source: DataSource,

    /// Dataset lifecycle: Empty → Loading → Loaded/Failed
    pub dataset: DataResource<Vec<Record>>,

    pub filter: FilterState,
    pub pagination: Pagination,

    /// Indices into the dataset passing the current filter
    pub filtered_indices: Vec<usize>,

    pub extrema_scope: ExtremaScope,
    /// Derived from the records in `extrema_scope`; never edited directly
    pub extrema: PowerExtrema,

    pub focus: InputFocus,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DataSource::default(), PageSize::default(), ExtremaScope::default())
    }
}

impl AppState {
    pub fn new(source: DataSource, page_size: PageSize, extrema_scope: ExtremaScope) -> Self {
        Self {
            source,
            dataset: DataResource::Empty,
            filter: FilterState::default(),
            pagination: Pagination::new(page_size),
            filtered_indices: Vec::new(),
            extrema_scope,
            extrema: PowerExtrema::default(),
            focus: InputFocus::Table,
        }
    }

    /// The full dataset; empty until loaded (and after a failed load)
    pub fn records(&self) -> &[Record] {
        self.dataset.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_indices.len()
    }

    /// Records on the current page, in filtered order
    pub fn page_records(&self) -> Vec<&Record> {
        let records = self.records();
        self.filtered_indices
            .get(self.pagination.range(self.filtered_count()))
            .unwrap_or(&[])
            .iter()
            .filter_map(|&idx| records.get(idx))
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.filtered_count())
    }

    /// Recompute the filtered sequence, then the extrema
    pub fn rebuild_filtered(&mut self) {
        self.filtered_indices = filter_indices(self.records(), &self.filter);
        self.refresh_extrema();
    }

    /// Reset the extrema and fold them again over the current scope
    pub fn refresh_extrema(&mut self) {
        self.extrema = PowerExtrema::observe(
            self.records(),
            &self.filtered_indices,
            &self.pagination,
            self.extrema_scope,
        );
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Dataset")
                .entry("source", ron_string(&self.source.to_string()))
                .entry("loading", ron_string(&self.dataset.is_loading()))
                .entry("total", ron_string(&self.records().len()))
                .entry("error", ron_string(&self.dataset.error())),
            DebugSection::new("Filters")
                .entry("search", ron_string(&self.filter.search_text))
                .entry("threshold", ron_string(&self.filter.threshold))
                .entry("threshold_active", ron_string(&self.filter.threshold_value().is_some()))
                .entry("filtered", ron_string(&self.filtered_count()))
                .entry("focus", ron_string(&self.focus)),
            DebugSection::new("View")
                .entry("page", ron_string(&self.pagination.page))
                .entry("page_size", ron_string(&self.pagination.page_size.rows()))
                .entry("page_count", ron_string(&self.page_count()))
                .entry("extrema_scope", ron_string(&self.extrema_scope))
                .entry("min_power", ron_string(&self.extrema.min))
                .entry("max_power", ron_string(&self.extrema.max)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(records: Vec<Record>) -> AppState {
        let mut state = AppState {
            dataset: DataResource::Loaded(records),
            ..Default::default()
        };
        state.rebuild_filtered();
        state
    }

    #[test]
    fn records_empty_until_loaded() {
        let state = AppState::default();
        assert!(state.records().is_empty());
        assert!(state.page_records().is_empty());
        assert!(state.extrema.is_unset());

        let failed = AppState {
            dataset: DataResource::Failed("boom".into()),
            ..Default::default()
        };
        assert!(failed.records().is_empty());
    }

    #[test]
    fn page_records_follow_filtered_order() {
        let records = (0..25)
            .map(|n| Record::new(n, format!("mon{n}"), "Normal", 10, 0, 0, 0, 0, 0))
            .collect();
        let mut state = loaded(records);
        state.pagination.page = 2;
        let page: Vec<String> = state.page_records().iter().map(|r| r.name.clone()).collect();
        assert_eq!(page.len(), 5);
        assert_eq!(page.first().map(String::as_str), Some("mon20"));
        assert_eq!(page.last().map(String::as_str), Some("mon24"));
    }

    #[test]
    fn debug_sections_cover_view_state() {
        let state = AppState::default();
        let sections = state.debug_sections();
        assert_eq!(sections.len(), 3);
    }
}
