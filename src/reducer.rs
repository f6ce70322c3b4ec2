//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! Every filter or pagination change funnels through here, so the
//! page reset and extrema recomputation cannot be skipped by a caller.

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;
use crate::view::Pagination;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Dataset actions =====
        Action::DatasetFetch => {
            // One retrieval per session: no refetch, no retry.
            if !state.dataset.is_empty() {
                return DispatchResult::unchanged();
            }
            state.dataset = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadDataset {
                source: state.source.clone(),
            })
        }

        Action::DatasetDidLoad(records) => {
            state.dataset = DataResource::Loaded(records);
            state.pagination.page = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::DatasetDidError(msg) => {
            state.dataset = DataResource::Failed(msg);
            state.pagination.page = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // ===== Filter actions =====
        Action::FilterSearchChange(text) => {
            if text == state.filter.search_text {
                return DispatchResult::unchanged();
            }
            state.filter.search_text = text;
            state.pagination.page = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::FilterThresholdChange(value) => {
            if value == state.filter.threshold {
                return DispatchResult::unchanged();
            }
            state.filter.threshold = value;
            state.pagination.page = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // ===== Page actions =====
        Action::PageChange(page) => {
            if page == state.pagination.page {
                return DispatchResult::unchanged();
            }
            state.pagination.page = page;
            state.refresh_extrema();
            DispatchResult::changed()
        }

        Action::PageSizeChange(size) => {
            state.pagination = Pagination::new(size);
            state.refresh_extrema();
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiFocus(focus) => {
            if focus == state.focus {
                return DispatchResult::unchanged();
            }
            state.focus = focus;
            DispatchResult::changed()
        }

        Action::UiToggleExtremaScope => {
            state.extrema_scope = state.extrema_scope.toggle();
            state.refresh_extrema();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DataSource;
    use crate::record::Record;
    use crate::state::InputFocus;
    use crate::view::{ExtremaScope, PageSize};
    use pretty_assertions::assert_eq;

    fn mons(count: u32) -> Vec<Record> {
        (0..count)
            .map(|n| Record::new(i64::from(n), format!("mon{n}"), "Normal", 300 + n, 0, 0, 0, 0, 0))
            .collect()
    }

    fn loaded_state(count: u32) -> AppState {
        let mut state = AppState::default();
        reducer(&mut state, Action::DatasetDidLoad(mons(count)));
        state
    }

    #[test]
    fn test_fetch_sets_loading_once() {
        let mut state = AppState::new(
            DataSource::parse("mons.json"),
            PageSize::Ten,
            ExtremaScope::Page,
        );

        let result = reducer(&mut state, Action::DatasetFetch);
        assert!(result.changed);
        assert!(state.dataset.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::LoadDataset {
                source: DataSource::parse("mons.json"),
            }]
        );

        let again = reducer(&mut state, Action::DatasetFetch);
        assert!(!again.changed);
        assert!(again.effects.is_empty());
    }

    #[test]
    fn test_fetch_after_failure_does_not_retry() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DatasetFetch);
        reducer(&mut state, Action::DatasetDidError("offline".into()));
        assert!(state.dataset.is_failed());
        assert!(state.records().is_empty());
        assert_eq!(state.filtered_count(), 0);

        let result = reducer(&mut state, Action::DatasetFetch);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_load_builds_filter_and_extrema() {
        let state = loaded_state(25);
        assert!(state.dataset.is_loaded());
        assert_eq!(state.filtered_count(), 25);
        assert_eq!(state.extrema.min, Some(300));
        assert_eq!(state.extrema.max, Some(309));
    }

    #[test]
    fn test_page_change_refreshes_extrema() {
        let mut state = loaded_state(25);
        let result = reducer(&mut state, Action::PageChange(2));
        assert!(result.changed);
        assert_eq!(state.pagination.page, 2);
        assert_eq!(state.page_records().len(), 5);
        assert_eq!(state.extrema.min, Some(320));
        assert_eq!(state.extrema.max, Some(324));

        let same = reducer(&mut state, Action::PageChange(2));
        assert!(!same.changed);
    }

    #[test]
    fn test_page_past_end_renders_nothing() {
        let mut state = loaded_state(5);
        reducer(&mut state, Action::PageChange(9));
        assert_eq!(state.pagination.page, 9);
        assert!(state.page_records().is_empty());
        assert!(state.extrema.is_unset());
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut state = loaded_state(250);
        reducer(&mut state, Action::PageChange(4));

        reducer(&mut state, Action::PageSizeChange(PageSize::TwentyFive));
        assert_eq!(state.pagination.page, 0);
        assert_eq!(state.pagination.page_size, PageSize::TwentyFive);
        assert_eq!(state.extrema.max, Some(324));

        reducer(&mut state, Action::PageChange(1));
        reducer(&mut state, Action::PageSizeChange(PageSize::TwentyFive));
        assert_eq!(state.pagination.page, 0);
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut state = loaded_state(25);
        reducer(&mut state, Action::PageChange(2));

        let result = reducer(&mut state, Action::FilterSearchChange("MON1".into()));
        assert!(result.changed);
        assert_eq!(state.pagination.page, 0);
        // mon1, mon10..mon19
        assert_eq!(state.filtered_count(), 11);
        assert_eq!(state.extrema.min, Some(301));
        assert_eq!(state.extrema.max, Some(318));
    }

    #[test]
    fn test_threshold_change_resets_page() {
        let mut state = loaded_state(25);
        reducer(&mut state, Action::PageChange(1));

        reducer(&mut state, Action::FilterThresholdChange("320".into()));
        assert_eq!(state.pagination.page, 0);
        assert_eq!(state.filtered_count(), 5);
        assert_eq!(state.extrema.min, Some(320));

        reducer(&mut state, Action::FilterThresholdChange("abc".into()));
        assert_eq!(state.filtered_count(), 25);
    }

    #[test]
    fn test_unchanged_filter_is_noop() {
        let mut state = loaded_state(25);
        reducer(&mut state, Action::PageChange(1));
        let result = reducer(&mut state, Action::FilterSearchChange(String::new()));
        assert!(!result.changed);
        assert_eq!(state.pagination.page, 1);
    }

    #[test]
    fn test_toggle_extrema_scope() {
        let mut state = loaded_state(25);
        reducer(&mut state, Action::PageChange(1));
        assert_eq!(state.extrema.min, Some(310));

        reducer(&mut state, Action::UiToggleExtremaScope);
        assert_eq!(state.extrema_scope, ExtremaScope::Filtered);
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.extrema.min, Some(300));
        assert_eq!(state.extrema.max, Some(324));

        reducer(&mut state, Action::UiToggleExtremaScope);
        assert_eq!(state.extrema.min, Some(310));
        assert_eq!(state.extrema.max, Some(319));
    }

    #[test]
    fn test_focus() {
        let mut state = AppState::default();
        assert!(reducer(&mut state, Action::UiFocus(InputFocus::Search)).changed);
        assert!(!reducer(&mut state, Action::UiFocus(InputFocus::Search)).changed);
        assert_eq!(state.focus, InputFocus::Search);
    }
}
