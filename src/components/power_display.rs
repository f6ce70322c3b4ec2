use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Span,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::filter_bar::FILTER_BAR_HEIGHT;
use super::{
    Component, FilterBar, FilterBarProps, PageControls, PageControlsProps, RecordTable,
    RecordTableProps, ACCENT_GOLD, ACCENT_RED,
};
use crate::action::Action;
use crate::state::{AppState, InputFocus};

/// Props for PowerDisplay - read-only view of state
pub struct PowerDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: filters, table, pagination and key hints
pub struct PowerDisplay {
    filter_bar: FilterBar,
    page_controls: PageControls,
    status_bar: StatusBar,
}

impl Default for PowerDisplay {
    fn default() -> Self {
        Self {
            filter_bar: FilterBar::new(),
            page_controls: PageControls,
            status_bar: StatusBar::new(),
        }
    }
}

impl PowerDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn table_title(state: &AppState) -> String {
        format!(" {} ", state.source)
    }

    fn empty_message(state: &AppState) -> String {
        if state.dataset.is_loading() || state.dataset.is_empty() {
            "Loading dataset...".to_string()
        } else if state.dataset.is_failed() {
            "No data (load failed)".to_string()
        } else if state.records().is_empty() {
            "Dataset is empty".to_string()
        } else if state.filtered_count() == 0 {
            "No records match the filters".to_string()
        } else {
            "No records on this page".to_string()
        }
    }

    fn status_text(state: &AppState) -> (String, Style) {
        if let Some(error) = state.dataset.error() {
            return (
                format!("Load failed: {error}"),
                Style::default().fg(ACCENT_RED),
            );
        }
        if state.dataset.is_loading() {
            return (
                "Loading dataset...".to_string(),
                Style::default().fg(ACCENT_GOLD),
            );
        }
        (
            format!(
                "{} of {} records",
                state.filtered_count(),
                state.records().len()
            ),
            Style::default().fg(ACCENT_GOLD),
        )
    }

    fn hints(focus: InputFocus) -> Vec<StatusBarHint<'static>> {
        if focus.is_editing() {
            vec![
                StatusBarHint::new("Enter/Esc", "done"),
                StatusBarHint::new("Tab", "switch input"),
            ]
        } else {
            vec![
                StatusBarHint::new("/", "search"),
                StatusBarHint::new("t", "threshold"),
                StatusBarHint::new("\u{2190}/\u{2192}", "page"),
                StatusBarHint::new("+/-", "rows"),
                StatusBarHint::new("e", "extrema"),
                StatusBarHint::new("q", "quit"),
            ]
        }
    }
}

impl Component<Action> for PowerDisplay {
    type Props<'a> = PowerDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;

        if state.focus.is_editing() {
            let filter_props = FilterBarProps {
                filter: &state.filter,
                extrema: state.extrema,
                extrema_scope: state.extrema_scope,
                focus: state.focus,
            };
            return self
                .filter_bar
                .handle_event(event, filter_props)
                .into_iter()
                .collect();
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('/') => return vec![Action::UiFocus(InputFocus::Search)],
                KeyCode::Char('t') => return vec![Action::UiFocus(InputFocus::Threshold)],
                KeyCode::Char('e') => return vec![Action::UiToggleExtremaScope],
                KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
                _ => {}
            }
        }

        let page_props = PageControlsProps {
            pagination: state.pagination,
            count: state.filtered_count(),
            is_focused: true,
        };
        self.page_controls
            .handle_event(event, page_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PowerDisplayProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(FILTER_BAR_HEIGHT), // Filters + extrema
            Constraint::Min(3),                    // Table
            Constraint::Length(1),                 // Pagination
            Constraint::Length(1),                 // Help bar
        ])
        .split(area);

        self.filter_bar.render(
            frame,
            chunks[0],
            FilterBarProps {
                filter: &state.filter,
                extrema: state.extrema,
                extrema_scope: state.extrema_scope,
                focus: state.focus,
            },
        );

        let page = state.page_records();
        let title = Self::table_title(state);
        let empty_message = Self::empty_message(state);
        let mut table = RecordTable;
        table.render(
            frame,
            chunks[1],
            RecordTableProps {
                records: &page,
                empty_message: &empty_message,
                title: &title,
            },
        );

        self.page_controls.render(
            frame,
            chunks[2],
            PageControlsProps {
                pagination: state.pagination,
                count: state.filtered_count(),
                is_focused: props.is_focused && !state.focus.is_editing(),
            },
        );

        let (status, status_style) = Self::status_text(state);
        let status_items = [StatusBarItem::span(Span::styled(status.as_str(), status_style))];
        let hints = Self::hints(state.focus);
        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::hints(&hints).with_separator("  "),
                center: StatusBarSection::empty(),
                right: StatusBarSection::items(&status_items),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
