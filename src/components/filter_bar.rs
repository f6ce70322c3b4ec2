use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::filter::FilterState;
use crate::state::InputFocus;
use crate::view::{ExtremaScope, PowerExtrema};

/// Rows taken by the filter bar: bordered inputs + extrema line
pub const FILTER_BAR_HEIGHT: u16 = 4;

/// Name search and power threshold inputs, plus the observed extrema
pub struct FilterBar {
    search_input: TextInput,
    threshold_input: TextInput,
}

pub struct FilterBarProps<'a> {
    pub filter: &'a FilterState,
    pub extrema: PowerExtrema,
    pub extrema_scope: ExtremaScope,
    pub focus: InputFocus,
}

impl Default for FilterBar {
    fn default() -> Self {
        Self {
            search_input: TextInput::new(),
            threshold_input: TextInput::new(),
        }
    }
}

impl FilterBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_style() -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            placeholder_style: Some(Style::default().fg(TEXT_DIM)),
            cursor_style: Some(Style::default().bg(ACCENT_GOLD).fg(BG_PANEL)),
        }
    }

    fn input_block(title: &str, is_focused: bool) -> Block<'_> {
        let border = if is_focused {
            Style::default().fg(ACCENT_TEAL)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
    }

    fn extrema_line(props: &FilterBarProps<'_>) -> Line<'static> {
        let value = |power: Option<u32>| match power {
            Some(power) => power.to_string(),
            None => "-".to_string(),
        };
        let threshold_note = if props.filter.threshold.trim().is_empty()
            || props.filter.threshold_value().is_some()
        {
            Span::raw("")
        } else {
            Span::styled(
                "   threshold ignored (not a number)",
                Style::default().fg(ACCENT_RED),
            )
        };
        Line::from(vec![
            Span::styled(" Minimum Power: ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                value(props.extrema.min),
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Maximum Power: ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                value(props.extrema.max),
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   ({})", props.extrema_scope.label()),
                Style::default().fg(TEXT_DIM),
            ),
            threshold_note,
        ])
    }
}

fn submit_input(_: String) -> Action {
    Action::UiFocus(InputFocus::Table)
}

impl Component<Action> for FilterBar {
    type Props<'a> = FilterBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.focus.is_editing() {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::UiFocus(InputFocus::Table)],
            KeyCode::Tab | KeyCode::BackTab => {
                let other = match props.focus {
                    InputFocus::Search => InputFocus::Threshold,
                    _ => InputFocus::Search,
                };
                return vec![Action::UiFocus(other)];
            }
            _ => {}
        }

        // All other keys go to the focused input
        let (input, value, on_change, placeholder): (_, _, fn(String) -> Action, _) =
            match props.focus {
                InputFocus::Threshold => (
                    &mut self.threshold_input,
                    props.filter.threshold.as_str(),
                    Action::FilterThresholdChange,
                    "minimum power",
                ),
                _ => (
                    &mut self.search_input,
                    props.filter.search_text.as_str(),
                    Action::FilterSearchChange,
                    "name contains...",
                ),
            };
        let input_props = TextInputProps {
            value,
            placeholder,
            is_focused: true,
            style: Self::input_style(),
            on_change,
            on_submit: submit_input,
            on_cursor_move: Some(|_| Action::Render),
        };
        input.handle_event(event, input_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: FilterBarProps<'_>) {
        let rows = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(area);
        let inputs =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[0]);

        let search_focused = props.focus == InputFocus::Search;
        let block = Self::input_block("Search by Name (/)", search_focused);
        let inner = block.inner(inputs[0]);
        frame.render_widget(block, inputs[0]);
        self.search_input.render(
            frame,
            inner,
            TextInputProps {
                value: &props.filter.search_text,
                placeholder: "name contains...",
                is_focused: search_focused,
                style: Self::input_style(),
                on_change: Action::FilterSearchChange,
                on_submit: submit_input,
                on_cursor_move: Some(|_| Action::Render),
            },
        );

        let threshold_focused = props.focus == InputFocus::Threshold;
        let block = Self::input_block("Search by Power Threshold (t)", threshold_focused);
        let inner = block.inner(inputs[1]);
        frame.render_widget(block, inputs[1]);
        self.threshold_input.render(
            frame,
            inner,
            TextInputProps {
                value: &props.filter.threshold,
                placeholder: "minimum power",
                is_focused: threshold_focused,
                style: Self::input_style(),
                on_change: Action::FilterThresholdChange,
                on_submit: submit_input,
                on_cursor_move: Some(|_| Action::Render),
            },
        );

        frame.render_widget(Paragraph::new(Self::extrema_line(&props)), rows[1]);
    }
}
