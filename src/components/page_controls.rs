use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::view::{PageSize, Pagination};

/// Rows-per-page selector and page navigation.
///
/// Navigation is bounded by the reported `count`; the reducer itself
/// accepts any page index.
#[derive(Default)]
pub struct PageControls;

pub struct PageControlsProps {
    pub pagination: Pagination,
    pub count: usize,
    pub is_focused: bool,
}

impl PageControls {
    fn page_action(props: &PageControlsProps, code: KeyCode) -> Option<Action> {
        let Pagination { page, page_size } = props.pagination;
        let last = props.pagination.last_page(props.count);
        match code {
            KeyCode::Left | KeyCode::Char('h') if props.pagination.has_prev() => {
                Some(Action::PageChange((page - 1).min(last)))
            }
            KeyCode::Right | KeyCode::Char('l') if props.pagination.has_next(props.count) => {
                Some(Action::PageChange(page + 1))
            }
            KeyCode::Home | KeyCode::Char('g') if page != 0 => Some(Action::PageChange(0)),
            KeyCode::End | KeyCode::Char('G') if page != last => Some(Action::PageChange(last)),
            KeyCode::Char('+') | KeyCode::Char(']') if page_size.next() != page_size => {
                Some(Action::PageSizeChange(page_size.next()))
            }
            KeyCode::Char('-') | KeyCode::Char('[') if page_size.prev() != page_size => {
                Some(Action::PageSizeChange(page_size.prev()))
            }
            _ => None,
        }
    }
}

impl Component<Action> for PageControls {
    type Props<'a> = PageControlsProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => Self::page_action(&props, key.code),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PageControlsProps) {
        let current = props.pagination.page_size;
        let mut spans = vec![Span::styled("Rows per page: ", Style::default().fg(TEXT_DIM))];
        for size in PageSize::ALL {
            if size == current {
                spans.push(Span::styled(
                    format!("[{size}]"),
                    Style::default()
                        .fg(ACCENT_TEAL)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    format!(" {size} "),
                    Style::default().fg(TEXT_DIM),
                ));
            }
        }

        let pages = props.pagination.page_count(props.count).max(1);
        let prev = if props.pagination.has_prev() { "\u{25c0}" } else { " " };
        let next = if props.pagination.has_next(props.count) {
            "\u{25b6}"
        } else {
            " "
        };
        spans.extend([
            Span::raw("   "),
            Span::styled(
                props.pagination.label(props.count),
                Style::default().fg(TEXT_MAIN),
            ),
            Span::raw("   "),
            Span::styled(prev, Style::default().fg(ACCENT_GOLD)),
            Span::styled(
                format!(" page {}/{} ", props.pagination.page + 1, pages),
                Style::default().fg(TEXT_MAIN),
            ),
            Span::styled(next, Style::default().fg(ACCENT_GOLD)),
        ]);

        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
        frame.render_widget(paragraph, area);
    }
}
