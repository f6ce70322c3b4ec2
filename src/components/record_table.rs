use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_HEADER, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::record::{format_power, format_stat, Record};

/// Column identifiers, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnId {
    Id,
    Name,
    Kind,
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Power,
}

/// Table column definition
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub id: ColumnId,
    pub label: &'static str,
    pub min_width: u16,
    pub align: Alignment,
}

const fn column(id: ColumnId, label: &'static str, min_width: u16, align: Alignment) -> Column {
    Column {
        id,
        label,
        min_width,
        align,
    }
}

pub const COLUMNS: [Column; 10] = [
    column(ColumnId::Id, "ID", 5, Alignment::Left),
    column(ColumnId::Name, "Name", 12, Alignment::Left),
    column(ColumnId::Kind, "Type", 10, Alignment::Right),
    column(ColumnId::Hp, "Health", 6, Alignment::Right),
    column(ColumnId::Attack, "Attack", 6, Alignment::Right),
    column(ColumnId::Defense, "Defense", 7, Alignment::Right),
    column(ColumnId::SpecialAttack, "Sp. Attack", 10, Alignment::Right),
    column(ColumnId::SpecialDefense, "Sp. Defense", 11, Alignment::Right),
    column(ColumnId::Speed, "Speed", 5, Alignment::Right),
    column(ColumnId::Power, "Power", 5, Alignment::Right),
];

/// Display text of one cell. Power is computed here, at render time.
pub fn cell_text(record: &Record, column: ColumnId) -> String {
    match column {
        ColumnId::Id => record.id.to_string(),
        ColumnId::Name => record.name.clone(),
        ColumnId::Kind => record.kind.clone(),
        ColumnId::Hp => format_stat(record.hp),
        ColumnId::Attack => format_stat(record.attack),
        ColumnId::Defense => format_stat(record.defense),
        ColumnId::SpecialAttack => format_stat(record.special_attack),
        ColumnId::SpecialDefense => format_stat(record.special_defense),
        ColumnId::Speed => format_stat(record.speed),
        ColumnId::Power => format_power(record.power()),
    }
}

/// Read-only table of the current page
pub struct RecordTable;

pub struct RecordTableProps<'a> {
    pub records: &'a [&'a Record],
    /// Shown under the header when there are no rows
    pub empty_message: &'a str,
    pub title: &'a str,
}

impl Component<Action> for RecordTable {
    type Props<'a> = RecordTableProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: RecordTableProps<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(props.title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM));
        let inner = block.inner(area);

        let header = Row::new(
            COLUMNS
                .iter()
                .map(|col| Cell::from(Line::from(col.label).alignment(col.align))),
        )
        .style(
            Style::default()
                .bg(BG_HEADER)
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        );

        let rows = props.records.iter().map(|record| {
            Row::new(COLUMNS.iter().map(|col| {
                let text = cell_text(record, col.id);
                let line = Line::from(text).alignment(col.align);
                if col.id == ColumnId::Power {
                    Cell::from(line).style(Style::default().fg(ACCENT_GOLD))
                } else {
                    Cell::from(line)
                }
            }))
        });

        let widths = COLUMNS.iter().map(|col| Constraint::Min(col.min_width));
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1);
        frame.render_widget(table, area);

        if props.records.is_empty() && inner.height > 1 {
            let note_area = Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            };
            let note = Paragraph::new(props.empty_message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM));
            frame.render_widget(note, note_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn pika() -> Record {
        Record::new(25, "Pika", "Electric", 35, 55, 40, 50, 50, 90)
    }

    #[test]
    fn test_cell_text_power() {
        let record = pika();
        assert_eq!(cell_text(&record, ColumnId::Power), "320");
        assert_eq!(cell_text(&record, ColumnId::Id), "25");
        assert_eq!(cell_text(&record, ColumnId::Kind), "Electric");
    }

    #[test]
    fn test_cell_text_malformed_power() {
        let record = Record {
            attack: None,
            ..pika()
        };
        assert_eq!(cell_text(&record, ColumnId::Attack), "NaN");
        assert_eq!(cell_text(&record, ColumnId::Power), "NaN");
    }

    #[test]
    fn test_render_rows() {
        let mut render = RenderHarness::new(120, 10);
        let mut component = RecordTable;
        let record = pika();
        let records = [&record];

        let output = render.render_to_string_plain(|frame| {
            let props = RecordTableProps {
                records: &records,
                empty_message: "No records",
                title: "Records",
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Health"), "header missing:\n{output}");
        assert!(output.contains("Pika"));
        assert!(output.contains("320"));
        assert!(!output.contains("No records"));
    }

    #[test]
    fn test_render_empty() {
        let mut render = RenderHarness::new(120, 10);
        let mut component = RecordTable;

        let output = render.render_to_string_plain(|frame| {
            let props = RecordTableProps {
                records: &[],
                empty_message: "No records",
                title: "Records",
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Power"));
        assert!(output.contains("No records"));
    }
}
