pub mod filter_bar;
pub mod page_controls;
pub mod power_display;
pub mod record_table;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use filter_bar::{FilterBar, FilterBarProps};
pub use page_controls::{PageControls, PageControlsProps};
pub use power_display::{PowerDisplay, PowerDisplayProps};
pub use record_table::{cell_text, Column, ColumnId, RecordTable, RecordTableProps, COLUMNS};

use ratatui::style::Color;

pub(crate) const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub(crate) const BG_HEADER: Color = Color::Rgb(26, 40, 58);
pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub(crate) const ACCENT_RED: Color = Color::Rgb(232, 96, 88);
