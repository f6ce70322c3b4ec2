//! Actions - every input event the table reacts to

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::state::InputFocus;
use crate::view::PageSize;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    // ===== Dataset category =====
    /// Intent: retrieve the dataset (only honoured once per session)
    DatasetFetch,

    /// Result: dataset parsed successfully
    DatasetDidLoad(Vec<Record>),

    /// Result: retrieval or parse failed
    DatasetDidError(String),

    // ===== Filter category =====
    /// Name search text changed
    FilterSearchChange(String),

    /// Power threshold text changed
    FilterThresholdChange(String),

    // ===== Page category =====
    /// Jump to a page index
    PageChange(usize),

    /// Switch rows per page (resets to the first page)
    PageSizeChange(PageSize),

    // ===== UI category =====
    /// Move key input to a widget
    UiFocus(InputFocus),

    /// Switch extrema between page and filtered scope
    UiToggleExtremaScope,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Exit the application
    Quit,
}
