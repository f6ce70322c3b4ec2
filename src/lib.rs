//! Powerdex - paginated, filterable creature stat table
//!
//! The library holds the data model, filter engine, view state and
//! components; `main.rs` wires them into a tui-dispatch runtime.

pub mod action;
pub mod components;
pub mod effect;
pub mod filter;
pub mod loader;
pub mod record;
pub mod reducer;
pub mod state;
pub mod view;
