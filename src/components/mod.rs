//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome while reading/writing the stores provided
//! through Leptos context in `app`.

pub mod dictionary_picker;
pub mod nav_bar;
