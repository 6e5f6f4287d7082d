//! Session-related types.
//!
//! Types stored in the browsing session. Durable visitor data (cart, theme)
//! lives in cookies instead; see [`crate::storage`].

use serde::{Deserialize, Serialize};

use technest_core::UiState;

/// Per-tab widget state kept for the browsing session only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorSession {
    /// Cart panel and toast state.
    pub ui: UiState,
    /// Last color scheme the browser reported, if any.
    pub prefers_dark: Option<bool>,
}

/// Session keys for visitor data.
pub mod keys {
    /// Key for the visitor's widget state.
    pub const VISITOR: &str = "visitor";
}
