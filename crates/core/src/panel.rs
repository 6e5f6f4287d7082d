//! Cart side-panel open/close state.

use serde::{Deserialize, Serialize};

/// Key that dismisses the panel while it is open.
pub const ESCAPE_KEY: &str = "Escape";

/// Two-state panel machine. Animation is left to the stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

/// Presentation side effects of the current panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEffects {
    /// The cart sidebar is shown.
    pub panel_visible: bool,
    /// The dimming overlay behind the sidebar is shown.
    pub overlay_visible: bool,
    /// Page background scrolling is suppressed.
    pub scroll_locked: bool,
}

impl PanelState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Open the panel. Returns `true` if the state changed.
    pub const fn open(&mut self) -> bool {
        let changed = !self.is_open();
        *self = Self::Open;
        changed
    }

    /// Close the panel. Returns `true` if the state changed.
    pub const fn close(&mut self) -> bool {
        let changed = self.is_open();
        *self = Self::Closed;
        changed
    }

    /// Handle a key press. Only Escape while open does anything.
    pub fn handle_key(&mut self, key: &str) -> bool {
        key == ESCAPE_KEY && self.close()
    }

    #[must_use]
    pub const fn effects(self) -> PanelEffects {
        let open = self.is_open();
        PanelEffects {
            panel_visible: open,
            overlay_visible: open,
            scroll_locked: open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_transitions() {
        let mut panel = PanelState::default();
        assert!(!panel.is_open());
        assert!(panel.open());
        assert!(!panel.open());
        assert!(panel.is_open());
        assert!(panel.close());
        assert!(!panel.close());
    }

    #[test]
    fn test_effects_mirror_state() {
        let open = PanelState::Open.effects();
        assert!(open.panel_visible && open.overlay_visible && open.scroll_locked);

        let closed = PanelState::Closed.effects();
        assert!(!closed.panel_visible && !closed.overlay_visible && !closed.scroll_locked);
    }

    #[test]
    fn test_escape_closes_only_when_open() {
        let mut panel = PanelState::Closed;
        assert!(!panel.handle_key("Escape"));
        assert_eq!(panel, PanelState::Closed);

        panel.open();
        assert!(!panel.handle_key("Enter"));
        assert!(panel.is_open());
        assert!(panel.handle_key("Escape"));
        assert!(!panel.is_open());
    }
}
