//! Theme controller: explicit user choice vs host preference.

use crate::store::{KeyValueStore, keys};
use crate::types::Theme;

/// Resolved theme state for one visitor.
///
/// With no stored choice the theme follows the host's light/dark preference,
/// including live changes to it. Once the user toggles, the choice is stored
/// and host changes no longer apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    explicit: Option<Theme>,
    host_prefers_dark: bool,
}

impl ThemeState {
    /// Read the stored choice. Resolving the default never writes.
    ///
    /// An unrecognised stored value is ignored and the host preference applies.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, host_prefers_dark: bool) -> Self {
        let explicit = store.load(keys::THEME).and_then(|raw| match raw.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unknown stored theme");
                None
            }
        });
        Self {
            explicit,
            host_prefers_dark,
        }
    }

    #[must_use]
    pub fn current(self) -> Theme {
        self.explicit
            .unwrap_or_else(|| Theme::from_dark(self.host_prefers_dark))
    }

    /// Whether the user has stored a choice.
    #[must_use]
    pub const fn is_explicit(self) -> bool {
        self.explicit.is_some()
    }

    /// Flip the theme and store it as the user's choice.
    pub fn toggle<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Theme {
        let next = self.current().toggled();
        self.set(store, next);
        next
    }

    /// Store `theme` as the user's choice.
    pub fn set<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, theme: Theme) {
        self.explicit = Some(theme);
        if let Err(e) = store.save(keys::THEME, theme.as_str()) {
            tracing::warn!(error = %e, theme = %theme, "Failed to persist theme");
        }
    }

    /// The host reported a new preference.
    ///
    /// Returns the theme now in effect if the change applied, or `None` when a
    /// stored choice overrides it.
    pub const fn host_preference_changed(&mut self, prefers_dark: bool) -> Option<Theme> {
        self.host_prefers_dark = prefers_dark;
        if self.explicit.is_some() {
            None
        } else {
            Some(Theme::from_dark(prefers_dark))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_default_follows_host() {
        let store = MemoryStore::new();
        assert_eq!(ThemeState::load(&store, true).current(), Theme::Dark);
        assert_eq!(ThemeState::load(&store, false).current(), Theme::Light);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_stored_choice_wins() {
        let store = MemoryStore::new().with_entry(keys::THEME, "light");
        let state = ThemeState::load(&store, true);
        assert!(state.is_explicit());
        assert_eq!(state.current(), Theme::Light);
    }

    #[test]
    fn test_unknown_stored_value_is_ignored() {
        let store = MemoryStore::new().with_entry(keys::THEME, "solarized");
        let state = ThemeState::load(&store, true);
        assert!(!state.is_explicit());
        assert_eq!(state.current(), Theme::Dark);
    }

    #[test]
    fn test_host_change_applies_without_choice() {
        let store = MemoryStore::new();
        let mut state = ThemeState::load(&store, false);
        assert_eq!(state.host_preference_changed(true), Some(Theme::Dark));
        assert_eq!(state.current(), Theme::Dark);
    }

    #[test]
    fn test_toggle_then_host_change_is_ignored() {
        let mut store = MemoryStore::new();
        let mut state = ThemeState::load(&store, false);

        assert_eq!(state.toggle(&mut store), Theme::Dark);
        assert_eq!(store.get(keys::THEME), Some("dark"));

        assert_eq!(state.host_preference_changed(false), None);
        assert_eq!(state.current(), Theme::Dark);

        let reloaded = ThemeState::load(&store, false);
        assert_eq!(reloaded.current(), Theme::Dark);
    }
}
