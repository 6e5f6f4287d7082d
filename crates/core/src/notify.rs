//! Toast notifications.
//!
//! Every [`Notifier::show`] returns a fresh [`HideTicket`]. The host schedules
//! the auto-hide for that ticket after [`TOAST_DURATION`]; when it fires it
//! calls [`Notifier::expire`], which only hides the toast the ticket was issued
//! for. Showing a new toast makes all earlier tickets stale, so a hide
//! scheduled for an old message can never take down a newer one.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a toast stays up before its scheduled hide.
pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Identifies one scheduled hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HideTicket(u64);

impl HideTicket {
    /// Rebuild a ticket echoed back by the host.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

/// The toast currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Text shown to the visitor.
    pub message: String,
    /// Success or error styling.
    pub kind: ToastKind,
    /// Ticket that must be presented to hide this toast.
    pub ticket: HideTicket,
}

/// Single-slot toast state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notifier {
    last_ticket: u64,
    current: Option<Toast>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing whatever is on screen.
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> HideTicket {
        self.last_ticket = self.last_ticket.wrapping_add(1);
        let ticket = HideTicket(self.last_ticket);
        self.current = Some(Toast {
            message: message.into(),
            kind,
            ticket,
        });
        ticket
    }

    /// Run the scheduled hide for `ticket`.
    ///
    /// Returns `true` if the toast was hidden, `false` if the ticket is stale
    /// or nothing is showing.
    pub fn expire(&mut self, ticket: HideTicket) -> bool {
        let is_current = self
            .current
            .as_ref()
            .is_some_and(|toast| toast.ticket == ticket);
        if is_current {
            self.current = None;
        }
        is_current
    }

    /// Hide whatever is showing.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_expire() {
        let mut notifier = Notifier::new();
        let ticket = notifier.show("Đã thêm vào giỏ hàng!", ToastKind::Success);
        assert_eq!(notifier.current().unwrap().message, "Đã thêm vào giỏ hàng!");

        assert!(notifier.expire(ticket));
        assert!(notifier.current().is_none());
        assert!(!notifier.expire(ticket));
    }

    #[test]
    fn test_stale_ticket_does_not_hide_newer_toast() {
        let mut notifier = Notifier::new();
        let first = notifier.show("first", ToastKind::Success);
        let second = notifier.show("second", ToastKind::Error);
        assert_ne!(first, second);

        assert!(!notifier.expire(first));
        let toast = notifier.current().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.kind, ToastKind::Error);

        assert!(notifier.expire(second));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_tickets_survive_serialization() {
        let mut notifier = Notifier::new();
        notifier.show("one", ToastKind::Success);
        let ticket = notifier.show("two", ToastKind::Success);

        let json = serde_json::to_string(&notifier).unwrap();
        let mut restored: Notifier = serde_json::from_str(&json).unwrap();
        let next = restored.show("three", ToastKind::Success);
        assert!(next.get() > ticket.get());
        assert!(!restored.expire(ticket));
    }

    #[test]
    fn test_dismiss() {
        let mut notifier = Notifier::new();
        notifier.show("x", ToastKind::Success);
        notifier.dismiss();
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_duration() {
        assert_eq!(TOAST_DURATION.as_millis(), 2500);
    }
}
