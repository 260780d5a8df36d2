//! Confirmation step in front of destructive actions.

/// Holds the target of a destructive action until the user confirms it.
///
/// Nothing is sent while a target is pending; [`cancel`](Self::cancel) drops
/// it without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmGate<Id> {
    pending: Option<Id>,
    message: String,
}

impl<Id> ConfirmGate<Id> {
    /// Creates a closed gate that will ask `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            pending: None,
            message: message.into(),
        }
    }

    /// Opens the dialog for `id`, replacing any earlier target.
    pub fn request(&mut self, id: Id) {
        self.pending = Some(id);
    }

    /// Closes the dialog and forgets the target.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Closes the dialog and hands out the confirmed target.
    pub fn confirm(&mut self) -> Option<Id> {
        self.pending.take()
    }

    /// The target awaiting confirmation.
    #[must_use]
    pub fn pending(&self) -> Option<&Id> {
        self.pending.as_ref()
    }

    /// Whether the dialog is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Question shown in the dialog.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_hands_out_the_latest_target_once() {
        let mut gate = ConfirmGate::new("Delete?");
        gate.request(3);
        gate.request(4);
        assert!(gate.is_open());
        assert_eq!(gate.confirm(), Some(4));
        assert_eq!(gate.confirm(), None);
        assert!(!gate.is_open());
    }

    #[test]
    fn cancel_forgets_target() {
        let mut gate = ConfirmGate::new("Delete?");
        gate.request("a");
        gate.cancel();
        assert_eq!(gate.pending(), None);
        assert_eq!(gate.message(), "Delete?");
    }
}
