//! Open/closed state of the create and edit forms.

/// What the form will do on submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalMode {
    /// Create a new record.
    #[default]
    Create,
    /// Update an existing record.
    Edit,
    /// Re-run a stored forecast with new settings.
    Regenerate,
}

impl ModalMode {
    /// Lowercase name, as the form components expect it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Regenerate => "regenerate",
        }
    }
}

/// Form dialog state: whether it is open, in which mode, and for which record.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState<T> {
    open: bool,
    mode: ModalMode,
    current: Option<T>,
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        Self {
            open: false,
            mode: ModalMode::Create,
            current: None,
        }
    }
}

impl<T> ModalState<T> {
    /// Opens an empty form.
    pub fn open_create(&mut self) {
        self.open = true;
        self.mode = ModalMode::Create;
        self.current = None;
    }

    /// Opens the form prefilled with `record`.
    pub fn open_edit(&mut self, record: T) {
        self.open = true;
        self.mode = ModalMode::Edit;
        self.current = Some(record);
    }

    /// Opens the regenerate form for `record`.
    pub fn open_regenerate(&mut self, record: T) {
        self.open = true;
        self.mode = ModalMode::Regenerate;
        self.current = Some(record);
    }

    /// Closes the form. The mode and record are kept until the next open.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the form is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> ModalMode {
        self.mode
    }

    /// Record being edited, if any.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes() {
        let mut modal = ModalState::default();
        assert!(!modal.is_open());

        modal.open_edit("row");
        assert_eq!(modal.mode(), ModalMode::Edit);
        assert_eq!(modal.current(), Some(&"row"));

        modal.open_create();
        assert_eq!(modal.mode().as_str(), "create");
        assert_eq!(modal.current(), None);

        modal.open_regenerate("doc");
        modal.close();
        assert!(!modal.is_open());
        assert_eq!(modal.mode(), ModalMode::Regenerate);
    }
}
