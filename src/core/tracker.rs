/// Single-slot memories of the last status and error messages sent.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    last_status: Option<String>,
    last_error: Option<String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and remembers `message` when it differs from the last one.
    pub fn should_notify_status(&mut self, message: &str) -> bool {
        Self::remember_if_changed(&mut self.last_status, message)
    }

    pub fn should_notify_error(&mut self, message: &str) -> bool {
        Self::remember_if_changed(&mut self.last_error, message)
    }

    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn remember_if_changed(slot: &mut Option<String>, message: &str) -> bool {
        if slot.as_deref() == Some(message) {
            return false;
        }
        *slot = Some(message.to_string());
        true
    }
}
