#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to save changes.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} issue(s) remaining");
    }

    pub fn submitting(&mut self) {
        self.message = "Saving changes…".to_string();
    }

    pub fn already_submitting(&mut self) {
        self.message = "A save is already in progress".to_string();
    }

    pub fn reset(&mut self) {
        self.message = "Form cleared".to_string();
    }

    pub fn pending_exit(&mut self) {
        self.message = "Save still in progress. Press Ctrl+Q again to quit anyway.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
