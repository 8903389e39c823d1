use crate::{SubmissionId, SubmissionStatus};

/// Maximum number of characters shown per question in the activity pane.
pub const QUESTION_PREVIEW_CHARS: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Whether the Send button accepts a click: trimmed input is non-empty.
    pub send_enabled: bool,
    pub submissions: Vec<SubmissionRowView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRowView {
    pub submission_id: SubmissionId,
    pub question_preview: String,
    pub status: SubmissionStatus,
}
