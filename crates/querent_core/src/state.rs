use crate::view_model::{AppViewModel, SubmissionRowView, QUESTION_PREVIEW_CHARS};

pub type SubmissionId = u64;

/// Delivery status of one submission, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// POST handed to the engine; outcome not yet reported.
    Sent,
    /// The POST completed. The answer itself lives in the viewer tab.
    Delivered,
    /// The POST failed. The viewer tab was opened regardless.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SubmissionRecord {
    id: SubmissionId,
    question_preview: String,
    status: SubmissionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    next_submission_id: SubmissionId,
    submissions: Vec<SubmissionRecord>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input: String::new(),
            next_submission_id: 1,
            submissions: Vec::new(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            send_enabled: !self.trimmed_input().is_empty(),
            submissions: self
                .submissions
                .iter()
                .map(|record| SubmissionRowView {
                    submission_id: record.id,
                    question_preview: record.question_preview.clone(),
                    status: record.status,
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn trimmed_input(&self) -> &str {
        self.input.trim()
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    /// Allocates the next submission id and records the submission as sent.
    pub(crate) fn begin_submission(&mut self, question: &str) -> SubmissionId {
        let id = self.next_submission_id;
        self.next_submission_id += 1;
        self.submissions.push(SubmissionRecord {
            id,
            question_preview: preview_of(question),
            status: SubmissionStatus::Sent,
        });
        self.dirty = true;
        id
    }

    pub(crate) fn finish_submission(&mut self, id: SubmissionId, delivered: bool) {
        if let Some(record) = self.submissions.iter_mut().find(|record| record.id == id) {
            record.status = if delivered {
                SubmissionStatus::Delivered
            } else {
                SubmissionStatus::Failed
            };
            self.dirty = true;
        }
    }
}

fn preview_of(question: &str) -> String {
    let mut preview: String = question.chars().take(QUESTION_PREVIEW_CHARS).collect();
    if preview.len() < question.len() {
        preview.push('…');
    }
    preview
}
