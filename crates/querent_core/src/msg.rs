#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the question input box (full current text).
    InputChanged(String),
    /// User clicked the Send button.
    SendClicked,
    /// User pressed Enter in the input box. Shift+Enter inserts a newline
    /// instead of submitting; the shell reports the modifier here.
    EnterPressed { shift: bool },
    /// Delivery outcome for an earlier submission. The response body is
    /// never inspected; this only says whether the POST went through.
    SubmitFinished {
        submission_id: crate::SubmissionId,
        delivered: bool,
    },
}
