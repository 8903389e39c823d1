#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the results-viewer tab and POST the question to the remote
    /// service. `question` is already trimmed; the query id is generated by
    /// the effect runner so the tab URL and the request body always share it.
    SubmitQuery {
        submission_id: crate::SubmissionId,
        question: String,
    },
}
