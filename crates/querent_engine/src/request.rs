use serde::Serialize;
use uuid::Uuid;

/// Backend processing pipeline the service routes the question through.
pub const ENGINE_ID: &str = "multihop";

/// Document corpus the service answers from.
pub const CORPUS_REPO: &str = "FoxRefire/spiritualism-md-scraped";

/// Instructional wrapper prepended to every question. It tells the service
/// to answer from the spiritualism literature in the corpus repository.
pub const CONTEXT_PROMPT: &str =
    "このリポジトリ内のスピリチュアリズム関連文献を参照してユーザーの質問に回答してください";

/// Random identifier correlating a submitted query with its viewer tab.
///
/// The wire form carries a leading underscore; both the POST body's
/// `query_id` and the viewer URL suffix are produced from the same value so
/// the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryId(Uuid);

impl QueryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underscore-tagged wire form, e.g. `_5a1e...`.
    pub fn tagged(&self) -> String {
        format!("_{}", self.0)
    }
}

/// The JSON payload sent to the remote question-answering service.
///
/// Field names are the wire keys; the service accepts nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub engine_id: String,
    pub user_query: String,
    pub keywords: Vec<String>,
    pub repo_names: Vec<String>,
    pub additional_context: String,
    pub query_id: String,
    pub use_notes: bool,
    pub generate_summary: bool,
}

impl QueryRequest {
    /// Builds the payload for one submission. The question is trimmed and
    /// wrapped with [`CONTEXT_PROMPT`]; everything else is fixed.
    pub fn for_question(question: &str, query_id: &QueryId) -> Self {
        Self {
            engine_id: ENGINE_ID.to_string(),
            user_query: format!(
                "<relevant_context>{CONTEXT_PROMPT}</relevant_context>{}",
                question.trim()
            ),
            keywords: Vec::new(),
            repo_names: vec![CORPUS_REPO.to_string()],
            additional_context: String::new(),
            query_id: query_id.tagged(),
            use_notes: false,
            generate_summary: false,
        }
    }
}
