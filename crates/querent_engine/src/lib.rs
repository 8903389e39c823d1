//! Querent engine: query payload construction and fire-and-forget delivery.
mod engine;
mod request;
mod submit;
mod types;
mod viewer;

pub use engine::EngineHandle;
pub use request::{QueryId, QueryRequest, CONTEXT_PROMPT, CORPUS_REPO, ENGINE_ID};
pub use submit::{QuerySender, ReqwestSender, SubmitSettings, QUERY_ENDPOINT};
pub use types::{EngineEvent, FailureKind, SubmissionId, SubmitError};
pub use viewer::{viewer_url, VIEWER_BASE};
