use crate::request::QueryId;

/// Base of the results-viewer page. The page polls the backend for the
/// answer keyed by the tagged query id, so opening it before the POST
/// resolves is fine.
pub const VIEWER_BASE: &str = "https://deepwiki.com/search";

/// URL of the results page for one submission.
pub fn viewer_url(query_id: &QueryId) -> String {
    format!("{VIEWER_BASE}/{}", query_id.tagged())
}
