use pretty_assertions::assert_eq;
use querent_engine::{viewer_url, QueryId, QueryRequest, CONTEXT_PROMPT};
use serde_json::json;

#[test]
fn payload_has_exact_wire_shape() {
    let query_id = QueryId::generate();
    let request = QueryRequest::for_question("  What is reincarnation?  ", &query_id);

    let value = serde_json::to_value(&request).expect("serialize request");
    assert_eq!(
        value,
        json!({
            "engine_id": "multihop",
            "user_query": format!(
                "<relevant_context>{CONTEXT_PROMPT}</relevant_context>What is reincarnation?"
            ),
            "keywords": [],
            "repo_names": ["FoxRefire/spiritualism-md-scraped"],
            "additional_context": "",
            "query_id": query_id.tagged(),
            "use_notes": false,
            "generate_summary": false,
        })
    );
}

#[test]
fn query_id_wire_form_is_underscore_tagged() {
    let query_id = QueryId::generate();
    let tagged = query_id.tagged();

    assert!(tagged.starts_with('_'));
    // The remainder is a hyphenated v4 UUID.
    assert_eq!(tagged.len(), 1 + 36);
}

#[test]
fn viewer_url_shares_the_query_id() {
    let query_id = QueryId::generate();
    let request = QueryRequest::for_question("question", &query_id);
    let url = viewer_url(&query_id);

    let suffix = url
        .rsplit('/')
        .next()
        .expect("viewer url has a path segment");
    assert_eq!(suffix, request.query_id);
    assert_eq!(
        url,
        format!("https://deepwiki.com/search/{}", request.query_id)
    );
    // The identifier behind the underscore is what the viewer correlates on.
    assert_eq!(
        suffix.strip_prefix('_'),
        request.query_id.strip_prefix('_')
    );
}

#[test]
fn generated_ids_are_independent() {
    let first = QueryId::generate();
    let second = QueryId::generate();
    assert_ne!(first, second);
}
