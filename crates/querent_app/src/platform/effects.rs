use std::sync::mpsc;
use std::thread;

use querent_core::{Effect, Msg, SubmissionId};
use querent_engine::{
    viewer_url, EngineEvent, EngineHandle, QueryId, QueryRequest, SubmitSettings,
};
use querent_logging::{submit_info, submit_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
        let (engine, events) = EngineHandle::spawn(SubmitSettings::default());
        spawn_event_loop(events, msg_tx);
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitQuery {
                    submission_id,
                    question,
                } => self.submit(submission_id, &question),
            }
        }
    }

    fn submit(&self, submission_id: SubmissionId, question: &str) {
        let (url, request) = submission_plan(question);
        submit_info!(
            "Submission {} query_id={} question_len={}",
            submission_id,
            request.query_id,
            question.len()
        );

        // The viewer tab opens first and polls for the answer on its own;
        // delivery failures must not take it back.
        open_viewer(&url);
        self.engine.submit(submission_id, request);
    }
}

/// One fresh query id drives both sides of a submission: the viewer URL and
/// the request body's `query_id`.
fn submission_plan(question: &str) -> (String, QueryRequest) {
    let query_id = QueryId::generate();
    (
        viewer_url(&query_id),
        QueryRequest::for_question(question, &query_id),
    )
}

fn open_viewer(url: &str) {
    if let Err(err) = open::that_detached(url) {
        // The POST still goes out; the user can open the page by hand.
        submit_warn!("Could not open browser at {}: {}", url, err);
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            match event {
                EngineEvent::SubmitCompleted {
                    submission_id,
                    result,
                } => {
                    let delivered = match result {
                        Ok(()) => true,
                        Err(err) => {
                            submit_warn!("Submission {} failed: {}", submission_id, err);
                            false
                        }
                    };
                    let _ = msg_tx.send(Msg::SubmitFinished {
                        submission_id,
                        delivered,
                    });
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::submission_plan;

    #[test]
    fn plan_ties_viewer_url_to_query_id() {
        let (url, request) = submission_plan("What is reincarnation?");

        let suffix = url.rsplit('/').next().unwrap();
        assert_eq!(suffix, request.query_id);
        assert!(suffix.starts_with('_'));
    }

    #[test]
    fn each_plan_gets_its_own_identifier() {
        let (first_url, first) = submission_plan("same question");
        let (second_url, second) = submission_plan("same question");

        assert_ne!(first.query_id, second.query_id);
        assert_ne!(first_url, second_url);
        assert_eq!(first.user_query, second.user_query);
    }
}
