use std::sync::{mpsc, Arc};
use std::thread;

use crate::submit::{QuerySender, ReqwestSender, SubmitSettings};
use crate::{EngineEvent, QueryRequest, SubmissionId};

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        request: QueryRequest,
    },
}

/// Handle to the delivery thread. Submissions are accepted without blocking;
/// each one runs as an independent task, so a second submission never waits
/// on the first and nothing is de-duplicated.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Spawns the runtime thread and returns the handle plus the stream of
    /// completion events.
    pub fn spawn(settings: SubmitSettings) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let sender = Arc::new(ReqwestSender::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let sender = sender.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(sender.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn submit(&self, submission_id: SubmissionId, request: QueryRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            submission_id,
            request,
        });
    }
}

async fn handle_command(
    sender: &dyn QuerySender,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            submission_id,
            request,
        } => {
            let result = sender.send(&request).await;
            let _ = event_tx.send(EngineEvent::SubmitCompleted {
                submission_id,
                result,
            });
        }
    }
}
