use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SendClicked => submit(&mut state),
        Msg::EnterPressed { shift } => {
            if shift {
                // Shift+Enter is reserved for inserting a newline; the shell
                // edits the textarea and follows up with InputChanged.
                Vec::new()
            } else {
                submit(&mut state)
            }
        }
        Msg::SubmitFinished {
            submission_id,
            delivered,
        } => {
            state.finish_submission(submission_id, delivered);
            Vec::new()
        }
    };

    (state, effects)
}

/// Shared submit path for the button click and the Enter key.
fn submit(state: &mut AppState) -> Vec<Effect> {
    let question = state.trimmed_input().to_owned();
    if question.is_empty() {
        // Whitespace-only input is ignored silently, matching the guard
        // that also keeps the Send button disabled.
        return Vec::new();
    }

    let submission_id = state.begin_submission(&question);
    vec![Effect::SubmitQuery {
        submission_id,
        question,
    }]
}
