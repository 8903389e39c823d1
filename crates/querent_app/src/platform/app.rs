use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use querent_core::{update, AppState, Msg};
use ratatui::backend::Backend;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Terminal;
use tui_textarea::TextArea;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui;

pub fn run_app() -> Result<()> {
    logging::initialize(log_destination_from_args());
    let mut app = App::new();
    app.run()
}

fn log_destination_from_args() -> LogDestination {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--log" {
            if let Some(dest) = args.next().as_deref().and_then(LogDestination::from_arg) {
                return dest;
            }
        }
    }
    // The TUI owns the terminal, so default to the file.
    LogDestination::File
}

struct App<'a> {
    state: AppState,
    textarea: TextArea<'a>,
    send_button: Rect,
    msg_rx: mpsc::Receiver<Msg>,
    runner: EffectRunner,
    should_quit: bool,
    ui_dirty: bool,
}

impl App<'_> {
    fn new() -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(msg_tx);

        let mut textarea = TextArea::default();
        textarea.set_block(Block::default().borders(Borders::ALL).title("Question"));
        textarea.set_placeholder_text("Type a question about the spiritualism corpus");

        Self {
            state: AppState::new(),
            textarea,
            send_button: Rect::default(),
            msg_rx,
            runner,
            should_quit: false,
            // Forces the first frame; afterwards redraws are change-gated.
            ui_dirty: true,
        }
    }

    /// Sets up the terminal, pumps the event loop, and always restores the
    /// terminal afterwards, whether the loop ended cleanly or with an error.
    fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();

        let (event_tx, event_rx) = mpsc::channel();
        let event_loop_running = Arc::new(AtomicBool::new(true));
        let event_loop_flag = Arc::clone(&event_loop_running);

        let event_thread = thread::spawn(move || -> Result<()> {
            while event_loop_flag.load(Ordering::Relaxed) {
                if event::poll(Duration::from_millis(50))? {
                    let event = event::read()?;
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(())
        });

        // Everything fallible is routed through `result` so the restore
        // below runs on every exit path.
        let result = execute!(stdout(), EnableMouseCapture)
            .map_err(anyhow::Error::from)
            .and_then(|()| self.event_loop(&mut terminal, &event_rx));

        ratatui::restore();
        let _ = execute!(stdout(), DisableMouseCapture);

        event_loop_running.store(false, Ordering::Relaxed);
        let reader = match event_thread.join() {
            Ok(join_result) => join_result,
            Err(err) => std::panic::resume_unwind(err),
        };

        result.and(reader)
    }

    /// Pump terminal events and delivery outcomes until the user exits.
    fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event_rx: &mpsc::Receiver<Event>,
    ) -> Result<()> {
        terminal.clear()?;

        loop {
            loop {
                match event_rx.try_recv() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Ok(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                    Ok(Event::Resize(_, _)) => self.ui_dirty = true,
                    Ok(_) => {}
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        return Err(anyhow!("input event channel disconnected"));
                    }
                }
            }

            // Delivery outcomes arrive from the effect runner's thread.
            while let Ok(msg) = self.msg_rx.try_recv() {
                self.dispatch(msg);
            }

            if self.should_quit {
                return Ok(());
            }

            if self.consume_redraw() {
                let view = self.state.view();
                let mut send_button = self.send_button;
                terminal.draw(|frame| {
                    send_button = ui::render::draw(frame, &view, &self.textarea);
                })?;
                self.send_button = send_button;
            }

            thread::sleep(Duration::from_millis(16));
        }
    }

    /// True when the next frame must be drawn; clears both dirty flags.
    ///
    /// The core flag covers state changes (input text, submissions); the
    /// shell flag covers cursor movement and resizes the core never sees.
    fn consume_redraw(&mut self) -> bool {
        let ui_dirty = std::mem::take(&mut self.ui_dirty);
        self.state.consume_dirty() || ui_dirty
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Any keypress can move the cursor, so the frame is stale either way.
        self.ui_dirty = true;
        match classify_key(&key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Submit => {
                // Enter never reaches the textarea, mirroring the original's
                // preventDefault on the keydown handler.
                self.dispatch(Msg::EnterPressed { shift: false });
            }
            KeyAction::InsertNewline => {
                self.textarea.insert_newline();
                let text = self.current_text();
                self.dispatch(Msg::InputChanged(text));
            }
            KeyAction::Edit => {
                if self.textarea.input(key) {
                    let text = self.current_text();
                    self.dispatch(Msg::InputChanged(text));
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if self
                .send_button
                .contains(Position::new(mouse.column, mouse.row))
            {
                // The core re-checks the trimmed input, so a click on a
                // disabled button falls through silently.
                self.dispatch(Msg::SendClicked);
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if !effects.is_empty() {
            self.runner.run(effects);
        }
    }

    fn current_text(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Submit,
    InsertNewline,
    Edit,
}

fn classify_key(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => KeyAction::InsertNewline,
        KeyCode::Enter => KeyAction::Submit,
        _ => KeyAction::Edit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    #[test]
    fn plain_enter_submits() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(classify_key(&key), KeyAction::Submit);
    }

    #[test]
    fn shift_enter_inserts_a_newline_instead() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT);
        assert_eq!(classify_key(&key), KeyAction::InsertNewline);
    }

    #[test]
    fn ordinary_typing_edits_the_textarea() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(classify_key(&key), KeyAction::Edit);
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify_key(&esc), KeyAction::Quit);
        assert_eq!(classify_key(&ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn first_frame_is_forced_then_redraws_wait_for_changes() {
        let mut app = App::new();

        assert!(app.consume_redraw());
        assert!(!app.consume_redraw());

        app.dispatch(Msg::InputChanged("hello".to_string()));
        assert!(app.consume_redraw());
        assert!(!app.consume_redraw());
    }

    #[test]
    fn keypresses_mark_the_frame_stale_even_without_text_changes() {
        let mut app = App::new();
        let _ = app.consume_redraw();

        // Cursor movement edits nothing, so the core stays clean.
        app.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));

        assert!(app.consume_redraw());
    }

    #[test]
    fn escape_ends_the_event_loop_cleanly() {
        let mut app = App::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let (event_tx, event_rx) = mpsc::channel();
        event_tx
            .send(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();

        app.event_loop(&mut terminal, &event_rx)
            .expect("clean exit");
    }

    #[test]
    fn event_loop_surfaces_a_lost_input_channel_as_an_error() {
        let mut app = App::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let (event_tx, event_rx) = mpsc::channel::<Event>();
        drop(event_tx);

        // The error comes back as a value, so the caller's terminal
        // restore still runs.
        let err = app.event_loop(&mut terminal, &event_rx).unwrap_err();
        assert!(err.to_string().contains("input event channel disconnected"));
    }
}
