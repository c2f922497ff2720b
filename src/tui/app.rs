use crate::config::Config;
use crate::exchange::{self, ExchangeClient};
use crate::session::{Session, SAMPLE_QUESTIONS};
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

/// UI state on top of the conversation session.
pub(crate) struct ChatApp {
    pub(crate) session: Session,
    /// Transcript scroll offset in wrapped lines; clamped during draw.
    pub(crate) scroll: u16,
    /// Follow the newest turn unless the user scrolled away.
    pub(crate) stick_to_bottom: bool,
    pub(crate) spinner_frame: usize,
}

impl ChatApp {
    fn new() -> Self {
        Self {
            session: Session::new(),
            scroll: 0,
            stick_to_bottom: true,
            spinner_frame: 0,
        }
    }
}

/// Completions delivered back from spawned exchange tasks.
enum AppEvent {
    ExchangeDone {
        message: String,
        outcome: anyhow::Result<String>,
    },
}

/// What a key press asks the event loop to do beyond state edits.
#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    None,
    Submit,
    Quit,
}

/// Open the chat screen and run until the user exits.
pub async fn run(config: Config) -> Result<()> {
    let client = exchange::create_client(&config);

    enable_raw_mode()?;
    std::io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, client).await;

    // Restore the terminal even when the loop errored.
    disable_raw_mode().ok();
    let _ = std::io::stdout().execute(LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    client: Arc<dyn ExchangeClient>,
) -> Result<()> {
    let mut app = ChatApp::new();
    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut tick = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| super::ui::draw(frame, &mut app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if key.kind == KeyEventKind::Release {
                            continue;
                        }
                        match handle_key(&mut app, key) {
                            KeyAction::Quit => break,
                            KeyAction::Submit => spawn_exchange(&mut app, &client, &tx),
                            KeyAction::None => {}
                        }
                    }
                    // Resizes are handled by the redraw at the top of the loop.
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }
            Some(event) = rx.recv() => {
                match event {
                    AppEvent::ExchangeDone { message, outcome } => {
                        app.session.complete_submit(&message, outcome);
                        app.stick_to_bottom = true;
                    }
                }
            }
            _ = tick.tick() => {
                if app.session.is_busy() {
                    app.spinner_frame = app.spinner_frame.wrapping_add(1);
                }
            }
        }
    }

    Ok(())
}

/// Begin a submission and run the exchange on a spawned task. The session
/// stays editable; the completion arrives back through the channel.
fn spawn_exchange(
    app: &mut ChatApp,
    client: &Arc<dyn ExchangeClient>,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let Some(message) = app.session.begin_submit() else {
        return;
    };
    let history = app.session.transcript().to_vec();
    let client = Arc::clone(client);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = client.exchange(&history, &message).await;
        let _ = tx.send(AppEvent::ExchangeDone { message, outcome });
    });
}

fn handle_key(app: &mut ChatApp, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyAction::Quit;
        }

        // Enter submits only without modifiers; Shift/Alt/Ctrl+Enter is ignored.
        KeyCode::Enter if key.modifiers.is_empty() => return KeyAction::Submit,
        KeyCode::Enter => {}

        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.session.clear() {
                app.scroll = 0;
                app.stick_to_bottom = true;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.session.set_pending_input("");
        }

        // F1-F4 load a sample question into the input without submitting.
        KeyCode::F(n @ 1..=4) => {
            app.session
                .set_pending_input(SAMPLE_QUESTIONS[(n - 1) as usize]);
        }

        KeyCode::Backspace => {
            let mut input = app.session.pending_input().to_string();
            input.pop();
            app.session.set_pending_input(input);
        }

        KeyCode::Up => {
            app.stick_to_bottom = false;
            app.scroll = app.scroll.saturating_sub(1);
        }
        KeyCode::Down => {
            app.scroll = app.scroll.saturating_add(1);
        }
        KeyCode::End => {
            app.stick_to_bottom = true;
        }

        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let mut input = app.session.pending_input().to_string();
            input.push(c);
            app.session.set_pending_input(input);
        }

        _ => {}
    }
    KeyAction::None
}
