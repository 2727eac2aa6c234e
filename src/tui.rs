use color_eyre::eyre::Result;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent, KeyEvent,
        KeyEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::{FutureExt, Stream, StreamExt};
use ratatui::backend::CrosstermBackend as Backend;
use std::{
    io,
    ops::{Deref, DerefMut},
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Paste(String),
    Resize,
    /// The texts have been left alone long enough to look for words.
    Suggest,
    /// The terminal stopped delivering input.
    Closed,
    Error(String),
}

pub struct Tui {
    terminal: ratatui::Terminal<Backend<std::io::Stderr>>,
    cancellation_token: CancellationToken,
    event_tx: UnboundedSender<Event>,
    event_rx: UnboundedReceiver<Event>,
}

impl Tui {
    pub fn start() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stderr(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::Hide
        )?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cancellation_token = CancellationToken::new();
        start_events(cancellation_token.clone(), event_tx.clone());
        Ok(Self {
            terminal: ratatui::Terminal::new(Backend::new(std::io::stderr()))?,
            cancellation_token,
            event_tx,
            event_rx,
        })
    }

    /// A handle for posting events from outside the terminal reader.
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.event_tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }
}

fn start_events(
    cancellation_token: CancellationToken,
    event_tx: UnboundedSender<Event>,
) -> JoinHandle<()> {
    tokio::spawn(forward_events(
        crossterm::event::EventStream::new(),
        cancellation_token,
        event_tx,
    ))
}

/// Forwards terminal input until cancelled. A failing or exhausted stream is
/// reported as a final event so the receiver never waits on a dead reader.
async fn forward_events(
    reader: impl Stream<Item = io::Result<CrosstermEvent>>,
    cancellation_token: CancellationToken,
    event_tx: UnboundedSender<Event>,
) {
    let mut reader = std::pin::pin!(reader);
    loop {
        let crossterm_event = reader.next().fuse();
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                break;
            }
            maybe_event = crossterm_event => {
                let event = match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Some(Ok(CrosstermEvent::Paste(text))) => Event::Paste(text),
                    Some(Ok(CrosstermEvent::Resize(_, _))) => Event::Resize,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        tracing::error!("terminal event stream failed: {e}");
                        let _unused = event_tx.send(Event::Error(e.to_string()));
                        break;
                    }
                    None => {
                        tracing::warn!("terminal event stream ended");
                        let _unused = event_tx.send(Event::Closed);
                        break;
                    }
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            },
        }
    }
}

impl Deref for Tui {
    type Target = ratatui::Terminal<Backend<std::io::Stderr>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if crossterm::terminal::is_raw_mode_enabled().unwrap_or_default() {
            let _unused = self.terminal.flush();
        }
        restore();
        self.cancellation_token.cancel();
    }
}

pub fn restore() {
    if crossterm::terminal::is_raw_mode_enabled().unwrap_or_default() {
        let _unused = crossterm::execute!(
            std::io::stderr(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            cursor::Show
        );
        let _unused = crossterm::terminal::disable_raw_mode();
    }
}
