// File: ./src/tui/mod.rs
// Full-screen deleted-note notice shown after a delete until the follow-up navigation fires.
pub mod view;

use crate::navigation::{History, Route};
use crate::store::NoteStore;
use crate::tui::view::{Countdown, DeletedNoteView};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Extra time to wait past the deadline for the follow-up to land before giving up.
const GRACE: Duration = Duration::from_secs(2);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs `restore` when `result` is an error, then hands the result back.
fn restore_on_err<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn open_terminal() -> io::Result<Term> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    restore_on_err(Terminal::new(CrosstermBackend::new(stdout)), || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    })
}

/// Draws the notice while `history` stays on `route`, counting down to `deadline`
/// (when the follow-up is due; `delay` is the full span). Returns the route that
/// ended it, or `None` when the user quit with `q`/`Esc` or the follow-up never arrived.
pub async fn run_deleted_notice(
    store: &NoteStore,
    history: &History,
    route: Route,
    deadline: Instant,
    delay: Duration,
) -> Result<Option<Route>> {
    enable_raw_mode()?;
    let mut terminal = restore_on_err(open_terminal(), || {
        let _ = disable_raw_mode();
    })?;

    let result = notice_loop(&mut terminal, store, history, &route, deadline, delay).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn notice_loop(
    terminal: &mut Term,
    store: &NoteStore,
    history: &History,
    route: &Route,
    deadline: Instant,
    delay: Duration,
) -> Result<Option<Route>> {
    let mut nav = history.subscribe();

    loop {
        let current = nav.borrow_and_update().clone();
        if &current != route {
            return Ok(Some(current));
        }
        if Instant::now() > deadline + GRACE {
            log::warn!("Follow-up navigation from {} never arrived", route);
            return Ok(None);
        }

        let state = store.snapshot();
        terminal.draw(|f| {
            let countdown = Countdown::until(deadline, delay);
            f.render_widget(DeletedNoteView::from_state(&state, countdown), f.area());
        })?;

        // Poll input without blocking the runtime worker that fires the follow-up.
        let input = tokio::task::spawn_blocking(|| -> io::Result<Option<Event>> {
            if event::poll(Duration::from_millis(100))? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        })
        .await??;

        if let Some(Event::Key(key)) = input
            && key.kind != KeyEventKind::Release
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        {
            return Ok(None);
        }
    }
}
