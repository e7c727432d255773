use anyhow::Result;
use notepad::actions::NoteActions;
use notepad::cli::{self, Command};
use notepad::client::NotesClient;
use notepad::config::Config;
use notepad::context::StandardContext;
use notepad::error::ErrorPage;
use notepad::model::Note;
use notepad::navigation::{History, Route};
use notepad::store::NoteStore;
use std::env;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = match cli::parse_args(&args) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("{}\n", e);
            cli::print_help("notepad");
            std::process::exit(2);
        }
    };
    if invocation.command == Command::Help {
        cli::print_help("notepad");
        return Ok(());
    }

    let ctx = StandardContext::new(invocation.root.clone());
    let config = match Config::load_or_default(&ctx) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration:\n{:#}", e);
            std::process::exit(1);
        }
    };
    notepad::logging::init(&ctx, &config.log_level);

    let client = NotesClient::new(&config.base_url, &config.user_agent())?;
    let store = Arc::new(NoteStore::new());
    let history = Arc::new(History::default());
    let errors = Arc::new(ErrorPage::new(history.clone()));
    let actions = NoteActions::new(
        Arc::new(client),
        store.clone(),
        history.clone(),
        errors.clone(),
    )
    .with_follow_up_delay(config.follow_up_delay());

    let outcome = cli::execute(&actions, &invocation.command).await;

    if outcome.is_err() {
        actions.cancel_follow_ups();
        eprintln!(
            "{} ({})",
            errors.last_error().unwrap_or_default(),
            history.current()
        );
        std::process::exit(1);
    }

    let state = store.snapshot();
    match &invocation.command {
        Command::Delete(_) | Command::Purge(_) | Command::Wipe(_) => {
            let route = history.current();
            if matches!(route, Route::Deleted(_)) {
                let delay = actions.follow_up_delay();
                let deadline = actions
                    .next_follow_up()
                    .map(|due| due.into_std())
                    .unwrap_or_else(|| Instant::now() + delay);
                let left_to = notepad::tui::run_deleted_notice(
                    &store,
                    &history,
                    route,
                    deadline,
                    delay,
                )
                .await?;
                actions.cancel_follow_ups();
                if let Some(next) = left_to {
                    println!("-> {}", next);
                }
            }
        }
        Command::List => print_notes(&state.notes),
        Command::Trash => print_notes(&state.trash),
        Command::Create(_) | Command::Edit(..) | Command::Restore(_) => {
            // Don't wait for the delayed return to the index in a one-shot CLI.
            actions.cancel_follow_ups();
            println!("-> {}", history.current());
        }
        Command::ClearTrash => println!("Trash cleared."),
        Command::Like(id) => println!("Liked note {}.", id),
        Command::Unlike(id) => println!("Unliked note {}.", id),
        Command::Help => {}
    }

    Ok(())
}

fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("(no notes)");
        return;
    }
    for note in notes {
        let like = if note.liked { "♥" } else { " " };
        println!("{:>6} {} {}", note.id.to_string(), like, note.title);
        for line in note.content.lines() {
            println!("         {}", line);
        }
    }
}
