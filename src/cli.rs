// File: ./src/cli.rs
//! Command-line parsing and help for the `notepad` binary.

use crate::actions::NoteActions;
use crate::client::NotesApi;
use crate::error::ActionResult;
use crate::model::{NoteFields, NoteId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Trash,
    Create(NoteFields),
    Edit(NoteId, NoteFields),
    Delete(NoteId),
    Restore(NoteId),
    Purge(NoteId),
    Wipe(NoteId),
    ClearTrash,
    Like(NoteId),
    Unlike(NoteId),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: Option<std::path::PathBuf>,
    pub command: Command,
}

/// Parses everything after the binary name.
pub fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut root = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" | "--root" => {
                let path = iter.next().ok_or("--root needs a path")?;
                root = Some(std::path::PathBuf::from(path));
            }
            "-h" | "--help" | "help" => {
                return Ok(Invocation {
                    root,
                    command: Command::Help,
                });
            }
            _ => rest.push(arg.as_str()),
        }
    }

    let id = |i: usize| -> Result<NoteId, String> {
        rest.get(i)
            .map(|s| NoteId::from(*s))
            .ok_or_else(|| format!("'{}' needs a note id", rest[0]))
    };

    let command = match rest.first().copied() {
        None | Some("list") => Command::List,
        Some("trash") => Command::Trash,
        Some("create") => match (rest.get(1), rest.get(2)) {
            (Some(title), content) => {
                Command::Create(NoteFields::new(*title, content.copied().unwrap_or("")))
            }
            _ => return Err("'create' needs a title".to_string()),
        },
        Some("edit") => {
            let note_id = id(1)?;
            let title = rest.get(2).ok_or("'edit' needs a title")?;
            let content = rest.get(3).copied().unwrap_or("");
            Command::Edit(note_id, NoteFields::new(*title, content))
        }
        Some("delete") => Command::Delete(id(1)?),
        Some("restore") => Command::Restore(id(1)?),
        Some("purge") => Command::Purge(id(1)?),
        Some("wipe") => Command::Wipe(id(1)?),
        Some("clear-trash") => Command::ClearTrash,
        Some("like") => Command::Like(id(1)?),
        Some("unlike") => Command::Unlike(id(1)?),
        Some(other) => return Err(format!("Unknown command '{}'", other)),
    };

    Ok(Invocation { root, command })
}

/// Runs the action behind `command`. `purge` and `wipe` load the trash first so the
/// deleted-note notice can show the note; if that load fails the delete is not sent.
pub async fn execute<A: NotesApi + 'static>(
    actions: &NoteActions<A>,
    command: &Command,
) -> ActionResult {
    match command.clone() {
        Command::List => actions.fetch_notes().await,
        Command::Trash => actions.fetch_trash().await,
        Command::Create(fields) => actions.create_note(fields).await,
        Command::Edit(id, fields) => actions.update_note(fields, id).await,
        Command::Delete(id) => actions.delete_note(id).await,
        Command::Restore(id) => actions.restore_note(id).await,
        Command::Purge(id) => {
            actions.fetch_trash().await?;
            actions.hard_delete_note(id).await
        }
        Command::Wipe(id) => {
            actions.fetch_trash().await?;
            actions.hard_wipe_note(id).await
        }
        Command::ClearTrash => actions.clear_trash().await,
        Command::Like(id) => actions.like(id, false).await,
        Command::Unlike(id) => actions.like(id, true).await,
        Command::Help => Ok(()),
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Notepad v{} - client for a REST notes service",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] <command>", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    list                          List notes (default)");
    println!("    trash                         List trashed notes");
    println!("    create <title> [content]      Create a note");
    println!("    edit <id> <title> [content]   Replace a note's title and content");
    println!("    delete <id>                   Move a note to the trash");
    println!("    restore <id>                  Restore a note from the trash");
    println!("    purge <id>                    Permanently delete a note");
    println!("    wipe <id>                     Permanently delete a trashed note");
    println!("    clear-trash                   Empty the trash");
    println!("    like <id> | unlike <id>       Set or clear the like flag");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and logs.");
    println!("    -h, --help            Show this help message.");
}
