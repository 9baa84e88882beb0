//! Interactive board session: one command per line on stdin.

use std::io::{BufRead, Write};

use anyhow::Context;
use poolboard_core::{Board, Outcome};
use poolboard_store::SnapshotFile;

use crate::display;

const HELP: &str = "\
commands:
  select <entry> <blue|red>   pick a square (a/b also accepted)
  name <text>                 set participant name
  email <text>                set participant email
  submit                      claim the selected square
  cancel                      drop the selected square
  show                        redraw the board
  entries                     list claims and pool total
  help                        this text
  quit                        leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select { entry: String, outcome: Outcome },
    Name(String),
    Email(String),
    Submit,
    Cancel,
    Show,
    Entries,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "select" | "s" => {
                // Entry names may contain spaces; the outcome is the last word.
                let (entry, outcome) = rest
                    .rsplit_once(char::is_whitespace)
                    .context("usage: select <entry> <blue|red>")?;
                Command::Select {
                    entry: entry.trim().to_string(),
                    outcome: outcome.parse()?,
                }
            }
            "name" => Command::Name(rest.to_string()),
            "email" => Command::Email(rest.to_string()),
            "submit" | "add" => Command::Submit,
            "cancel" => Command::Cancel,
            "show" => Command::Show,
            "entries" => Command::Entries,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => anyhow::bail!("unknown command {other:?} (try `help`)"),
        };
        Ok(Some(cmd))
    }

    fn redraws(&self) -> bool {
        matches!(
            self,
            Command::Select { .. }
                | Command::Name(_)
                | Command::Email(_)
                | Command::Submit
                | Command::Cancel
                | Command::Show
        )
    }
}

/// Drive `board` from `input` until EOF or `quit`, writing screens to `out`.
///
/// With a snapshot, claims saved by other sessions are reloaded before each
/// submit and the store is saved after each successful one.
pub fn run<R: BufRead, W: Write>(
    board: &mut Board,
    snapshot: Option<&SnapshotFile>,
    input: R,
    mut out: W,
) -> anyhow::Result<()> {
    write!(out, "{}", display::render_screen(board))?;
    writeln!(out, "type `help` for commands")?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e:#}")?;
                continue;
            }
        };
        if cmd == Command::Quit {
            break;
        }
        let redraw = cmd.redraws();
        if let Err(e) = apply(board, snapshot, cmd, &mut out) {
            writeln!(out, "error: {e:#}")?;
            continue;
        }
        if redraw {
            write!(out, "{}", display::render_screen(board))?;
        }
    }
    Ok(())
}

fn apply<W: Write>(
    board: &mut Board,
    snapshot: Option<&SnapshotFile>,
    cmd: Command,
    out: &mut W,
) -> anyhow::Result<()> {
    match cmd {
        Command::Select { entry, outcome } => board.select_square(&entry, outcome)?,
        Command::Name(text) => board.set_participant_name(text),
        Command::Email(text) => board.set_participant_email(text),
        Command::Cancel => board.clear_selection(),
        Command::Submit => {
            // Gate first so a refused submit leaves the claim store alone.
            if let Some(snap) = snapshot
                && board.can_submit()
            {
                let records = snap
                    .load()
                    .with_context(|| format!("refreshing claims from {}", snap.path().display()))?;
                board
                    .reload_claims(records)
                    .context("snapshot no longer matches the catalog")?;
            }
            let record = board.submit()?;
            writeln!(
                out,
                "claimed {}-{} for {}",
                record.entry_name, record.outcome, record.name
            )?;
            if let Some(snap) = snapshot {
                let claims: Vec<_> = board.claims().cloned().collect();
                snap.save(&claims)
                    .with_context(|| format!("saving {}", snap.path().display()))?;
            }
        }
        Command::Entries => write!(out, "{}", display::render_entries(board))?,
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Show | Command::Quit => {}
    }
    Ok(())
}
