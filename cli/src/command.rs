//! Parsing of the interactive command line.

use anyhow::{anyhow, bail, Context};
use todo_core::TodoId;

pub const HELP: &str = "\
commands:
  list                show the current page
  page N | next | prev
  add TITLE           create a todo
  toggle ID           flip completion
  delete ID           ask to delete, then `yes` or `no`
  move FROM TO        drag the item at position FROM to position TO
  stats               completion summary
  refresh             re-fetch the current page
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Page(u32),
    Next,
    Prev,
    Add(String),
    Toggle(TodoId),
    Delete(TodoId),
    Confirm,
    Cancel,
    /// Zero-based display positions.
    Move { from: usize, to: usize },
    Stats,
    Refresh,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "page" => Command::Page(number(rest, "page")?),
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "add" | "a" => {
            if rest.is_empty() {
                bail!("usage: add TITLE");
            }
            Command::Add(rest.to_string())
        }
        "toggle" | "t" => Command::Toggle(number(rest, "id")?),
        "delete" | "rm" => Command::Delete(number(rest, "id")?),
        "yes" | "y" => Command::Confirm,
        "no" => Command::Cancel,
        "move" | "mv" => {
            let mut parts = rest.split_whitespace();
            let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
                bail!("usage: move FROM TO");
            };
            Command::Move {
                from: position(from)?,
                to: position(to)?,
            }
        }
        "stats" => Command::Stats,
        "refresh" | "r" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(anyhow!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

fn number<T: std::str::FromStr>(raw: &str, what: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse().with_context(|| format!("expected a {what}, got `{raw}`"))
}

/// Users count positions from 1.
fn position(raw: &str) -> anyhow::Result<usize> {
    let n: usize = number(raw, "position")?;
    n.checked_sub(1).ok_or_else(|| anyhow!("positions start at 1"))
}
