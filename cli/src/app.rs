//! Event loop: stdin commands and network completions, one writer.
//!
//! The session is owned by this loop alone. Each `Dispatch` is executed on a
//! blocking task and its outcome comes back over a channel, so settles from
//! different actions are applied in whatever order the responses arrive and
//! the prompt never waits on the network.

use std::fmt::Write as _;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use todo_core::{Dispatch, HttpResponse, NotificationLevel, Ticket, TodoError, TodoSession};
use tracing::{debug, warn};

use crate::command::{self, Command, HELP};
use crate::transport::HttpTransport;

struct Completion {
    ticket: Ticket,
    outcome: Result<HttpResponse, String>,
}

enum Flow {
    Continue,
    Quit,
}

pub async fn run(mut session: TodoSession, transport: HttpTransport) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    let initial = session.load();
    spawn(&transport, &tx, vec![initial]);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                let (flow, dispatches) = handle_line(&mut session, &line);
                spawn(&transport, &tx, dispatches);
                print!("{}", take_notifications(&mut session));
                if let Flow::Quit = flow {
                    break;
                }
            }
            Some(completion) = rx.recv() => {
                let follow_ups = match completion.outcome {
                    Ok(response) => session.settle(completion.ticket, response),
                    Err(message) => session.settle_transport_error(completion.ticket, message),
                };
                spawn(&transport, &tx, follow_ups);
                print!("{}", take_notifications(&mut session));
                if !session.pagination().is_fetching() {
                    print!("{}", render(&session));
                }
            }
        }
    }
    Ok(())
}

fn spawn(transport: &HttpTransport, tx: &mpsc::UnboundedSender<Completion>, dispatches: Vec<Dispatch>) {
    for Dispatch { ticket, request } in dispatches {
        let transport = transport.clone();
        let tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            let outcome = transport.execute(request).map_err(|e| e.to_string());
            if tx.send(Completion { ticket, outcome }).is_err() {
                debug!("event loop gone, dropping completion");
            }
        });
    }
}

/// Apply one command line. Returns what to do next and any requests to send.
fn handle_line(session: &mut TodoSession, line: &str) -> (Flow, Vec<Dispatch>) {
    let command = match command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return (Flow::Continue, Vec::new()),
        Err(err) => {
            println!("{err:#}");
            return (Flow::Continue, Vec::new());
        }
    };

    let mut dispatches = Vec::new();
    match command {
        Command::List => print!("{}", render(session)),
        Command::Stats => print!("{}", render_stats(session)),
        Command::Help => println!("{HELP}"),
        Command::Quit => return (Flow::Quit, dispatches),
        Command::Refresh => dispatches.push(session.load()),
        Command::Page(page) => {
            let total = session.pagination().total_pages();
            if page == 0 || page > total {
                println!("page must be between 1 and {total}");
            } else {
                dispatches.extend(session.change_page(page));
            }
        }
        Command::Next => dispatches.extend(session.next_page()),
        Command::Prev => dispatches.extend(session.previous_page()),
        Command::Add(title) => match session.submit(&title) {
            Ok(dispatch) => {
                dispatches.push(dispatch);
                print!("{}", render(session));
            }
            Err(TodoError::InvalidTitle(err)) => println!("{err}"),
            Err(err) => warn!(error = %err, "create not started"),
        },
        Command::Toggle(id) => {
            if let Ok(dispatch) = session.toggle(id) {
                dispatches.push(dispatch);
                print!("{}", render(session));
            }
        }
        Command::Delete(id) => match session.request_delete(id) {
            Some(confirmation) => println!("Delete \"{}\"? (yes/no)", confirmation.title),
            None => println!("no todo {id} on this page"),
        },
        Command::Confirm => match session.confirm_delete() {
            Some(dispatch) => {
                dispatches.push(dispatch);
                print!("{}", render(session));
            }
            None => println!("nothing to confirm"),
        },
        Command::Cancel => session.cancel_delete(),
        Command::Move { from, to } => {
            if session.reorder(from, to) {
                print!("{}", render(session));
            } else {
                println!("cannot move {} to {}", from + 1, to + 1);
            }
        }
    }
    (Flow::Continue, dispatches)
}

fn take_notifications(session: &mut TodoSession) -> String {
    let mut out = String::new();
    for note in session.drain_notifications() {
        let tag = match note.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        let _ = writeln!(out, "[{tag}] {}", note.message);
    }
    out
}

fn render_stats(session: &TodoSession) -> String {
    let stats = session.stats();
    let mut out = format!(
        "Total: {}  Completed: {}  Pending: {}",
        stats.total, stats.completed, stats.pending
    );
    if let Some(pct) = stats.percent_complete() {
        let _ = write!(out, "  {pct}% complete");
    }
    out.push('\n');
    out
}

/// The list as the user sees it, in display order.
fn render(session: &TodoSession) -> String {
    let pagination = session.pagination();
    let mut out = String::new();

    if pagination.is_loading() {
        match session.load_error() {
            Some(err) => {
                let _ = writeln!(out, "Error loading todos: {err}");
            }
            None => out.push_str("Loading todos...\n"),
        }
        return out;
    }

    let _ = writeln!(
        out,
        "Your Todos ({} total){}",
        pagination.total_count().unwrap_or(0),
        if pagination.is_fetching() { "  (refreshing)" } else { "" }
    );

    let todos = session.visible_todos();
    if todos.is_empty() {
        out.push_str("  No todos yet. Add one to get started!\n");
    }
    for (position, todo) in todos.iter().enumerate() {
        let mark = if todo.completed { "x" } else { " " };
        let saving = if todo.is_placeholder() { "  (saving)" } else { "" };
        let _ = writeln!(out, "{:>3}. [{mark}] #{:<5} {}{saving}", position + 1, todo.id, todo.todo);
    }

    out.push_str(&render_stats(session));

    if pagination.shows_controls() {
        let pages: Vec<String> = pagination
            .visible_pages()
            .into_iter()
            .map(|p| {
                if p == pagination.current_page() {
                    format!("[{p}]")
                } else {
                    p.to_string()
                }
            })
            .collect();
        let _ = writeln!(
            out,
            "Page {} of {}   {}{}{}",
            pagination.current_page(),
            pagination.total_pages(),
            if pagination.can_go_previous() { "< prev  " } else { "" },
            pages.join(" "),
            if pagination.can_go_next() { "  next >" } else { "" },
        );
    }
    out
}
