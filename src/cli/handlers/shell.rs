//! Line-oriented session: one command per input line, state kept until EOF
//! or `quit`. After every state change the view is re-derived and printed.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::{debug, warn};

use crate::cli::commands::{ShellCommand, ShellEditArgs, ShellLine, ShellSettingsArgs};
use crate::cli::output::*;
use crate::io::config_io::parse_bool;
use crate::model::config::FontSize;
use crate::model::task::{TaskId, TaskPatch};
use crate::model::view::SortMode;
use crate::ops::form::{FormError, TaskForm, parse_due_date, parse_priority, parse_projects};
use crate::session::Session;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("no task with id {0}")]
    UnknownTask(String),
    #[error("edit needs at least one of --text, -p, -d, -t, -r")]
    NothingToChange,
    #[error("{0}")]
    InvalidValue(String),
}

/// What one line produced: text to print, and whether the session ends.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ShellOutcome {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl ShellOutcome {
    fn lines(lines: Vec<String>) -> Self {
        ShellOutcome { lines, quit: false }
    }
}

const HELP: &[&str] = &[
    "add TEXT... [-p A-D] [-d YYYY-MM-DD] [-t \"+proj ...\"] [-r RECUR]",
    "edit ID [--text TEXT] [-p A-D|-] [-d DATE|-] [-t \"+proj ...\"] [-r RECUR|-]",
    "toggle ID          flip completed",
    "rm ID              delete",
    "sort priority|due  change grouping",
    "search [QUERY]     filter; no query clears",
    "list               print the view",
    "show ID            print one task",
    "settings [--font-size small|medium|large] [--compact true|false]",
    "quit",
];

/// Read lines from `input` until EOF or `quit`, writing results to `out`.
/// Command errors are printed and the session continues.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    prompt: bool,
    json: bool,
) -> io::Result<()> {
    if prompt {
        write!(out, "> ")?;
        out.flush()?;
    }
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            match execute_line(session, trimmed, json) {
                Ok(outcome) => {
                    for l in &outcome.lines {
                        writeln!(out, "{}", l)?;
                    }
                    if outcome.quit {
                        return Ok(());
                    }
                }
                Err(e) => {
                    debug!(line = trimmed, error = %e, "shell command failed");
                    writeln!(out, "error: {}", e)?;
                }
            }
        }
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Parse and apply one command line.
pub fn execute_line(
    session: &mut Session,
    line: &str,
    json: bool,
) -> Result<ShellOutcome, ShellError> {
    let tokens = split_line(line)?;
    let parsed = ShellLine::try_parse_from(tokens).map_err(|e| {
        // clap renders multi-line usage; the first line carries the message
        let rendered = e.to_string();
        let first = rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string();
        ShellError::Usage(first)
    })?;

    match parsed.command {
        ShellCommand::Add(args) => {
            let form = TaskForm {
                text: args.text.join(" "),
                priority: args.priority.unwrap_or_default(),
                due_date: args.due.unwrap_or_default(),
                projects: args.projects.unwrap_or_default(),
                recurrence: args.recur.unwrap_or_default(),
            };
            let Some(id) = session.submit_new(form)? else {
                return Ok(ShellOutcome::lines(vec!["nothing added: text is blank".into()]));
            };
            Ok(with_view(session, format!("added {}", id), json))
        }
        ShellCommand::Edit(args) => {
            let id = TaskId::new(args.id.as_str());
            require_task(session, &id)?;
            let patch = edit_patch(args)?;
            session.update(&id, patch);
            Ok(with_view(session, format!("updated {}", id), json))
        }
        ShellCommand::Toggle { id } => {
            let id = TaskId::new(id);
            match session.toggle_complete(&id) {
                Some(true) => Ok(with_view(session, format!("completed {}", id), json)),
                Some(false) => Ok(with_view(session, format!("reopened {}", id), json)),
                None => Err(ShellError::UnknownTask(id.to_string())),
            }
        }
        ShellCommand::Rm { id } => {
            let id = TaskId::new(id);
            if session.delete(&id) {
                Ok(with_view(session, format!("deleted {}", id), json))
            } else {
                Err(ShellError::UnknownTask(id.to_string()))
            }
        }
        ShellCommand::Sort { mode } => {
            let mode: SortMode = mode.parse().map_err(ShellError::InvalidValue)?;
            session.set_sort(mode);
            Ok(with_view(session, format!("sort: {}", mode), json))
        }
        ShellCommand::Search { query } => {
            let query = raw_query(line).unwrap_or_else(|| query.join(" "));
            if query.trim().is_empty() {
                session.clear_query();
                Ok(with_view(session, "search cleared".into(), json))
            } else {
                session.set_query(query.as_str());
                Ok(with_view(session, format!("search: {}", query), json))
            }
        }
        ShellCommand::List => Ok(ShellOutcome::lines(render_view(session, json))),
        ShellCommand::Show { id } => {
            let id = TaskId::new(id);
            let task = require_task(session, &id)?;
            if json {
                let text = serde_json::to_string_pretty(task)
                    .map_err(|e| ShellError::InvalidValue(e.to_string()))?;
                Ok(ShellOutcome::lines(text.lines().map(str::to_string).collect()))
            } else {
                Ok(ShellOutcome::lines(format_task_detail(task)))
            }
        }
        ShellCommand::Settings(args) => {
            let changed = apply_settings(session, args)?;
            let mut lines = format_settings(&session.settings);
            if changed {
                lines.extend(render_view(session, json));
            }
            Ok(ShellOutcome::lines(lines))
        }
        ShellCommand::Help => Ok(ShellOutcome::lines(
            HELP.iter().map(|s| s.to_string()).collect(),
        )),
        ShellCommand::Quit => Ok(ShellOutcome {
            lines: Vec::new(),
            quit: true,
        }),
    }
}

fn require_task<'a>(
    session: &'a Session,
    id: &TaskId,
) -> Result<&'a crate::model::task::Task, ShellError> {
    session
        .task(id)
        .ok_or_else(|| ShellError::UnknownTask(id.to_string()))
}

/// Only the flags that were given end up in the patch.
fn edit_patch(args: ShellEditArgs) -> Result<TaskPatch, ShellError> {
    let mut patch = TaskPatch::default();
    if let Some(text) = args.text {
        if text.trim().is_empty() {
            return Err(ShellError::InvalidValue("text cannot be blank".into()));
        }
        patch.text = Some(text);
    }
    if let Some(p) = args.priority {
        patch.priority = Some(parse_priority(&p)?);
    }
    if let Some(d) = args.due {
        patch.due_date = Some(parse_due_date(&d)?);
    }
    if let Some(t) = args.projects {
        patch.projects = Some(parse_projects(&t));
    }
    if let Some(r) = args.recur {
        let r = r.trim();
        patch.recurrence = if r.is_empty() || r == "-" || r.eq_ignore_ascii_case("none") {
            Some(None)
        } else {
            Some(Some(r.to_string()))
        };
    }
    if patch.is_empty() {
        return Err(ShellError::NothingToChange);
    }
    Ok(patch)
}

fn apply_settings(session: &mut Session, args: ShellSettingsArgs) -> Result<bool, ShellError> {
    let mut changed = false;
    if let Some(size) = args.font_size {
        let size: FontSize = size.parse().map_err(ShellError::InvalidValue)?;
        session.settings.font_size = size;
        changed = true;
    }
    if let Some(compact) = args.compact {
        session.settings.compact = parse_bool(&compact).ok_or_else(|| {
            ShellError::InvalidValue(format!("expected true or false, got '{}'", compact))
        })?;
        changed = true;
    }
    Ok(changed)
}

fn render_view(session: &Session, json: bool) -> Vec<String> {
    let groups = session.groups();
    if json {
        let view = view_to_json(&groups, session.sort, &session.query);
        match serde_json::to_string(&view) {
            Ok(s) => vec![s],
            Err(e) => {
                warn!(error = %e, "view serialization failed");
                Vec::new()
            }
        }
    } else {
        format_view(
            &groups,
            session.sort,
            &session.settings,
            session.tasks().len(),
        )
    }
}

fn with_view(session: &Session, status: String, json: bool) -> ShellOutcome {
    let mut lines = vec![status];
    lines.extend(render_view(session, json));
    ShellOutcome::lines(lines)
}

/// Text after the `search` keyword exactly as typed, so runs of spaces
/// survive. Quoted or escaped queries go through the word splitter instead.
fn raw_query(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix("search")?.trim_start();
    if rest.contains(['"', '\'', '\\']) {
        return None;
    }
    Some(rest.to_string())
}

/// Split a command line into words. Single and double quotes group words;
/// a backslash escapes the next character outside single quotes.
pub fn split_line(line: &str) -> Result<Vec<String>, ShellError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }
    if quote.is_some() {
        return Err(ShellError::UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
