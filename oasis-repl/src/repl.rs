//! The line-oriented front end of a [`Session`].
//!
//! Every line typed at the prompt replaces the session's input and is submitted if it parses.
//! Lines starting with `:` are commands. The builder commands prompt for each argument in turn
//! and splice the accepted call into the input, which then pre-fills the next prompt.

use ariadne::{Color, Fmt};
use crate::error::{write_parse_report, Error};
use oasis_compute::funcs;
use oasis_session::{
    ArgField,
    BuilderSpec,
    Engine,
    Event,
    History,
    HistoryEntry,
    Response,
    Session,
    Transition,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, Write};

/// A command entered at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Open the builder for a function.
    Build(BuilderSpec),

    /// List the submitted entries.
    History,

    /// Show the commands and functions.
    Help,

    /// Leave the session.
    Quit,

    /// Anything else starting with `:`.
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Parses a command, returning [`None`] if the line is an expression.
    pub fn parse(line: &'a str) -> Option<Self> {
        let name = line.trim().strip_prefix(':')?;
        Some(match name {
            "history" | "h" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => BuilderSpec::preset(name)
                .map(Command::Build)
                .unwrap_or(Command::Unknown(name)),
        })
    }
}

/// Replaces the input with the line and submits it, returning the index of the new history entry.
///
/// Returns [`None`] if the line did not parse, in which case the line stays in the input.
pub fn submit_line<E: Engine>(session: &mut Session<E>, line: &str) -> Option<usize> {
    session.apply(Event::InputChanged(line.to_string()));
    match session.apply(Event::Submit) {
        Transition::Submitted { index, .. } => Some(index),
        _ => None,
    }
}

/// Empties the input, releasing any expression it parsed to.
pub fn clear_input<E: Engine>(session: &mut Session<E>) {
    session.apply(Event::InputChanged(String::new()));
}

/// Explains why the line could not be submitted.
pub fn write_parse_failure<E: Engine, W: Write>(
    session: &Session<E>,
    line: &str,
    mut w: W,
) -> io::Result<()> {
    writeln!(w, "Failed to parse expression")?;
    write_parse_report(&session.adapter().normalize(line), w)
}

fn response_text(response: &Response) -> String {
    match response {
        Response::Markup(markup) => markup.clone(),
        Response::Error(message) => format!("error: {}", message),
    }
}

/// Writes one history entry as `query => response`.
pub fn write_entry<W: Write>(entry: &HistoryEntry, mut w: W) -> io::Result<()> {
    writeln!(w, "{} => {}", entry.query, response_text(&entry.response))
}

/// Writes the numbered history, oldest first.
pub fn write_history<W: Write>(history: &History, mut w: W) -> io::Result<()> {
    if history.is_empty() {
        return writeln!(w, "(no entries)");
    }
    for (i, entry) in history.iter().enumerate() {
        write!(w, "[{}] ", i + 1)?;
        write_entry(entry, &mut w)?;
    }
    Ok(())
}

/// Writes the list of commands and functions.
pub fn write_help<W: Write>(mut w: W) -> io::Result<()> {
    writeln!(w, "Type an expression to simplify it, or one of these commands:")?;
    for spec in BuilderSpec::PRESETS {
        writeln!(w, "  :{:<9} build {} step by step", spec.func, spec.title.to_lowercase())?;
    }
    writeln!(w, "  :{:<9} list submitted expressions", "history")?;
    writeln!(w, "  :{:<9} show this message", "help")?;
    writeln!(w, "  :{:<9} leave", "quit")?;
    writeln!(w)?;
    writeln!(w, "Functions:")?;
    for func in funcs::all() {
        writeln!(w, "  {:<10} {}", func.signature, func.description)?;
    }
    Ok(())
}

/// Submits every non-empty line of the input in order, writing each entry to `out` and each
/// parse failure to `err`.
pub fn run_batch<E, O, R>(session: &mut Session<E>, input: &str, mut out: O, mut err: R) -> io::Result<()>
where
    E: Engine,
    O: Write,
    R: Write,
{
    for (n, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match submit_line(session, line) {
            Some(index) => write_entry(&session.history().entries()[index], &mut out)?,
            None => {
                write!(err, "line {}: ", n + 1)?;
                write_parse_failure(session, line, &mut err)?;
            },
        }
    }
    Ok(())
}

/// Runs the interactive prompt until the user quits or input ends.
pub fn run_interactive<E: Engine>(session: &mut Session<E>) -> Result<(), Error> {
    let mut rl = DefaultEditor::new()?;
    let mut prefill = String::new();
    let stdout = io::stdout();

    loop {
        let line = match rl.readline_with_initial("> ", (prefill.as_str(), "")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                prefill.clear();
                clear_input(session);
                continue;
            },
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        prefill.clear();

        if line.trim().is_empty() {
            continue;
        }
        rl.add_history_entry(&line)?;

        match Command::parse(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => write_help(stdout.lock()).map_err(Error::Output)?,
            Some(Command::History) => write_history(session.history(), stdout.lock())
                .map_err(Error::Output)?,
            Some(Command::Build(spec)) => {
                if run_builder(&mut rl, session, spec)? {
                    prefill = session.input().to_string();
                }
            },
            Some(Command::Unknown(name)) => {
                eprintln!("unknown command `:{}`, try `:help`", name);
            },
            None => match submit_line(session, &line) {
                Some(index) => print_response(&session.history().entries()[index].response),
                None => write_parse_failure(session, &line, io::stderr().lock())
                    .map_err(Error::Output)?,
            },
        }
    }

    Ok(())
}

fn print_response(response: &Response) {
    match response {
        Response::Markup(markup) => println!("{}", markup),
        Response::Error(_) => println!("{}", response_text(response).fg(Color::Red)),
    }
}

/// Prompts for each argument of the builder, showing the preview after each one, then asks
/// whether to accept. Returns true if the call was spliced into the input.
fn run_builder<E: Engine>(
    rl: &mut DefaultEditor,
    session: &mut Session<E>,
    spec: BuilderSpec,
) -> Result<bool, Error> {
    session.apply(Event::OpenBuilder(spec));
    println!("{}", spec.title.fg(Color::Cyan));

    for field in [ArgField::First, ArgField::Second] {
        let text = match read_or_cancel(rl, session, &format!("{}: ", spec.label(field)))? {
            Some(text) => text,
            None => return Ok(false),
        };
        session.apply(Event::BuilderArgChanged(field, text));
        if let Some(view) = session.view().builder {
            println!("  {}", view.preview);
        }
    }

    let answer = match read_or_cancel(rl, session, "accept? [Y/n] ")? {
        Some(answer) => answer,
        None => return Ok(false),
    };
    if answer.trim().eq_ignore_ascii_case("n") {
        session.apply(Event::CancelBuilder);
        return Ok(false);
    }

    Ok(matches!(session.apply(Event::AcceptBuilder), Transition::BuilderAccepted { .. }))
}

/// Reads a line for the open builder, cancelling it if the user interrupts or input ends.
fn read_or_cancel<E: Engine>(
    rl: &mut DefaultEditor,
    session: &mut Session<E>,
    prompt: &str,
) -> Result<Option<String>, Error> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
            session.apply(Event::CancelBuilder);
            Ok(None)
        },
        Err(err) => {
            session.apply(Event::CancelBuilder);
            Err(err.into())
        },
    }
}
