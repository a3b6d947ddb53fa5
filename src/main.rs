//! mdorg - Main Entry Point
//!
//! Command line host for the outline commands: runs one command on a
//! Markdown file, prints highlighted todo keywords, or lists the commands.

use clap::{Parser, Subcommand};
use log::{debug, info};
use mdorg::config::{load_config, load_config_from, Settings};
use mdorg::document::Document;
use mdorg::{Command, Error, Position, Result, Session};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "mdorg")]
#[command(about = "Org-mode style outline editing for Markdown", long_about = None)]
struct Args {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Run an outline command on a file and print the result
    Run {
        /// Command id, e.g. `demote-tree` (see `mdorg commands`)
        command: String,

        /// Markdown file to edit
        file: PathBuf,

        /// Zero-based cursor as LINE:COL; repeat for multiple cursors
        #[arg(long = "cursor", value_name = "LINE:COL")]
        cursors: Vec<String>,

        /// Write the result back to the file instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Print every highlighted todo keyword with its priority
    Highlight {
        /// Markdown file to scan
        file: PathBuf,
    },
    /// List the available commands
    Commands,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        CliCommand::Run {
            command,
            file,
            cursors,
            write,
        } => {
            let command =
                Command::from_id(&command).ok_or_else(|| Error::UnknownCommand(command.clone()))?;
            let settings = settings(args.config.as_deref())?;
            run_command(command, &file, &cursors, write, settings)
        }
        CliCommand::Highlight { file } => {
            let settings = settings(args.config.as_deref())?;
            highlight(&file, settings)
        }
        CliCommand::Commands => {
            for command in Command::all() {
                println!("{:<22}{}", command.id(), command.title());
            }
            Ok(())
        }
    }
}

fn settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => load_config_from(path),
        None => Ok(load_config()),
    }
}

/// Parse a `LINE:COL` cursor argument.
fn parse_cursor(arg: &str) -> Result<Position> {
    let invalid = || Error::InvalidCursor(format!("'{}' is not LINE:COL", arg));
    let (line, column) = arg.split_once(':').ok_or_else(invalid)?;
    let line = line.trim().parse().map_err(|_| invalid())?;
    let column = column.trim().parse().map_err(|_| invalid())?;
    Ok(Position::new(line, column))
}

fn run_command(
    command: Command,
    file: &Path,
    cursor_args: &[String],
    write: bool,
    settings: Settings,
) -> Result<()> {
    let mut session: Session = Session::with_settings(settings)?;
    session.open_file(file, Instant::now())?;

    let cursors = if cursor_args.is_empty() {
        vec![Position::default()]
    } else {
        cursor_args
            .iter()
            .map(|arg| parse_cursor(arg))
            .collect::<Result<Vec<_>>>()?
    };

    let buffer = session
        .buffer_mut()
        .ok_or_else(|| Error::Application("No active document".to_string()))?;
    if let Some(outside) = cursors.iter().find(|&&cursor| !buffer.contains(cursor)) {
        return Err(Error::InvalidCursor(format!(
            "{} is outside the document",
            outside
        )));
    }
    buffer.set_cursors(cursors);

    info!("Running {} on {}", command, file.display());
    let outcome = session.execute(command);
    debug!("{:?}", outcome);

    for notification in session.take_notifications() {
        eprintln!("warning: {}", notification);
    }

    if write {
        session.save()?;
    } else if let Some(buffer) = session.buffer() {
        print!("{}", buffer.to_text());
    }

    if let Some(buffer) = session.buffer() {
        let cursors: Vec<String> = buffer.cursors().iter().map(|c| c.to_string()).collect();
        eprintln!("cursors: {}", cursors.join(" "));
    }
    Ok(())
}

fn highlight(file: &Path, settings: Settings) -> Result<()> {
    let mut session: Session = Session::with_settings(settings)?;
    session.open_file(file, Instant::now())?;
    session.refresh_decorations();

    let Some(buffer) = session.buffer() else {
        return Ok(());
    };
    let decorator = session.decorator();
    for (priority, ranges) in decorator.buckets().iter() {
        for range in ranges {
            let keyword: String = buffer
                .line(range.start.line)
                .chars()
                .skip(range.start.character)
                .take(range.end.character - range.start.character)
                .collect();
            println!("{}\t{}\t{}", priority, range, keyword);
        }
    }
    Ok(())
}
