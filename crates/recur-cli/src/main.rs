use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use recur_engine::{parse_phrase, Recurrence, Renames};
use tracing_subscriber::EnvFilter;

mod prompt;
mod task;

use prompt::Answer;
use task::TaskFilter;

#[derive(Parser)]
#[command(
    name = "recur",
    version,
    about = "Convert task recurrence phrases into canonical recur values"
)]
struct Cli {
    /// Log at debug level (RUST_LOG is ignored when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse phrases and print one canonical recurrence per line
    Parse {
        /// Recurrence phrases, e.g. "every other day"
        #[arg(required = true)]
        phrases: Vec<String>,
    },
    /// Convert source tasks (JSON lines) into destination tasks (JSON lines)
    Migrate {
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// What to do with a recurrence phrase that cannot be parsed
        #[arg(long, value_enum, default_value = "drop")]
        on_unsupported: OnUnsupported,

        /// Rename a project, SRC=DST; an empty DST removes the project (repeatable)
        #[arg(short = 'p', long = "map-project", value_name = "SRC=DST")]
        map_project: Vec<String>,

        /// Rename a tag, SRC=DST; an empty DST removes the tag (repeatable)
        #[arg(short = 't', long = "map-tag", value_name = "SRC=DST")]
        map_tag: Vec<String>,

        /// Only migrate the task with this id
        #[arg(long, value_name = "ID")]
        filter_task_id: Option<String>,

        /// Only migrate tasks in the project with this id
        #[arg(long, value_name = "ID")]
        filter_proj_id: Option<String>,
    },
    /// Check a phrase, asking on stdin for a replacement until one parses
    Edit {
        /// Starting phrase; when omitted, the prompt starts immediately
        phrase: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OnUnsupported {
    /// Clear the recurrence and keep the task
    Drop,
    /// Stop the migration with an error
    Fail,
    /// Ask for a replacement on stdin (requires --input)
    Prompt,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Parse { phrases } => cmd_parse(&phrases),
        Commands::Migrate {
            input,
            on_unsupported,
            map_project,
            map_tag,
            filter_task_id,
            filter_proj_id,
        } => {
            let projects = Renames::from_rules(&map_project).context("--map-project")?;
            let tags = Renames::from_rules(&map_tag).context("--map-tag")?;
            let filter = TaskFilter {
                task_id: filter_task_id,
                project_id: filter_proj_id,
            };
            cmd_migrate(input, on_unsupported, &filter, &projects, &tags)
        }
        Commands::Edit { phrase } => cmd_edit(phrase.as_deref()),
    }
}

fn token(recurrence: Option<Recurrence>) -> String {
    recurrence.map_or_else(|| "none".to_string(), |r| r.to_string())
}

fn cmd_parse(phrases: &[String]) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let mut failed = false;

    for phrase in phrases {
        match parse_phrase(phrase) {
            Ok(recurrence) => writeln!(stdout, "{}", token(recurrence))?,
            Err(e) => {
                failed = true;
                eprintln!("{} {e}", "error:".red().bold());
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn cmd_migrate(
    input: Option<PathBuf>,
    policy: OnUnsupported,
    filter: &TaskFilter,
    projects: &Renames,
    tags: &Renames,
) -> Result<ExitCode> {
    let reader: Box<dyn BufRead> = match &input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => {
            if policy == OnUnsupported::Prompt {
                bail!("--on-unsupported prompt reads answers from stdin; pass tasks with --input");
            }
            Box::new(io::stdin().lock())
        }
    };

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    let mut migrated = 0usize;
    let mut dropped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.with_context(|| format!("reading line {lineno}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let source: task::SourceTask = serde_json::from_str(&line)
            .with_context(|| format!("line {lineno}: invalid task record"))?;
        if !filter.matches(&source) {
            tracing::trace!(line = lineno, id = %source.id, "filtered out");
            continue;
        }
        tracing::debug!(line = lineno, id = %source.id, "converting task");

        let (mut out, recur) = task::convert(&source, projects, tags)
            .with_context(|| format!("line {lineno}: task {}", source.id))?;

        out.recur = match (recur, policy) {
            (Ok(recurrence), _) => recurrence,
            (Err(e), OnUnsupported::Drop) => {
                tracing::warn!(line = lineno, phrase = e.phrase(), "recurrence dropped");
                dropped += 1;
                None
            }
            (Err(e), OnUnsupported::Fail) => {
                return Err(e).with_context(|| format!("line {lineno}: task {}", source.id));
            }
            (Err(e), OnUnsupported::Prompt) => {
                writeln!(stderr, "{}", format!("Task: {}", out.description).blue().bold())?;
                prompt::report(&e, &mut stderr)?;
                let mut answers = io::stdin().lock();
                match prompt::prompt_until_valid(&mut answers, &mut stderr)? {
                    Answer::Accepted(recurrence) => recurrence,
                    Answer::Aborted => bail!("aborted at line {lineno}"),
                }
            }
        };

        serde_json::to_writer(&mut stdout, &out)?;
        writeln!(stdout)?;
        migrated += 1;
    }

    if migrated == 0 && filter.is_active() {
        writeln!(
            stderr,
            "{}",
            "No matching tasks found (are you using filters?)".yellow()
        )?;
    }

    tracing::info!(migrated, dropped, "migration finished");
    let summary = format!("Migrated {migrated} tasks ({dropped} recurrences dropped)");
    writeln!(stderr, "{}", summary.green())?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_edit(phrase: Option<&str>) -> Result<ExitCode> {
    let mut stderr = io::stderr();
    let first = match phrase.map(parse_phrase) {
        Some(Ok(recurrence)) => Some(recurrence),
        Some(Err(e)) => {
            prompt::report(&e, &mut stderr)?;
            None
        }
        None => None,
    };

    let recurrence = match first {
        Some(recurrence) => recurrence,
        None => {
            let mut stdin = io::stdin().lock();
            match prompt::prompt_until_valid(&mut stdin, &mut stderr)? {
                Answer::Accepted(recurrence) => recurrence,
                Answer::Aborted => bail!("no valid recurrence entered"),
            }
        }
    };

    println!("{}", token(recurrence));
    Ok(ExitCode::SUCCESS)
}
