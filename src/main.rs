use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use logsift::index::router::IndexRouter;
use logsift::{EntryDraft, Error, Level, LogEngine, MatchMode, QueryRequest, QueryResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "logsift")]
#[command(about = "In-memory log search and indexing engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a JSONL log file and search it
    Search {
        /// Path to a JSON-lines file of log entries
        #[arg(short, long)]
        file: PathBuf,

        /// Query text (literal by default; empty matches everything)
        #[arg(default_value = "")]
        query: String,

        /// Interpret the query as a regular expression
        #[arg(long)]
        pattern: bool,

        /// Match case-sensitively
        #[arg(long)]
        case_sensitive: bool,

        /// Exact level filter (DEBUG..CRITICAL)
        #[arg(long)]
        level: Option<String>,

        /// Case-insensitive component substring filter
        #[arg(long)]
        component: Option<String>,

        /// Index to search
        #[arg(long, default_value = logsift::DEFAULT_INDEX)]
        index: String,

        /// Maximum entries to return (0 = unbounded)
        #[arg(short, long, default_value_t = 0)]
        limit: i64,

        /// Emit the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ingest a JSONL log file and print aggregate statistics
    Stats {
        /// Path to a JSON-lines file of log entries
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Preview which indices each entry would be routed into
    Classify {
        /// Path to a JSON-lines file of log entries
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            file,
            query,
            pattern,
            case_sensitive,
            level,
            component,
            index,
            limit,
            json,
        } => {
            let engine = load_engine(&file)?;
            let request = QueryRequest {
                text: query,
                mode: if pattern {
                    MatchMode::Pattern
                } else {
                    MatchMode::Literal
                },
                case_sensitive,
                level: level.as_deref().map(str::parse::<Level>).transpose()?,
                component,
                index,
                limit,
                ..QueryRequest::default()
            };

            match engine.search(&request) {
                Ok(result) => print_result(&result, json)?,
                Err(err @ Error::Pattern(_)) => {
                    if json {
                        let failure =
                            QueryResult::failure(engine.stats().total_entries, err.to_string());
                        println!("{}", serde_json::to_string_pretty(&failure)?);
                    } else {
                        eprintln!("{err}");
                        std::process::exit(1);
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }

        Commands::Stats { file } => {
            let engine = load_engine(&file)?;
            let stats = engine.stats();
            println!("Engine Statistics");
            println!("=================");
            println!();
            println!("Total entries:    {}", stats.total_entries);
            println!("Queries served:   {}", stats.total_queries);

            println!();
            println!("Entries by index:");
            let mut indices: Vec<_> = stats.per_index.iter().collect();
            indices.sort();
            for (name, count) in indices {
                println!("  {:20} {}", name, count);
            }

            println!();
            println!("Entries by level:");
            let mut levels: Vec<_> = stats.per_level.iter().collect();
            levels.sort_by(|a, b| b.1.cmp(a.1));
            for (level, count) in levels {
                println!("  {:20} {}", level, count);
            }

            println!();
            println!("Entries by component:");
            let mut components: Vec<_> = stats.per_component.iter().collect();
            components.sort_by(|a, b| b.1.cmp(a.1));
            for (component, count) in components.iter().take(15) {
                println!("  {:20} {}", component, count);
            }
            if components.len() > 15 {
                println!("  ... and {} more", components.len() - 15);
            }
        }

        Commands::Classify { file } => {
            let router = IndexRouter::with_defaults();
            for draft in load_drafts(&file)? {
                match draft.validate() {
                    Ok(entry) => {
                        let mut targets = vec![logsift::DEFAULT_INDEX];
                        targets.extend(router.classify(&entry));
                        println!(
                            "{:8} {:28} -> {}",
                            entry.level,
                            entry.component,
                            targets.join(", ")
                        );
                    }
                    Err(err) => eprintln!("skipped invalid entry: {err}"),
                }
            }
        }
    }

    Ok(())
}

/// Parse a JSON-lines file into entry drafts
fn load_drafts(path: &Path) -> Result<Vec<EntryDraft>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let mut drafts = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let draft: EntryDraft = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: malformed entry", path.display(), line_no + 1))?;
        drafts.push(draft);
    }
    Ok(drafts)
}

/// Build an engine from a JSONL file, reporting rejected entries
fn load_engine(path: &Path) -> Result<LogEngine> {
    let engine = LogEngine::new();
    let outcome = engine.bulk_ingest(load_drafts(path)?);
    if outcome.error_count > 0 {
        eprintln!(
            "warning: {} of {} entries rejected",
            outcome.error_count,
            outcome.success_count + outcome.error_count
        );
    }
    Ok(engine)
}

fn print_result(result: &QueryResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    for scored in &result.entries {
        let entry = &scored.entry;
        println!(
            "{}  {:8} {:28} {}  [{:.1}]",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.level,
            entry.component,
            entry.message,
            scored.score,
        );
    }
    println!(
        "{} of {} entries matched",
        result.matched_count, result.total_count
    );
    Ok(())
}
