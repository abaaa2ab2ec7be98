use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use jargon_core::config::{default_data_dir, CatalogPaths};
use jargon_core::core::builder::{regenerate_document, render_lookup_document};
use jargon_core::core::normalizer::normalize_with;
use jargon_core::core::types::{LookupEntry, MatchResult};
use jargon_core::explore::Trail;
use jargon_core::persistence::{load_lemmatizer, load_phrases, write_lookup_document};
use jargon_core::{CatalogError, JargonEngine, Result};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Match text against a curated jargon catalog and browse related phrases
#[derive(Parser, Debug)]
#[command(name = "jargon", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding phrases.json, lookup.json and (optionally) lemmas.json
    #[arg(long, env = "JARGON_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Override the phrase document path
    #[arg(long, env = "JARGON_PHRASES", global = true)]
    phrases: Option<PathBuf>,

    /// Override the lookup document path
    #[arg(long, env = "JARGON_LOOKUP", global = true)]
    lookup: Option<PathBuf>,

    /// Override the lemma table path
    #[arg(long, env = "JARGON_LEMMAS", global = true)]
    lemmas: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized form of some text
    Normalize { text: String },
    /// Find every cataloged phrase, acronym or category referenced in text
    Search {
        /// Text to search; read from --file or stdin when omitted
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Emit matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one entry and its connections
    Show { index: usize },
    /// Show the most relevant entry
    Seed,
    /// Rebuild the lookup document from the phrase document
    Regenerate {
        /// Write atomically to this path instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load both documents and check they agree
    Verify,
    /// Browse the connection graph interactively
    Explore,
}

impl Cli {
    fn paths(&self) -> CatalogPaths {
        let dir = self.data_dir.clone().unwrap_or_else(default_data_dir);
        let mut paths = CatalogPaths::in_dir(&dir);
        if let Some(p) = &self.phrases {
            paths.phrases = p.clone();
        }
        if let Some(p) = &self.lookup {
            paths.lookup = p.clone();
        }
        if let Some(p) = &self.lemmas {
            paths.lemmas = Some(p.clone());
        }
        paths
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "jargon_core=debug,jargon=debug" } else { "jargon_core=info,jargon=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let paths = cli.paths();
    match &cli.command {
        Command::Normalize { text } => {
            let lemmatizer = load_lemmatizer(paths.lemmas.as_deref())?;
            println!("{}", normalize_with(text, lemmatizer.as_ref()));
        }
        Command::Search { text, file, json } => {
            let engine = JargonEngine::open(&paths)?;
            let raw = match (text, file) {
                (Some(text), _) => text.clone().into_bytes(),
                (None, Some(path)) => std::fs::read(path)?,
                (None, None) => {
                    let mut buf = Vec::new();
                    io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            let scan = engine.scan_bytes(&raw)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&scan)?);
            } else {
                print_scan(&engine, &scan.text, &scan.matches)?;
            }
        }
        Command::Show { index } => {
            let engine = JargonEngine::open(&paths)?;
            print_entry(&engine, engine.fetch_lookup(*index)?)?;
        }
        Command::Seed => {
            let engine = JargonEngine::open(&paths)?;
            match engine.most_relevant_entry() {
                Some(entry) => print_entry(&engine, entry)?,
                None => println!("The catalog is empty."),
            }
        }
        Command::Regenerate { output } => {
            let records = load_phrases(&paths.phrases)?;
            let lemmatizer = load_lemmatizer(paths.lemmas.as_deref())?;
            let text = regenerate_document(&records, lemmatizer.as_ref())?;
            match output {
                Some(path) => write_lookup_document(path, &text)?,
                None => print!("{text}"),
            }
        }
        Command::Verify => {
            let engine = JargonEngine::open(&paths)?;
            let catalog = engine.catalog();
            let edges: usize = catalog.lookups().iter().map(|l| l.connections().len()).sum();
            let isolated = catalog.lookups().iter().filter(|l| l.connections.is_none()).count();
            println!("{} entries, {} connections, {} without connections", catalog.len(), edges / 2, isolated);

            let stale = engine.regenerate()? != render_lookup_document(catalog.lookups())?;
            if stale {
                println!("{}", "lookup document is out of date; run `jargon regenerate`".yellow());
            } else {
                println!("{}", "lookup document is current".green());
            }
        }
        Command::Explore => {
            let engine = JargonEngine::open(&paths)?;
            explore(&engine)?;
        }
    }
    Ok(())
}

fn phrase_of<'a>(engine: &'a JargonEngine, entry: &LookupEntry) -> Result<&'a str> {
    Ok(engine.fetch_phrase(entry.index)?.phrase.as_str())
}

fn print_entry(engine: &JargonEngine, entry: &LookupEntry) -> Result<()> {
    let record = engine.fetch_phrase(entry.index)?;
    println!("[{}] {}", entry.index, record.phrase.as_str().bold());
    println!("    {}", record.meaning);
    if let Some(category) = &record.category {
        println!("    category: {category}");
    }
    if !entry.acronyms().is_empty() {
        println!("    acronyms: {}", entry.acronyms().join(", "));
    }
    println!("    relevance: {}", entry.relevance);
    for conn in entry.connections() {
        println!("    -> [{}] {}", conn.index, conn.phrase);
    }
    Ok(())
}

/// Prints the text with every matched span highlighted, then one line per entry.
fn print_scan(engine: &JargonEngine, text: &str, matches: &[MatchResult<'_>]) -> Result<()> {
    let mut marked = vec![false; text.len()];
    for found in matches {
        for loc in &found.locations {
            marked[loc.index..loc.index + loc.span].iter_mut().for_each(|m| *m = true);
        }
    }

    let mut line = String::new();
    let mut start = 0;
    let boundaries = text.char_indices().map(|(at, _)| at).skip(1).chain(std::iter::once(text.len()));
    for at in boundaries.filter(|_| !text.is_empty()) {
        if at == text.len() || marked[at] != marked[start] {
            let segment = &text[start..at];
            if marked[start] {
                line.push_str(&segment.black().on_green().to_string());
            } else {
                line.push_str(segment);
            }
            start = at;
        }
    }
    println!("{line}");

    if matches.is_empty() {
        println!("\nNo cataloged phrases found.");
    }
    for found in matches {
        let spans: Vec<String> = found.locations.iter().map(|l| format!("{}+{}", l.index, l.span)).collect();
        println!("  [{}] {} at {}", found.lookup.index, phrase_of(engine, found.lookup)?, spans.join(", "));
    }
    Ok(())
}

fn print_trail(engine: &JargonEngine, trail: &Trail, notice: Option<&str>) -> Result<()> {
    print!("\x1B[2J\x1B[1;1H");
    println!("Jargon explorer. Select with ':row.pos' (or ':pos' on the last row).");
    println!("'?text' searches, 'exit' quits.");
    println!("---------------------------------------------------------------");
    for (r, row) in trail.rows().iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(p, &index)| {
                let phrase = engine.fetch_phrase(index).map(|rec| rec.phrase.as_str()).unwrap_or("?");
                format!("{}.{} {}", r + 1, p + 1, phrase)
            })
            .collect();
        let line = cells.join("  |  ");
        // The selected entry of every row but the last
        if row.len() == 1 && r + 1 < trail.rows().len() {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }
    if let Some(notice) = notice {
        println!("\n{}", notice.yellow());
    }
    print!("\n> ");
    io::stdout().flush()?;
    Ok(())
}

fn parse_selection(cmd: &str, trail: &Trail) -> Option<(usize, usize)> {
    let pick = cmd.strip_prefix(':')?;
    let (row, pos) = match pick.split_once('.') {
        Some((row, pos)) => (row.parse::<usize>().ok()?, pos.parse::<usize>().ok()?),
        None => (trail.rows().len(), pick.parse::<usize>().ok()?),
    };
    Some((row.checked_sub(1)?, pos.checked_sub(1)?))
}

fn explore(engine: &JargonEngine) -> Result<()> {
    let mut trail = Trail::seeded(engine.catalog());
    if trail.rows().is_empty() {
        println!("The catalog is empty.");
        return Ok(());
    }
    info!("explore session started");

    print_trail(engine, &trail, None)?;
    for line in io::stdin().lock().lines() {
        let input = line?;
        let cmd = input.trim();
        let notice = match cmd {
            "exit" => break,
            s if s.starts_with('?') => {
                let scan = engine.scan(&s[1..]);
                print_scan(engine, &scan.text, &scan.matches)?;
                print!("\n> ");
                io::stdout().flush()?;
                continue;
            }
            s => match parse_selection(s, &trail) {
                Some((row, pos)) => match trail.select(engine.catalog(), row, pos) {
                    Ok(_) => None,
                    Err(CatalogError::InvalidInput { reason }) => Some(reason),
                    Err(e) => return Err(e),
                },
                None => Some(format!("Unrecognized command: {s}")),
            },
        };
        print_trail(engine, &trail, notice.as_deref())?;
    }
    Ok(())
}
