use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use wordscan::analysis::frequency::{SortKey, DEFAULT_TOP_N};
use wordscan::config::Config;
use wordscan::modes::{Analysis, Artifacts, Input, Mode};
use wordscan::output;
use wordscan::text::normalizer::CleaningConfig;

/// wordscan: word and keyword statistics for pasted text, Wikipedia
/// articles, résumé archives and job postings.
#[derive(Parser)]
#[command(name = "wordscan", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank keyword phrases with RAKE (raw text, no cleaning)
    Keywords {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Count cleaned words; document sets also report coverage
    Counts {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        cleaning: CleaningArgs,

        /// Number of words to show (0 = all)
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Order by raw count or by share of documents containing the word
        #[arg(long, value_enum, default_value_t = SortArg::Count)]
        sort: SortArg,
    },

    /// Match known skills and rank them by popularity
    Skills {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        cleaning: CleaningArgs,
    },

    /// Rank the terms that set documents apart (TF-IDF)
    Tfidf {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        cleaning: CleaningArgs,

        /// Number of terms to show (0 = all)
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Where the text comes from
    #[arg(long, value_enum, default_value_t = SourceArg::Text)]
    source: SourceArg,

    /// Files, article titles/URLs, archive paths or requisition ids
    /// (text reads stdin when none are given)
    inputs: Vec<String>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CleaningArgs {
    /// Stem every token
    #[arg(long)]
    stem: bool,

    /// Lemmatize with part-of-speech context
    #[arg(long)]
    lemma: bool,

    /// Merge common word pairs using the phrase model
    #[arg(long)]
    phrases: bool,
}

impl From<&CleaningArgs> for CleaningConfig {
    fn from(args: &CleaningArgs) -> Self {
        CleaningConfig {
            stem: args.stem,
            lemma: args.lemma,
            phrases: args.phrases,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    /// Text files or stdin
    Text,
    /// Wikipedia articles
    Wiki,
    /// Résumé quick view zip archives
    Archive,
    /// Job postings by requisition id
    Job,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Count,
    Coverage,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Count => SortKey::Count,
            SortArg::Coverage => SortKey::Coverage,
        }
    }
}

fn build_input(source: &SourceArgs) -> Input {
    let inputs = source.inputs.clone();
    match source.source {
        SourceArg::Text => Input::Text(inputs.into_iter().map(PathBuf::from).collect()),
        SourceArg::Wiki => Input::Wikipedia(inputs),
        SourceArg::Archive => Input::Archive(inputs.into_iter().map(PathBuf::from).collect()),
        SourceArg::Job => Input::JobPosting(inputs),
    }
}

/// Turn the parsed command into a Mode plus the --json flag.
fn build_mode(command: &Commands) -> (Mode, bool) {
    let (source, analysis, cleaning) = match command {
        Commands::Keywords { source } => (source, Analysis::Keywords, CleaningConfig::default()),
        Commands::Counts {
            source,
            cleaning,
            top,
            sort,
        } => (
            source,
            Analysis::Counts {
                top_n: *top,
                sort: (*sort).into(),
            },
            cleaning.into(),
        ),
        Commands::Skills { source, cleaning } => (source, Analysis::Skills, cleaning.into()),
        Commands::Tfidf {
            source,
            cleaning,
            top,
        } => (source, Analysis::TfIdf { top_n: *top }, cleaning.into()),
    };

    let mode = Mode {
        input: build_input(source),
        analysis,
        cleaning,
    };
    (mode, source.json)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg} ({elapsed})")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging (stderr, so --json output stays clean)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wordscan=info")),
        )
        .init();

    let cli = Cli::parse();
    let (mode, json) = build_mode(&cli.command);
    mode.validate()?;

    let config = Config::load()?;
    let artifacts = Artifacts::load(&config, &mode)?;
    info!(
        analysis = ?mode.analysis,
        cleaning = ?mode.cleaning,
        "Starting run"
    );

    let pb = (mode.is_slow_fetch() && !json)
        .then(|| spinner(&format!("Reading {} input...", mode.input.kind())));
    let outcome = mode.run(&config, &artifacts).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let (docs, result) = outcome?;

    if json {
        println!("{}", output::to_json(&result)?);
    } else {
        output::terminal::display_document_summary(&docs);
        output::terminal::display_result(&result);
        if docs.is_empty() {
            println!("{}", "The source produced no documents.".yellow());
        }
    }

    Ok(())
}
