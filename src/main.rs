use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::{Parser, Subcommand};
use tf_idf_recommender::{
    CsvCorpusProvider, Recommendation, Recommender, RecommenderConfig, SharedRecommender,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tf-idf-recommender")]
#[command(about = "Find the records most similar to the first record matching a keyword")]
#[command(version)]
struct Cli {
    /// CSV corpus file
    #[arg(long, default_value = "gadget_clean.csv")]
    corpus: PathBuf,

    /// TOML configuration (stopwords, top_k, match_field, min_token_chars)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Column holding the display text
    #[arg(long, default_value = CsvCorpusProvider::DEFAULT_RAW_COLUMN)]
    raw_column: String,

    /// Column holding pre-cleaned text
    #[arg(long, default_value = CsvCorpusProvider::DEFAULT_TEXT_COLUMN)]
    text_column: String,

    /// Normalize the raw column instead of reading a cleaned column
    #[arg(long)]
    no_text_column: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend records for one keyword
    Query {
        keyword: String,

        /// Result count (overrides config)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Recommend records similar to the record at INDEX
    Similar {
        index: usize,

        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Print corpus and vocabulary sizes
    Stats,

    /// Read keywords from stdin, one per line, and answer each
    Serve,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RecommenderConfig::load(path),
        None => Ok(RecommenderConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let text_column = (!cli.no_text_column).then(|| cli.text_column.clone());
    let provider = CsvCorpusProvider::new(&cli.corpus)
        .with_raw_column(cli.raw_column.clone())
        .with_text_column(text_column);

    let build_start = Instant::now();
    let recommender = match Recommender::build(&provider, config) {
        Ok(recommender) => recommender,
        Err(e) => {
            error!("build failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(elapsed_ms = build_start.elapsed().as_millis() as u64, "build finished");

    match cli.command {
        Commands::Query { keyword, top_k, json } => {
            let top_k = top_k.unwrap_or(recommender.config().top_k);
            report(recommender.recommend_top(&keyword, top_k), json)
        }
        Commands::Similar { index, top_k, json } => {
            let top_k = top_k.unwrap_or(recommender.config().top_k);
            report(recommender.similar_to_top(index, top_k), json)
        }
        Commands::Stats => {
            match serde_json::to_string_pretty(&recommender.stats()) {
                Ok(out) => println!("{out}"),
                Err(e) => {
                    error!("{e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Commands::Serve => match SharedRecommender::install_global(recommender) {
            Ok(shared) => run_interactive(shared),
            Err(e) => {
                error!("{e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn report(result: tf_idf_recommender::Result<Recommendation>, json: bool) -> ExitCode {
    match result {
        Ok(rec) if json => match serde_json::to_string_pretty(&rec) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{e}");
                ExitCode::FAILURE
            }
        },
        Ok(rec) => {
            print_recommendation(&rec);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn print_recommendation(rec: &Recommendation) {
    println!("anchor\t{}\t{}", rec.anchor.index, rec.anchor.raw_text);
    for hit in &rec.ranked {
        println!("{:.1}%\t{}\t{}", hit.percent(), hit.document.index, hit.document.raw_text);
    }
}

fn run_interactive(shared: &SharedRecommender) -> ExitCode {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Query> ");
        if let Err(e) = stdout.flush() {
            error!("write error: {e}");
            return ExitCode::FAILURE;
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                error!("read error: {e}");
                return ExitCode::FAILURE;
            }
            None => break,
        };
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        // query errors are printed; serving continues
        match shared.recommend(&line) {
            Ok(rec) => print_recommendation(&rec),
            Err(e) => println!("{e}"),
        }
    }
    eprintln!("bye");
    ExitCode::SUCCESS
}
