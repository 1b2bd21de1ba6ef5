use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sentrank_core::{CoOccurrenceMethod, CorpusIndex, FillerWords, NgramOptions, RankOptions, RankedSentence};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(Parser)]
#[command(name = "sentrank")]
#[command(about = "Rank the sentences of a text corpus against a query", long_about = None)]
struct Cli {
    /// Corpus text file
    #[arg(long)]
    corpus: String,
    /// Filler word list (JSON array or one word per line); missing file means no fillers
    #[arg(long, default_value = "filler_words.json")]
    fillers: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank corpus sentences against a single query
    Rank {
        query: String,
        #[command(flatten)]
        scoring: ScoringArgs,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Read queries from stdin, one per line, until EOF or "exit"
    Interactive {
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// List corpus tokens found around n-grams shared with the query
    Ngrams {
        query: String,
        /// N-gram length
        #[arg(long, default_value_t = 2)]
        n: usize,
        /// Number of tokens to show (0 = all)
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Neighbouring positions counted on each side of a match
        #[arg(long, default_value_t = 1)]
        context: usize,
        #[arg(long, default_value_t = false)]
        filter_fillers: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print corpus statistics
    Stats {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args, Clone)]
struct ScoringArgs {
    /// Number of results to show (0 = all)
    #[arg(long, default_value_t = 10)]
    top: usize,
    #[arg(long, default_value_t = 0.95)]
    tfidf_weight: f64,
    #[arg(long, default_value_t = 0.05)]
    char_weight: f64,
    /// Drop filler words before scoring
    #[arg(long, default_value_t = false)]
    filter_fillers: bool,
    /// Weight of co-occurrence similarity (0 disables it)
    #[arg(long, default_value_t = 0.0)]
    co_occurrence_weight: f64,
    /// Co-occurrence scoring: jaccard or pmi
    #[arg(long, default_value_t = CoOccurrenceMethod::Jaccard)]
    method: CoOccurrenceMethod,
}

impl From<ScoringArgs> for RankOptions {
    fn from(args: ScoringArgs) -> Self {
        RankOptions {
            tfidf_weight: args.tfidf_weight,
            char_weight: args.char_weight,
            filter_fillers: args.filter_fillers,
            co_occurrence_weight: args.co_occurrence_weight,
            co_occurrence_method: args.method,
            top_n: args.top,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let index = load_index(&cli.corpus, &cli.fillers)?;
    match cli.command {
        Commands::Rank { query, scoring, json } => {
            let hits = index.rank_sentences(&query, &scoring.into());
            if json {
                print_json(&hits)
            } else {
                print_hits(&hits);
                Ok(())
            }
        }
        Commands::Interactive { scoring } => interactive(&index, &scoring.into()),
        Commands::Ngrams { query, n, top, context, filter_fillers, json } => {
            let opts = NgramOptions { n, filter_fillers, top_n: top, context };
            let tokens = index.find_most_common_tokens_from_query_ngrams(&query, &opts);
            if json {
                return print_json(&tokens);
            }
            if tokens.is_empty() {
                println!("no shared {n}-grams");
            }
            for t in tokens {
                println!("{:>6}  {}", t.count, t.token);
            }
            Ok(())
        }
        Commands::Stats { json } => {
            let stats = index.stats();
            if json {
                return print_json(&stats);
            }
            println!("tokens:              {}", stats.token_count);
            println!("tokens w/o fillers:  {}", stats.filtered_token_count);
            println!("sentences:           {}", stats.sentence_count);
            println!("distinct stems:      {}", stats.vocabulary_size);
            println!("filler words:        {}", stats.filler_word_count);
            println!("co-occurring pairs:  {}", stats.co_occurrence_pairs);
            Ok(())
        }
    }
}

fn load_index(corpus: &str, fillers: &str) -> Result<CorpusIndex> {
    let text = fs::read_to_string(Path::new(corpus)).with_context(|| format!("reading corpus {corpus}"))?;
    if text.trim().is_empty() {
        bail!("corpus {corpus} is empty");
    }
    let fillers = FillerWords::load_or_empty(fillers);
    tracing::info!(corpus, bytes = text.len(), filler_words = fillers.len(), "building corpus index");
    Ok(CorpusIndex::new(&text, fillers))
}

fn interactive(index: &CorpusIndex, opts: &RankOptions) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "query> ")?;
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "exit" | "quit") {
            break;
        }
        print_hits(&index.rank_sentences(query, opts));
    }
    Ok(())
}

fn print_hits(hits: &[RankedSentence]) {
    if hits.is_empty() {
        println!("no matching sentences");
        return;
    }
    for (rank, hit) in hits.iter().enumerate() {
        println!("{:>3}. [{:.4}] {}", rank + 1, hit.score, hit.sentence);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
