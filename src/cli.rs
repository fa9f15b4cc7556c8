use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::book::DecisionBook;
use crate::config::{DigestConfig, OutputFormat};
use crate::correlate::MatchPolicy;
use crate::display::{print_error, print_section, print_success, pretty_cards, sources_table, styled_action};
use crate::error::DigestResult;
use crate::merge::{collapse, dump, row_count};
use crate::metric::MetricKind;
use crate::pipeline;
use crate::report::emit;

#[derive(Parser)]
#[command(name = "digest", version = "1.0.0", about = "Hold'em log digest — average outcome per hand, board and action.")]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Digest log files or folders into per-situation statistics
    Run {
        /// Log files or folders (searched recursively for *.log and *.log.N)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Outcome measured for each action
        #[arg(short, long, value_enum, default_value_t = MetricKind::Rank)]
        metric: MetricKind,
        /// How an action is matched to the settlement of its round
        #[arg(long = "match", value_enum, default_value_t = MatchPolicy::PlayerPresent)]
        policy: MatchPolicy,
        /// Emit every (cards, board, action) bucket instead of the best action per situation
        #[arg(long)]
        raw: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Delete log files that are empty or carry no usable events
        #[arg(long)]
        prune_empty: bool,
        /// Count repeated action timestamps every time they are seen
        #[arg(long)]
        no_dedup: bool,
        /// Worker threads (default: one per core)
        #[arg(short = 'j', long)]
        threads: Option<usize>,
        /// Print a per-file summary to stderr
        #[arg(long)]
        summary: bool,
    },
    /// Look up the best recorded action in a digest CSV
    Query {
        /// Collapsed digest CSV written by `digest run`
        book: PathBuf,
        /// Hole cards, comma separated in any order (e.g. Kh,2s)
        #[arg(short, long)]
        cards: String,
        /// Board cards, comma separated; omit for preflop
        #[arg(short, long, default_value = "")]
        board: String,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    // try_init: a second call (tests, run_with_args) keeps the first logger.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn dispatch(cli: Cli) {
    init_logging(cli.verbose);
    let result = match cli.command {
        Commands::Run {
            paths,
            metric,
            policy,
            raw,
            format,
            output,
            prune_empty,
            no_dedup,
            threads,
            summary,
        } => {
            let config = DigestConfig {
                paths,
                metric,
                policy,
                collapse: !raw,
                format,
                output,
                prune_empty,
                dedup: !no_dedup,
                threads,
            };
            cmd_run(&config, summary)
        }
        Commands::Query { book, cards, board } => cmd_query(book, cards, board),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        process::exit(1);
    }
}

fn cmd_run(config: &DigestConfig, summary: bool) -> DigestResult<()> {
    let outcome = pipeline::run(config)?;

    if summary {
        print_section("Sources", &sources_table(&outcome.reports));
    }
    let advisories = outcome.prunable().filter(|r| !r.pruned).count();
    if advisories > 0 && !config.prune_empty {
        log::warn!(
            "{} file(s) have no usable data; rerun with --prune-empty to delete them",
            advisories
        );
    }

    let buckets = outcome.aggregator.buckets();
    let report = if config.collapse {
        collapse(buckets)
    } else {
        dump(buckets)
    };

    emit(
        config.output.as_deref(),
        &report,
        config.format,
        config.metric.strategy(),
    )?;

    if let Some(path) = &config.output {
        print_success(&format!("Wrote {} rows to {}", row_count(&report), path.display()));
    }
    Ok(())
}

fn cmd_query(book: PathBuf, cards: String, board: String) -> DigestResult<()> {
    let book = DecisionBook::load(&book)?;
    println!();
    match book.lookup(&cards, &board) {
        Some(decision) => {
            println!(
                "  {} on {}  →  {}",
                pretty_cards(&crate::cards::recanonicalize(&cards)),
                pretty_cards(&crate::cards::recanonicalize(&board)),
                styled_action(&decision.action),
            );
            println!(
                "  {} {:.2} over {} hands",
                "Average:".dimmed(),
                decision.average,
                decision.count,
            );
        }
        None => {
            println!("  {}", "No decision recorded for this hand and board.".yellow());
        }
    }
    println!();
    Ok(())
}
