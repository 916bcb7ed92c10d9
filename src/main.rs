//! # pollscore
//!
//! Scores pre-election opinion polls against the actual result: for every
//! polling station, how many of the actual top-N winners did its own top N
//! contain? See `--help` for the commands.

mod error;
mod input;
mod logging;
mod model;
mod names;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::Error;
use crate::input::{InputPaths, load_input};
use crate::model::profile::{DenominatorPolicy, ScoringProfile};
use crate::pipeline::prepare::{prepare_tables, write_prepared};
use crate::pipeline::run_analysis;
use crate::pipeline::stage2_normalize::build_normalizer;
use crate::pipeline::stage6_report::{build_summary, write_reports};
use crate::report::json::{render_station_json, render_summary_json};
use crate::report::text::{render_station_text, render_summary_text};

#[derive(Debug, Clone, Parser)]
#[cfg_attr(test, derive(PartialEq))]
#[command(author, version, about)]
struct Opt {
    /// Logging filter, `<target>=<level>` or a bare level. Layered over
    /// `RUST_LOG`.
    #[arg(long, short, default_value = "info", global = true)]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
#[cfg_attr(test, derive(PartialEq))]
enum Command {
    /// Score every station and write all report files to a directory.
    Run(RunArgs),
    /// Print the stations ranked by accuracy with the miss/false-inclusion tables.
    Summary(ViewArgs),
    /// Print one station's prediction next to the actual winners.
    Station(StationArgs),
    /// Normalize raw source tables into clean CSV tables plus a name mapping.
    Prepare(PrepareArgs),
}

#[derive(Debug, Clone, Args)]
#[cfg_attr(test, derive(PartialEq))]
struct InputArgs {
    /// Actual-results table (.md, .csv or .tsv, optionally .gz).
    #[arg(long, env = "POLLSCORE_RESULTS")]
    results: PathBuf,

    /// Opinion-poll table, wide (one column per station) or long.
    #[arg(long, env = "POLLSCORE_POLLS")]
    polls: PathBuf,

    /// Alias table mapping alternate spellings to canonical names.
    #[arg(long, env = "POLLSCORE_ALIASES")]
    aliases: Option<PathBuf>,

    /// Do not load the built-in alias, nickname and fix-up tables.
    #[arg(long, env = "POLLSCORE_NO_BUILTIN_ALIASES")]
    no_builtin_aliases: bool,
}

impl InputArgs {
    fn paths(&self) -> InputPaths {
        InputPaths {
            results: self.results.clone(),
            polls: self.polls.clone(),
            aliases: self.aliases.clone(),
            builtin_aliases: !self.no_builtin_aliases,
        }
    }
}

#[derive(Debug, Clone, Args)]
#[cfg_attr(test, derive(PartialEq))]
struct ProfileArgs {
    /// Number of seats compared.
    #[arg(long, env = "POLLSCORE_TOP_N", default_value_t = 12)]
    top_n: usize,

    /// Decimal places kept in accuracy percentages.
    #[arg(long, env = "POLLSCORE_PRECISION", default_value_t = 1)]
    precision: u32,

    /// What a station's correct count is divided by.
    #[arg(long, env = "POLLSCORE_DENOMINATOR", value_enum, default_value_t = DenominatorPolicy::Winners)]
    denominator: DenominatorPolicy,

    /// Rows listed in the most-missed / most-included tables.
    #[arg(long, env = "POLLSCORE_HIGHLIGHT", default_value_t = 5)]
    highlight: usize,

    /// Rows shown from a station's full standings.
    #[arg(long, env = "POLLSCORE_STANDINGS_LIMIT", default_value_t = 20)]
    standings_limit: usize,
}

impl ProfileArgs {
    fn profile(&self) -> ScoringProfile {
        ScoringProfile {
            top_n: self.top_n,
            precision: self.precision,
            denominator: self.denominator,
            highlight: self.highlight,
            standings_limit: self.standings_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
#[cfg_attr(test, derive(PartialEq))]
struct RunArgs {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    profile: ProfileArgs,
    /// Output directory; created if missing.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Clone, Args)]
#[cfg_attr(test, derive(PartialEq))]
struct ViewArgs {
    #[command(flatten)]
    input: InputArgs,
    #[command(flatten)]
    profile: ProfileArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
#[cfg_attr(test, derive(PartialEq))]
struct StationArgs {
    /// Station name as it appears in the poll table (case-insensitive).
    #[arg(long)]
    name: String,
    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Debug, Clone, Args)]
#[cfg_attr(test, derive(PartialEq))]
struct PrepareArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output directory for the normalized CSV tables.
    #[arg(long)]
    out: PathBuf,
}

fn main() {
    let opt = Opt::parse();
    // no subscriber yet, so this one goes straight to stderr
    if let Err(err) = logging::init(&opt.log) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    if let Err(err) = run(opt.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Run(args) => {
            let analysis = run_analysis(&args.input.paths(), &args.profile.profile())?;
            write_reports(&analysis, &args.out)?;
        }
        Command::Summary(args) => {
            let analysis = run_analysis(&args.input.paths(), &args.profile.profile())?;
            let summary = build_summary(&analysis);
            let rendered = match args.format {
                OutputFormat::Text => render_summary_text(&summary),
                OutputFormat::Json => render_summary_json(&summary)?,
            };
            print!("{rendered}");
        }
        Command::Station(args) => {
            let view = &args.view;
            let analysis = run_analysis(&view.input.paths(), &view.profile.profile())?;
            let detail = analysis.station_detail(&args.name)?;
            let rendered = match view.format {
                OutputFormat::Text => render_station_text(&detail, &analysis.profile),
                OutputFormat::Json => render_station_json(&detail)?,
            };
            print!("{rendered}");
        }
        Command::Prepare(args) => {
            let bundle = load_input(&args.input.paths())?;
            let normalizer = build_normalizer(&bundle);
            let prepared = prepare_tables(&bundle, &normalizer);
            write_prepared(&prepared, &args.out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
