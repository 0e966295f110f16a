use crate::commands::{
    run_overview, run_rank, run_report, run_score, run_semester, ClassArgs, ReportArgs,
    ScoreArgs, SemesterArgs,
};
use clap::{Parser, Subcommand};
use conduct_points::config::AppConfig;
use conduct_points::error::AppError;
use conduct_points::telemetry;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "drl",
    about = "Compute điểm rèn luyện scores, tiers and class rankings from a dataset snapshot",
    version
)]
struct Cli {
    /// Dataset snapshot (JSON). Overrides DRL_DATASET_PATH.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    /// Print compact JSON instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score card of one student for one semester
    Score(ScoreArgs),
    /// Rank every student of a class
    Rank(ClassArgs),
    /// Activity and tier statistics for a class
    Overview(ClassArgs),
    /// Both semesters of an academic year for one student
    Report(ReportArgs),
    /// Resolve and describe a semester key
    Semester(SemesterArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(dataset) = cli.dataset {
        config.dataset.path = Some(dataset);
    }
    if cli.compact {
        config.output = conduct_points::config::OutputFormat::Compact;
    }

    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, command = ?cli.command, "command dispatched");

    match cli.command {
        Command::Score(args) => run_score(&config, args),
        Command::Rank(args) => run_rank(&config, args),
        Command::Overview(args) => run_overview(&config, args),
        Command::Report(args) => run_report(&config, args),
        Command::Semester(args) => run_semester(&config, args),
    }
}
