use crate::infra::{emit, load_service, resolve_semester};
use chrono::{Local, NaiveDate};
use clap::Args;
use conduct_points::config::AppConfig;
use conduct_points::error::AppError;
use conduct_points::scoring::{
    AcademicYearReport, ClassId, ClassOverview, ClassRanking, DatasetSnapshot, ScoringService,
    SemesterKey, StudentId, StudentScoreCard, Term,
};
use serde::Serialize;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct PeriodArgs {
    /// Semester key, e.g. hoc_ky_1_2025. Defaults to the semester containing --on.
    #[arg(long, value_parser = crate::infra::parse_semester)]
    pub(crate) semester: Option<SemesterKey>,
    /// Reference date (YYYY-MM-DD) used when --semester is omitted. Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) on: Option<NaiveDate>,
}

impl PeriodArgs {
    fn resolve(&self) -> Result<SemesterKey, AppError> {
        resolve_semester(self.semester, self.on, Local::now().date_naive())
    }
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Student id
    #[arg(long)]
    pub(crate) student: String,
    #[command(flatten)]
    pub(crate) period: PeriodArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ClassArgs {
    /// Class id
    #[arg(long)]
    pub(crate) class: String,
    #[command(flatten)]
    pub(crate) period: PeriodArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Student id
    #[arg(long)]
    pub(crate) student: String,
    /// First calendar year of the academic year, e.g. 2025 for 2025-2026
    #[arg(long)]
    pub(crate) year: u16,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SemesterArgs {
    #[command(flatten)]
    pub(crate) period: PeriodArgs,
}

/// Calendar facts about a semester key.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct SemesterInfo {
    pub(crate) key: SemesterKey,
    pub(crate) label: String,
    pub(crate) term: Term,
    pub(crate) academic_year: u16,
    pub(crate) starts_on: NaiveDate,
    pub(crate) ends_on: NaiveDate,
}

impl From<SemesterKey> for SemesterInfo {
    fn from(key: SemesterKey) -> Self {
        let window = key.window();
        Self {
            key,
            label: key.label(),
            term: key.term(),
            academic_year: key.academic_year(),
            starts_on: window.starts_on,
            ends_on: window.ends_on,
        }
    }
}

pub(crate) fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let service = load_service(config)?;
    let card = score_card(&service, &args)?;
    info!(
        student_id = %card.summary.student_id,
        semester = %card.summary.semester,
        total_capped = %card.summary.total_capped,
        tier = card.summary.tier_label,
        "score card computed"
    );
    emit(config.output, &card)
}

pub(crate) fn run_rank(config: &AppConfig, args: ClassArgs) -> Result<(), AppError> {
    let service = load_service(config)?;
    let ranking = class_ranking(&service, &args)?;
    info!(
        class_id = %ranking.class_id,
        semester = %ranking.semester,
        class_size = ranking.class_size,
        "class ranked"
    );
    emit(config.output, &ranking)
}

pub(crate) fn run_overview(config: &AppConfig, args: ClassArgs) -> Result<(), AppError> {
    let service = load_service(config)?;
    let overview = class_overview(&service, &args)?;
    info!(
        class_id = %overview.class_id,
        semester = %overview.semester,
        participants = overview.participants,
        "class overview computed"
    );
    emit(config.output, &overview)
}

pub(crate) fn run_report(config: &AppConfig, args: ReportArgs) -> Result<(), AppError> {
    let service = load_service(config)?;
    let report = academic_year_report(&service, &args)?;
    emit(config.output, &report)
}

pub(crate) fn run_semester(config: &AppConfig, args: SemesterArgs) -> Result<(), AppError> {
    let info = SemesterInfo::from(args.period.resolve()?);
    emit(config.output, &info)
}

fn score_card(
    service: &ScoringService<DatasetSnapshot>,
    args: &ScoreArgs,
) -> Result<StudentScoreCard, AppError> {
    let semester = args.period.resolve()?;
    Ok(service.student_score_card(&StudentId::new(args.student.as_str()), &semester)?)
}

fn class_ranking(
    service: &ScoringService<DatasetSnapshot>,
    args: &ClassArgs,
) -> Result<ClassRanking, AppError> {
    let semester = args.period.resolve()?;
    service
        .rank_class(&ClassId::new(args.class.as_str()), &semester)?
        .ok_or_else(|| unknown_class(&args.class))
}

fn class_overview(
    service: &ScoringService<DatasetSnapshot>,
    args: &ClassArgs,
) -> Result<ClassOverview, AppError> {
    let semester = args.period.resolve()?;
    service
        .class_overview(&ClassId::new(args.class.as_str()), &semester)?
        .ok_or_else(|| unknown_class(&args.class))
}

fn academic_year_report(
    service: &ScoringService<DatasetSnapshot>,
    args: &ReportArgs,
) -> Result<AcademicYearReport, AppError> {
    Ok(service.academic_year_report(&StudentId::new(args.student.as_str()), args.year)?)
}

fn unknown_class(class: &str) -> AppError {
    AppError::Usage(format!("class '{class}' does not exist"))
}
