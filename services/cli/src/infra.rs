use chrono::NaiveDate;
use conduct_points::config::{AppConfig, OutputFormat};
use conduct_points::error::AppError;
use conduct_points::scoring::{DatasetSnapshot, ScoringError, ScoringService, SemesterKey};
use serde::Serialize;
use std::sync::Arc;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_semester(raw: &str) -> Result<SemesterKey, String> {
    SemesterKey::parse(raw).map_err(|err| err.to_string())
}

/// An explicit key wins; otherwise the semester containing `on`, or `today`.
pub(crate) fn resolve_semester(
    explicit: Option<SemesterKey>,
    on: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<SemesterKey, AppError> {
    match explicit {
        Some(semester) => Ok(semester),
        None => SemesterKey::containing(on.unwrap_or(today))
            .map_err(|err| AppError::Scoring(ScoringError::from(err))),
    }
}

pub(crate) fn load_service(
    config: &AppConfig,
) -> Result<ScoringService<DatasetSnapshot>, AppError> {
    let path = config.dataset.path.as_ref().ok_or_else(|| {
        AppError::Usage(
            "no dataset configured; pass --dataset or set DRL_DATASET_PATH".to_string(),
        )
    })?;
    let snapshot = DatasetSnapshot::from_path(path)?;
    Ok(ScoringService::new(Arc::new(snapshot)))
}

pub(crate) fn render<T: Serialize>(format: OutputFormat, value: &T) -> Result<String, AppError> {
    let rendered = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(rendered)
}

pub(crate) fn emit<T: Serialize>(format: OutputFormat, value: &T) -> Result<(), AppError> {
    println!("{}", render(format, value)?);
    Ok(())
}
