use rust_decimal::Decimal;

use super::domain::{ActivityId, CategoryId, ClassId, StudentId};
use super::repository::RepositoryError;
use super::semester::SemesterKeyError;

/// Broad classification used by callers deciding how to surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Repository,
}

/// Error raised by the scoring engine and its service facade.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("class {0} not found")]
    ClassNotFound(ClassId),
    #[error("total {0} is negative")]
    NegativeTotal(Decimal),
    #[error("category {category_id} has a negative cap ({max_points})")]
    NegativeCap {
        category_id: CategoryId,
        max_points: Decimal,
    },
    #[error("activity {activity_id} carries negative points ({points})")]
    NegativePoints {
        activity_id: ActivityId,
        points: Decimal,
    },
    #[error(transparent)]
    Semester(#[from] SemesterKeyError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ScoringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoringError::StudentNotFound(_) | ScoringError::ClassNotFound(_) => {
                ErrorKind::NotFound
            }
            ScoringError::NegativeTotal(_)
            | ScoringError::NegativeCap { .. }
            | ScoringError::NegativePoints { .. }
            | ScoringError::Semester(_) => ErrorKind::InvalidInput,
            ScoringError::Repository(_) => ErrorKind::Repository,
        }
    }
}
