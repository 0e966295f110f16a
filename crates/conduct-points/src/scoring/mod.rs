//! Point computation and class-scope resolution.
//!
//! Pipeline per student and semester: class scope → dual-confirmation
//! validation → per-category caps → totals → tier, with class-wide ranking built
//! from the per-student totals. Every stage is a pure function over the records it
//! is handed; [`ScoringService`] wires them to the reader traits.

pub mod aggregate;
pub mod capping;
pub mod classification;
pub mod domain;
mod error;
pub mod participation;
pub mod ranking;
pub mod repository;
pub mod scope;
pub mod semester;
mod service;
pub mod snapshot;
pub mod summary;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, completion_ratio, round_points, PointTotals};
pub use capping::{
    cap_by_category, index_categories, max_total_points, CategoryIndex, CategoryTotal,
};
pub use classification::{classify, points_to_next_tier, Tier};
pub use domain::{
    Activity, ActivityCategory, ActivityId, ActivityStatus, AttendanceRecord, CategoryId, Class,
    ClassId, Registration, RegistrationStatus, Student, StudentId, UserId,
};
pub use error::{ErrorKind, ScoringError};
pub use participation::{
    counted_participations, orphaned_registrations, CountedParticipation, ParticipationLedger,
};
pub use ranking::{rank_students, ClassRanking, RankEntry, StudentTotal, TierCount};
pub use repository::{
    ActivityReader, AttendanceReader, RegistrationReader, RepositoryError, RosterReader,
    ScoringSource,
};
pub use scope::{ClassScope, ScopeBasis, ScopedActivity};
pub use semester::{SemesterKey, SemesterKeyError, SemesterWindow, Term};
pub use service::ScoringService;
pub use snapshot::{DatasetSnapshot, SnapshotError};
pub use summary::{AcademicYearReport, ClassOverview, StudentScoreCard, StudentScoreSummary};
