//! Read-only collaborator contracts. The engine never writes; implementations own
//! I/O, timeouts and retries.

use super::domain::{
    Activity, ActivityCategory, ActivityId, AttendanceRecord, Class, ClassId, Registration,
    Student, StudentId,
};
use super::semester::SemesterKey;

/// Students and classes.
pub trait RosterReader: Send + Sync {
    fn find_class_by_id(&self, id: &ClassId) -> Result<Option<Class>, RepositoryError>;
    fn find_students_by_class_id(&self, id: &ClassId) -> Result<Vec<Student>, RepositoryError>;
    fn find_student_by_id(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError>;
}

/// Activities and their categories.
pub trait ActivityReader: Send + Sync {
    fn find_activities_by_semester(
        &self,
        semester: &SemesterKey,
    ) -> Result<Vec<Activity>, RepositoryError>;
    fn find_categories(&self) -> Result<Vec<ActivityCategory>, RepositoryError>;
    /// Activities of any semester; ids without a record are simply absent.
    fn find_activities_by_ids(&self, ids: &[ActivityId]) -> Result<Vec<Activity>, RepositoryError>;
}

pub trait RegistrationReader: Send + Sync {
    /// Every registration of the student, across semesters, including ones whose
    /// activity has since been deleted.
    fn find_registrations_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Registration>, RepositoryError>;
}

pub trait AttendanceReader: Send + Sync {
    /// Only records with `confirmed == true` are expected, but the engine re-checks.
    fn find_confirmed_attendance(
        &self,
        student_id: &StudentId,
        activity_ids: &[ActivityId],
    ) -> Result<Vec<AttendanceRecord>, RepositoryError>;
}

/// Everything the service facade reads from.
pub trait ScoringSource: RosterReader + ActivityReader + RegistrationReader + AttendanceReader {}

impl<T> ScoringSource for T where
    T: RosterReader + ActivityReader + RegistrationReader + AttendanceReader
{
}

/// Error enumeration for reader failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
