//! In-memory dataset implementing every reader contract. Used by the CLI and by
//! tests; a database-backed deployment supplies its own readers.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{
    Activity, ActivityCategory, ActivityId, AttendanceRecord, Class, ClassId, Registration,
    Student, StudentId,
};
use super::repository::{
    ActivityReader, AttendanceReader, RegistrationReader, RepositoryError, RosterReader,
};
use super::semester::SemesterKey;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub categories: Vec<ActivityCategory>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub registrations: Vec<Registration>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

impl DatasetSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;
        snapshot.report_duplicate_registrations();
        Ok(snapshot)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            classes = snapshot.classes.len(),
            students = snapshot.students.len(),
            activities = snapshot.activities.len(),
            registrations = snapshot.registrations.len(),
            "dataset snapshot loaded"
        );
        Ok(snapshot)
    }

    fn report_duplicate_registrations(&self) {
        let mut seen = BTreeSet::new();
        for registration in &self.registrations {
            if !seen.insert((&registration.student_id, &registration.activity_id)) {
                warn!(
                    student_id = %registration.student_id,
                    activity_id = %registration.activity_id,
                    "snapshot holds more than one registration for the same pair"
                );
            }
        }
    }
}

impl RosterReader for DatasetSnapshot {
    fn find_class_by_id(&self, id: &ClassId) -> Result<Option<Class>, RepositoryError> {
        Ok(self.classes.iter().find(|class| class.id == *id).cloned())
    }

    fn find_students_by_class_id(&self, id: &ClassId) -> Result<Vec<Student>, RepositoryError> {
        Ok(self
            .students
            .iter()
            .filter(|student| student.class_id == *id)
            .cloned()
            .collect())
    }

    fn find_student_by_id(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        Ok(self.students.iter().find(|student| student.id == *id).cloned())
    }
}

impl ActivityReader for DatasetSnapshot {
    fn find_activities_by_semester(
        &self,
        semester: &SemesterKey,
    ) -> Result<Vec<Activity>, RepositoryError> {
        Ok(self
            .activities
            .iter()
            .filter(|activity| activity.semester == *semester)
            .cloned()
            .collect())
    }

    fn find_categories(&self) -> Result<Vec<ActivityCategory>, RepositoryError> {
        Ok(self.categories.clone())
    }

    fn find_activities_by_ids(&self, ids: &[ActivityId]) -> Result<Vec<Activity>, RepositoryError> {
        Ok(self
            .activities
            .iter()
            .filter(|activity| ids.contains(&activity.id))
            .cloned()
            .collect())
    }
}

impl RegistrationReader for DatasetSnapshot {
    fn find_registrations_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Registration>, RepositoryError> {
        Ok(self
            .registrations
            .iter()
            .filter(|registration| registration.student_id == *student_id)
            .cloned()
            .collect())
    }
}

impl AttendanceReader for DatasetSnapshot {
    fn find_confirmed_attendance(
        &self,
        student_id: &StudentId,
        activity_ids: &[ActivityId],
    ) -> Result<Vec<AttendanceRecord>, RepositoryError> {
        Ok(self
            .attendance
            .iter()
            .filter(|record| {
                record.student_id == *student_id
                    && record.confirmed
                    && activity_ids.contains(&record.activity_id)
            })
            .cloned()
            .collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("unable to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}
