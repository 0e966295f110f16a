use rust_decimal::Decimal;
use serde::Serialize;

use super::capping::CategoryTotal;
use super::classification::Tier;
use super::domain::{ActivityId, ClassId, StudentId};
use super::participation::CountedParticipation;
use super::ranking::TierCount;
use super::semester::SemesterKey;

/// Dashboard-facing score of one student for one semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentScoreSummary {
    pub student_id: StudentId,
    pub mssv: String,
    pub semester: SemesterKey,
    pub total_raw: Decimal,
    pub total_capped: Decimal,
    pub tier: Tier,
    pub tier_label: &'static str,
    pub class_rank: Option<u32>,
    pub class_size: usize,
}

/// Summary plus the breakdown needed to explain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentScoreCard {
    pub summary: StudentScoreSummary,
    pub categories: Vec<CategoryTotal>,
    pub participations: Vec<CountedParticipation>,
    pub awaiting_attendance: Vec<ActivityId>,
    pub attendance_without_registration: Vec<ActivityId>,
    /// Registrations whose activity no longer exists.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub orphaned_registrations: Vec<ActivityId>,
    /// Exact distance to the next tier; absent at the top tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_to_next_tier: Option<Decimal>,
    /// Sum of all category caps.
    pub max_total_points: Decimal,
    /// `total_capped / max_total_points`, at most 1.
    pub completion_ratio: Decimal,
}

/// Class-wide view used by homeroom teachers and class monitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassOverview {
    pub class_id: ClassId,
    pub class_name: String,
    pub semester: SemesterKey,
    pub class_size: usize,
    /// Approved or finished activities attributed to the class.
    pub published_activities: usize,
    /// In-scope activities admitted only through creator inference.
    pub legacy_activity_ids: Vec<ActivityId>,
    /// Students with at least one counted participation.
    pub participants: usize,
    pub tier_distribution: Vec<TierCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcademicYearReport {
    pub student_id: StudentId,
    pub mssv: String,
    pub academic_year: u16,
    pub semesters: Vec<StudentScoreSummary>,
}
