use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::aggregate::{aggregate, completion_ratio, PointTotals};
use super::capping::{
    cap_by_category, index_categories, max_total_points, CategoryIndex, CategoryTotal,
};
use super::classification::{classify, points_to_next_tier};
use super::domain::{Activity, ActivityId, Class, ClassId, Registration, Student, StudentId};
use super::error::ScoringError;
use super::participation::{self, ParticipationLedger};
use super::ranking::{rank_students, ClassRanking, StudentTotal};
use super::repository::ScoringSource;
use super::scope::{ClassScope, ScopeBasis, ScopedActivity};
use super::semester::SemesterKey;
use super::summary::{AcademicYearReport, ClassOverview, StudentScoreCard, StudentScoreSummary};

/// Facade running the full pipeline over freshly read data on every call.
pub struct ScoringService<S> {
    source: Arc<S>,
}

/// Everything read for one class and semester.
struct ClassContext {
    class: Class,
    students: Vec<Student>,
    scope: ClassScope,
    activities: Vec<Activity>,
    categories: CategoryIndex,
}

struct StudentEvaluation {
    student: Student,
    ledger: ParticipationLedger,
    orphaned_registrations: Vec<ActivityId>,
    categories: Vec<CategoryTotal>,
    /// Exact sums; rounded only when copied into output records.
    totals: PointTotals,
}

impl<S> ScoringService<S>
where
    S: ScoringSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Score card for one student. A missing student or class is an error here.
    pub fn student_score_card(
        &self,
        student_id: &StudentId,
        semester: &SemesterKey,
    ) -> Result<StudentScoreCard, ScoringError> {
        let student = self
            .source
            .find_student_by_id(student_id)?
            .ok_or_else(|| ScoringError::StudentNotFound(student_id.clone()))?;
        self.score_card_for(student, semester)
    }

    /// Rank every student of a class. `None` when the class does not exist.
    pub fn rank_class(
        &self,
        class_id: &ClassId,
        semester: &SemesterKey,
    ) -> Result<Option<ClassRanking>, ScoringError> {
        let Some(context) = self.load_class(class_id, semester)? else {
            info!(class_id = %class_id, "ranking requested for unknown class");
            return Ok(None);
        };

        let scoped = context.scope.select(&context.activities);
        let evaluations = self.evaluate_students(&context, &scoped, &context.students)?;
        let ranking = build_ranking(&context, semester, &evaluations)?;
        Ok(Some(ranking))
    }

    /// Activity and tier statistics for a class. `None` when the class does not exist.
    pub fn class_overview(
        &self,
        class_id: &ClassId,
        semester: &SemesterKey,
    ) -> Result<Option<ClassOverview>, ScoringError> {
        let Some(context) = self.load_class(class_id, semester)? else {
            info!(class_id = %class_id, "overview requested for unknown class");
            return Ok(None);
        };

        let scoped = context.scope.select(&context.activities);
        let published_activities = scoped
            .iter()
            .filter(|scoped| scoped.activity.status.is_published())
            .count();
        let legacy_activity_ids: Vec<ActivityId> = scoped
            .iter()
            .filter(|scoped| scoped.basis == ScopeBasis::CreatorFallback)
            .map(|scoped| scoped.activity.id.clone())
            .collect();
        if !legacy_activity_ids.is_empty() {
            debug!(
                class_id = %class_id,
                count = legacy_activity_ids.len(),
                "class scope relies on creator inference for untagged activities"
            );
        }

        let evaluations = self.evaluate_students(&context, &scoped, &context.students)?;
        let participants = evaluations
            .iter()
            .filter(|evaluation| !evaluation.ledger.counted.is_empty())
            .count();
        let ranking = build_ranking(&context, semester, &evaluations)?;

        Ok(Some(ClassOverview {
            class_id: context.class.id.clone(),
            class_name: context.class.name.clone(),
            semester: *semester,
            class_size: ranking.class_size,
            published_activities,
            legacy_activity_ids,
            participants,
            tier_distribution: ranking.tier_distribution(),
        }))
    }

    /// Summaries for both terms of an academic year.
    pub fn academic_year_report(
        &self,
        student_id: &StudentId,
        academic_year: u16,
    ) -> Result<AcademicYearReport, ScoringError> {
        let student = self
            .source
            .find_student_by_id(student_id)?
            .ok_or_else(|| ScoringError::StudentNotFound(student_id.clone()))?;

        let semesters = SemesterKey::terms_of(academic_year)
            .iter()
            .map(|semester| {
                self.score_card_for(student.clone(), semester)
                    .map(|card| card.summary)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AcademicYearReport {
            student_id: student.id,
            mssv: student.mssv,
            academic_year,
            semesters,
        })
    }

    fn score_card_for(
        &self,
        student: Student,
        semester: &SemesterKey,
    ) -> Result<StudentScoreCard, ScoringError> {
        let mut context = self
            .load_class(&student.class_id, semester)?
            .ok_or_else(|| ScoringError::ClassNotFound(student.class_id.clone()))?;

        // The roster read may race with a transfer; the requested student is always ranked.
        if !context.students.iter().any(|member| member.id == student.id) {
            warn!(
                student_id = %student.id,
                class_id = %student.class_id,
                "student missing from class roster; ranking with roster plus student"
            );
            context.students.push(student.clone());
        }

        let scoped = context.scope.select(&context.activities);
        let evaluations = self.evaluate_students(&context, &scoped, &context.students)?;
        let ranking = build_ranking(&context, semester, &evaluations)?;

        let Some(evaluation) = evaluations
            .into_iter()
            .find(|evaluation| evaluation.student.id == student.id)
        else {
            return Err(ScoringError::StudentNotFound(student.id));
        };

        let tier = classify(evaluation.totals.total_capped)?;
        let rounded = evaluation.totals.rounded();
        let max_total = max_total_points(&context.categories);
        let summary = StudentScoreSummary {
            student_id: evaluation.student.id.clone(),
            mssv: evaluation.student.mssv.clone(),
            semester: *semester,
            total_raw: rounded.total_raw,
            total_capped: rounded.total_capped,
            tier,
            tier_label: tier.label(),
            class_rank: ranking.rank_of(&evaluation.student.id),
            class_size: ranking.class_size,
        };

        Ok(StudentScoreCard {
            points_to_next_tier: points_to_next_tier(evaluation.totals.total_capped)?,
            max_total_points: max_total,
            completion_ratio: completion_ratio(evaluation.totals.total_capped, max_total),
            summary,
            categories: evaluation.categories,
            participations: evaluation.ledger.counted,
            awaiting_attendance: evaluation.ledger.awaiting_attendance,
            attendance_without_registration: evaluation.ledger.attendance_without_registration,
            orphaned_registrations: evaluation.orphaned_registrations,
        })
    }

    fn load_class(
        &self,
        class_id: &ClassId,
        semester: &SemesterKey,
    ) -> Result<Option<ClassContext>, ScoringError> {
        let Some(class) = self.source.find_class_by_id(class_id)? else {
            return Ok(None);
        };

        let students = self.source.find_students_by_class_id(class_id)?;
        let scope = ClassScope::resolve(&class, &students);

        let mut activities = self.source.find_activities_by_semester(semester)?;
        activities.retain(|activity| activity.semester == *semester);
        self.report_dangling_tags(&activities, class_id)?;

        let categories = index_categories(self.source.find_categories()?)?;

        Ok(Some(ClassContext {
            class,
            students,
            scope,
            activities,
            categories,
        }))
    }

    /// Activities tagged with a class that no longer exists are out of scope for
    /// everyone; they are logged so the data can be repaired.
    fn report_dangling_tags(
        &self,
        activities: &[Activity],
        current: &ClassId,
    ) -> Result<(), ScoringError> {
        let foreign: BTreeSet<&ClassId> = activities
            .iter()
            .filter_map(|activity| activity.class_id.as_ref())
            .filter(|tag| *tag != current)
            .collect();

        for tag in foreign {
            if self.source.find_class_by_id(tag)?.is_none() {
                let orphaned: Vec<&str> = activities
                    .iter()
                    .filter(|activity| activity.class_id.as_ref() == Some(tag))
                    .map(|activity| activity.id.as_str())
                    .collect();
                warn!(
                    class_id = %tag,
                    activities = ?orphaned,
                    "activities tagged with a class that does not exist; treated as out of scope"
                );
            }
        }
        Ok(())
    }

    /// Registrations outside the semester are looked up once more; the ones whose
    /// activity no longer exists are reported.
    fn find_orphaned_registrations(
        &self,
        student_id: &StudentId,
        registrations: &[Registration],
        semester_ids: &BTreeSet<&ActivityId>,
    ) -> Result<Vec<ActivityId>, ScoringError> {
        let candidates: Vec<ActivityId> = registrations
            .iter()
            .filter(|registration| registration.student_id == *student_id)
            .map(|registration| &registration.activity_id)
            .filter(|activity_id| !semester_ids.contains(activity_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self.source.find_activities_by_ids(&candidates)?;
        Ok(participation::orphaned_registrations(
            student_id,
            &candidates,
            &existing,
        ))
    }

    fn evaluate_students(
        &self,
        context: &ClassContext,
        scoped: &[ScopedActivity<'_>],
        students: &[Student],
    ) -> Result<Vec<StudentEvaluation>, ScoringError> {
        let activity_ids: Vec<ActivityId> = scoped
            .iter()
            .map(|scoped| scoped.activity.id.clone())
            .collect();
        let semester_ids: BTreeSet<&ActivityId> =
            context.activities.iter().map(|activity| &activity.id).collect();

        students
            .iter()
            .map(|student| {
                let registrations = self.source.find_registrations_by_student(&student.id)?;
                let attendance = self
                    .source
                    .find_confirmed_attendance(&student.id, &activity_ids)?;
                let orphaned_registrations =
                    self.find_orphaned_registrations(&student.id, &registrations, &semester_ids)?;

                let ledger = participation::validate(
                    &student.id,
                    scoped,
                    &context.categories,
                    &registrations,
                    &attendance,
                )?;
                let categories = cap_by_category(&ledger.counted, &context.categories)?;
                let totals = aggregate(&categories);

                debug!(
                    student_id = %student.id,
                    counted = ledger.counted.len(),
                    awaiting = ledger.awaiting_attendance.len(),
                    total_raw = %totals.total_raw,
                    total_capped = %totals.total_capped,
                    "student evaluated"
                );

                Ok(StudentEvaluation {
                    student: student.clone(),
                    ledger,
                    orphaned_registrations,
                    categories,
                    totals,
                })
            })
            .collect()
    }
}

fn build_ranking(
    context: &ClassContext,
    semester: &SemesterKey,
    evaluations: &[StudentEvaluation],
) -> Result<ClassRanking, ScoringError> {
    let totals = evaluations
        .iter()
        .map(|evaluation| StudentTotal {
            student_id: evaluation.student.id.clone(),
            mssv: evaluation.student.mssv.clone(),
            total_capped: evaluation.totals.total_capped,
        })
        .collect();

    let entries = rank_students(totals)?;
    Ok(ClassRanking {
        class_id: context.class.id.clone(),
        semester: *semester,
        class_size: entries.len(),
        entries,
    })
}
