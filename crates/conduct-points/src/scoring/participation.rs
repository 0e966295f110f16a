use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use super::capping::CategoryIndex;
use super::domain::{
    Activity, ActivityCategory, ActivityId, AttendanceRecord, CategoryId, Registration, StudentId,
};
use super::error::ScoringError;
use super::scope::{ScopeBasis, ScopedActivity};

/// A registration that earned credit: accepted registration plus confirmed attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountedParticipation {
    pub student_id: StudentId,
    pub activity_id: ActivityId,
    pub category_id: CategoryId,
    pub points: Decimal,
    pub basis: ScopeBasis,
}

/// Outcome of validating one student's registrations against attendance evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParticipationLedger {
    pub counted: Vec<CountedParticipation>,
    /// Accepted registrations still missing a confirmed check-in ("pending credit").
    pub awaiting_attendance: Vec<ActivityId>,
    /// Confirmed check-ins without an accepted registration.
    pub attendance_without_registration: Vec<ActivityId>,
}

/// Points an activity is worth right now. Zero or missing points fall back to the
/// category default.
pub fn effective_points(activity: &Activity, category: Option<&ActivityCategory>) -> Decimal {
    match activity.points {
        Some(points) if !points.is_zero() => points,
        _ => category
            .map(|category| category.default_points)
            .unwrap_or(Decimal::ZERO),
    }
}

/// Apply the dual-confirmation rule for one student.
///
/// Only registrations and attendance belonging to `student_id` and to one of
/// `in_scope` are considered. Point values are read from the current activity
/// records, never from the registration.
pub fn validate(
    student_id: &StudentId,
    in_scope: &[ScopedActivity<'_>],
    categories: &CategoryIndex,
    registrations: &[Registration],
    attendance: &[AttendanceRecord],
) -> Result<ParticipationLedger, ScoringError> {
    let activities: BTreeMap<&ActivityId, &ScopedActivity<'_>> = in_scope
        .iter()
        .map(|scoped| (&scoped.activity.id, scoped))
        .collect();

    let confirmed: BTreeSet<&ActivityId> = attendance
        .iter()
        .filter(|record| record.student_id == *student_id && record.confirmed)
        .map(|record| &record.activity_id)
        .filter(|activity_id| activities.contains_key(activity_id))
        .collect();

    let mut registered: BTreeSet<&ActivityId> = BTreeSet::new();
    let mut counted = Vec::new();
    let mut awaiting = BTreeSet::new();

    for registration in registrations
        .iter()
        .filter(|registration| registration.student_id == *student_id)
    {
        if !registration.status.qualifies_for_credit() {
            continue;
        }

        let Some(scoped) = activities.get(&registration.activity_id) else {
            debug!(
                student_id = %student_id,
                activity_id = %registration.activity_id,
                "registration outside class scope or semester; ignored"
            );
            continue;
        };

        if !registered.insert(&registration.activity_id) {
            warn!(
                student_id = %student_id,
                activity_id = %registration.activity_id,
                "duplicate registration for the same activity; counted once"
            );
            continue;
        }

        if !confirmed.contains(&registration.activity_id) {
            debug!(
                student_id = %student_id,
                activity_id = %registration.activity_id,
                status = registration.status.label(),
                "registration awaiting confirmed attendance"
            );
            awaiting.insert(registration.activity_id.clone());
            continue;
        }

        let activity = scoped.activity;
        let category = categories.get(&activity.category_id);
        if category.is_none() {
            warn!(
                activity_id = %activity.id,
                category_id = %activity.category_id,
                "activity references an unknown category"
            );
        }

        let points = effective_points(activity, category);
        if points < Decimal::ZERO {
            return Err(ScoringError::NegativePoints {
                activity_id: activity.id.clone(),
                points,
            });
        }

        counted.push(CountedParticipation {
            student_id: student_id.clone(),
            activity_id: activity.id.clone(),
            category_id: activity.category_id.clone(),
            points,
            basis: scoped.basis,
        });
    }

    counted.sort_by(|left, right| left.activity_id.cmp(&right.activity_id));

    let attendance_without_registration = confirmed
        .into_iter()
        .filter(|activity_id| !registered.contains(activity_id))
        .cloned()
        .collect();

    Ok(ParticipationLedger {
        counted,
        awaiting_attendance: awaiting.into_iter().collect(),
        attendance_without_registration,
    })
}

/// Registered activities among `candidates` with no record in `existing`. Each is
/// logged as a data inconsistency; none of them earns credit.
pub fn orphaned_registrations(
    student_id: &StudentId,
    candidates: &[ActivityId],
    existing: &[Activity],
) -> Vec<ActivityId> {
    let existing: BTreeSet<&ActivityId> = existing.iter().map(|activity| &activity.id).collect();

    candidates
        .iter()
        .filter(|activity_id| !existing.contains(activity_id))
        .inspect(|activity_id| {
            warn!(
                student_id = %student_id,
                activity_id = %activity_id,
                "registration references an activity that no longer exists"
            )
        })
        .cloned()
        .collect()
}

/// Counted participations only; see [`validate`] for the full ledger.
pub fn counted_participations(
    student_id: &StudentId,
    in_scope: &[ScopedActivity<'_>],
    categories: &CategoryIndex,
    registrations: &[Registration],
    attendance: &[AttendanceRecord],
) -> Result<Vec<CountedParticipation>, ScoringError> {
    validate(student_id, in_scope, categories, registrations, attendance)
        .map(|ledger| ledger.counted)
}
