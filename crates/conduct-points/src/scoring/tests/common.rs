use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::scoring::domain::{
    Activity, ActivityCategory, ActivityId, ActivityStatus, AttendanceRecord, CategoryId, Class,
    ClassId, Registration, RegistrationStatus, Student, StudentId, UserId,
};
use crate::scoring::scope::{ScopeBasis, ScopedActivity};
use crate::scoring::semester::{SemesterKey, Term};
use crate::scoring::snapshot::DatasetSnapshot;

pub(super) const DOAN_HOI: &str = "doan-hoi";
pub(super) const HOC_THUAT: &str = "hoc-thuat";

pub(super) fn pts(raw: &str) -> Decimal {
    raw.parse().expect("valid decimal literal")
}

pub(super) fn hk1_2025() -> SemesterKey {
    SemesterKey::new(Term::First, 2025)
}

pub(super) fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 15, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn class(id: &str, homeroom_teacher: Option<&str>) -> Class {
    Class {
        id: ClassId::new(id),
        name: format!("Lớp {id}"),
        homeroom_teacher_id: homeroom_teacher.map(UserId::new),
    }
}

pub(super) fn student(id: &str, mssv: &str, class_id: &str) -> Student {
    Student {
        id: StudentId::new(id),
        mssv: mssv.to_string(),
        class_id: ClassId::new(class_id),
        user_id: UserId::new(format!("u-{id}")),
        full_name: None,
    }
}

pub(super) fn category(id: &str, default_points: &str, max_points: Option<&str>) -> ActivityCategory {
    ActivityCategory {
        id: CategoryId::new(id),
        name: match id {
            DOAN_HOI => "Đoàn-Hội".to_string(),
            HOC_THUAT => "Học thuật".to_string(),
            other => other.to_string(),
        },
        default_points: pts(default_points),
        max_points: max_points.map(pts),
    }
}

pub(super) fn activity(
    id: &str,
    category_id: &str,
    points: &str,
    creator: &str,
    class_id: Option<&str>,
) -> Activity {
    Activity {
        id: ActivityId::new(id),
        name: format!("Hoạt động {id}"),
        semester: hk1_2025(),
        category_id: CategoryId::new(category_id),
        points: Some(pts(points)),
        creator_user_id: UserId::new(creator),
        class_id: class_id.map(ClassId::new),
        status: ActivityStatus::Approved,
    }
}

pub(super) fn registration(
    student_id: &str,
    activity_id: &str,
    status: RegistrationStatus,
) -> Registration {
    Registration {
        student_id: StudentId::new(student_id),
        activity_id: ActivityId::new(activity_id),
        status,
        registered_at: timestamp(),
    }
}

pub(super) fn attendance(student_id: &str, activity_id: &str, confirmed: bool) -> AttendanceRecord {
    AttendanceRecord {
        student_id: StudentId::new(student_id),
        activity_id: ActivityId::new(activity_id),
        confirmed,
        recorded_at: timestamp(),
    }
}

pub(super) fn directly_scoped(activities: &[Activity]) -> Vec<ScopedActivity<'_>> {
    activities
        .iter()
        .map(|activity| ScopedActivity {
            activity,
            basis: ScopeBasis::DirectTag,
        })
        .collect()
}

pub(super) fn category_index(categories: Vec<ActivityCategory>) -> crate::scoring::CategoryIndex {
    crate::scoring::index_categories(categories).expect("non-negative caps")
}

/// Student `sv-1` in class `CNTT01` registered for three HK1-2025 activities:
/// A (Đoàn-Hội, 10) and B (Đoàn-Hội, 8) approved and checked in, C (Học thuật,
/// 15) approved only. Đoàn-Hội is capped at 15.
pub(super) fn scenario_snapshot() -> DatasetSnapshot {
    DatasetSnapshot {
        classes: vec![class("CNTT01", Some("gv-01"))],
        students: vec![
            student("sv-1", "2021001", "CNTT01"),
            student("sv-2", "2021002", "CNTT01"),
        ],
        categories: vec![
            category(DOAN_HOI, "5", Some("15")),
            category(HOC_THUAT, "10", Some("25")),
        ],
        activities: vec![
            activity("hd-a", DOAN_HOI, "10", "gv-01", Some("CNTT01")),
            activity("hd-b", DOAN_HOI, "8", "gv-01", Some("CNTT01")),
            activity("hd-c", HOC_THUAT, "15", "gv-01", Some("CNTT01")),
        ],
        registrations: vec![
            registration("sv-1", "hd-a", RegistrationStatus::Approved),
            registration("sv-1", "hd-b", RegistrationStatus::Attended),
            registration("sv-1", "hd-c", RegistrationStatus::Approved),
            registration("sv-2", "hd-c", RegistrationStatus::Attended),
        ],
        attendance: vec![
            attendance("sv-1", "hd-a", true),
            attendance("sv-1", "hd-b", true),
            attendance("sv-2", "hd-c", true),
        ],
    }
}
