use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::semester::SemesterKey;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of an enrolled student record (not the user account).
    StudentId
);
string_id!(
    /// Identifier of an administrative class.
    ClassId
);
string_id!(
    /// Identifier of a user account; activity creators and homeroom teachers are users.
    UserId
);
string_id!(ActivityId);
string_id!(CategoryId);

/// Enrolled student. `class_id` only changes through an explicit transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub mssv: String,
    pub class_id: ClassId,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Administrative class. Members are the students whose `class_id` points here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub homeroom_teacher_id: Option<UserId>,
}

/// Approval lifecycle of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Pending,
    Approved,
    Rejected,
    Finished,
}

impl ActivityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Approved => "approved",
            ActivityStatus::Rejected => "rejected",
            ActivityStatus::Finished => "finished",
        }
    }

    /// Approved and finished activities are the ones listed to a class.
    pub const fn is_published(self) -> bool {
        matches!(self, ActivityStatus::Approved | ActivityStatus::Finished)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub semester: SemesterKey,
    pub category_id: CategoryId,
    /// Absent or zero means "use the category default".
    #[serde(default)]
    pub points: Option<Decimal>,
    pub creator_user_id: UserId,
    /// Direct class tag. Legacy records predate tagging and carry `None`.
    #[serde(default)]
    pub class_id: Option<ClassId>,
    pub status: ActivityStatus,
}

/// Activity category with its per-student, per-semester cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub default_points: Decimal,
    /// `None` means uncapped; `Some(0)` is a real cap of zero.
    #[serde(default)]
    pub max_points: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
    Attended,
}

impl RegistrationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
            RegistrationStatus::Attended => "attended",
        }
    }

    /// First half of the dual confirmation: the registration was accepted.
    pub const fn qualifies_for_credit(self) -> bool {
        matches!(
            self,
            RegistrationStatus::Approved | RegistrationStatus::Attended
        )
    }
}

/// One registration per (student, activity) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub student_id: StudentId,
    pub activity_id: ActivityId,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
}

/// Physical presence evidence, independent of registration approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: StudentId,
    pub activity_id: ActivityId,
    pub confirmed: bool,
    pub recorded_at: DateTime<Utc>,
}
