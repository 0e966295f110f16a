use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{Activity, Class, ClassId, Student, UserId};

/// Why an activity was (or was not) attributed to a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeBasis {
    /// `activity.class_id` names this class.
    DirectTag,
    /// Untagged legacy record created by a class member or the homeroom teacher.
    CreatorFallback,
    /// Tagged with some other class id. Direct tagging always wins.
    OtherClass,
    /// Untagged and created by someone outside the class.
    Unrelated,
}

impl ScopeBasis {
    pub const fn is_in_scope(self) -> bool {
        matches!(self, ScopeBasis::DirectTag | ScopeBasis::CreatorFallback)
    }
}

/// Creator-identity set of a class: the user accounts of its members plus the
/// homeroom teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassScope {
    pub class_id: ClassId,
    pub member_user_ids: BTreeSet<UserId>,
    pub homeroom_teacher_id: Option<UserId>,
}

/// An in-scope activity together with the rule that admitted it.
#[derive(Debug, Clone, Copy)]
pub struct ScopedActivity<'a> {
    pub activity: &'a Activity,
    pub basis: ScopeBasis,
}

impl ClassScope {
    /// Students belonging to other classes are ignored.
    pub fn resolve(class: &Class, students: &[Student]) -> Self {
        let member_user_ids = students
            .iter()
            .filter(|student| student.class_id == class.id)
            .map(|student| student.user_id.clone())
            .collect();

        Self {
            class_id: class.id.clone(),
            member_user_ids,
            homeroom_teacher_id: class.homeroom_teacher_id.clone(),
        }
    }

    pub fn is_creator(&self, user_id: &UserId) -> bool {
        self.member_user_ids.contains(user_id) || self.homeroom_teacher_id.as_ref() == Some(user_id)
    }

    pub fn classify(&self, activity: &Activity) -> ScopeBasis {
        match &activity.class_id {
            Some(tag) if *tag == self.class_id => ScopeBasis::DirectTag,
            Some(_) => ScopeBasis::OtherClass,
            None if self.is_creator(&activity.creator_user_id) => ScopeBasis::CreatorFallback,
            None => ScopeBasis::Unrelated,
        }
    }

    pub fn is_in_scope(&self, activity: &Activity) -> bool {
        self.classify(activity).is_in_scope()
    }

    /// Filter `activities` down to the ones attributed to this class, keeping input order.
    pub fn select<'a>(&self, activities: &'a [Activity]) -> Vec<ScopedActivity<'a>> {
        activities
            .iter()
            .filter_map(|activity| {
                let basis = self.classify(activity);
                basis
                    .is_in_scope()
                    .then_some(ScopedActivity { activity, basis })
            })
            .collect()
    }
}
