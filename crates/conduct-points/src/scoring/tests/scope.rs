use super::common::*;
use crate::scoring::domain::UserId;
use crate::scoring::scope::{ClassScope, ScopeBasis};

fn cntt01_scope() -> ClassScope {
    let students = vec![
        student("sv-1", "2021001", "CNTT01"),
        student("sv-2", "2021002", "CNTT01"),
        student("sv-9", "2021009", "KTPM02"),
    ];
    ClassScope::resolve(&class("CNTT01", Some("gv-01")), &students)
}

#[test]
fn resolve_collects_member_accounts_of_the_class_only() {
    let scope = cntt01_scope();

    assert_eq!(scope.member_user_ids.len(), 2);
    assert!(scope.member_user_ids.contains(&UserId::new("u-sv-1")));
    assert!(!scope.member_user_ids.contains(&UserId::new("u-sv-9")));
    assert_eq!(scope.homeroom_teacher_id, Some(UserId::new("gv-01")));
    assert!(scope.is_creator(&UserId::new("gv-01")));
}

#[test]
fn direct_tag_is_in_scope_regardless_of_creator() {
    let scope = cntt01_scope();
    let tagged = activity("hd-1", DOAN_HOI, "5", "outsider", Some("CNTT01"));

    assert_eq!(scope.classify(&tagged), ScopeBasis::DirectTag);
    assert!(scope.is_in_scope(&tagged));
}

#[test]
fn tag_for_another_class_wins_over_creator_membership() {
    let scope = cntt01_scope();
    let by_member = activity("hd-2", DOAN_HOI, "5", "u-sv-1", Some("KTPM02"));
    let by_teacher = activity("hd-3", DOAN_HOI, "5", "gv-01", Some("KTPM02"));

    assert_eq!(scope.classify(&by_member), ScopeBasis::OtherClass);
    assert!(!scope.is_in_scope(&by_member));
    assert!(!scope.is_in_scope(&by_teacher));
}

#[test]
fn tag_for_missing_class_is_out_of_scope() {
    let scope = cntt01_scope();
    let dangling = activity("hd-4", DOAN_HOI, "5", "gv-01", Some("DELETED99"));

    assert!(!scope.is_in_scope(&dangling));
}

#[test]
fn untagged_activities_fall_back_to_creator_identity() {
    let scope = cntt01_scope();
    let by_member = activity("hd-5", DOAN_HOI, "5", "u-sv-2", None);
    let by_teacher = activity("hd-6", DOAN_HOI, "5", "gv-01", None);
    let by_outsider = activity("hd-7", DOAN_HOI, "5", "u-sv-9", None);

    assert_eq!(scope.classify(&by_member), ScopeBasis::CreatorFallback);
    assert_eq!(scope.classify(&by_teacher), ScopeBasis::CreatorFallback);
    assert_eq!(scope.classify(&by_outsider), ScopeBasis::Unrelated);
}

#[test]
fn empty_class_only_admits_direct_tags() {
    let scope = ClassScope::resolve(&class("EMPTY01", None), &[]);

    assert!(scope.member_user_ids.is_empty());
    assert!(!scope.is_in_scope(&activity("hd-8", DOAN_HOI, "5", "gv-01", None)));
    assert!(scope.is_in_scope(&activity("hd-9", DOAN_HOI, "5", "gv-01", Some("EMPTY01"))));
}

#[test]
fn tagged_activity_is_in_scope_for_exactly_one_class() {
    let students = vec![
        student("sv-1", "2021001", "CNTT01"),
        student("sv-9", "2021009", "KTPM02"),
    ];
    let scopes = [
        ClassScope::resolve(&class("CNTT01", Some("gv-01")), &students),
        ClassScope::resolve(&class("KTPM02", Some("gv-01")), &students),
    ];
    let tagged = activity("hd-10", DOAN_HOI, "5", "gv-01", Some("KTPM02"));
    let untagged = activity("hd-11", DOAN_HOI, "5", "gv-01", None);

    let tagged_hits = scopes.iter().filter(|scope| scope.is_in_scope(&tagged)).count();
    assert_eq!(tagged_hits, 1);

    // Shared homeroom teacher: creator inference admits the legacy record to both.
    let untagged_hits = scopes
        .iter()
        .filter(|scope| scope.is_in_scope(&untagged))
        .count();
    assert_eq!(untagged_hits, 2);
}

#[test]
fn select_keeps_input_order_and_basis() {
    let scope = cntt01_scope();
    let activities = vec![
        activity("hd-c", DOAN_HOI, "5", "u-sv-1", None),
        activity("hd-a", DOAN_HOI, "5", "u-sv-9", None),
        activity("hd-b", DOAN_HOI, "5", "u-sv-9", Some("CNTT01")),
    ];

    let selected = scope.select(&activities);

    let ids: Vec<&str> = selected
        .iter()
        .map(|scoped| scoped.activity.id.as_str())
        .collect();
    assert_eq!(ids, vec!["hd-c", "hd-b"]);
    assert_eq!(selected[0].basis, ScopeBasis::CreatorFallback);
    assert_eq!(selected[1].basis, ScopeBasis::DirectTag);
}
