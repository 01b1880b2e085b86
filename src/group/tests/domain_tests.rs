//! Group and chat message domain invariants.

use crate::group::domain::{ChatMessage, Group, GroupDomainError, GroupId};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn group_rejects_blank_name(#[case] name: &str) {
    let result = Group::new(name, Vec::new(), TaskId::new(), None, &DefaultClock);
    assert!(matches!(result, Err(GroupDomainError::EmptyGroupName)));
}

#[rstest]
fn group_trims_name() {
    let group = Group::new(
        "  Fractions - Problem 1  ",
        Vec::new(),
        TaskId::new(),
        None,
        &DefaultClock,
    )
    .expect("group creation should succeed");

    assert_eq!(group.name(), "Fractions - Problem 1");
}

#[rstest]
fn group_drops_duplicate_members_preserving_order() {
    let first = UserId::new();
    let second = UserId::new();
    let group = Group::new(
        "Fractions - Problem 1",
        vec![first, second, first, second, first],
        TaskId::new(),
        None,
        &DefaultClock,
    )
    .expect("group creation should succeed");

    assert_eq!(group.members(), [first, second]);
}

#[rstest]
fn membership_check_covers_roster_only() {
    let member = UserId::new();
    let group = Group::new(
        "Fractions - Problem 1",
        vec![member],
        TaskId::new(),
        None,
        &DefaultClock,
    )
    .expect("group creation should succeed");

    assert!(group.has_member(member));
    assert!(!group.has_member(UserId::new()));
}

#[rstest]
#[case("")]
#[case("   ")]
fn message_rejects_blank_body(#[case] body: &str) {
    let result = ChatMessage::new(GroupId::new(), UserId::new(), body, &DefaultClock);
    assert!(matches!(result, Err(GroupDomainError::EmptyMessageBody)));
}

#[rstest]
fn message_records_sender_group_and_body() {
    let group_id = GroupId::new();
    let sender = UserId::new();
    let message = ChatMessage::new(group_id, sender, "how about 3/4?", &DefaultClock)
        .expect("message creation should succeed");

    assert_eq!(message.group_id(), group_id);
    assert_eq!(message.sender(), sender);
    assert_eq!(message.body(), "how about 3/4?");
}
