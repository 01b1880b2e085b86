//! Chat flows over groups provisioned by the task workflow.

use crate::in_memory::helpers::{Stack, admin, runtime, stack};
use chrono::{Duration, Utc};
use comenius::group::{domain::Group, ports::GroupRepository};
use comenius::identity::domain::{Actor, UserProfile};
use comenius::task::{
    domain::{ProblemItem, TaskCategory},
    services::CreateTaskRequest,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn provision_group(rt: &Runtime, stack: &Stack, admin: &Actor, member: &Actor) -> Group {
    let request = CreateTaskRequest::new(
        "Fractions",
        TaskCategory::Problem,
        Utc::now() + Duration::days(3),
    )
    .with_assignees([member.id()])
    .with_problem_items([ProblemItem::new("Simplify 4/8")]);
    let task = rt
        .block_on(stack.workflow.create_task(admin, request))
        .expect("create task");

    rt.block_on(stack.groups.find_by_task(task.id()))
        .expect("load groups")
        .into_iter()
        .next()
        .expect("provisioned group")
}

/// Tests that messages posted to a provisioned group reach live
/// subscribers.
#[rstest]
fn provisioned_group_relays_chat_to_subscribers(
    runtime: io::Result<Runtime>,
    stack: Stack,
    admin: Actor,
) {
    let rt = runtime.expect("runtime creation");
    let member = stack
        .register_member("Ada", "ada@school.test")
        .expect("register member");
    let group = provision_group(&rt, &stack, &admin, &member);

    let mut receiver = stack.channel.subscribe(group.id()).expect("subscribe");

    let posted = rt
        .block_on(stack.chat.post_message(&member, group.id(), "Anyone solved it?"))
        .expect("post message");
    assert_eq!(posted.delivered, 1, "one live subscriber should be counted");
    assert_eq!(posted.message.sender(), member.id());

    let received = rt.block_on(receiver.recv()).expect("receive message");
    assert_eq!(received, posted.message);
}

/// Tests that the roster resolves member profiles in member order.
#[rstest]
fn roster_resolves_member_profiles_in_order(
    runtime: io::Result<Runtime>,
    stack: Stack,
    admin: Actor,
) {
    let rt = runtime.expect("runtime creation");
    let member = stack
        .register_member("Ada", "ada@school.test")
        .expect("register member");
    stack
        .directory
        .insert(UserProfile::new(admin.id(), "Mr Holmes", "holmes@school.test"))
        .expect("register admin profile");
    let group = provision_group(&rt, &stack, &admin, &member);

    let roster = rt
        .block_on(stack.chat.group_members(&member, group.id()))
        .expect("load roster");

    let names: Vec<&str> = roster.members.iter().map(|profile| profile.name()).collect();
    assert_eq!(
        names,
        vec!["Ada", "Mr Holmes"],
        "assignees come first, then the creating administrator"
    );
}
