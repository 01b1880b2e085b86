//! Dashboard aggregation over workflow-created tasks.

use crate::in_memory::helpers::{Stack, admin, runtime, stack};
use chrono::{Duration, Utc};
use comenius::identity::domain::Actor;
use comenius::task::{
    domain::{ChecklistItem, TaskCategory, TaskPriority, TaskStatus},
    services::CreateTaskRequest,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that the admin overview reflects tasks created through the
/// workflow service.
#[rstest]
fn overview_reflects_workflow_created_tasks(
    runtime: io::Result<Runtime>,
    stack: Stack,
    admin: Actor,
) {
    let rt = runtime.expect("runtime creation");

    let overdue = CreateTaskRequest::new(
        "Late homework",
        TaskCategory::Regular,
        Utc::now() - Duration::days(1),
    )
    .with_priority(TaskPriority::High);
    rt.block_on(stack.workflow.create_task(&admin, overdue))
        .expect("create overdue task");

    let pending = CreateTaskRequest::new(
        "Reading list",
        TaskCategory::Regular,
        Utc::now() + Duration::days(5),
    )
    .with_priority(TaskPriority::Low);
    rt.block_on(stack.workflow.create_task(&admin, pending))
        .expect("create pending task");

    let finished = CreateTaskRequest::new(
        "Warm-up sheet",
        TaskCategory::Regular,
        Utc::now() + Duration::days(5),
    )
    .with_checklist([ChecklistItem::new("hand out", false)]);
    let finished_task = rt
        .block_on(stack.workflow.create_task(&admin, finished))
        .expect("create finishable task");
    rt.block_on(stack.workflow.set_status(&admin, finished_task.id(), TaskStatus::Completed))
        .expect("complete task");

    let dashboard = rt.block_on(stack.dashboard.overview()).expect("overview");

    assert_eq!(dashboard.statistics.total, 3);
    assert_eq!(dashboard.statistics.pending, 2);
    assert_eq!(dashboard.statistics.completed, 1);
    assert_eq!(dashboard.statistics.overdue, 1);
    assert_eq!(dashboard.status_distribution.all, 3);
    assert_eq!(dashboard.priority_distribution.high, 1);
    assert_eq!(dashboard.priority_distribution.low, 1);
    assert_eq!(dashboard.priority_distribution.medium, 1);
    assert_eq!(dashboard.recent_tasks.len(), 3);
}

/// Tests that a member's dashboard ranges only over their assignments.
#[rstest]
fn member_dashboard_ranges_over_their_assignments(
    runtime: io::Result<Runtime>,
    stack: Stack,
    admin: Actor,
) {
    let rt = runtime.expect("runtime creation");
    let member = stack
        .register_member("Ada", "ada@school.test")
        .expect("register member");

    let assigned = CreateTaskRequest::new(
        "Fractions worksheet",
        TaskCategory::Regular,
        Utc::now() + Duration::days(5),
    )
    .with_assignees([member.id()]);
    let assigned_task = rt
        .block_on(stack.workflow.create_task(&admin, assigned))
        .expect("create assigned task");

    let unassigned = CreateTaskRequest::new(
        "Staff planning",
        TaskCategory::Regular,
        Utc::now() + Duration::days(5),
    );
    rt.block_on(stack.workflow.create_task(&admin, unassigned))
        .expect("create unassigned task");

    let dashboard = rt
        .block_on(stack.dashboard.for_user(member.id()))
        .expect("member dashboard");

    assert_eq!(dashboard.statistics.total, 1);
    let recent_ids: Vec<_> = dashboard.recent_tasks.iter().map(|digest| digest.id).collect();
    assert_eq!(recent_ids, vec![assigned_task.id()]);
}
