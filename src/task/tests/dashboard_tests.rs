//! Dashboard aggregation tests over the in-memory task store.

use std::sync::Arc;

use crate::identity::domain::UserId;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ChecklistItem, NewTaskData, Task, TaskCategory, TaskPriority},
    ports::TaskRepository,
    services::{DashboardService, TaskStatistics},
};
use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = DashboardService<InMemoryTaskRepository, DefaultClock>;

struct Harness {
    service: TestService,
    repository: Arc<InMemoryTaskRepository>,
}

#[fixture]
fn harness() -> Harness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = DashboardService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    Harness {
        service,
        repository,
    }
}

async fn seed_task(
    repository: &InMemoryTaskRepository,
    priority: TaskPriority,
    completed: usize,
    total: usize,
    due_date: DateTime<Utc>,
    assignees: Vec<UserId>,
) -> Task {
    let checklist = (0..total)
        .map(|index| ChecklistItem::new(format!("step {index}"), index < completed))
        .collect();
    let task = Task::new(
        NewTaskData {
            title: "Seeded task".to_owned(),
            description: None,
            priority,
            category: TaskCategory::Regular,
            due_date,
            checklist,
            assignees,
            created_by: UserId::new(),
            attachments: Vec::new(),
            essay_questions: Vec::new(),
            choice_questions: Vec::new(),
            problem_items: Vec::new(),
        },
        &DefaultClock,
    )
    .expect("task creation should succeed");
    repository.store(&task).await.expect("task store should succeed");
    task
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overview_counts_statuses_priorities_and_overdue(harness: Harness) {
    let future = Utc::now() + Duration::days(3);
    let past = Utc::now() - Duration::days(1);

    // Pending, due in the future.
    seed_task(&harness.repository, TaskPriority::Low, 0, 2, future, Vec::new()).await;
    // In progress and already past due.
    seed_task(&harness.repository, TaskPriority::Medium, 1, 2, past, Vec::new()).await;
    // Completed before the deadline passed; not overdue.
    seed_task(&harness.repository, TaskPriority::High, 2, 2, past, Vec::new()).await;
    // Pending, due in the future.
    seed_task(&harness.repository, TaskPriority::Medium, 0, 1, future, Vec::new()).await;

    let dashboard = harness
        .service
        .overview()
        .await
        .expect("dashboard assembly should succeed");

    assert_eq!(dashboard.statistics.total, 4);
    assert_eq!(dashboard.statistics.pending, 2);
    assert_eq!(dashboard.statistics.completed, 1);
    assert_eq!(dashboard.statistics.overdue, 1);

    assert_eq!(dashboard.status_distribution.all, 4);
    assert_eq!(dashboard.status_distribution.pending, 2);
    assert_eq!(dashboard.status_distribution.in_progress, 1);
    assert_eq!(dashboard.status_distribution.completed, 1);

    assert_eq!(dashboard.priority_distribution.low, 1);
    assert_eq!(dashboard.priority_distribution.medium, 2);
    assert_eq!(dashboard.priority_distribution.high, 1);

    assert_eq!(dashboard.recent_tasks.len(), 4);
    assert!(
        dashboard
            .recent_tasks
            .iter()
            .zip(dashboard.recent_tasks.iter().skip(1))
            .all(|(newer, older)| newer.created_at >= older.created_at)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn for_user_ranges_over_assigned_tasks_only(harness: Harness) {
    let member = UserId::new();
    let future = Utc::now() + Duration::days(3);

    let assigned = seed_task(
        &harness.repository,
        TaskPriority::Medium,
        0,
        1,
        future,
        vec![member],
    )
    .await;
    seed_task(&harness.repository, TaskPriority::Low, 0, 1, future, Vec::new()).await;

    let dashboard = harness
        .service
        .for_user(member)
        .await
        .expect("dashboard assembly should succeed");

    assert_eq!(dashboard.statistics.total, 1);
    assert_eq!(dashboard.statistics.pending, 1);
    assert_eq!(dashboard.status_distribution.all, 1);
    assert_eq!(
        dashboard
            .recent_tasks
            .iter()
            .map(|digest| digest.id)
            .collect::<Vec<_>>(),
        vec![assigned.id()]
    );

    let overview = harness
        .service
        .overview()
        .await
        .expect("dashboard assembly should succeed");
    assert_eq!(overview.statistics.total, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recent_listing_is_capped(harness: Harness) {
    let future = Utc::now() + Duration::days(3);
    for _ in 0..12 {
        seed_task(&harness.repository, TaskPriority::Low, 0, 1, future, Vec::new()).await;
    }

    let dashboard = harness
        .service
        .overview()
        .await
        .expect("dashboard assembly should succeed");

    assert_eq!(dashboard.statistics.total, 12);
    assert_eq!(dashboard.recent_tasks.len(), 10);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_yields_zeroed_dashboard(harness: Harness) {
    let dashboard = harness
        .service
        .overview()
        .await
        .expect("dashboard assembly should succeed");

    assert_eq!(dashboard.statistics, TaskStatistics::default());
    assert!(dashboard.recent_tasks.is_empty());
}
