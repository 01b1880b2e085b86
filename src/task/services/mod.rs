//! Application services for task workflow orchestration and dashboards.

mod dashboard;
mod workflow;

pub use dashboard::{
    DashboardData, DashboardError, DashboardResult, DashboardService, PriorityDistribution,
    TaskStatistics,
};
pub use workflow::{
    CreateTaskRequest, ProblemGroup, StatusSummary, TaskList, TaskOverview, TaskWithAssignees,
    TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService,
};
