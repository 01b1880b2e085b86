//! Central access-control decisions.
//!
//! Every service routes authorization through this module so the rules
//! live in one place. Checks on a specific resource run after the
//! resource has been found, which keeps missing-resource errors ahead
//! of authorization errors.

use thiserror::Error;

use crate::group::domain::{Group, GroupId};
use crate::identity::domain::{Actor, UserId};
use crate::task::domain::{Task, TaskId};

/// Task operations subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    /// Read a task's details.
    View,
    /// Edit title, description, priority, due date, attachments or
    /// assignees.
    UpdateDetails,
    /// Move the task between statuses.
    SetStatus,
    /// Replace the checklist wholesale.
    ReplaceChecklist,
    /// Add, replace or remove assessment questions.
    ManageQuestions,
    /// Delete the task and everything hanging off it.
    Delete,
}

/// Reasons an actor may be refused an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The operation is reserved for administrators.
    #[error("administrator role required")]
    AdminRequired,

    /// The actor is neither an assignee of the task nor an admin.
    #[error("actor is not assigned to task {0}")]
    NotAssignee(TaskId),

    /// The actor asked for another user's data without admin rights.
    #[error("actor may not act for user {0}")]
    NotSelf(UserId),

    /// The actor is not a member of the group.
    #[error("actor is not a member of group {0}")]
    NotGroupMember(GroupId),
}

/// Authorizes a task operation for an actor.
///
/// # Errors
///
/// Returns [`AccessDenied`] when the actor lacks the required standing
/// for the action.
pub fn authorize_task(actor: &Actor, action: TaskAction, task: &Task) -> Result<(), AccessDenied> {
    match action {
        TaskAction::View | TaskAction::UpdateDetails => Ok(()),
        TaskAction::SetStatus | TaskAction::ReplaceChecklist => {
            if actor.is_admin() || task.is_assignee(actor.id()) {
                Ok(())
            } else {
                Err(AccessDenied::NotAssignee(task.id()))
            }
        }
        TaskAction::ManageQuestions | TaskAction::Delete => require_admin(actor),
    }
}

/// Requires the actor to hold the administrator role.
///
/// # Errors
///
/// Returns [`AccessDenied::AdminRequired`] for non-admin actors.
pub const fn require_admin(actor: &Actor) -> Result<(), AccessDenied> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AccessDenied::AdminRequired)
    }
}

/// Requires the actor to be the named user or an administrator.
///
/// # Errors
///
/// Returns [`AccessDenied::NotSelf`] when the actor is someone else
/// without admin rights.
pub fn require_self_or_admin(actor: &Actor, user: UserId) -> Result<(), AccessDenied> {
    if actor.is_admin() || actor.id() == user {
        Ok(())
    } else {
        Err(AccessDenied::NotSelf(user))
    }
}

/// Requires the actor to be a member of the group or an administrator.
///
/// # Errors
///
/// Returns [`AccessDenied::NotGroupMember`] when the actor is outside
/// the group and not an admin.
pub fn require_group_member(actor: &Actor, group: &Group) -> Result<(), AccessDenied> {
    if actor.is_admin() || group.has_member(actor.id()) {
        Ok(())
    } else {
        Err(AccessDenied::NotGroupMember(group.id()))
    }
}
