//! Orchestration services for the submission context.

mod flow;

pub use flow::{
    SubmissionFlowError, SubmissionFlowResult, SubmissionOverview, SubmissionRecord,
    SubmissionService, SubmitAnswersRequest,
};
