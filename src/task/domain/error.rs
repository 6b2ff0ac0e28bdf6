//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a positive integer.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(i64),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the maximum length.
    #[error("task title is {length} characters long, the maximum is {max}")]
    TitleTooLong {
        /// Character count of the rejected title.
        length: usize,
        /// Maximum permitted character count.
        max: usize,
    },

    /// The task description exceeds the maximum length.
    #[error("task description is {length} characters long, the maximum is {max}")]
    DescriptionTooLong {
        /// Character count of the rejected description.
        length: usize,
        /// Maximum permitted character count.
        max: usize,
    },
}
