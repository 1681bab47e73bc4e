use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures reported by queue operations.
///
/// A failed operation leaves the queue exactly as it was.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("failed to allocate queue storage")]
    AllocationFailure,
    #[error("no queue to operate on")]
    NoQueue,
    #[error("queue is empty")]
    EmptyQueue,
}
