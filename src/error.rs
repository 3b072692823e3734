use thiserror::Error;

/// A specialized Result type for undo-redo operations.
pub type Result<T = ()> = std::result::Result<T, Error>;

/// Errors surfaced when a recorded command can not be reversed or reapplied.
///
/// Empty stacks and commands that do not change the target are not errors,
/// they are reported with `None` and `false`.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The backup held by the command no longer applies to the target,
    /// for example because the target was replaced.
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    /// The command refused to run again on the current target.
    #[error("the command can not be redone on the current target")]
    RedoRejected,
}
