use thiserror::Error;

/// Reasons a requested action was ignored.
///
/// None of these are fatal: the front end logs them and leaves the puzzle
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("a move is still animating or queued")]
    Busy,
    #[error("auto-solve is replaying moves")]
    AutoSolving,
    #[error("there are no recorded moves to undo")]
    NothingToUndo,
    #[error("layer index {0} is outside -1..=1")]
    InvalidLayer(i32),
}
