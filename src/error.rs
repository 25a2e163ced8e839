use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to read path: {0}")]
    Glob(#[from] glob::GlobError),

    /// Pose payload does not have the expected joint/column layout.
    #[error("bad pose shape: {0}")]
    Shape(String),

    #[error("distance to prediction {candidate} is not finite")]
    NonFinite { candidate: usize },

    #[error("ground truth has no frame {frame} (sequence length {len})")]
    MissingFrame { frame: usize, len: usize },

    #[error("frame carries {got} actor slots but evaluator tracks {expected}")]
    ActorOverflow { got: usize, expected: usize },
}
