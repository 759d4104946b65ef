use thiserror::Error;

#[derive(Error, Debug)]
pub enum MctsError {
    #[error("Board error: {0}")]
    BoardError(#[from] mancala_core::BoardError),

    #[error("Terminal position cannot be searched")]
    TerminalPosition,

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Invalid node ID: {0}")]
    InvalidNodeId(usize),

    #[error("Root node not initialized")]
    RootNotInitialized,

    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Illegal tree state: {0}")]
    IllegalState(String),

    #[error("Dirichlet sampling error: {0}")]
    DirichletError(String),
}

pub type Result<T> = std::result::Result<T, MctsError>;
