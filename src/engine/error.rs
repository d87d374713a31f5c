use thiserror::Error;

/// Why the engine refused an operation. The pool and results are never
/// modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("{0} is already in the pool or has been drawn")]
    Duplicate(i64),
    #[error("{0} is not in the pool")]
    NotInPool(i64),
    #[error("range {lo}..{hi} is empty")]
    EmptyRange { lo: i64, hi: i64 },
    #[error("range of {len} numbers is larger than the limit of {max}")]
    RangeTooLarge { len: u64, max: u64 },
    #[error("there are no numbers to draw")]
    EmptyPool,
    #[error("a draw is already in progress")]
    Busy,
    #[error("auto draw count must be between 1 and {available} (got {requested})")]
    AutoCountOutOfRange { requested: usize, available: usize },
    #[error("timer belongs to an earlier draw")]
    StaleCallback,
    #[error("no draw is waiting for this step")]
    OutOfPhase,
}
