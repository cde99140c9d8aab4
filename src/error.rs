use thiserror::Error;

/// Failure modes exposed at the public boundary. Lookup misses (unknown
/// body id, out-of-range index) are not represented here — those return
/// `Option::None` rather than an error, per the engine's failure semantics.
#[derive(Debug, Error, PartialEq)]
pub enum PhysicsError {
    #[error("body registry is full (capacity = {capacity})")]
    BodyCapacityExceeded { capacity: usize },

    #[error("degenerate shape: {0}")]
    DegenerateShape(&'static str),
}
