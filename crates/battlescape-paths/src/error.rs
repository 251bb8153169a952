use std::fmt;

use battlescape_core::Position;

/// Which end of a request was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("origin"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Requests the engine refuses to search.
///
/// An unreachable goal is not an error; searches report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// An endpoint lies outside the bounds the pathfinder was built for.
    OutOfBounds { endpoint: Endpoint, pos: Position },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { endpoint, pos } => {
                write!(f, "path {endpoint} {pos} is outside the map")
            }
        }
    }
}

impl std::error::Error for PathError {}
