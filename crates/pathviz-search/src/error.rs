use pathviz_core::Point;
use thiserror::Error;

use crate::engine::SearchState;

/// Errors reported by [`SearchEngine`](crate::SearchEngine) and
/// [`reconstruct`](crate::reconstruct).
///
/// None of them leave the engine unusable: a fresh
/// [`reset`](crate::SearchEngine::reset) always recovers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A start or target coordinate lies outside the grid.
    #[error("coordinate {0} is outside the grid")]
    OutOfBoundsCoordinate(Point),
    /// A start or target coordinate sits on an obstacle.
    #[error("endpoint {0} is an obstacle")]
    ObstructedEndpoint(Point),
    /// Start and target are the same cell.
    #[error("start and target coincide at {0}")]
    CoincidentEndpoints(Point),
    /// The predecessor chain from the target does not lead back to the
    /// start. This indicates an engine defect.
    #[error("predecessor chain broken at {at}")]
    ReconstructionInconsistency { at: Point },
    /// The operation is not valid in the engine's current state.
    #[error("cannot {operation} while the search is {state}")]
    IllegalStateTransition {
        state: SearchState,
        operation: &'static str,
    },
    /// No search has been configured since the engine was created or its
    /// grid was edited.
    #[error("no search configured, call reset first")]
    NotConfigured,
}
