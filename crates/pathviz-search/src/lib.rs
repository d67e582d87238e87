//! Step-wise grid search for pathfinding visualisation.
//!
//! [`SearchEngine`] runs either **A\*** or **Dijkstra** over an 8-connected
//! [`Grid`](pathviz_core::Grid) one node expansion per
//! [`advance`](SearchEngine::advance) call, so a presentation layer can
//! animate a search on its own timer or run it to completion in a tight
//! loop. Diagonal moves may not cut between two obstacles that touch at a
//! corner, and every step costs its Euclidean length.
//!
//! Once a search reports [`StepResult::Found`], [`SearchEngine::plot_route`]
//! walks the predecessor links back to the start and returns a [`Route`].
//!
//! ```
//! use pathviz_core::{Grid, Point};
//! use pathviz_search::{Algorithm, SearchEngine, StepResult};
//!
//! let mut engine = SearchEngine::new(Grid::new(5, 5));
//! engine
//!     .reset(Point::new(0, 3), Point::new(4, 0), Algorithm::AStar)
//!     .unwrap();
//! assert_eq!(engine.run_to_end().unwrap(), StepResult::Found);
//! let route = engine.plot_route().unwrap();
//! assert_eq!(route.steps, 4);
//! ```

mod astar;
mod dijkstra;
mod distance;
mod engine;
mod error;
mod node;
mod route;
mod successors;

pub use distance::euclidean;
pub use engine::{Algorithm, ParseAlgorithmError, SearchEngine, SearchState, StepResult};
pub use error::SearchError;
pub use node::{INFINITE_DIST, NodeId, SearchNode};
pub use route::{Route, reconstruct};
pub use successors::successors;
