//! Order inference: observation → pairs → layered ranking.

pub mod condense;
pub mod cycles;
pub mod extractor;
pub mod graph;
pub mod layering;
pub mod simulation;

pub use cycles::{detect_contradiction, find_cycle_path, find_path};
pub use extractor::{extract_from_input, normalize_input};
pub use graph::PrecedenceGraph;
pub use layering::rank;
pub use simulation::{simulate_room, Entrant};
