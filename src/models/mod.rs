pub mod solution;
pub mod history;
pub mod image;
pub mod graph;

// Re-export common model types
pub use solution::{ EquationSource, ParsedSolution, SolutionStep };
pub use history::HistoryEntry;
pub use image::ImagePayload;
pub use graph::{ GraphData, GraphPoint };
