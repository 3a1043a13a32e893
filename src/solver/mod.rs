pub mod normalizer;
pub mod parser;
pub mod classifier;
pub mod pipeline;

pub use classifier::{ classify, Failure };
pub use normalizer::normalize_equation;
pub use parser::{ parse_solution, SolutionBody };
pub use pipeline::MathSolver;
