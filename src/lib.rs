pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
pub mod solver;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ ConnectivityConfig, MathSnapConfig };
pub use errors::{ ClassifiedError, ErrorCode, MathSnapResult };
pub use implementations::config::{ ApiConfig, ClientConfig, ConfigError };
pub use implementations::connectivity::HttpConnectivityCheck;
pub use implementations::graph_sampler::{ sample_graph, GraphError, GraphRange };
pub use implementations::history_store::JsonHistoryStore;
pub use implementations::openai_client::OpenAiClient;
pub use models::{
    EquationSource,
    GraphData,
    GraphPoint,
    HistoryEntry,
    ImagePayload,
    ParsedSolution,
    SolutionStep,
};
pub use solver::{ classify, normalize_equation, parse_solution, Failure, MathSolver, SolutionBody };
pub use traits::{
    ClientError,
    CompletionClient,
    ConnectivityCheck,
    HistoryError,
    HistoryStore,
};
