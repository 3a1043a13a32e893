pub mod completion_client;
pub mod connectivity;
pub mod history_store;

// Re-export traits
pub use completion_client::{ ClientError, CompletionClient };
pub use connectivity::ConnectivityCheck;
pub use history_store::{ HistoryError, HistoryStore };
