pub mod config;
pub mod openai_client;
pub mod connectivity;
pub mod history_store;
pub mod graph_sampler;
