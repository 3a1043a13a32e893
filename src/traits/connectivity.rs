use async_trait::async_trait;

/// Reports whether the network is reachable
#[async_trait]
pub trait ConnectivityCheck: Send + Sync {
    async fn is_connected(&self) -> bool;
}
