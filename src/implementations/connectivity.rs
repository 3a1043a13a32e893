use async_trait::async_trait;
use log::{ debug, warn };

use crate::config::ConnectivityConfig;
use crate::traits::connectivity::ConnectivityCheck;

/// Probes reachability with a HEAD request.
///
/// Any HTTP response, whatever its status, counts as connected; only a
/// transport failure reports disconnected.
pub struct HttpConnectivityCheck {
    probe_url: String,
    http_client: reqwest::Client,
}

impl HttpConnectivityCheck {
    pub fn new(config: &ConnectivityConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            probe_url: config.probe_url.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl ConnectivityCheck for HttpConnectivityCheck {
    async fn is_connected(&self) -> bool {
        match self.http_client.head(&self.probe_url).send().await {
            Ok(response) => {
                debug!("Connectivity probe answered with {}", response.status());
                true
            }
            Err(e) => {
                warn!("Connectivity probe to {} failed: {}", self.probe_url, e);
                false
            }
        }
    }
}

