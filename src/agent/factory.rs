//! Builds agents from descriptors, wiring each capability to a tool endpoint.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::agent::Agent;
use super::descriptor::{AgentDescriptor, Capability};
use crate::config::HarnessConfig;
use crate::error::HandoffError;
use crate::mcp::endpoints::{ToolEndpointSpec, DEFAULT_REST_BASE_URL};
use crate::provider::ModelProvider;
use crate::team::Participant;
use crate::tools::{discover_tools, ToolEndpoint};
use crate::types::GenerationSettings;

/// Turns a capability into a live tool endpoint.
#[async_trait]
pub trait EndpointConnector: Send + Sync {
    /// Cheap prerequisite check, run for every capability before anything starts.
    fn check(&self, capability: Capability) -> Result<(), HandoffError>;

    async fn connect(&self, capability: Capability) -> Result<Arc<dyn ToolEndpoint>, HandoffError>;
}

/// Connects capabilities to the standard MCP stdio servers.
#[derive(Debug, Clone)]
pub struct McpConnector {
    config: HarnessConfig,
    filesystem_roots: Vec<PathBuf>,
}

impl McpConnector {
    /// The filesystem server is rooted at the resources directory and the
    /// working directory.
    pub fn new(config: HarnessConfig) -> Result<Self, HandoffError> {
        let cwd = std::env::current_dir()?;
        let resources = config.resources_dir();
        let resources = if resources.is_absolute() {
            resources
        } else {
            cwd.join(resources)
        };
        Ok(Self {
            config,
            filesystem_roots: vec![resources, cwd],
        })
    }

    pub fn with_filesystem_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.filesystem_roots = roots;
        self
    }

    pub fn spec(&self, capability: Capability) -> ToolEndpointSpec {
        match capability {
            Capability::Database => ToolEndpointSpec::database(&self.config.database),
            Capability::RestApi => ToolEndpointSpec::rest_api(
                self.config
                    .rest_base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_REST_BASE_URL),
            ),
            Capability::Filesystem => ToolEndpointSpec::filesystem(&self.filesystem_roots),
            Capability::Spreadsheet => ToolEndpointSpec::spreadsheet(),
        }
    }
}

#[async_trait]
impl EndpointConnector for McpConnector {
    fn check(&self, capability: Capability) -> Result<(), HandoffError> {
        self.spec(capability).ensure_available().map(|_| ())
    }

    async fn connect(&self, capability: Capability) -> Result<Arc<dyn ToolEndpoint>, HandoffError> {
        let endpoint = self.spec(capability).connect().await?;
        Ok(endpoint)
    }
}

/// Creates agents that share one endpoint per capability.
pub struct AgentFactory {
    provider: Arc<dyn ModelProvider>,
    connector: Arc<dyn EndpointConnector>,
    settings: GenerationSettings,
    endpoints: Mutex<HashMap<Capability, Arc<dyn ToolEndpoint>>>,
}

impl AgentFactory {
    pub fn new(provider: Arc<dyn ModelProvider>, connector: Arc<dyn EndpointConnector>) -> Self {
        Self {
            provider,
            connector,
            settings: GenerationSettings::default(),
            endpoints: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Verify every prerequisite the descriptors need, without starting anything.
    pub fn check_prerequisites(&self, descriptors: &[AgentDescriptor]) -> Result<(), HandoffError> {
        let mut capabilities: Vec<Capability> = descriptors
            .iter()
            .flat_map(|d| d.capabilities.iter().copied())
            .collect();
        capabilities.sort();
        capabilities.dedup();
        for capability in capabilities {
            self.connector.check(capability)?;
        }
        Ok(())
    }

    /// Build one agent, starting any endpoints it needs that are not running yet.
    pub async fn create(&self, descriptor: &AgentDescriptor) -> Result<Agent, HandoffError> {
        let mut endpoints = Vec::with_capacity(descriptor.capabilities.len());
        for capability in &descriptor.capabilities {
            endpoints.push(self.endpoint(*capability).await?);
        }

        let tools = discover_tools(&endpoints)
            .await
            .map_err(|error| error.in_agent(descriptor.name.clone()))?;
        info!(agent = %descriptor.name, tools = tools.len(), "agent ready");

        Ok(Agent::new(descriptor.clone(), Arc::clone(&self.provider))
            .with_tools(tools)
            .with_settings(self.settings.clone()))
    }

    /// Check prerequisites for all descriptors, then build them in order.
    pub async fn create_team(
        &self,
        descriptors: &[AgentDescriptor],
    ) -> Result<Vec<Arc<dyn Participant>>, HandoffError> {
        self.check_prerequisites(descriptors)?;
        let mut members: Vec<Arc<dyn Participant>> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            members.push(Arc::new(self.create(descriptor).await?));
        }
        Ok(members)
    }

    /// Stop every endpoint started by this factory.
    pub async fn shutdown(&self) {
        let endpoints: Vec<_> = self.endpoints.lock().await.drain().collect();
        let results = join_all(endpoints.iter().map(|(_, endpoint)| endpoint.shutdown())).await;
        for ((capability, _), result) in endpoints.iter().zip(results) {
            if let Err(error) = result {
                warn!(%capability, %error, "tool endpoint shutdown failed");
            }
        }
    }

    async fn endpoint(&self, capability: Capability) -> Result<Arc<dyn ToolEndpoint>, HandoffError> {
        let mut endpoints = self.endpoints.lock().await;
        if let Some(existing) = endpoints.get(&capability) {
            return Ok(Arc::clone(existing));
        }
        let endpoint = self.connector.connect(capability).await?;
        endpoints.insert(capability, Arc::clone(&endpoint));
        Ok(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseSettings;
    use std::path::Path;

    #[test]
    fn connector_maps_capabilities_to_specs() {
        let mut config = HarnessConfig::new();
        config.database = DatabaseSettings {
            port: 3307,
            ..DatabaseSettings::default()
        };
        config.rest_base_url = Some("http://localhost:8080".into());
        let connector = McpConnector::new(config)
            .unwrap()
            .with_filesystem_roots(vec![PathBuf::from("/data")]);

        assert_eq!(connector.spec(Capability::Database).env["MYSQL_PORT"], "3307");
        assert_eq!(
            connector.spec(Capability::RestApi).env["REST_BASE_URL"],
            "http://localhost:8080"
        );
        assert_eq!(connector.spec(Capability::Filesystem).args.last().map(String::as_str), Some("/data"));
        assert_eq!(connector.spec(Capability::Spreadsheet).name, "excel");
    }

    #[test]
    fn default_filesystem_roots_are_absolute() {
        let connector = McpConnector::new(HarnessConfig::new()).unwrap();
        let spec = connector.spec(Capability::Filesystem);
        let roots = &spec.args[2..];
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|root| Path::new(root).is_absolute()));
        assert!(roots[0].ends_with("resources"));
    }
}
