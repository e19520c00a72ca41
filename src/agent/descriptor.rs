//! Agent configuration records.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A kind of tool endpoint an agent may be wired to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Capability {
    Database,
    RestApi,
    Filesystem,
    Spreadsheet,
}

/// Everything needed to build an agent, fixed once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct AgentDescriptor {
    #[builder(into)]
    pub name: String,
    #[builder(into, default)]
    #[serde(default)]
    pub description: String,
    #[builder(into)]
    pub instructions: String,
    #[builder(default)]
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

/// The four roles the bundled scenarios use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum StandardRole {
    DatabaseAgent,
    #[strum(serialize = "APIAgent")]
    ApiAgent,
    ExcelAgent,
    ChaosAgent,
}

impl StandardRole {
    pub fn capabilities(self) -> Vec<Capability> {
        match self {
            Self::DatabaseAgent => vec![Capability::Database],
            Self::ApiAgent => vec![Capability::RestApi, Capability::Filesystem],
            Self::ExcelAgent => vec![Capability::Spreadsheet, Capability::Filesystem],
            Self::ChaosAgent => Vec::new(),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::DatabaseAgent => "Database specialist that reads records from MySQL",
            Self::ApiAgent => "REST API specialist that executes HTTP requests",
            Self::ExcelAgent => "Reporting specialist that writes spreadsheets and CSV files",
            Self::ChaosAgent => "Generates adversarial test payloads from baseline data",
        }
    }

    /// Descriptor for this role with the given instructions.
    pub fn descriptor(self, instructions: impl Into<String>) -> AgentDescriptor {
        AgentDescriptor::builder()
            .name(self.to_string())
            .description(self.description())
            .instructions(instructions)
            .capabilities(self.capabilities())
            .build()
    }
}
