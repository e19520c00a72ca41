//! Launch descriptions for the standard tool servers.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::bridge::MCPToolEndpoint;
use super::client::MCPClient;
use super::transport::StdioTransport;
use crate::config::DatabaseSettings;
use crate::error::HandoffError;

/// Default target of the REST tool server.
pub const DEFAULT_REST_BASE_URL: &str = "https://rahulshettyacademy.com";

const NPX_HINT: &str = "Please install Node.js (which provides npx) or add npx to PATH. \
You can download Node.js from https://nodejs.org/.";
const PYTHON_HINT: &str =
    "Please install Python 3 and the mysql_mcp_server package (pip install mysql-mcp-server).";

/// How to start one tool server process.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolEndpointSpec {
    pub name: String,
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub read_timeout: Duration,
}

impl ToolEndpointSpec {
    /// MySQL query server, configured with the database credentials.
    pub fn database(db: &DatabaseSettings) -> Self {
        Self {
            name: "mysql".into(),
            command: "python".into(),
            args: vec!["-m".into(), "mysql_mcp_server.server".into()],
            env: BTreeMap::from([
                ("MYSQL_HOST".to_string(), db.host.clone()),
                ("MYSQL_PORT".to_string(), db.port.to_string()),
                ("MYSQL_USER".to_string(), db.user.clone()),
                ("MYSQL_PASSWORD".to_string(), db.password.clone()),
                ("MYSQL_DATABASE".to_string(), db.database.clone()),
            ]),
            read_timeout: Duration::from_secs(30),
        }
    }

    /// HTTP request server pointed at `base_url`.
    pub fn rest_api(base_url: &str) -> Self {
        Self {
            name: "rest-api".into(),
            command: "npx".into(),
            args: vec!["-y".into(), "dkmaker-mcp-rest-api".into()],
            env: BTreeMap::from([
                ("REST_BASE_URL".to_string(), base_url.to_string()),
                ("HEADER_Accept".to_string(), "application/json".to_string()),
            ]),
            read_timeout: Duration::from_secs(30),
        }
    }

    /// Spreadsheet read/write server.
    pub fn spreadsheet() -> Self {
        Self {
            name: "excel".into(),
            command: "npx".into(),
            args: vec!["--yes".into(), "@negokaz/excel-mcp-server".into()],
            env: BTreeMap::from([(
                "EXCEL_MCP_PAGING_CELLS_LIMIT".to_string(),
                "4000".to_string(),
            )]),
            read_timeout: Duration::from_secs(60),
        }
    }

    /// Filesystem server restricted to `roots`.
    pub fn filesystem(roots: &[PathBuf]) -> Self {
        let mut args = vec!["-y".to_string(), "@modelcontextprotocol/server-filesystem".to_string()];
        args.extend(roots.iter().map(|root| root.display().to_string()));
        Self {
            name: "filesystem".into(),
            command: "npx".into(),
            args,
            env: BTreeMap::new(),
            read_timeout: Duration::from_secs(60),
        }
    }

    /// Fail early when the launcher binary is missing.
    pub fn ensure_available(&self) -> Result<PathBuf, HandoffError> {
        ensure_command(&self.command)
    }

    /// Start the server and complete the MCP handshake.
    pub async fn connect(&self) -> Result<Arc<MCPToolEndpoint>, HandoffError> {
        self.ensure_available()?;
        info!(endpoint = %self.name, command = %self.command, "starting tool server");
        let transport =
            StdioTransport::new(self.command.clone(), self.args.clone()).with_env(self.env.clone());
        let endpoint = MCPToolEndpoint::new(
            self.name.clone(),
            MCPClient::new(Box::new(transport)),
            self.read_timeout,
        );
        endpoint.connect().await?;
        Ok(Arc::new(endpoint))
    }
}

/// Resolve `command` on `PATH`, or fail with an install hint.
pub fn ensure_command(command: &str) -> Result<PathBuf, HandoffError> {
    let path = std::env::var_os("PATH").unwrap_or_default();
    find_on_path(command, &path).ok_or_else(|| {
        let hint = match command {
            "npx" => NPX_HINT,
            "python" | "python3" => PYTHON_HINT,
            _ => "Install it or add its directory to PATH.",
        };
        HandoffError::missing_command(command, hint)
    })
}

fn find_on_path(command: &str, path: &OsStr) -> Option<PathBuf> {
    let direct = Path::new(command);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }

    std::env::split_paths(path).find_map(|dir| {
        candidate_names(command)
            .into_iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(windows)]
fn candidate_names(command: &str) -> Vec<String> {
    vec![
        command.to_string(),
        format!("{command}.exe"),
        format!("{command}.cmd"),
    ]
}

#[cfg(not(windows))]
fn candidate_names(command: &str) -> Vec<String> {
    vec![command.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn database_spec_carries_credentials() {
        let spec = ToolEndpointSpec::database(&DatabaseSettings::default());
        assert_eq!(spec.args, vec!["-m", "mysql_mcp_server.server"]);
        assert_eq!(spec.env["MYSQL_PORT"], "3306");
        assert_eq!(spec.env["MYSQL_DATABASE"], "rahulshettyacademy");
        assert_eq!(spec.read_timeout, Duration::from_secs(30));
    }

    #[test]
    fn rest_and_spreadsheet_specs_match_server_packages() {
        let rest = ToolEndpointSpec::rest_api(DEFAULT_REST_BASE_URL);
        assert_eq!(rest.env["REST_BASE_URL"], "https://rahulshettyacademy.com");
        assert_eq!(rest.env["HEADER_Accept"], "application/json");

        let excel = ToolEndpointSpec::spreadsheet();
        assert_eq!(excel.args, vec!["--yes", "@negokaz/excel-mcp-server"]);
        assert_eq!(excel.env["EXCEL_MCP_PAGING_CELLS_LIMIT"], "4000");
        assert_eq!(excel.read_timeout, Duration::from_secs(60));
    }

    #[test]
    fn filesystem_spec_appends_roots() {
        let spec = ToolEndpointSpec::filesystem(&[PathBuf::from("/srv/resources"), PathBuf::from("/srv")]);
        assert_eq!(
            spec.args,
            vec!["-y", "@modelcontextprotocol/server-filesystem", "/srv/resources", "/srv"]
        );
    }

    #[test]
    fn find_on_path_locates_file_in_listed_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("npx"), "#!/bin/sh\n").unwrap();
        let path = std::env::join_paths([dir.path()]).unwrap();

        assert_eq!(find_on_path("npx", &path), Some(dir.path().join("npx")));
        assert_eq!(find_on_path("node", &path), None);
    }

    #[test]
    fn missing_npx_error_mentions_nodejs() {
        let err = ensure_command("handoff-missing-launcher-npx-9c1d").unwrap_err();
        assert!(matches!(err, HandoffError::MissingCommand { .. }));

        let err = HandoffError::missing_command("npx", NPX_HINT);
        let rendered = err.to_string();
        assert!(rendered.contains("'npx' was not found on PATH"));
        assert!(rendered.contains("https://nodejs.org/"));
    }
}
