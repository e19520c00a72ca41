//! Local database provisioning: (re)create the MySQL container and seed it.

pub mod runner;

pub use runner::{CommandOutput, CommandRunner, TokioCommandRunner};

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::HarnessConfig;
use crate::error::HandoffError;

pub const CONTAINER_NAME: &str = "mysql-agentic";
pub const MYSQL_IMAGE: &str = "mysql:latest";
pub const SEED_FILE_NAME: &str = "db_script_data.sql";

/// What to provision and how patiently to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionSettings {
    pub container_name: String,
    pub image: String,
    pub host_port: u16,
    pub root_password: String,
    pub seed_file: PathBuf,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl ProvisionSettings {
    /// Port and password follow the database settings so the tool server can connect.
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            container_name: CONTAINER_NAME.into(),
            image: MYSQL_IMAGE.into(),
            host_port: config.database.port,
            root_password: config.database.password.clone(),
            seed_file: config.resources_dir().join(SEED_FILE_NAME),
            poll_interval: Duration::from_secs(2),
            max_attempts: 30,
        }
    }
}

/// Drives `docker` through a [`CommandRunner`].
pub struct DatabaseProvisioner<R> {
    runner: R,
    settings: ProvisionSettings,
}

impl<R: CommandRunner> DatabaseProvisioner<R> {
    pub fn new(runner: R, settings: ProvisionSettings) -> Self {
        Self { runner, settings }
    }

    pub fn settings(&self) -> &ProvisionSettings {
        &self.settings
    }

    /// Replace any existing container, wait until MySQL answers, load the seed file.
    pub async fn provision(&self) -> Result<(), HandoffError> {
        let seed = self.read_seed()?;

        info!(container = %self.settings.container_name, "removing existing container");
        self.docker_lenient(&["stop", &self.settings.container_name]).await?;
        self.docker_lenient(&["rm", &self.settings.container_name]).await?;

        info!(image = %self.settings.image, port = self.settings.host_port, "starting MySQL container");
        self.start_container().await?;

        info!("waiting for MySQL to accept connections");
        self.wait_until_ready().await?;

        info!(seed = %self.settings.seed_file.display(), "seeding database");
        self.load_seed(&seed).await?;
        info!("database provisioned");
        Ok(())
    }

    fn read_seed(&self) -> Result<String, HandoffError> {
        let path = &self.settings.seed_file;
        if !path.is_file() {
            return Err(HandoffError::Provisioning {
                step: "seed".into(),
                message: format!("SQL file not found at {}", path.display()),
            });
        }
        std::fs::read_to_string(path).map_err(|e| HandoffError::Provisioning {
            step: "seed".into(),
            message: format!("cannot read {}: {e}", path.display()),
        })
    }

    async fn start_container(&self) -> Result<(), HandoffError> {
        let port_mapping = format!("{}:3306", self.settings.host_port);
        let password_env = format!("MYSQL_ROOT_PASSWORD={}", self.settings.root_password);
        let output = self
            .docker(
                &[
                    "run",
                    "-d",
                    "-p",
                    &port_mapping,
                    "--name",
                    &self.settings.container_name,
                    "-e",
                    &password_env,
                    &self.settings.image,
                ],
                None,
            )
            .await?;
        output.require_success("start")
    }

    async fn wait_until_ready(&self) -> Result<(), HandoffError> {
        let mut attempts = 0;
        while !self.is_ready().await? {
            tokio::time::sleep(self.settings.poll_interval).await;
            attempts += 1;
            debug!(attempts, "MySQL not ready yet");
            if attempts >= self.settings.max_attempts {
                return Err(HandoffError::Provisioning {
                    step: "readiness".into(),
                    message: format!(
                        "MySQL did not become ready after {attempts} attempts"
                    ),
                });
            }
        }
        Ok(())
    }

    async fn is_ready(&self) -> Result<bool, HandoffError> {
        let password = format!("--password={}", self.settings.root_password);
        let output = self
            .docker(
                &[
                    "exec",
                    &self.settings.container_name,
                    "mysqladmin",
                    "ping",
                    "-h",
                    "localhost",
                    "-u",
                    "root",
                    &password,
                    "--silent",
                ],
                None,
            )
            .await?;
        Ok(output.success())
    }

    async fn load_seed(&self, seed: &str) -> Result<(), HandoffError> {
        let password = format!("--password={}", self.settings.root_password);
        let output = self
            .docker(
                &[
                    "exec",
                    "-i",
                    &self.settings.container_name,
                    "mysql",
                    "-u",
                    "root",
                    &password,
                ],
                Some(seed),
            )
            .await?;
        output.require_success("seed")
    }

    async fn docker_lenient(&self, args: &[&str]) -> Result<(), HandoffError> {
        let output = self.docker(args, None).await?;
        if !output.success() {
            debug!(command = %args.join(" "), stderr = %output.stderr.trim(), "ignored docker failure");
        }
        Ok(())
    }

    async fn docker(&self, args: &[&str], stdin: Option<&str>) -> Result<CommandOutput, HandoffError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        debug!(command = %format!("docker {}", redact(&args).join(" ")), "running");
        self.runner.run("docker", &args, stdin).await.map_err(|error| {
            warn!(%error, "docker invocation failed");
            error
        })
    }
}

/// Hide password arguments in logs.
fn redact(args: &[String]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            if arg.starts_with("--password=") {
                "--password=***".to_string()
            } else if let Some((key, _)) = arg.split_once('=').filter(|(k, _)| k.ends_with("PASSWORD")) {
                format!("{key}=***")
            } else {
                arg.clone()
            }
        })
        .collect()
}
