//! Handlers behind each CLI subcommand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::console::{console_observer, render_scenarios, render_summary};
use super::RunArgs;
use crate::agent::{AgentFactory, McpConnector};
use crate::config::{HarnessConfig, DEFAULT_MODEL};
use crate::error::HandoffError;
use crate::models::LanguageModel;
use crate::provider::create_provider;
use crate::provision::{DatabaseProvisioner, ProvisionSettings, TokioCommandRunner};
use crate::scenario::{ScenarioCatalog, ScenarioConfig};
use crate::team::RoundRobinTeam;

/// Load configuration, applying a `--resources-dir` override.
pub fn load_config(resources_dir: Option<PathBuf>) -> Result<HarnessConfig, HandoffError> {
    let mut config = HarnessConfig::from_env()?;
    if let Some(dir) = resources_dir {
        config.set_resources_dir(dir);
    }
    Ok(config)
}

/// Pick the model: command line, then environment, then scenario, then default.
pub fn resolve_model(
    cli: Option<&str>,
    config: &HarnessConfig,
    scenario: &ScenarioConfig,
) -> Result<LanguageModel, HandoffError> {
    cli.or(config.model_override())
        .or(scenario.model.as_deref())
        .unwrap_or(DEFAULT_MODEL)
        .parse()
}

/// Pick the turn budget: command line, then environment, then scenario.
pub fn resolve_max_turns(cli: Option<usize>, config: &HarnessConfig, scenario: &ScenarioConfig) -> usize {
    cli.or(config.max_turns_override())
        .unwrap_or(scenario.max_turns)
}

fn absolute(dir: &Path) -> Result<PathBuf, HandoffError> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

fn load_scenario(reference: &str, config: &HarnessConfig) -> Result<ScenarioConfig, HandoffError> {
    let scenario = ScenarioCatalog::from_default_dirs().load(reference)?;
    Ok(scenario.with_resources_dir(&absolute(&config.resources_dir())?))
}

pub async fn handle_run(args: RunArgs, config: HarnessConfig) -> Result<(), HandoffError> {
    let scenario = load_scenario(&args.scenario, &config)?;
    let model = resolve_model(args.model.as_deref(), &config, &scenario)?;
    let provider = create_provider(&model, &config)?;
    let max_turns = resolve_max_turns(args.max_turns, &config, &scenario);
    info!(scenario = %scenario.name, %model, max_turns, "preparing run");

    let factory = AgentFactory::new(provider, Arc::new(McpConnector::new(config)?))
        .with_settings(scenario.generation.clone());
    let outcome = run_team(&factory, &scenario, max_turns, args.task.as_deref()).await;
    factory.shutdown().await;
    let result = outcome?;

    println!("{}", render_summary(&result));
    if args.require_complete && !result.is_complete() {
        return Err(HandoffError::InvalidState(format!(
            "scenario '{}' ended before its workflow completed",
            scenario.name
        )));
    }
    Ok(())
}

async fn run_team(
    factory: &AgentFactory,
    scenario: &ScenarioConfig,
    max_turns: usize,
    task: Option<&str>,
) -> Result<crate::team::TeamRunResult, HandoffError> {
    let members = factory.create_team(&scenario.agents).await?;
    let mut team = RoundRobinTeam::new(members, Box::new(scenario.termination()), max_turns)?
        .with_observer(console_observer());
    if let Some(workflow) = scenario.workflow()? {
        team = team.with_workflow(workflow);
    }
    team.run(task.unwrap_or(&scenario.task)).await
}

pub fn handle_scenarios() -> Result<(), HandoffError> {
    let catalog = ScenarioCatalog::from_default_dirs();
    let scenarios = catalog.list()?;
    println!("{}", render_scenarios(&scenarios));
    if let Some(dir) = catalog.user_dir() {
        println!("\nuser scenarios directory: {}", dir.display());
    }
    Ok(())
}

pub fn handle_check(reference: &str, config: HarnessConfig) -> Result<(), HandoffError> {
    let scenario = load_scenario(reference, &config)?;
    let model = resolve_model(None, &config, &scenario)?;
    let provider = create_provider(&model, &config)?;
    let factory = AgentFactory::new(provider, Arc::new(McpConnector::new(config)?));
    factory.check_prerequisites(&scenario.agents)?;
    println!(
        "scenario '{}' is ready: {} agents, model {model}",
        scenario.name,
        scenario.agents.len()
    );
    Ok(())
}

pub async fn handle_provision(config: HarnessConfig) -> Result<(), HandoffError> {
    let provisioner =
        DatabaseProvisioner::new(TokioCommandRunner, ProvisionSettings::from_config(&config));
    provisioner.provision().await?;
    println!(
        "Database '{}' is seeded and listening on port {}.",
        config.database.database,
        provisioner.settings().host_port
    );
    Ok(())
}
