use anyhow::Context;
use clap::Parser;
use pantry_planner::config::Validate;
use pantry_planner::domain::ports::{AuditStore, ConfigProvider};
use pantry_planner::utils::error::ErrorSeverity;
use pantry_planner::utils::logger;
use pantry_planner::{
    CliConfig, DiscardAuditStore, GeminiClient, GenerateResponse, JsonlAuditStore, ProfileContext,
    RawShoppingRequest, ShoppingPlanner, TomlConfig,
};
use tokio::task::JoinHandle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pantry-planner");

    let profile = load_profile(cli.profile.as_deref())?;
    let raw = cli.raw_request();

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            config.apply_overrides(&cli);
            run(&config, &raw, &profile).await
        }
        None => run(&cli, &raw, &profile).await,
    };

    match outcome {
        Ok((response, audit_task)) => {
            println!("{}", serde_json::to_string_pretty(&response)?);

            // 結果已輸出；程式結束前等稽核寫入完成
            if let Err(e) = audit_task.await {
                tracing::warn!("Audit task did not complete: {}", e);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Shopping list generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn load_profile(path: Option<&str>) -> anyhow::Result<ProfileContext> {
    let Some(path) = path else {
        return Ok(ProfileContext::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile file '{}'", path))?;
    serde_json::from_str(&content).with_context(|| format!("invalid profile JSON in '{}'", path))
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    raw: &RawShoppingRequest,
    profile: &ProfileContext,
) -> pantry_planner::Result<(GenerateResponse, JoinHandle<()>)> {
    config.validate()?;

    let service = GeminiClient::from_config(config);
    if config.api_key().is_none() {
        tracing::warn!("No API key configured, the fallback list will be used");
    }

    match config.audit_path() {
        Some(path) => {
            let store = JsonlAuditStore::new(path);
            tracing::debug!("Audit records go to: {}", store.path().display());
            execute(config, service, store, raw, profile).await
        }
        None => execute(config, service, DiscardAuditStore, raw, profile).await,
    }
}

async fn execute<C: ConfigProvider, A: AuditStore + 'static>(
    config: &C,
    service: GeminiClient,
    audit: A,
    raw: &RawShoppingRequest,
    profile: &ProfileContext,
) -> pantry_planner::Result<(GenerateResponse, JoinHandle<()>)> {
    let planner = ShoppingPlanner::new(service, audit).with_timeout(config.request_timeout());
    planner.generate_detached(raw, profile).await
}
