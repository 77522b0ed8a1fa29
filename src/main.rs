use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use cursor_db::cli::{Cli, Commands};
use cursor_db::config::Config;
use cursor_db::logging::init_logging;
use cursor_db::metrics;
use cursor_db::paths::resolve_cursor_path;
use cursor_db::{CursorDb, RegistryHandle};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = Config::config_dir().unwrap_or_else(|| PathBuf::from("."));

    // Load configuration (if available, otherwise use defaults)
    let (mut config, config_error) = match Config::load(&config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_overrides(cli.cursor_path.clone(), cli.project_dirs.clone());

    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &config_dir)?;

    tracing::info!("cursor-db starting up");
    if let Some(e) = config_error {
        tracing::warn!("Ignoring unreadable configuration: {:#}", e);
    }
    tracing::debug!("Configuration directory: {}", config_dir.display());

    metrics::register_metrics();

    let cursor_path = resolve_cursor_path(config.cursor.path.as_deref());
    let registry = RegistryHandle::new(cursor_path, config.cursor.project_dirs.clone());
    let db = CursorDb::with_default_limit(registry, config.query.default_limit);

    match cli.command {
        Commands::Serve {
            transport,
            host,
            port,
        } => {
            cursor_db::commands::serve::run(
                db,
                &config.server.mcp,
                transport.as_deref(),
                host.as_deref(),
                port,
            )
            .await?;
        }
        Commands::Http { host, port } => {
            cursor_db::commands::web::run(db, &config.server, host.as_deref(), port).await?;
        }
        Commands::Projects { detailed, json } => {
            cursor_db::commands::projects::list(&db, detailed, json)?;
        }
        Commands::Query {
            project,
            table,
            query_type,
            key,
            limit,
        } => {
            cursor_db::commands::query::run(
                &db,
                &project,
                &table,
                &query_type,
                key.as_deref(),
                limit,
            )?;
        }
        Commands::Chat { project } => {
            cursor_db::commands::query::chat(&db, &project)?;
        }
        Commands::Composers { project } => {
            cursor_db::commands::query::composers(&db, &project)?;
        }
        Commands::Composer { composer_id } => {
            cursor_db::commands::query::composer(&db, &composer_id)?;
        }
    }

    Ok(())
}
