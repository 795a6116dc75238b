//! Minigame Hub - desktop mini-game launcher with local accounts.

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use minigame_hub as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::credentials::CredentialStore;
use app::db;
use app::ui::App;

/// Desktop mini-game launcher with local accounts.
#[derive(Parser)]
#[command(name = "minigame-hub")]
struct Cli {
    /// Keep config, database and login files in the current directory (dev mode)
    #[arg(long)]
    dev: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_dir = AppConfig::base_dir(cli.dev);
    let config_path = base_dir.join("config.toml");
    let load_result = AppConfig::try_load(&config_path);

    let mut config = match &load_result {
        ConfigLoadResult::Loaded(config) => config.clone(),
        _ => AppConfig::default(),
    };
    config.resolve_paths(&base_dir);

    std::fs::create_dir_all(&config.logging.directory).context("Failed to create log directory")?;
    let _log_guard = app::logging::init(&config.logging);

    tracing::info!("Minigame Hub starting...");
    tracing::info!("Config path: {:?}", config_path);

    match load_result {
        ConfigLoadResult::Loaded(_) => tracing::info!("Config loaded successfully"),
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            if let Err(e) = AppConfig::default().save(&config_path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults for this run: {}", e);
        }
    }

    if let Some(parent) = config.database.path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    // Runtime for database work; the UI polls results each frame
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    let db_url = config
        .database
        .connection_string()
        .context("Failed to build database URL")?;

    let pool = rt.block_on(async {
        let conn = db::connect(&db_url)
            .await
            .context("Failed to open database")?;
        db::init_schema(&conn).await.context("Failed to create tables")?;

        if let Ok(counts) = db::get_table_counts(&conn).await {
            tracing::info!(
                "Tables: {} users, {} behavior logs, {} insert logs, {} delete logs",
                counts.users,
                counts.user_logs,
                counts.insert_logs,
                counts.delete_logs
            );
        }

        anyhow::Ok(conn)
    })?;

    let credentials = CredentialStore::new(
        config.session.remember_file.clone(),
        config.session.last_account_file.clone(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Minigame Hub")
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Minigame Hub",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(App::new(pool, config, rt, credentials)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
