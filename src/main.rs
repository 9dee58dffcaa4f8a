use clap::Parser;
use portfolio_refresher::domain::ports::{ChartRenderer, FilterSource};
use portfolio_refresher::utils::error::{DashboardError, ErrorSeverity};
use portfolio_refresher::utils::{logger, validation::Validate};
use portfolio_refresher::{
    CliConfig, DashboardConfig, FileFilterSource, HtmlRenderer, LocalStorage, PortfolioClient,
    Refresher, RefreshScheduler,
};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting portfolio-refresher");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 設定檔優先；否則直接用旗標組出設定
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 把頁面上的協作者接上各自的 adapter
    let filters = FileFilterSource::new(&config.filters.file);
    let storage = LocalStorage::new(config.render.output_path.clone());
    let renderer = HtmlRenderer::new(storage);
    let client = PortfolioClient::new(config.api.endpoint.clone(), config.api.token.clone())
        .with_timeout(config.timeout());
    let refresher = Refresher::new(filters, client, renderer);

    if config.watch_enabled() {
        watch_loop(refresher, &config).await;
        return Ok(());
    }

    // 一次性刷新對應頁面載入那一次觸發
    match refresher.refresh().await {
        Ok(()) => {
            println!("✅ Portfolio charts refreshed");
            println!("📁 Output saved to: {}", config.render.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Refresh failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = exit_code_for(&e);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn load_config(cli: CliConfig) -> portfolio_refresher::Result<DashboardConfig> {
    if let Some(path) = cli.config.clone() {
        DashboardConfig::from_file(path)
    } else {
        cli.into_dashboard_config()
    }
}

fn exit_code_for(e: &DashboardError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// 監看模式：初始觸發一次（頁面載入），之後輪詢過濾器檔案的 mtime，
/// 變更就再觸發。觸發交給排程器做最新優先的取消與覆寫。
async fn watch_loop<F, R>(refresher: Refresher<F, R>, config: &DashboardConfig)
where
    F: FilterSource + 'static,
    R: ChartRenderer + 'static,
{
    let scheduler = RefreshScheduler::new(refresher);
    let filters_path = PathBuf::from(&config.filters.file);

    scheduler.trigger().await;

    let mut last_modified = file_mtime(&filters_path).await;
    let mut ticker = tokio::time::interval(config.poll_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!("🔍 Watching {} for filter changes", filters_path.display());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let modified = file_mtime(&filters_path).await;
                if modified != last_modified {
                    last_modified = modified;
                    tracing::info!("🔄 Filter change detected, refreshing");
                    scheduler.trigger().await;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }
}

async fn file_mtime(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path)
        .await
        .ok()
        .and_then(|meta| meta.modified().ok())
}
