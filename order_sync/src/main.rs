use dotenvy::dotenv;
use log::info;
use order_sync::{cli::handle_command_line_args, config::SyncConfig, sync::run_sync};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args() {
        return;
    }
    let config = match SyncConfig::try_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    };
    info!("🚀️ Syncing {} orders created after {}", config.marketplace_id, config.created_after);
    match run_sync(config).await {
        Ok(summary) => println!("Done. {summary}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
