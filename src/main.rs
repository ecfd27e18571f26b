#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with explicit filter to suppress sqlx debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("sqlx", LevelFilter::Warn)
        .parse_default_env()
        .init();

    log::info!("Inventory API starting");

    inventory_api::run_server().await
}
