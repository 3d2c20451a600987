use anyhow::Result;
use ba_testgen_lib::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Before tracing so RUST_LOG can come from .env
    let dotenv = dotenvy::dotenv();
    ba_testgen_lib::init_tracing();
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let config = Config::from_env()?;
    ba_testgen_lib::run(config).await
}
