use anyhow::Result;
use sentiment_configuration::{load_config, setup_logging};
use sentiment_setup::build_and_run;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    setup_logging(&config);
    build_and_run(config).await?;
    Ok(())
}
