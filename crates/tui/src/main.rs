mod app;
mod config;
mod error;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // The alternate screen owns stdout; logs go to stderr where a redirect
    // can pick them up.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
