mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (optional; the process
    // environment always wins).
    let dotenv = dotenvy::dotenv();

    telemetry::init("info");

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), ".env loaded"),
        Err(err) => tracing::debug!(error = %err, ".env not loaded, using process environment"),
    }

    api::start().await?;

    Ok(())
}
