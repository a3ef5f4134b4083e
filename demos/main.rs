use echi_migrate::*;
use tracing_subscriber::EnvFilter;

// cargo run --example migrate -- up --schema config/echi_schema.toml
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse_args();
    cli.run(&mut std::io::stdout()).await
}
