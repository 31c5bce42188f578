use anyhow::Result;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hellok8s::{
    cli::Cli,
    config::{resolve_kubeconfig, Config},
    ClusterClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_from_env();

    // Logs go to stderr so stdout only carries the prompt and pod names
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let kubeconfig = resolve_kubeconfig(cli.kubeconfig.as_deref(), &config, home::home_dir);
    tracing::info!(kubeconfig = %kubeconfig.display(), "Configuration loaded");

    let client = ClusterClient::connect(&kubeconfig).await?;

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    hellok8s::run(&client, &config, &mut stdin, &mut stdout).await?;

    Ok(())
}
