use mock_node::NodeSettings;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "6688".to_string());
    let email = std::env::var("MOCK_NODE_EMAIL").ok();
    let password = std::env::var("MOCK_NODE_PASSWORD").ok();

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock node listening");
    if email.is_none() && password.is_none() {
        return mock_node::run(listener).await;
    }
    let defaults = NodeSettings::default();
    let settings = NodeSettings {
        email: email.unwrap_or(defaults.email),
        password: password.unwrap_or(defaults.password),
        wallets: defaults.wallets,
    };
    mock_node::run_with(listener, settings).await
}
