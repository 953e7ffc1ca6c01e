//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use popinfo::{
    config::{AppState, Settings},
    routes::build_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // O .env é opcional: em produção as variáveis vêm do ambiente.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("popinfo=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::from_env();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new(&settings).await?;
    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
