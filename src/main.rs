use larder::server::{
    config::Config,
    error::Error,
    model::app::{AppState, Settings},
    router, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    startup::init_tracing();

    if let Err(e) = serve(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    startup::bootstrap_admin(&config, &db).await?;
    let session = startup::connect_to_session(&config).await?;

    let app = router::routes()
        .with_state(AppState {
            db,
            settings: Settings::from(&config),
        })
        .layer(session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
