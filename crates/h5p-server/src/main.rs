//! H5P demo server binary

use h5p_kit::{EditorConfig, FileContentStorage, FileEditor, FileLibraryStorage, HtmlPlayer};
use h5p_server::{
    AppState,
    config::ServerConfig,
    create_router,
    error::{ApiError, Result},
    examples::{ExampleFetcher, ExampleRegistry, ScriptDownloader},
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "h5p_server=debug,h5p_kit=info,tower_http=debug".to_string()),
        )
        .init();

    // Load configuration
    let config = ServerConfig::from_env()?;
    info!("Starting H5P server on {}:{}", config.host, config.port);

    let editor_config = EditorConfig::load(&config.editor_config)
        .await
        .map_err(|e| ApiError::Config(e.to_string()))?;

    let content = FileContentStorage::new(config.content_root());
    if let Err(e) = tokio::fs::create_dir_all(content.base_path()).await {
        warn!(
            "Failed to create content root {}: {}",
            content.base_path().display(),
            e
        );
    }
    let libraries = FileLibraryStorage::new(config.libraries_root());

    let editor = FileEditor::new(editor_config.clone(), content.clone(), libraries.clone());
    let player = HtmlPlayer::new(editor_config.clone(), libraries);

    let registry = ExampleRegistry::load(&config.examples_config).await?;
    info!("Loaded {} example(s)", registry.len());
    let examples = ExampleFetcher::new(
        registry,
        &config.examples_root,
        Arc::new(ScriptDownloader::new(&config.download_script)),
    );

    let state = AppState {
        editor: Arc::new(editor),
        player: Arc::new(player),
        content,
        examples: Arc::new(examples),
        editor_config: Arc::new(editor_config),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let host: std::net::IpAddr = config
        .host
        .parse()
        .map_err(|_| ApiError::Config(format!("Invalid HOST value {}", config.host)))?;
    let addr = SocketAddr::from((host, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
