//! Kelola - admin service for berita and galeri content

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kelola::{
    api::{self, AppState},
    config::Config,
    services::{BeritaService, GaleriService, SessionService},
    supabase::{
        AuthClient, BeritaRepository, BlobStore, GaleriRepository, GotrueAuthClient, RestClient,
        SupabaseBeritaRepository, SupabaseGaleriRepository, SupabaseStorage,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kelola=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting kelola admin service...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // One HTTP client shared by every hosted-service wrapper
    let http = reqwest::Client::new();

    let auth: Arc<dyn AuthClient> = Arc::new(GotrueAuthClient::new(
        http.clone(),
        &config.supabase.url,
        &config.supabase.anon_key,
    ));
    let rest = Arc::new(RestClient::new(
        http.clone(),
        &config.supabase.url,
        &config.supabase.anon_key,
    ));
    let storage: Arc<dyn BlobStore> = Arc::new(SupabaseStorage::new(
        http,
        &config.supabase.url,
        &config.supabase.anon_key,
    ));
    tracing::info!("Supabase clients ready: {}", config.supabase.url);

    // Create repositories
    let berita_repo: Arc<dyn BeritaRepository> =
        Arc::new(SupabaseBeritaRepository::new(rest.clone()));
    let galeri_repo: Arc<dyn GaleriRepository> = Arc::new(SupabaseGaleriRepository::new(rest));

    // Initialize services
    let session_service = Arc::new(SessionService::new(auth));
    let berita_service = Arc::new(BeritaService::new(
        berita_repo,
        storage.clone(),
        config.storage.berita_bucket.clone(),
    ));
    let galeri_service = Arc::new(GaleriService::new(
        galeri_repo,
        storage,
        config.storage.galeri_bucket.clone(),
    ));

    // Build application state
    let state = AppState {
        session_service,
        berita_service,
        galeri_service,
        upload_config: Arc::new(config.upload.clone()),
    };

    let app = api::build_router(state, &config.server.cors_origin)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
