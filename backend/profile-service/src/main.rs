/// Profile Service - HTTP Server
///
/// Serves profile settings edits, profile photo upload URLs and public profiles.
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use profile_service::db::{create_pool, run_migrations, PgProfileStore};
use profile_service::routes;
use profile_service::security::jwt;
use profile_service::services::{ProfileService, S3UploadSigner, UploadAuthorizationService};
use profile_service::Config;

fn init_tracing(json: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,profile_service=debug".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(config.app.is_production());

    jwt::initialize_keys(&config.jwt.secret).context("Failed to initialize JWT keys")?;

    let db_pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to database")?;

    let run_migrations_env = std::env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".into());
    if run_migrations_env != "false" {
        tracing::info!("Running database migrations...");
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations completed");
    }

    let signer = S3UploadSigner::from_config(&config.s3).await;
    let profiles = ProfileService::new(Arc::new(PgProfileStore::new(db_pool.clone())));
    let uploads = UploadAuthorizationService::new(Arc::new(signer));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!(
        address = %bind_address,
        env = %config.app.env,
        bucket = %config.s3.bucket,
        "profile-service starting HTTP server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(profiles.clone()))
            .app_data(web::Data::new(uploads.clone()))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {bind_address}"))?
    .run()
    .await?;

    tracing::info!("profile-service shutting down");
    Ok(())
}
