//! Storefront Discounts - discount-code service entry point

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use storefront_discounts::http;
use storefront_discounts::service::DiscountService;
use storefront_discounts::store::PgDiscountStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&std::env::var("DATABASE_URL")?)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    // The store handle is constructed once here and passed in; its
    // lifecycle is owned by the entry point, not a module-level global.
    let service = DiscountService::new(PgDiscountStore::new(db));
    let app = http::router(service);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8083".to_string());
    tracing::info!("storefront-discounts listening on 0.0.0.0:{}", port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?, app).await?;
    Ok(())
}
