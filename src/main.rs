use std::sync::Arc;

use secrecy::SecretString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mingming_billing::adapters::http::{app_router, BillingAppState};
use mingming_billing::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use mingming_billing::adapters::supabase::{
    SupabaseClient, SupabaseConfig, SupabaseSubscriptionRepository, SupabaseUserDirectory,
};
use mingming_billing::application::billing::PriceCatalog;
use mingming_billing::config::AppConfig;
use mingming_billing::domain::billing::StripeWebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Also loads .env if present
    let config = AppConfig::load()?;

    init_tracing(&config);

    tracing::info!("Starting Ming Ming billing service v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;
    tracing::info!(
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        monthly_price = config.payment.monthly_price_id.is_some(),
        yearly_price = config.payment.yearly_price_id.is_some(),
        "Configuration loaded"
    );

    let http_client = reqwest::Client::builder()
        .timeout(config.server.request_timeout())
        .build()?;

    let stripe_config = StripeConfig::new(config.payment.stripe_secret_key.clone())
        .with_base_url(config.payment.stripe_api_base_url.clone());
    let payment_provider = Arc::new(StripePaymentAdapter::new(stripe_config, http_client.clone()));

    let supabase = SupabaseClient::new(
        SupabaseConfig::new(
            config.supabase.url.clone(),
            config.supabase.service_role_key.clone(),
        )
        .with_users_table(config.supabase.users_table.clone())
        .with_subscriptions_table(config.supabase.subscriptions_table.clone()),
        http_client,
    );

    let state = BillingAppState {
        payment_provider,
        user_directory: Arc::new(SupabaseUserDirectory::new(supabase.clone())),
        subscription_repository: Arc::new(SupabaseSubscriptionRepository::new(supabase)),
        prices: PriceCatalog::new(
            config.payment.monthly_price_id.clone(),
            config.payment.yearly_price_id.clone(),
        ),
        stripe_verifier: StripeWebhookVerifier::new(config.payment.stripe_webhook_secret.clone()),
        squarespace_secret: SecretString::new(config.payment.squarespace_webhook_secret.clone()),
    };

    let app = app_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
