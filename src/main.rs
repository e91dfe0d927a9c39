//! hospital-console server entry point.
//!
//! Starts the Axum HTTP server in front of the hospital REST API.

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use hospital_console::api;
use hospital_console::app_state::AppState;
use hospital_console::config::ConsoleConfig;

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
fn init_tracing(config: &ConsoleConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ConsoleConfig::from_env()?;
    init_tracing(&config);
    tracing::info!(
        addr = %config.listen_addr,
        hospital_api = %config.hospital_api_url,
        "starting hospital-console"
    );

    // Build client and service layers
    let app_state = AppState::from_config(&config)?;

    // Build router
    let app = Router::new().merge(api::build_router());

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", api::ApiDoc::openapi()))
    };

    // The timeout bounds the whole request, including the refetch after a
    // mutation.
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.request_timeout() * 2)),
    );
    let app = if config.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };
    let app = app.with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
