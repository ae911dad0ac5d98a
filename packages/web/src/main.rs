use dioxus::prelude::*;

use api::{AppConfig, AuthStore, DateClient, LocalAuth};
use ui::{AppContent, AuthProvider};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start the tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().expect("Failed to load configuration");
    if !config.server.require_auth {
        tracing::warn!("/api/date accepts requests without a bearer token");
    }

    // Build the Dioxus app with the date API mounted first
    let router = axum::Router::new()
        .merge(api::server::date_routes(&config.server))
        .serve_dioxus_application(ServeConfig::new(), App);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind the server address");
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .expect("Server error");
}

fn load_config() -> AppConfig {
    AppConfig::load().unwrap_or_else(|err| {
        tracing::error!("Invalid configuration, using defaults: {}", err);
        AppConfig::default()
    })
}

/// The session store and date client for this app instance.
fn services() -> (AuthStore, DateClient) {
    let config = load_config();
    let store = AuthStore::from_config(&config.auth).unwrap_or_else(|err| {
        tracing::error!("Falling back to local accounts: {}", err);
        AuthStore::new(LocalAuth::new())
    });
    (store, DateClient::from_config(&config.api))
}

#[component]
fn App() -> Element {
    let (store, client) = use_hook(services);
    use_context_provider(|| client);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            store: store,
            AppContent {}
        }
    }
}
