//! Gateway entry-point: loads settings, wires adapters into the passthrough
//! service, and serves the REST endpoints.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gateway::domain::PassthroughService;
use gateway::inbound::http::health::HealthState;
use gateway::outbound::backend::HttpBackendGateway;
use gateway::outbound::introspection::{HttpTokenIntrospector, IntrospectionEndpoint};
#[cfg(feature = "metrics")]
use gateway::outbound::metrics::PrometheusPassthroughMetrics;
use gateway::settings::{GatewaySettings, SsoSettings};
use server::{ServerConfig, create_server};

/// Arguments handed to the settings loaders: the program name only, so
/// configuration comes from files and the environment.
fn settings_args() -> [OsString; 1] {
    [OsString::from("gateway")]
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let sso = SsoSettings::load_from_iter(settings_args())
        .map_err(|e| std::io::Error::other(format!("failed to load SSO settings: {e}")))?;
    let settings = GatewaySettings::load_from_iter(settings_args())
        .map_err(|e| std::io::Error::other(format!("failed to load gateway settings: {e}")))?;

    let introspector = build_introspector(&sso)?;
    let backend = HttpBackendGateway::new(settings.backend_timeout())
        .map_err(|e| std::io::Error::other(format!("failed to build backend client: {e}")))?;

    #[cfg(feature = "metrics")]
    let (passthrough, prometheus) = {
        let prometheus = initialize_metrics(|| {
            PrometheusMetricsBuilder::new("gateway")
                .endpoint("/metrics")
                .build()
        });
        let passthrough = match prometheus.as_ref() {
            Some(prom) => {
                let metrics = PrometheusPassthroughMetrics::new(&prom.registry).map_err(|e| {
                    std::io::Error::other(format!("passthrough metrics registration failed: {e}"))
                })?;
                PassthroughService::with_metrics(
                    Arc::new(introspector),
                    Arc::new(backend),
                    Arc::new(metrics),
                )
            }
            None => PassthroughService::new(Arc::new(introspector), Arc::new(backend)),
        };
        (passthrough, prometheus)
    };
    #[cfg(not(feature = "metrics"))]
    let passthrough = PassthroughService::new(Arc::new(introspector), Arc::new(backend));

    let bind_addr = settings.bind_addr();
    let config = ServerConfig::new(bind_addr, passthrough);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(prometheus);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "gateway listening");
    server.await
}

fn build_introspector(sso: &SsoSettings) -> std::io::Result<HttpTokenIntrospector> {
    let url = sso.introspection_url().map_err(|e| {
        std::io::Error::other(format!("SSO_INTROSPECTION_URL is not a valid URL: {e}"))
    })?;
    if url.is_none() {
        error!("SSO_INTROSPECTION_URL not configured; every query will fail token validation");
    }
    let endpoint = IntrospectionEndpoint {
        url,
        client_id: sso.client_id().to_owned(),
        client_secret: sso.client_secret().to_owned(),
    };
    HttpTokenIntrospector::new(endpoint, sso.timeout())
        .map_err(|e| std::io::Error::other(format!("failed to build introspection client: {e}")))
}

/// Build the Prometheus exporter, logging and continuing without it on
/// failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(make: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match make() {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "failed to initialise Prometheus metrics; continuing without");
            None
        }
    }
}
