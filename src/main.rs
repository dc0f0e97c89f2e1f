use crate::comps::CompsService;
use crate::config::Settings;
use crate::router::respond;
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod comps;
mod config;
mod domain;
mod errors;
mod geocoding;
mod geos;
mod rentals;
mod responses;
mod router;
mod transport;
mod validators;

#[cfg(test)]
mod tests;

fn main() {
    // 1. Settings (.env + environment)
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2. Logging; RUST_LOG wins over LOG_LEVEL
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_level.to_lowercase().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // 3. Collaborators + service
    let addr = settings.bind_addr;
    let workers = settings.max_workers;
    let service = match CompsService::from_settings(settings) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!(error = %e, "failed to build comps service");
            std::process::exit(1);
        }
    };

    // 4. Serve
    tracing::info!(%addr, workers, "starting server");

    let server = Server::bind(&addr).max_workers(workers);
    let result = server.serve(move |req, _info| respond(req, &service));

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down cleanly");
}
