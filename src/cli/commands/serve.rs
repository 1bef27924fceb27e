use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use super::run_migrations;
use crate::config::{initialize_app_state_with_url, AuthConfig};
use crate::router::create_router;

pub async fn serve(database_url: &str, bind_address: &str, auth: AuthConfig, migrate: bool) -> Result<()> {
    trace!("Entering serve function");
    info!("FarmConnect application starting up");
    debug!("Database URL: {}", database_url);
    debug!("Bind address: {}", bind_address);
    debug!("Auth settings: {:?}", auth);

    // Initialize application state
    trace!("Initializing application state");
    let state = match initialize_app_state_with_url(database_url, auth).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    if migrate {
        run_migrations(&state.db).await?;
    }

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("FarmConnect API server running on http://{}/api", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
