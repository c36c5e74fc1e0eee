use crate::cli::commands::ServeArgs;
use crate::config::Settings;
use crate::errors::HoundError;
use crate::api;
use tracing::info;

pub async fn handle_serve(args: ServeArgs, mut settings: Settings) -> Result<(), HoundError> {
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(dir) = args.artifacts {
        settings.artifacts_dir = dir;
    }
    settings.cors |= args.cors;

    info!(host = %settings.host, port = settings.port, db = %settings.db_path, "Starting API server");

    let state = api::create_app_state(&settings)?;
    let app = if settings.cors {
        api::build_router_with_cors(state)
    } else {
        api::build_router(state)
    };

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| HoundError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
