//! Breather - an activity-aware break reminder
//! 
//! This is the main entry point for the breather daemon.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use breather::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{check_idle_probe_available, check_notifier_available},
    tasks::{activity_monitor_task, presentation_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("breather={},tower_http=info", config.log_level()))
        .init();

    info!("Starting breather v{}", env!("CARGO_PKG_VERSION"));

    let store = config.settings_store();
    let settings = store.load().await;
    info!("Settings: work={}ms, inactivity={}ms, reset={}ms, check={}ms",
          settings.work_duration, settings.inactivity_threshold,
          settings.reset_threshold, settings.check_interval);

    // Missing tools degrade features, they never stop the daemon
    let idle_probe = config.idle_probe();
    if let Some(command) = idle_probe.as_deref() {
        if let Err(e) = check_idle_probe_available(command).await {
            warn!("{}; idle time will only come from POST /idle", e);
        }
    }
    let notifications = !config.no_notifications;
    if notifications {
        if let Err(e) = check_notifier_available().await {
            warn!("{}; break notifications will only be logged", e);
        }
    }

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), settings, store));

    // Start the presentation sink before anything can emit events
    let presentation_state = Arc::clone(&state);
    tokio::spawn(async move {
        presentation_task(presentation_state, notifications).await;
    });

    let monitor_state = Arc::clone(&state);
    tokio::spawn(async move {
        activity_monitor_task(monitor_state, idle_probe).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start|pause|resume|reset - Timer commands");
    info!("  POST /power/suspend|resume          - System sleep hooks");
    info!("  POST /idle                          - Report idle seconds");
    info!("  GET|PUT /settings                   - Read or save settings");
    info!("  GET  /status                        - Current timer status");
    info!("  GET  /events                        - Timer event stream (SSE)");
    info!("  GET  /health                        - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
