//! Webserver implementation

use axum::Router;
use tokio::net::TcpListener;

use crate::prelude::*;

/// Bind `listen` and serve `router` until SIGINT or SIGTERM
pub async fn serve(listen: &str, router: Router) -> ClResult<()> {
	let listener = TcpListener::bind(listen).await.map_err(|e| {
		error!("FATAL: Cannot bind {}: {}", listen, e);
		Error::Io(e)
	})?;
	info!(addr = %listen, "Listening on HTTP");

	axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			warn!("Cannot install Ctrl+C handler: {}", e);
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut sigterm) => {
				sigterm.recv().await;
			}
			Err(e) => {
				warn!("Cannot install SIGTERM handler: {}", e);
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}
	info!("Shutdown signal received");
}

// vim: ts=4
