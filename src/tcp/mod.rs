//! TCP adapter
//!
//! Depends only on core/. Owns the wire protocol: newline-delimited
//! UTF-8 queries in, fixed verdict lines out.
//!
//! The listener binds the configured address, accepts connections in
//! a loop, and runs each connection as its own tokio task. All shared
//! state lives behind `Arc` in [`Services`] and is safe for any
//! number of concurrent handlers.

pub mod connection;

use crate::core::error::{LineQueryError, Result};
use crate::core::services::Services;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// Accepting TCP server.
pub struct Server {
    listener: TcpListener,
    services: Arc<Services>,
    limiter: Option<Arc<Semaphore>>,
}

impl Server {
    /// Bind the configured address.
    ///
    /// A bind failure is fatal to startup; the caller is expected to
    /// abort.
    pub async fn bind(services: Arc<Services>) -> Result<Self> {
        let addr = format!(
            "{}:{}",
            services.config.server.host, services.config.server.port
        );

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| LineQueryError::Bind { addr, source })?;

        let limiter = match services.config.limits.max_connections {
            0 => None,
            n => Some(Arc::new(Semaphore::new(n))),
        };

        info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            services,
            limiter,
        })
    }

    /// The address the listener actually bound (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        // Spawn signal handler
        let mut shutdown = tokio::spawn(async {
            tokio::signal::ctrl_c().await.ok();
        });

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            // With a connection cap, wait for a free
                            // slot before accepting more work; excess
                            // connections queue in the accept backlog.
                            let permit = match &self.limiter {
                                Some(sem) => Arc::clone(sem).acquire_owned().await.ok(),
                                None => None,
                            };

                            let services = Arc::clone(&self.services);
                            tokio::spawn(async move {
                                let _permit = permit;
                                connection::handle(stream, peer, services).await;
                            });
                        }
                        Err(e) => {
                            // Transient accept failures must not take
                            // down the other connections.
                            error!("Failed to accept connection: {e}");
                        }
                    }
                }

                // Handle Ctrl+C
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        info!("Server shutting down");
        Ok(())
    }
}
