//! Server lifecycle traits
//!
//! [`Server`] is the lifecycle contract; [`ServerExt`] adds `spawn()` and
//! `run_with_ctrl_c()` to every implementor.

use async_trait::async_trait;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Lifecycle contract for a long-running server.
#[async_trait]
pub trait Server: Send + Sync + 'static {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Bound address while running, `None` otherwise.
    fn address(&self) -> Option<SocketAddr>;

    fn is_running(&self) -> bool;

    /// Bind, serve until `shutdown` is cancelled, then drain in-flight
    /// requests and return `Ok(())`.
    async fn run(&self, shutdown: CancellationToken) -> Result<()>;
}

/// Extension trait providing convenience methods for servers.
pub trait ServerExt: Server + Sized {
    /// Run the server on a new task.
    ///
    /// Returns the task handle and the token that stops it.
    fn spawn(self) -> (tokio::task::JoinHandle<Result<()>>, CancellationToken) {
        let token = CancellationToken::new();
        let token_clone = token.clone();
        let handle = tokio::spawn(async move { self.run(token_clone).await });
        (handle, token)
    }

    /// Run the server until Ctrl+C (or SIGTERM on Unix).
    fn run_with_ctrl_c(self) -> impl std::future::Future<Output = Result<()>> + Send {
        async move {
            let shutdown = crate::shutdown::ShutdownController::with_signals();
            self.run(shutdown.token()).await
        }
    }
}

impl<T: Server + Sized> ServerExt for T {}
