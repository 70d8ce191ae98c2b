//! HTTP server and graceful shutdown.
//!
//! Lifecycle: [`Server::bind`] (construct) → [`Server::serve`] (listen) →
//! SIGTERM / Ctrl-C (shut down). On the signal the server:
//! 1. Stops `listener.accept()` immediately; no new connections are made.
//! 2. Asks every open connection to close once its in-flight request is
//!    answered. Idle keep-alive connections close at once.
//! 3. Waits up to 30 s for them, then aborts the rest.
//! 4. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Body;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{error, info, warn};

use crate::error::Error;
use crate::middleware::trace::traced;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// Upper bound on how long shutdown waits for open connections.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest request body accepted; anything longer is `400 Invalid input`.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// The HTTP server, holding a bound listener.
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
}

impl Server {
    /// Binds the listening socket. Port `0` picks a free port; see
    /// [`local_addr`](Server::local_addr).
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        Ok(Self { listener, addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Accepts connections and dispatches them through `router` until
    /// SIGTERM or Ctrl-C, then drains in-flight connections.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), with `signal` as the shutdown trigger.
    pub async fn serve_with_shutdown(
        self,
        router: Router,
        signal: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let Self { listener, addr } = self;
        let router = Arc::new(router);

        info!(%addr, "users-svc listening");

        let builder = ConnBuilder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();
        // Every connection task, so shutdown can abort stragglers.
        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting at once,
                // even with connections still queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    // Called once per request on the connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { dispatch(router, req).await }
                    });

                    let conn = graceful.watch(builder.serve_connection(io, svc).into_owned());
                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the set stays bounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drop(listener);
        tokio::select! {
            () = graceful.shutdown() => {
                while tasks.join_next().await.is_some() {}
            }
            () = tokio::time::sleep(DRAIN_TIMEOUT) => {
                warn!(remaining = tasks.len(), "drain timed out, aborting connections");
                tasks.shutdown().await;
            }
        }

        info!("users-svc stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Collects the body, routes the request, and traces the exchange. Every
/// failure becomes a response, so hyper never sees an error.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, std::convert::Infallible> {
    let (parts, body) = req.into_parts();
    let method = parts.method.as_str();
    let path = parts.uri.path();

    let response = traced(method, path, async {
        match read_body(body, MAX_BODY_BYTES).await {
            Ok(bytes) => router.dispatch(Request::from_parts(&parts, bytes)).await,
            Err(e) => {
                warn!("reading request body failed: {e}");
                Response::error(Status::BadRequest, "Invalid input")
            }
        }
    })
    .await;

    Ok(response.into_inner())
}

/// Collects at most `limit` bytes of `body`.
async fn read_body<B>(body: B, limit: usize) -> Result<Bytes, Box<dyn std::error::Error + Send + Sync>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Ok(Limited::new(body, limit).collect().await?.to_bytes())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM (Unix) or Ctrl-C. A handler that fails to
/// install is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
