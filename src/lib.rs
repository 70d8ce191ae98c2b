//! # users-svc
//!
//! A minimal HTTP service for CRUD on a single `users` table.
//!
//! ```text
//! Server ─▶ trace ─▶ Router ─▶ [bearer gate] ─▶ UserHandler ─▶ UserService ─▶ UserStore ─▶ SQLite
//! ```
//!
//! One route, `/users`, keyed by method:
//!
//! | Method | Input | Success |
//! |---|---|---|
//! | `POST` | `{"id":1,"name":"Alice"}` | `201` + user |
//! | `GET` | `?id=1` | `200` + user |
//! | `PUT` | `?id=1`, `{"name":"Bob"}` | `200` + user |
//! | `DELETE` | `?id=1` | `204` |
//!
//! Errors are `{"error": "<message>"}`. `/healthz` and `/readyz` are the
//! probes.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use users_svc::{app, db, Server, UserHandler, UserService, UserStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), users_svc::Error> {
//!     let pool = db::connect("sqlite://users.db", 5).await?;
//!     let service = UserService::new(UserStore::new(pool));
//!     let router = app(service, UserHandler::DEFAULT_DEADLINE, None)?;
//!
//!     Server::bind("0.0.0.0:8000").await?.serve(router).await
//! }
//! ```

mod app;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod db;
pub mod health;
pub mod middleware;
pub mod users;

pub use app::app;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use users::{StoreError, User, UserHandler, UserService, UserStore};
