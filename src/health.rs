//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Does the store answer? Failure → pulled from load-balancer. |
//!
//! Neither probe sits behind the bearer-token gate.

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::users::UserService;

/// Always `200 OK` with body `"ok"`. No dependencies.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 ready` while the store answers `SELECT 1`, `503` otherwise.
pub fn readiness(service: UserService) -> impl Handler {
    move |_req: Request| {
        let service = service.clone();
        async move {
            if service.is_ready().await {
                Response::text("ready")
            } else {
                Response::error(Status::ServiceUnavailable, "Store unavailable")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::db;
    use crate::method::Method;
    use crate::router::Router;
    use crate::users::UserStore;

    fn probe(path: &str) -> Request {
        Request::new(Method::Get, path.to_owned(), None, Vec::new(), Bytes::new())
    }

    #[tokio::test]
    async fn readiness_follows_the_store() {
        let pool = db::memory_pool().await.unwrap();
        let router = Router::new()
            .route("/healthz", liveness).unwrap()
            .route("/readyz", readiness(UserService::new(UserStore::new(pool.clone())))).unwrap();

        assert_eq!(router.dispatch(probe("/readyz")).await.body(), b"ready");

        pool.close().await;
        let res = router.dispatch(probe("/readyz")).await;
        assert_eq!(res.status_code(), Status::ServiceUnavailable);
        assert_eq!(router.dispatch(probe("/healthz")).await.body(), b"ok");
    }
}
