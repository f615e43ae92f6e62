use std::{sync::Arc, time::Instant};

use axum::{body::Body, http::Request, middleware::Next, response::Response, routing::get, Router};

use crate::handlers::{corrections, info, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    Router::new()
        .route("/corrections", get(corrections::get_corrections))
        .route("/info", get(info::get_info))
        .layer(axum::middleware::from_fn(log_middleware))
        .with_state(ctx)
}

/// Log every request with its status and duration.
async fn log_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} {} {}ms",
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
