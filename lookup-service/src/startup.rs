use crate::classifier::ErrorClassifier;
use crate::config::LookupConfig;
use crate::handlers;
use crate::services::LookupService;
use crate::store::RecordStore;
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::{route_not_found, AppError};
use service_core::middleware::{
    catch_panic_middleware, metrics_middleware, request_id_middleware,
    security_headers_middleware, RequestId,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub lookup: LookupService,
    pub classifier: ErrorClassifier,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>, classifier: ErrorClassifier) -> Self {
        Self {
            lookup: LookupService::new(store.clone()),
            store,
            classifier,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/get/:id", get(handlers::get_record))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .fallback(route_not_found)
        .layer(from_fn(catch_panic_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .extensions()
                    .get::<RequestId>()
                    .map(RequestId::as_str)
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Binds the listener and wires the router. The store must already be
    /// fully initialized; it is never written to afterwards.
    pub async fn build(config: LookupConfig, store: Arc<RecordStore>) -> Result<Self, AppError> {
        let classifier = ErrorClassifier::new(config.lookup.not_found_status()?);
        let router = build_router(AppState::new(store, classifier));

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            not_found_status = classifier.not_found_status().as_u16(),
            "Listening on {}",
            port
        );

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
