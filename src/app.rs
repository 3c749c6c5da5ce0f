use crate::docs::openapi::ApiDoc;
use crate::service::Service;
use crate::{
    handlers,
    middleware::{metrics::record_metrics, trace_root::trace_root},
};
use axum::{
    middleware::from_fn,
    routing::{get, MethodRouter},
    Router,
};

use tower_http::trace::TraceLayer;
use tracing::instrument;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

fn collection_route() -> MethodRouter<Service> {
    get(handlers::todo::get_all).post(handlers::todo::add)
}

/// The single todo resource: the collection answers GET and POST (with or
/// without a trailing slash), an item answers GET, PUT and DELETE.
fn todo_routes() -> OpenApiRouter<Service> {
    OpenApiRouter::new()
        .route("/todo", collection_route())
        .route("/todo/", collection_route())
        .route(
            "/todo/{id}",
            get(handlers::todo::get)
                .put(handlers::todo::update)
                .delete(handlers::todo::delete),
        )
}

#[instrument(name = "build_app", skip_all)]
pub fn build_app(service: Service) -> Router {
    let app_router = OpenApiRouter::new()
        .merge(todo_routes())
        .route("/health", get(handlers::health))
        .layer(from_fn(record_metrics))
        .layer(from_fn(trace_root))
        .layer(TraceLayer::new_for_http())
        .with_state(service);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(app_router)
        .split_for_parts();

    router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
}
