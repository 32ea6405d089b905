use axum::Router;
use cdesk::kernel::server::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

/// Path of the interactive API reference.
pub(crate) const DOCS_PATH: &str = "/api";

#[derive(OpenApi)]
#[openapi(info(title = "Contact Desk", description = "Contact message submission and administration"))]
struct ApiDoc;

/// Assembles the full application: system and feature routes, request tracing and the
/// Scalar reference at [`DOCS_PATH`].
pub(crate) fn init(state: ApiState) -> Router {
    let (routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(cdesk::server::router::system_router())
        .merge(cdesk::server::router::api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    Router::new().merge(routes).merge(Scalar::with_url(DOCS_PATH, api_doc))
}
