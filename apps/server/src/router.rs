use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use gophkeeper::domain::constants::MAX_MESSAGE_SIZE_BYTES;
use gophkeeper::kernel::prelude::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();

    // `UserCreate`/`UserLogin` (identity) and the liveness/system endpoints are unprotected;
    // every secrets route (list/get/create/update/delete/ping) requires a valid bearer token
    // (§4.4), enforced here by layering the auth gate on just that sub-router.
    let protected: OpenApiRouter<ApiState> = gophkeeper::server::router::secrets_router()
        .layer(middleware::from_fn_with_state(state.clone(), gophkeeper::identity::middleware::require_auth));

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(gophkeeper::server::router::system_router())
        .merge(gophkeeper::server::router::identity_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_MESSAGE_SIZE_BYTES))
        .with_state(state)
        .split_for_parts();

    // Create the Scalar UI routes
    let scalar_routes = Scalar::with_url("/api", api_doc);

    // Merge all routes and then apply the state to the final router
    Router::new().merge(openapi_routes).merge(scalar_routes)
}
