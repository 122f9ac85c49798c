//! Secrets routes. All of these are protected (§4.4) — the binary composing this router is
//! responsible for layering the identity slice's auth-gate middleware on top.

use crate::handlers::{create_secret, delete_secret, get_secret, list_secrets, ping, update_secret};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn secrets_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(
        list_secrets,
        get_secret,
        create_secret,
        update_secret,
        delete_secret,
        ping,
    ))
}
