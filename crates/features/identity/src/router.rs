//! Identity routes: the two unprotected registration/login endpoints.

use crate::handlers::{create_user, login_user};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn identity_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(create_user, login_user))
}
