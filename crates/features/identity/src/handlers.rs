//! Registration and login handlers. Both are unprotected by construction (§4.4).

use crate::error::IdentityError;
use axum::Json;
use axum::extract::State;
use gophkeeper_derive::{api_handler, api_model};
use gophkeeper_kernel::prelude::ApiState;

const IDENTITY_TAG: &str = "Identity";

#[derive(Clone)]
#[api_model]
pub struct UserCredentials {
    login: String,
    password: String,
}

#[api_model]
pub struct TokenResponse {
    token: String,
}

#[api_handler(
    post,
    path = "/users",
    request_body = UserCredentials,
    responses((status = OK, description = "User registered", body = TokenResponse)),
    tag = IDENTITY_TAG,
)]
pub(crate) async fn create_user(
    State(state): State<ApiState>,
    Json(body): Json<UserCredentials>,
) -> Result<Json<TokenResponse>, IdentityError> {
    if body.login.is_empty() || body.password.is_empty() {
        return Err(IdentityError::InvalidCredentials {
            message: "login and password must not be empty".into(),
            context: None,
        });
    }

    let password_hash = gophkeeper_vault::hash_password(&body.password)?;
    let user_id = state.database.create_user(&body.login, &password_hash).await?;
    let token = mint_token(&state, user_id)?;

    Ok(Json(TokenResponse { token }))
}

#[api_handler(
    post,
    path = "/users/login",
    request_body = UserCredentials,
    responses((status = OK, description = "Logged in", body = TokenResponse)),
    tag = IDENTITY_TAG,
)]
pub(crate) async fn login_user(
    State(state): State<ApiState>,
    Json(body): Json<UserCredentials>,
) -> Result<Json<TokenResponse>, IdentityError> {
    let (user_id, password_hash) = state.database.find_user(&body.login).await?;

    if !gophkeeper_vault::verify_password(&body.password, &password_hash) {
        return Err(IdentityError::WrongPassword {
            message: "password does not match".into(),
            context: None,
        });
    }

    let token = mint_token(&state, user_id)?;

    Ok(Json(TokenResponse { token }))
}

fn mint_token(state: &ApiState, user_id: i64) -> Result<String, IdentityError> {
    let key = state.config.security.server_key.as_bytes();
    Ok(gophkeeper_vault::mint_token(user_id, gophkeeper_vault::TOKEN_TTL, key)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gophkeeper_database::Database;
    use gophkeeper_domain::config::ApiConfig;

    async fn state(ns: &str) -> ApiState {
        let database = Database::builder().url("mem://").session(ns, "core").init().await.unwrap();
        ApiState::builder().config(ApiConfig::default()).db(database).build().unwrap()
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let state = state("handlers_register_login").await;
        let creds = UserCredentials { login: "alice".to_owned(), password: "s3cret".to_owned() };

        let registered = create_user(State(state.clone()), Json(creds.clone())).await.unwrap();
        let logged_in = login_user(State(state), Json(creds)).await.unwrap();

        assert_ne!(registered.0.token, logged_in.0.token);
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected() {
        let state = state("handlers_empty_credentials").await;
        let creds = UserCredentials { login: String::new(), password: "s3cret".to_owned() };

        let err = create_user(State(state), Json(creds)).await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidCredentials { .. }));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let state = state("handlers_duplicate_registration").await;
        let creds = UserCredentials { login: "bob".to_owned(), password: "pw".to_owned() };

        create_user(State(state.clone()), Json(creds.clone())).await.unwrap();
        let err = create_user(State(state), Json(creds)).await.unwrap_err();
        assert!(matches!(err, IdentityError::UserExists { .. }));
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() {
        let state = state("handlers_wrong_password").await;
        let creds = UserCredentials { login: "carol".to_owned(), password: "pw".to_owned() };
        create_user(State(state.clone()), Json(creds)).await.unwrap();

        let wrong = UserCredentials { login: "carol".to_owned(), password: "nope".to_owned() };
        let err = login_user(State(state), Json(wrong)).await.unwrap_err();
        assert!(matches!(err, IdentityError::WrongPassword { .. }));
    }

    #[tokio::test]
    async fn login_with_unknown_user_is_rejected() {
        let state = state("handlers_unknown_user").await;
        let creds = UserCredentials { login: "ghost".to_owned(), password: "pw".to_owned() };
        let err = login_user(State(state), Json(creds)).await.unwrap_err();
        assert!(matches!(err, IdentityError::UserNotFound { .. }));
    }
}
