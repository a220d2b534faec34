use axum::{extract::State, http::StatusCode, Json};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use tracing::info;

use super::schemas::{Msg, Token, TokenType};
use crate::app_state::AppState;
use crate::db::crud::CrudRepository;
use crate::db::models::{NewAccountUser, RegisterUser, UserLogin};
use crate::db::repositories::AccountUserRepository;
use crate::db::session::SharedDb;
use crate::error::{AppError, AppResult};
use crate::security;

/// Register a new account. Rejects duplicate emails, hashes the password,
/// and defaults the username from the email's local part.
pub async fn register(
    SharedDb(mut db): SharedDb,
    Json(payload): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<Msg>)> {
    payload.validate_payload()?;

    if AccountUserRepository::get_by_email(&mut db, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Invalid emailId. Reason - Already exists!".to_string(),
        ));
    }

    let password_hash = security::hash_password(payload.password.expose_secret())?;
    let input = NewAccountUser {
        name: payload.name.clone(),
        email: payload.email.clone(),
        username: payload.username_or_default(),
        password_hash,
        country_code: payload.country_code.clone(),
        phone: payload.phone.clone(),
    };
    let account = AccountUserRepository::create(&mut db, &input).await?;
    info!(account_id = %account.id, "Registered new account");

    Ok((
        StatusCode::CREATED,
        Json(Msg {
            message: "Registration successful!".to_string(),
        }),
    ))
}

/// Authenticate an account and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    SharedDb(mut db): SharedDb,
    Json(payload): Json<UserLogin>,
) -> AppResult<Json<Token>> {
    let account = AccountUserRepository::get_by_email(&mut db, &payload.email)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Invalid emailId. Reason - Does not exist!".to_string())
        })?;

    if !security::verify_password(payload.password.expose_secret(), &account.password_hash)? {
        return Err(AppError::Unauthorized(
            "Incorrect password provided".to_string(),
        ));
    }

    let mut claims = Map::new();
    claims.insert("name".to_string(), Value::String(account.name.clone()));
    claims.insert("email".to_string(), Value::String(account.email.clone()));

    let access_token =
        security::create_access_token(&account.id.to_string(), Some(claims), &state.env.auth)?;

    Ok(Json(Token {
        access_token,
        token_type: TokenType::Bearer,
    }))
}
