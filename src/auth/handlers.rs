use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{db::User, error::ApiError, state::AppState};

use super::{
    dto::{AuthResponse, LoginRequest, MessageResponse, SignupRequest, UserSummary},
    extractors::CurrentUser,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    validate::validate_signup,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/signout", post(signout))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    validate_signup(&payload)?;

    // Pre-check by email; the UNIQUE constraint is the backstop.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "signup with existing email");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.name,
        &payload.email,
        &hash,
        &payload.role,
        &payload.location,
    )
    .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    User::set_session_token(&state.db, user.id, &token).await?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".into(),
            token,
            user: UserSummary::from(user),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Please provide email and password".into(),
        ));
    }

    // Unknown email and wrong password share one response, so a caller
    // cannot probe which accounts exist.
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login with unknown email");
            ApiError::Auth("Invalid credentials".into())
        })?;

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::Auth("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    // Overwrites any prior session token; the old token stops matching.
    User::set_session_token(&state.db, user.id, &token).await?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        message: "Login successful".into(),
        token,
        user: UserSummary::from(user),
    }))
}

#[instrument(skip(state, current))]
pub async fn signout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<MessageResponse>, ApiError> {
    User::clear_session_token(&state.db, current.user.id).await?;

    info!(user_id = %current.user.id, "user signed out");
    Ok(Json(MessageResponse {
        message: "Successfully signed out".into(),
    }))
}
