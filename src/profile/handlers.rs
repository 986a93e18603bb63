use axum::{
    extract::{multipart::Field, DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::header,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::MessageResponse,
        extractors::CurrentUser,
        password::{hash_password, verify_password},
        validate::{is_valid_email, validate_password_change},
    },
    db::User,
    error::ApiError,
    state::AppState,
};

use super::{
    dto::{
        ChangeEmailRequest, ChangeEmailResponse, ChangePasswordRequest, ProfileChanges,
        ProfileResponse, UpdateProfileRequest, UpdateProfileResponse, UpdatedUser,
    },
    upload::check_picture,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/change-password", put(change_password))
        .route("/change-email", put(change_email))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
}

#[instrument(skip(current))]
pub async fn get_profile(current: CurrentUser) -> Json<ProfileResponse> {
    Json(ProfileResponse::from(current.user))
}

/// PUT /profile takes either multipart/form-data (for picture uploads) or a
/// plain JSON body for text-only updates.
#[instrument(skip(state, current, req))]
pub async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    req: Request,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let changes = if is_multipart {
        let multipart = Multipart::from_request(req, &state)
            .await
            .map_err(|_| ApiError::Validation("Malformed multipart body".into()))?;
        collect_multipart_changes(&state, multipart).await?
    } else {
        let Json(body) = Json::<UpdateProfileRequest>::from_request(req, &state)
            .await
            .map_err(|_| ApiError::Validation("Malformed request body".into()))?;
        ProfileChanges {
            name: body.name.filter(|s| !s.is_empty()),
            description: body.description.filter(|s| !s.is_empty()),
            location: body.location.filter(|s| !s.is_empty()),
            profile_pic: None,
        }
    };

    if changes.is_empty() {
        return Err(ApiError::Validation("No fields to update".into()));
    }

    let user = User::update_profile(
        &state.db,
        current.user.id,
        changes.name.as_deref(),
        changes.description.as_deref(),
        changes.location.as_deref(),
        changes.profile_pic.as_deref(),
    )
    .await?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".into(),
        user: UpdatedUser {
            id: user.id,
            name: user.name,
            email: user.email,
            description: user.description,
            location: user.location,
            profile_pic: user.profile_pic,
        },
    }))
}

async fn collect_multipart_changes(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<ProfileChanges, ApiError> {
    let mut changes = ProfileChanges::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("Malformed multipart body".into()))?
    {
        match field.name() {
            Some("name") => changes.name = read_text(field).await?,
            Some("description") => changes.description = read_text(field).await?,
            Some("location") => changes.location = read_text(field).await?,
            Some("profile_pic") => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::Upload("File too large".into()))?;

                let ext = check_picture(&filename, &content_type, data.len())?;
                let stored = format!("PROFILE-{}.{}", Uuid::new_v4(), ext);
                state.storage.put_object(&stored, data).await?;
                changes.profile_pic = Some(format!("{}/{}", state.config.upload_dir, stored));
            }
            _ => {}
        }
    }

    Ok(changes)
}

async fn read_text(field: Field<'_>) -> Result<Option<String>, ApiError> {
    let value = field
        .text()
        .await
        .map_err(|_| ApiError::Validation("Malformed multipart body".into()))?;
    Ok(Some(value).filter(|v| !v.is_empty()))
}

#[instrument(skip(state, current, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_password_change(&payload.current_password, &payload.new_password)?;

    if !verify_password(&payload.current_password, &current.user.password_hash) {
        warn!(user_id = %current.user.id, "password change with wrong current password");
        return Err(ApiError::Auth("Current password is incorrect".into()));
    }

    let hash = hash_password(&payload.new_password)?;
    // The session token stays valid; only the credential changes.
    User::update_password(&state.db, current.user.id, &hash).await?;

    info!(user_id = %current.user.id, "password changed");
    Ok(Json(MessageResponse {
        message: "Password updated successfully".into(),
    }))
}

#[instrument(skip(state, current, payload))]
pub async fn change_email(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<ChangeEmailRequest>,
) -> Result<Json<ChangeEmailResponse>, ApiError> {
    if !is_valid_email(&payload.new_email) {
        return Err(ApiError::Validation("Valid email is required".into()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Password is required to change email".into(),
        ));
    }

    if User::email_taken_by_other(&state.db, &payload.new_email, current.user.id).await? {
        warn!(user_id = %current.user.id, "email change to an address already in use");
        return Err(ApiError::Conflict("Email already in use".into()));
    }

    if !verify_password(&payload.password, &current.user.password_hash) {
        warn!(user_id = %current.user.id, "email change with wrong password");
        return Err(ApiError::Auth("Incorrect password".into()));
    }

    User::update_email(&state.db, current.user.id, &payload.new_email).await?;

    info!(user_id = %current.user.id, "email changed");
    Ok(Json(ChangeEmailResponse {
        message: "Email updated successfully".into(),
        new_email: payload.new_email,
    }))
}
