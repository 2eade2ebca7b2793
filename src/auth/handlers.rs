use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, ProfileResponse, ProfileUser, RegisterResponse,
            SessionUser, StatusResponse, UpdateProfileRequest, UserSummary,
        },
        repo::User,
        services,
        session::{clear_session_cookie, AuthUser, SessionKeys},
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(me).put(update_me).delete(delete_me))
}

/// Creates an anonymous account with generated credentials and logs it in.
#[instrument(skip(state, jar))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<RegisterResponse>)> {
    let email = services::anonymous_email();
    let username = services::anonymous_username(User::count(&state.db).await? + 1);
    let password = services::generate_password(12);

    if User::credentials_taken(&state.db, &email, &username).await? {
        warn!(%username, "generated credentials already in use");
        return Err(ApiError::InvalidInput(
            "Registration failed: email or username already in use".into(),
        ));
    }

    let hash = services::hash_password(&password)?;
    let user = User::create(&state.db, &email, &username, &hash).await?;

    let keys = SessionKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((
        jar.add(keys.cookie(token)),
        Json(RegisterResponse {
            success: true,
            message: "Registration successful".into(),
            email: user.email,
            password,
            user: UserSummary {
                id: user.id,
                username: user.username,
            },
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Option<Json<LoginRequest>>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let Some(Json(payload)) = payload else {
        return Err(ApiError::InvalidInput("Invalid request body".into()));
    };

    let user = User::find_by_email(&state.db, payload.email.trim())
        .await?
        .ok_or_else(|| {
            warn!("login with unknown email");
            ApiError::InvalidCredentials
        })?;

    if !services::verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    User::touch_last_login(&state.db, user.id).await?;

    let keys = SessionKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = user.id, "user logged in");
    Ok((
        jar.add(keys.cookie(token)),
        Json(LoginResponse {
            success: true,
            message: "Login successful".into(),
            user: SessionUser {
                id: user.id,
                username: user.username,
                email: user.email,
            },
        }),
    ))
}

/// Clears the session cookie. Never fails, logged in or not.
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<StatusResponse>) {
    (
        jar.add(clear_session_cookie()),
        Json(StatusResponse {
            success: true,
            message: "Logged out".into(),
        }),
    )
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: ProfileUser {
            id: user.id,
            email: user.email,
            username: user.username,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Option<Json<UpdateProfileRequest>>,
) -> ApiResult<Json<StatusResponse>> {
    let Some(Json(payload)) = payload else {
        return Err(ApiError::InvalidInput("Invalid request body".into()));
    };

    let (username, email) = match (payload.username, payload.email) {
        (Some(username), Some(email)) if !username.trim().is_empty() && !email.trim().is_empty() => {
            (username, email)
        }
        _ => {
            return Err(ApiError::InvalidInput(
                "Username and email are required".into(),
            ))
        }
    };

    if !services::is_valid_email(&email) {
        return Err(ApiError::InvalidInput("Invalid email".into()));
    }

    if User::credentials_taken_by_other(&state.db, user_id, &email, &username).await? {
        return Err(ApiError::InvalidInput(
            "Username or email already in use".into(),
        ));
    }

    User::update_profile(&state.db, user_id, &username, &email).await?;

    info!(user_id, "profile updated");
    Ok(Json(StatusResponse {
        success: true,
        message: "Profile updated".into(),
    }))
}

/// Hard-deletes the account and everything it owns, then drops the session.
#[instrument(skip(state, jar))]
pub async fn delete_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<StatusResponse>)> {
    User::delete(&state.db, user_id).await?;

    info!(user_id, "account deleted");
    Ok((
        jar.add(clear_session_cookie()),
        Json(StatusResponse {
            success: true,
            message: "Account deleted".into(),
        }),
    ))
}
