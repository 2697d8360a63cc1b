use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{CheckAuthResponse, LoginRequest, LoginResponse, SignupRequest, StatusBody, UserSummary},
        extractors::MaybeUser,
        jwt::JwtKeys,
        password::{hash_password, CredentialCheck, PasswordCheck},
        repo::{is_unique_violation, NewUser},
        repo_types::User,
        services::{is_valid_email, validate_signup},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", put(signup))
        .route("/auth/login", post(login))
        .route("/auth/checkAuth", get(check_auth))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<StatusBody>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if let Err(msg) = validate_signup(&payload) {
        warn!(email = %payload.email, %msg, "signup validation failed");
        return Err(ApiError::Validation(msg));
    }

    // Ensure email is not taken
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Validation("User already exists".into()));
    }

    let hash = hash_password(payload.password.trim())?;

    let user = match User::create(
        &state.db,
        NewUser {
            first_name: payload.first_name.trim(),
            last_name: payload.last_name.trim(),
            email: &payload.email,
            password_hash: &hash,
            habit_tokens: state.config.starting_tokens,
        },
    )
    .await
    {
        Ok(u) => u,
        // a concurrent signup can race the pre-check to the unique index
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "email already registered");
            return Err(ApiError::Validation("User already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(StatusBody {
            message: "User created successfully".into(),
            status_code: 201,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Please enter a valid email".into()));
    }

    let checker = PasswordCheck { db: &state.db };
    let user = match checker.check(&payload.email, payload.password.trim()).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login rejected");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        status_code: 200,
        token,
        user: UserSummary::from(&user),
    }))
}

#[instrument(skip_all)]
pub async fn check_auth(
    MaybeUser(user): MaybeUser,
) -> Result<Json<CheckAuthResponse>, ApiError> {
    let user = user.ok_or(ApiError::Unauthenticated)?;

    Ok(Json(CheckAuthResponse {
        message: "User is authenticated".into(),
        status_code: 200,
        user: UserSummary::from(&user),
    }))
}
