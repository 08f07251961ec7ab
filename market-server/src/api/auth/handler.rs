//! Authentication Handlers
//!
//! Handles registration, login, logout, and current-user lookup

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::{self, CurrentUser, role_permissions};
use crate::core::ServerState;
use crate::db::repository::{RepoError, account};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_USERNAME_LEN, MIN_PASSWORD_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, ErrorCode};
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use shared::models::{AccountCreate, Role};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn user_info(account: &shared::models::Account, permissions: Vec<String>) -> UserInfo {
    UserInfo {
        id: account.id,
        username: account.username.clone(),
        display_name: account.display_name.clone(),
        role: account.role.clone(),
        permissions,
    }
}

/// Register handler
///
/// Creates a customer or owner account. Admin accounts are never
/// self-registered.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserInfo>, AppError> {
    validate_required_text(&req.username, "username", MAX_USERNAME_LEN)?;
    validate_optional_text(&req.display_name, "display_name", MAX_NAME_LEN)?;

    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    if req.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("password is too long"));
    }

    let role = match req.role.as_deref() {
        None | Some("customer") => Role::Customer,
        Some("owner") => Role::Owner,
        Some(other) => {
            return Err(AppError::validation(format!("Unknown role '{other}'")));
        }
    };

    let hash_pass = auth::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let username = req.username.trim().to_string();
    let display_name = req
        .display_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| username.clone());

    let created = account::create(
        &state.pool,
        AccountCreate {
            username: username.clone(),
            display_name,
            hash_pass,
            role,
        },
    )
    .await;

    let account = match created {
        Ok(a) => a,
        Err(RepoError::Duplicate(_)) => {
            return Err(AppError::new(ErrorCode::UsernameExists));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        account_id = account.id,
        username = %account.username,
        role = %account.role,
        "Account registered"
    );

    Ok(Json(user_info(&account, vec![])))
}

/// Login handler
///
/// Authenticates credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = req.username.clone();

    let account = account::find_by_username(&state.pool, &username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Check authentication result - unified error message to prevent username enumeration
    let account = match account {
        Some(a) => {
            if !a.is_active {
                return Err(AppError::new(ErrorCode::AccountDisabled));
            }

            let password_valid = auth::verify_password(&req.password, &a.hash_pass)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(username = %username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            a
        }
        None => {
            tracing::warn!(username = %username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let role = account
        .role()
        .ok_or_else(|| AppError::internal(format!("Unknown role '{}'", account.role)))?;
    let permissions = role_permissions(role);

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(
            account.id,
            &account.username,
            &account.display_name,
            &account.role,
            &permissions,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        account_id = account.id,
        username = %account.username,
        role = %account.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        user: user_info(&account, permissions),
        token,
    }))
}

/// Get current user info
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, AppError> {
    // Query fresh account data so a disabled account is reflected immediately
    let account = account::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account"))?;

    if !account.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    Ok(Json(user_info(&account, user.permissions)))
}

/// Logout handler
///
/// Stateless tokens cannot be revoked server-side; this endpoint exists so
/// clients have a uniform logout call and the event is logged.
pub async fn logout(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<()>, AppError> {
    tracing::info!(
        account_id = user.id,
        username = %user.username,
        "User logged out"
    );

    Ok(Json(()))
}
