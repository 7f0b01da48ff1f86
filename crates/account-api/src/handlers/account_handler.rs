//! Account handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{AccountResponse, AccountRole, AccountUpdate, Credentials, NewAccount};

use crate::extractors::{ClientAddr, ValidatedJson, ValidatedPath};
use crate::middleware::CallerIdentity;
use crate::state::AppState;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthenticateRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

impl From<AuthenticateRequest> for Credentials {
    fn from(req: AuthenticateRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
        }
    }
}

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "jdoe")]
    pub username: String,
    /// Minimum 8 characters
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "John")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Account classification; "auditor" grants the audit listing
    #[schema(value_type = Option<String>, example = "auditor")]
    pub user_type: Option<AccountRole>,
}

impl From<RegisterRequest> for NewAccount {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            user_type: req.user_type,
        }
    }
}

/// Partial account update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: Option<String>,
    pub password: Option<String>,
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    #[schema(value_type = Option<String>, example = "auditor")]
    pub user_type: Option<AccountRole>,
    pub last_active: Option<chrono::DateTime<Utc>>,
    pub client_ip_address: Option<String>,
}

impl From<UpdateAccountRequest> for AccountUpdate {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            user_type: req.user_type,
            last_active: req.last_active,
            client_ip_address: req.client_ip_address,
            reset_client_ip_address: false,
        }
    }
}

/// Authenticated account with its bearer token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthenticatedAccount {
    #[serde(flatten)]
    pub account: AccountResponse,
    /// Bearer token for `/users/current`
    pub token: String,
}

/// Routes reachable without a caller identity
pub fn public_account_routes() -> Router<AppState> {
    Router::new()
        .route("/authenticate", post(authenticate))
        .route("/register", post(register))
}

/// Routes that run behind the identity middleware
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/audit/:id", get(get_auditors))
        .route("/logout/:id", post(logout))
        .route("/", get(get_all))
        .route("/current", get(get_current))
        .route("/:id", get(get_by_id).put(update).delete(delete))
}

/// Log in and record the caller's activity
#[utoipa::path(
    post,
    path = "/users/authenticate",
    tag = "Accounts",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthenticatedAccount),
        (status = 400, description = "Username or password is incorrect, or the login could not be recorded")
    )
)]
pub async fn authenticate(
    State(state): State<AppState>,
    ClientAddr(client_addr): ClientAddr,
    ValidatedJson(payload): ValidatedJson<AuthenticateRequest>,
) -> AppResult<Json<AuthenticatedAccount>> {
    let received_at = Utc::now();

    let account = state
        .accounts
        .authenticate(payload.into())
        .await
        .map_err(|e| {
            warn!(error = %e, "Credential check failed");
            AppError::RetryLater
        })?
        .ok_or(AppError::InvalidCredentials)?;

    state
        .accounts
        .update(account.id, AccountUpdate::activity(received_at, client_addr))
        .await
        .map_err(|e| {
            warn!(account_id = %account.id, error = %e, "Recording login activity failed");
            AppError::RetryLater
        })?;

    let token = state.tokens.issue(&account).map_err(|e| {
        warn!(account_id = %account.id, error = %e, "Token signing failed");
        AppError::RetryLater
    })?;

    info!(account_id = %account.id, "Account authenticated");
    Ok(Json(AuthenticatedAccount {
        account: AccountResponse::from(account),
        token,
    }))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account registered"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<Value>> {
    state.accounts.create(payload.into()).await?;
    Ok(Json(json!({})))
}

/// List every account when the caller is an auditor
///
/// Non-auditors (and unknown ids) get an empty list rather than an error.
#[utoipa::path(
    get,
    path = "/users/audit/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Id of the requesting account")
    ),
    responses(
        (status = 200, description = "All accounts, or an empty list", body = Vec<AccountResponse>)
    )
)]
pub async fn get_auditors(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let is_auditor = state
        .accounts
        .get_by_id(id)
        .await?
        .is_some_and(|account| account.is_auditor());

    if !is_auditor {
        debug!(account_id = %id, "Audit listing requested by non-auditor");
        return Ok(Json(Vec::new()));
    }

    let accounts = state.accounts.get_all().await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// Log out and record the caller's activity
#[utoipa::path(
    post,
    path = "/users/logout/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Id of the account logging out")
    ),
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Logout failure!")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    ClientAddr(client_addr): ClientAddr,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<Json<Value>> {
    let received_at = Utc::now();

    if state.accounts.get_by_id(id).await?.is_none() {
        return Err(AppError::LogoutFailure);
    }

    state
        .accounts
        .update(id, AccountUpdate::activity(received_at, client_addr))
        .await?;

    info!(account_id = %id, "Account logged out");
    Ok(Json(json!({})))
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "Accounts",
    responses(
        (status = 200, description = "List of all accounts", body = Vec<AccountResponse>)
    )
)]
pub async fn get_all(State(state): State<AppState>) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = state.accounts.get_all().await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// Get the authenticated caller's account
#[utoipa::path(
    get,
    path = "/users/current",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = AccountResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_current(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<Json<AccountResponse>> {
    let account = state
        .accounts
        .get_by_id(caller.subject)
        .await?
        .ok_or_not_found()?;

    Ok(Json(AccountResponse::from(account)))
}

/// Get account by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account", body = AccountResponse),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<Json<AccountResponse>> {
    let account = state.accounts.get_by_id(id).await?.ok_or_not_found()?;
    Ok(Json(AccountResponse::from(account)))
}

/// Apply a partial update
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAccountRequest>,
) -> AppResult<Json<Value>> {
    state.accounts.update(id, payload.into()).await?;
    Ok(Json(json!({})))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account deleted")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<Json<Value>> {
    state.accounts.delete(id).await?;
    Ok(Json(json!({})))
}
