//! User API handlers.
//!
//! ```text
//! GET  /api/users
//! POST /api/register {"name":"Ada","email":"ada@example.com","referralCode":"ALICE123"}
//! GET  /api/users/ALICE123
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RegistrationRequest;
use crate::domain::{ApiResult, User};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

const REGISTERED_MESSAGE: &str = "User registered successfully";

/// Registration body for `POST /api/register`.
///
/// Every field is optional at the wire level so that absent fields reach
/// domain validation and produce its messages.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name; surrounding whitespace is trimmed.
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    /// Unique email; surrounding whitespace is trimmed.
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// Code of an existing user to credit.
    #[schema(example = "ALICE123")]
    pub referral_code: Option<String>,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(value: RegisterRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            referral_code: value.referral_code,
        }
    }
}

/// Body returned after a successful registration.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Confirmation text.
    #[schema(example = "User registered successfully")]
    pub message: String,
    /// The stored user.
    pub user: User,
}

/// List every registered user in registration order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use referrals::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Register a user, optionally crediting a referrer.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing or blank fields, duplicate email, unknown referral code or malformed JSON", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let receipt = state
        .registration
        .register(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: REGISTERED_MESSAGE.to_owned(),
        user: receipt.user,
    }))
}

/// Fetch the user who owns a referral code.
#[utoipa::path(
    get,
    path = "/api/users/{referral_code}",
    params(("referral_code" = String, Path, description = "Exact, case-sensitive referral code")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "findUserByReferralCode"
)]
#[get("/users/{referral_code}")]
pub async fn find_user_by_referral_code(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.find_by_referral_code(&path).await?;
    Ok(web::Json(user))
}
