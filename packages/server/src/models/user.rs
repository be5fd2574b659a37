use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::user;
use crate::error::AppError;
use crate::models::auth::{validate_country_code, validate_email, validate_name, validate_password};

/// Public view of an account. The password hash is never serialized.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "Alice Janssen")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "NL")]
    pub country_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            country_code: m.country_code,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Profile update. Absent fields are left unchanged; an empty `password`
/// keeps the current one.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    #[schema(example = "Alice Janssen")]
    pub name: Option<String>,
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "BE")]
    pub country_code: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// The new password, if one was actually supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

pub fn validate_update_user(payload: &UpdateUserRequest) -> Result<(), AppError> {
    if let Some(ref name) = payload.name {
        validate_name(name)?;
    }
    if let Some(ref email) = payload.email {
        validate_email(email)?;
    }
    if let Some(ref code) = payload.country_code {
        validate_country_code(code)?;
    }
    if let Some(password) = payload.new_password() {
        validate_password(password)?;
    }
    Ok(())
}
