// src/auth_models.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

use crate::errors::ApiError;

/// Coarse account discriminant the server bakes into every login response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum UserType {
    Vendor,
    School,
    University,
}

/// Authenticated user as returned by the auth endpoints. The token is an
/// opaque bearer credential; the client stores it but never interprets it
/// beyond the expiry projection in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResult {
    pub display_name: String,
    pub email: String,
    pub token: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VendorRegister {
    #[validate(length(min = 1, max = 255, message = "business name is required"))]
    pub business_name: String,

    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 5, message = "phone number is required"))]
    pub phone: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    pub confirm_password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
}

/// School-student registration; the birth certificate travels as a separate
/// multipart attachment.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRegister {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    pub confirm_password: String,

    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "national id is required"))]
    pub national_id: String,

    pub age: Option<u8>,
    pub level: Option<u8>,

    #[validate(length(min = 1, message = "school name is required"))]
    pub school_name: String,

    #[validate(length(min = 5, message = "phone number is required"))]
    pub phone: String,
}

/// University-student registration; the national id scan travels as a
/// separate multipart attachment.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UniversityRegister {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    pub confirm_password: String,

    #[validate(length(min = 1, message = "national id is required"))]
    pub national_id: String,

    pub age: Option<u8>,
    pub level: Option<u8>,

    #[validate(length(min = 1, message = "university name is required"))]
    pub university_name: String,

    #[validate(length(min = 1, message = "faculty is required"))]
    pub faculty: String,

    #[validate(email(message = "invalid university email address"))]
    pub university_email: String,

    #[validate(length(min = 5, message = "phone number is required"))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPassword {
    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "reset token is required"))]
    pub token: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    pub confirm_password: String,
}

/// Claims the client is allowed to look at. Signature verification is the
/// server's job; the client only projects the expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

pub(crate) fn ensure_passwords_match(password: &str, confirm: &str) -> Result<(), ApiError> {
    if password != confirm {
        return Err(ApiError::ValidationFailed(
            "Passwords do not match.".to_string(),
        ));
    }
    Ok(())
}
