// src/account.rs
//
// Authentication flows. On success the returned user (with its bearer token)
// is stored in the context's session; registration variants with identity
// documents ship as multipart forms.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use validator::Validate;

use crate::auth_models::{
    LoginPayload, ResetPassword, SchoolRegister, UniversityRegister, UserResult, VendorRegister,
    ensure_passwords_match,
};
use crate::client;
use crate::errors::ApiError;
use crate::models::Attachment;
use crate::state::ClientContext;

pub async fn login(ctx: &ClientContext, payload: &LoginPayload) -> Result<UserResult, ApiError> {
    payload.validate()?;
    let user: UserResult = client::post_json(ctx, "auth/login", payload).await?;
    ctx.session.set_user(user.clone());
    tracing::info!(email = %user.email, user_type = %user.user_type, "logged in");
    Ok(user)
}

/// Drops the stored credentials. Navigation back to the login screen is the
/// embedding UI's concern.
pub fn logout(ctx: &ClientContext) {
    ctx.session.clear();
    tracing::info!("logged out");
}

pub async fn register_vendor(
    ctx: &ClientContext,
    registration: &VendorRegister,
) -> Result<UserResult, ApiError> {
    registration.validate()?;
    ensure_passwords_match(&registration.password, &registration.confirm_password)?;
    let user: UserResult = client::post_json(ctx, "auth/register/vendor", registration).await?;
    ctx.session.set_user(user.clone());
    tracing::info!(email = %user.email, "vendor registered");
    Ok(user)
}

pub async fn register_school(
    ctx: &ClientContext,
    registration: &SchoolRegister,
    birth_certificate: Attachment,
) -> Result<UserResult, ApiError> {
    registration.validate()?;
    ensure_passwords_match(&registration.password, &registration.confirm_password)?;

    let mut form = Form::new()
        .text("name", registration.name.clone())
        .text("email", registration.email.clone())
        .text("password", registration.password.clone())
        .text("confirmPassword", registration.confirm_password.clone())
        .text("address", registration.address.clone())
        .text("nationalId", registration.national_id.clone())
        .text("schoolName", registration.school_name.clone())
        .text("phone", registration.phone.clone());
    if let Some(age) = registration.age {
        form = form.text("age", age.to_string());
    }
    if let Some(level) = registration.level {
        form = form.text("level", level.to_string());
    }
    form = form.part("birthCertificateFile", document_part(birth_certificate)?);

    let builder = client::request(ctx, Method::POST, "auth/register/school")?.multipart(form);
    let user: UserResult = client::send_json(ctx, builder).await?;
    ctx.session.set_user(user.clone());
    tracing::info!(email = %user.email, "school student registered");
    Ok(user)
}

pub async fn register_university(
    ctx: &ClientContext,
    registration: &UniversityRegister,
    national_id_file: Attachment,
) -> Result<UserResult, ApiError> {
    registration.validate()?;
    ensure_passwords_match(&registration.password, &registration.confirm_password)?;

    let mut form = Form::new()
        .text("name", registration.name.clone())
        .text("email", registration.email.clone())
        .text("password", registration.password.clone())
        .text("confirmPassword", registration.confirm_password.clone())
        .text("nationalId", registration.national_id.clone())
        .text("universityName", registration.university_name.clone())
        .text("faculty", registration.faculty.clone())
        .text("universityEmail", registration.university_email.clone())
        .text("phone", registration.phone.clone());
    if let Some(age) = registration.age {
        form = form.text("age", age.to_string());
    }
    if let Some(level) = registration.level {
        form = form.text("level", level.to_string());
    }
    form = form.part("nationalIdFile", document_part(national_id_file)?);

    let builder = client::request(ctx, Method::POST, "auth/register/university")?.multipart(form);
    let user: UserResult = client::send_json(ctx, builder).await?;
    ctx.session.set_user(user.clone());
    tracing::info!(email = %user.email, "university student registered");
    Ok(user)
}

pub async fn forgot_password(ctx: &ClientContext, email: &str) -> Result<(), ApiError> {
    client::post_no_content(ctx, "auth/forgot-password", &json!({ "email": email })).await
}

pub async fn reset_password(ctx: &ClientContext, reset: &ResetPassword) -> Result<(), ApiError> {
    reset.validate()?;
    ensure_passwords_match(&reset.password, &reset.confirm_password)?;
    client::post_no_content(ctx, "auth/reset-password", reset).await
}

/// Live uniqueness check behind the registration forms' email field.
pub async fn email_exists(ctx: &ClientContext, email: &str) -> Result<bool, ApiError> {
    let path = format!("auth/email-exists?email={}", urlencoding::encode(email));
    client::get_json(ctx, &path).await
}

fn document_part(attachment: Attachment) -> Result<Part, ApiError> {
    Part::bytes(attachment.bytes)
        .file_name(attachment.filename)
        .mime_str("application/octet-stream")
        .map_err(|e| {
            tracing::error!("could not prepare document attachment: {}", e);
            ApiError::ValidationFailed("Invalid document attachment.".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn test_ctx() -> ClientContext {
        ClientContext::new(ApiConfig::new("http://localhost:1/api/").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn malformed_login_fails_before_any_request() {
        let ctx = test_ctx();
        let payload = LoginPayload {
            email: "nope".to_string(),
            password: String::new(),
        };
        let result = login(&ctx, &payload).await;
        assert!(matches!(result, Err(ApiError::ValidationFailed(_))));
        assert!(!ctx.session.is_logged_in());
    }

    #[tokio::test]
    async fn mismatched_vendor_passwords_fail_before_any_request() {
        let ctx = test_ctx();
        let registration = VendorRegister {
            business_name: "Uniforms Co".to_string(),
            email: "owner@uniforms.example".to_string(),
            phone: "0100000000".to_string(),
            description: "Student uniforms".to_string(),
            address: "Market street 1".to_string(),
            address2: None,
            password: "hunter22hunter".to_string(),
            confirm_password: "different".to_string(),
            website: None,
            facebook_url: None,
        };
        let result = register_vendor(&ctx, &registration).await;
        assert!(matches!(result, Err(ApiError::ValidationFailed(_))));
        assert!(!ctx.session.is_logged_in());
    }

    #[test]
    fn logout_clears_the_session() {
        use crate::auth_models::{UserResult, UserType};
        let ctx = test_ctx();
        ctx.session.set_user(UserResult {
            display_name: "Sara".to_string(),
            email: "sara@uni.edu".to_string(),
            token: "opaque".to_string(),
            user_type: UserType::University,
        });
        assert!(ctx.session.is_logged_in());
        logout(&ctx);
        assert!(!ctx.session.is_logged_in());
    }
}
