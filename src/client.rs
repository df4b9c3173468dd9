// src/client.rs
//
// Request plumbing shared by every service wrapper: URL building, bearer
// attachment, and the single place where HTTP failures become `ApiError`.

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::ApiError;
use crate::state::ClientContext;

pub(crate) fn request(
    ctx: &ClientContext,
    method: Method,
    path: &str,
) -> Result<RequestBuilder, ApiError> {
    let url = ctx.config.endpoint(path)?;
    tracing::debug!(%method, %url, "issuing API request");
    let mut builder = ctx.http.request(method, url);
    if let Some(token) = ctx.session.token() {
        builder = builder.bearer_auth(token);
    }
    Ok(builder)
}

pub(crate) async fn send_json<T: DeserializeOwned>(
    ctx: &ClientContext,
    builder: RequestBuilder,
) -> Result<T, ApiError> {
    let response = builder.send().await.map_err(ApiError::from)?;
    let response = check_status(ctx, response).await?;
    response.json::<T>().await.map_err(ApiError::from)
}

pub(crate) async fn send_no_content(
    ctx: &ClientContext,
    builder: RequestBuilder,
) -> Result<(), ApiError> {
    let response = builder.send().await.map_err(ApiError::from)?;
    check_status(ctx, response).await.map(|_| ())
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    ctx: &ClientContext,
    path: &str,
) -> Result<T, ApiError> {
    send_json(ctx, request(ctx, Method::GET, path)?).await
}

pub(crate) async fn post_json<B, T>(
    ctx: &ClientContext,
    path: &str,
    body: &B,
) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    send_json(ctx, request(ctx, Method::POST, path)?.json(body)).await
}

pub(crate) async fn put_json<B, T>(
    ctx: &ClientContext,
    path: &str,
    body: &B,
) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    send_json(ctx, request(ctx, Method::PUT, path)?.json(body)).await
}

pub(crate) async fn post_no_content<B: Serialize + ?Sized>(
    ctx: &ClientContext,
    path: &str,
    body: &B,
) -> Result<(), ApiError> {
    send_no_content(ctx, request(ctx, Method::POST, path)?.json(body)).await
}

pub(crate) async fn delete_no_content(ctx: &ClientContext, path: &str) -> Result<(), ApiError> {
    send_no_content(ctx, request(ctx, Method::DELETE, path)?).await
}

async fn check_status(ctx: &ClientContext, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let error = ApiError::from_status(status, extract_server_message(&body));
    tracing::error!(%status, %error, "API request failed");
    if error.forces_logout() {
        tracing::warn!("session rejected by the server; clearing stored credentials");
        ctx.session.clear();
    }
    Err(error)
}

/// The API reports failures as `{"error": "..."}`; a few endpoints use
/// `{"message": "..."}` instead. Anything else is treated as no message.
fn extract_server_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ServerMessage {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        message: Option<String>,
    }

    serde_json::from_str::<ServerMessage>(body)
        .ok()
        .and_then(|m| m.error.or(m.message))
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_messages_are_extracted_from_either_key() {
        assert_eq!(
            extract_server_message(r#"{"error": "Transaction not found"}"#),
            Some("Transaction not found".to_string())
        );
        assert_eq!(
            extract_server_message(r#"{"message": "Vendor profile not found"}"#),
            Some("Vendor profile not found".to_string())
        );
        assert_eq!(extract_server_message(r#"{"error": ""}"#), None);
        assert_eq!(extract_server_message("<html>gateway error</html>"), None);
    }
}
