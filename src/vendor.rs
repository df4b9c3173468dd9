// src/vendor.rs
//
// Vendor profile management.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client;
use crate::errors::ApiError;
use crate::state::ClientContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub business_name: String,
    pub description: String,
    pub address: String,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub business_images: Vec<String>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VendorUpdate {
    #[validate(length(min = 1, max = 255, message = "business name is required"))]
    pub business_name: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    pub business_images: Vec<String>,
    pub branches: Vec<Branch>,
}

pub async fn vendor_profile(ctx: &ClientContext) -> Result<Vendor, ApiError> {
    client::get_json(ctx, "vendor/profile").await
}

pub async fn update_vendor_profile(
    ctx: &ClientContext,
    update: &VendorUpdate,
) -> Result<Vendor, ApiError> {
    update.validate()?;
    tracing::debug!(business_name = %update.business_name, "updating vendor profile");
    client::put_json(ctx, "vendor/profile", update).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_business_name_is_rejected() {
        let update = VendorUpdate {
            business_name: String::new(),
            description: "Student uniforms".to_string(),
            address: "Market street 1".to_string(),
            address2: None,
            website: None,
            facebook_url: None,
            logo_url: None,
            business_images: Vec::new(),
            branches: Vec::new(),
        };
        assert!(update.validate().is_err());
    }
}
