// src/products.rs
//
// Vendor-side product management. Create and update ship as multipart forms
// because the product image travels in the same request.

use chrono::{DateTime, Utc};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use validator::Validate;

use crate::client;
use crate::errors::ApiError;
use crate::models::{Attachment, Product};
use crate::state::ClientContext;

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 255, message = "product name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    #[validate(range(min = 0.01, message = "price must be positive"))]
    pub price: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,

    pub quantity: u32,
    pub category_id: i64,
    pub brand_id: i64,

    #[validate(length(min = 1, message = "pickup address is required"))]
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub restock_due_date: Option<DateTime<Utc>>,

    pub is_active: bool,
}

pub async fn create_product(
    ctx: &ClientContext,
    payload: &ProductPayload,
    image: Option<Attachment>,
) -> Result<Product, ApiError> {
    payload.validate()?;
    ensure_discount_below_price(payload)?;
    tracing::debug!(name = %payload.name, "creating product");
    let form = product_form(payload, image)?;
    let builder = client::request(ctx, Method::POST, "products")?.multipart(form);
    client::send_json(ctx, builder).await
}

pub async fn update_product(
    ctx: &ClientContext,
    id: i64,
    payload: &ProductPayload,
    image: Option<Attachment>,
) -> Result<(), ApiError> {
    payload.validate()?;
    ensure_discount_below_price(payload)?;
    tracing::debug!(id, "updating product");
    let form = product_form(payload, image)?;
    let path = format!("products/{}", id);
    let builder = client::request(ctx, Method::PUT, &path)?.multipart(form);
    client::send_no_content(ctx, builder).await
}

pub async fn delete_product(ctx: &ClientContext, id: i64) -> Result<(), ApiError> {
    tracing::debug!(id, "deleting product");
    client::delete_no_content(ctx, &format!("products/{}", id)).await
}

/// The authenticated vendor's own catalog (unpaginated).
pub async fn vendor_products(ctx: &ClientContext) -> Result<Vec<Product>, ApiError> {
    client::get_json(ctx, "products/vendor").await
}

fn ensure_discount_below_price(payload: &ProductPayload) -> Result<(), ApiError> {
    if let Some(discount) = payload.discount_price {
        if discount <= 0.0 || discount >= payload.price {
            return Err(ApiError::ValidationFailed(
                "Discount price must be positive and below the list price.".to_string(),
            ));
        }
    }
    Ok(())
}

fn product_form(payload: &ProductPayload, image: Option<Attachment>) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("name", payload.name.clone())
        .text("description", payload.description.clone())
        .text("price", payload.price.to_string())
        .text("quantity", payload.quantity.to_string())
        .text("categoryId", payload.category_id.to_string())
        .text("brandId", payload.brand_id.to_string())
        .text("address", payload.address.clone())
        .text("isActive", payload.is_active.to_string());

    if let Some(discount) = payload.discount_price {
        form = form.text("discountPrice", discount.to_string());
    }
    if let Some(due) = payload.restock_due_date {
        form = form.text("restockDueDate", due.to_rfc3339());
    }
    if let Some(image) = image {
        let part = Part::bytes(image.bytes)
            .file_name(image.filename)
            .mime_str("image/*")
            .map_err(|e| {
                tracing::error!("could not set image mime type: {}", e);
                ApiError::ValidationFailed("Invalid image attachment.".to_string())
            })?;
        form = form.part("image", part);
    }
    Ok(form)
}
