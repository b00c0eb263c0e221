//! Response envelopes shared by every handler.
//!
//! Success bodies look like `{ "success": true, "message": ..., "data": ... }`.
//! Paginated bodies additionally carry the flattened [`PageMeta`] fields
//! (`totalDocs`, `totalPages`, `currentPage`, ...).

use axum::http::StatusCode;
use axum::Json;
use ems_core::pagination::{Page, PageMeta};
use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
        })
    }

    /// `201 Created` with the envelope.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(message, data))
    }
}

/// Paginated success envelope.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl<T: Serialize> PagedResponse<T> {
    pub fn ok(message: impl Into<String>, page: Page<T>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: page.items,
            meta: page.meta,
        })
    }
}
