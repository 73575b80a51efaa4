//! API handlers for Lectern REST endpoints

pub mod admin;
pub mod flat;
pub mod health;
pub mod member;
pub mod openapi;
pub mod session;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for mutations that only report success
#[derive(Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Query parameters for guarded book deletion
#[derive(Deserialize)]
pub struct DeleteBookParams {
    pub force: Option<bool>,
}
