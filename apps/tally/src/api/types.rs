//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use serde::{Deserialize, Serialize};
use tally_core::{
    AverageMethod, CartItem, ItemId, TallyError, User,
    primitives::{check_cart, check_sequence_length},
};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// NUMERIC REQUESTS
// =============================================================================

/// Average request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageRequest {
    pub values: Vec<f64>,
    #[serde(default)]
    pub method: AverageMethod,
}

impl AverageRequest {
    /// Bound the request size before it reaches the aggregator.
    pub fn validate(&self) -> Result<(), TallyError> {
        check_sequence_length(self.values.len(), "values")
    }
}

/// Mean squared error request. Also the shape of the CLI's `--file` input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MseRequest {
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
}

impl MseRequest {
    pub fn validate(&self) -> Result<(), TallyError> {
        check_sequence_length(self.actual.len(), "actual")?;
        check_sequence_length(self.predicted.len(), "predicted")
    }
}

/// Response carrying a single floating point result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueResponse {
    pub success: bool,
    pub value: Option<f64>,
    pub error: Option<String>,
}

impl ValueResponse {
    pub fn success(value: f64) -> Self {
        Self {
            success: true,
            value: Some(value),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// CART REQUESTS
// =============================================================================

/// Weighted count request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCountRequest {
    pub items: Vec<CartItem>,
}

impl CartCountRequest {
    pub fn validate(&self) -> Result<(), TallyError> {
        check_cart(&self.items)
    }
}

/// Weighted count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCountResponse {
    pub success: bool,
    pub total: Option<u64>,
    pub error: Option<String>,
}

impl CartCountResponse {
    pub fn success(total: u64) -> Self {
        Self {
            success: true,
            total: Some(total),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            total: None,
            error: Some(msg.into()),
        }
    }
}

/// Remove-by-id request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartRemoveRequest {
    pub items: Vec<CartItem>,
    pub id: ItemId,
}

impl CartRemoveRequest {
    pub fn validate(&self) -> Result<(), TallyError> {
        check_cart(&self.items)
    }
}

/// Remove-by-id response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartRemoveResponse {
    pub success: bool,
    pub items: Vec<CartItem>,
    /// How many records were dropped.
    pub removed: usize,
    pub error: Option<String>,
}

impl CartRemoveResponse {
    pub fn success(items: Vec<CartItem>, removed: usize) -> Self {
        Self {
            success: true,
            items,
            removed,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            items: vec![],
            removed: 0,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// USER REQUEST/RESPONSE
// =============================================================================

/// User creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub first_name: String,
    pub last_name: String,
}

impl UserRequest {
    /// Validate name lengths and build a trimmed `User`.
    pub fn to_user(&self) -> Result<User, TallyError> {
        User::validated(&self.first_name, &self.last_name)
    }
}

/// User creation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: Option<User>,
    pub full_name: Option<String>,
    pub error: Option<String>,
}

impl UserResponse {
    pub fn success(user: User) -> Self {
        Self {
            success: true,
            full_name: Some(user.full_name()),
            user: Some(user),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            full_name: None,
            error: Some(msg.into()),
        }
    }
}
