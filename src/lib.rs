//! Storefront Discount-Code Engine
//!
//! Generation, validation, and single-use redemption of percentage
//! discount codes, plus proportional application of a validated
//! discount to a cart.
//!
//! ## Features
//! - Unique, caller-chosen codes with expiry and usage limits
//! - Lazy on-read deactivation of expired/exhausted codes
//! - Race-free redemption via an atomic conditional increment
//! - Proportional per-item discount distribution for checkout

use thiserror::Error;

pub mod domain;
pub mod http;
pub mod service;
pub mod store;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum DiscountError {
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("Discount code already exists")]
    CodeAlreadyExists,

    #[error("Discount code not found")]
    CodeNotFound,

    #[error("Discount code has expired")]
    CodeExpired,

    #[error("Discount code is not active")]
    CodeInactive,

    #[error("Discount code has reached its usage limit")]
    UsageLimitReached,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DiscountError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DiscountError>;
