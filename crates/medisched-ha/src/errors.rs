// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use thiserror::Error;

pub type HaResult<T> = Result<T, HaError>;

/// Errors from the Home Assistant REST surface
#[derive(Debug, Error)]
pub enum HaError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Authentication failed (check token)")]
    AuthenticationFailed,

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Service call '{service}' failed: {reason}")]
    ServiceCallFailed { service: String, reason: String },

    #[error("Unexpected response payload: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
