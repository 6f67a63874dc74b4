// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the notifier.

use thiserror::Error;

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, NotifierError>;

/// Reasons a [`Configuration`](crate::Configuration) fails verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
	#[error("API key is required")]
	MissingApiKey,

	#[error("invalid API key format")]
	InvalidApiKey,

	#[error("API endpoint is required")]
	MissingEndpoint,

	#[error("invalid API endpoint: {0}")]
	InvalidEndpoint(String),

	#[error("environment name is required")]
	MissingEnvironment,
}

/// Errors that can occur while building a client or delivering a notice.
#[derive(Debug, Error)]
pub enum NotifierError {
	/// Configuration failed verification.
	#[error("configuration error: {0}")]
	Configuration(#[from] ConfigurationError),

	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Collector returned a non-success status.
	#[error("server error (status {status}): {message}")]
	ServerError {
		/// HTTP status code.
		status: u16,
		/// Response body from the collector.
		message: String,
	},

	/// Failed to serialize the notice.
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	/// A notification handler reported a failure.
	#[error("notification handler failed: {0}")]
	Handler(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
	/// Wraps an error raised by a notification handler.
	pub fn handler<E>(error: E) -> Self
	where
		E: Into<Box<dyn std::error::Error + Send + Sync>>,
	{
		Self::Handler(error.into())
	}
}
