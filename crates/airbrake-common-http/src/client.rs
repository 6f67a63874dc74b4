// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared blocking HTTP client with consistent User-Agent header.

use reqwest::blocking::{Client, ClientBuilder};

/// Creates a new blocking HTTP client builder with the standard User-Agent header.
///
/// # Example
/// ```ignore
/// let client = airbrake_common_http::blocking_builder()
///     .timeout(Duration::from_secs(2))
///     .build()?;
/// ```
pub fn blocking_builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the standard notifier User-Agent string.
///
/// Format: `airbrake-rust/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"airbrake-rust/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
