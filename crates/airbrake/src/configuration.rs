// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Notifier configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;

use crate::error::{ConfigurationError, Result};
use crate::handler::{NotificationHandler, SharedNotificationHandler};

/// Collector endpoint used when none is configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.airbrake.io/notifier_api/v2/notices";
/// Environment reported when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "production";
/// Timeout for requests to the collector.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

const REDACTED: &str = "[REDACTED]";

/// Settings for a [`Client`](crate::Client).
///
/// A configuration is checked once, by [`Configuration::verify`], when the
/// client is built. Nothing is validated by the setters.
#[derive(Clone)]
pub struct Configuration {
	api_key: String,
	api_endpoint: String,
	environment_name: String,
	app_version: Option<String>,
	project_root: Option<String>,
	server_name: Option<String>,
	url: Option<String>,
	component: Option<String>,
	action: Option<String>,
	request_timeout: Duration,
	notification_handler: Option<SharedNotificationHandler>,
}

impl Default for Configuration {
	fn default() -> Self {
		Self {
			api_key: String::new(),
			api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
			environment_name: DEFAULT_ENVIRONMENT.to_string(),
			app_version: None,
			project_root: None,
			server_name: None,
			url: None,
			component: None,
			action: None,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			notification_handler: None,
		}
	}
}

impl Configuration {
	/// Creates a configuration with the given API key and default settings.
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			..Default::default()
		}
	}

	pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = api_key.into();
		self
	}

	/// Sets the collector URL notices are posted to.
	pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.api_endpoint = endpoint.into();
		self
	}

	/// Sets the environment name.
	///
	/// Example: `production`, `staging`, `development`
	pub fn with_environment_name(mut self, name: impl Into<String>) -> Self {
		self.environment_name = name.into();
		self
	}

	pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
		self.app_version = Some(version.into());
		self
	}

	pub fn with_project_root(mut self, root: impl Into<String>) -> Self {
		self.project_root = Some(root.into());
		self
	}

	pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
		self.server_name = Some(name.into());
		self
	}

	/// Sets the request URL reported with every notice.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	pub fn with_component(mut self, component: impl Into<String>) -> Self {
		self.component = Some(component.into());
		self
	}

	pub fn with_action(mut self, action: impl Into<String>) -> Self {
		self.action = Some(action.into());
		self
	}

	/// Sets the HTTP request timeout.
	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Routes notices to `handler` instead of the collector.
	pub fn with_notification_handler<H>(mut self, handler: H) -> Self
	where
		H: NotificationHandler + 'static,
	{
		self.notification_handler = Some(Arc::new(handler));
		self
	}

	/// Routes notices to an already shared handler.
	pub fn with_shared_notification_handler(mut self, handler: SharedNotificationHandler) -> Self {
		self.notification_handler = Some(handler);
		self
	}

	/// Checks that the mandatory settings are present and well formed.
	pub fn verify(&self) -> Result<()> {
		let api_key = self.api_key.trim();
		if api_key.is_empty() {
			return Err(ConfigurationError::MissingApiKey.into());
		}
		if api_key.len() != self.api_key.len()
			|| self.api_key.chars().any(|c| c.is_whitespace() || c.is_control())
		{
			return Err(ConfigurationError::InvalidApiKey.into());
		}

		if self.api_endpoint.trim().is_empty() {
			return Err(ConfigurationError::MissingEndpoint.into());
		}
		let endpoint = Url::parse(&self.api_endpoint)
			.map_err(|e| ConfigurationError::InvalidEndpoint(e.to_string()))?;
		if !matches!(endpoint.scheme(), "http" | "https") || endpoint.host_str().is_none() {
			return Err(ConfigurationError::InvalidEndpoint(format!(
				"unsupported URL: {}",
				self.api_endpoint
			))
			.into());
		}

		if self.environment_name.trim().is_empty() {
			return Err(ConfigurationError::MissingEnvironment.into());
		}

		Ok(())
	}

	pub fn api_key(&self) -> &str {
		&self.api_key
	}

	pub fn api_endpoint(&self) -> &str {
		&self.api_endpoint
	}

	pub fn environment_name(&self) -> &str {
		&self.environment_name
	}

	pub fn app_version(&self) -> Option<&str> {
		self.app_version.as_deref()
	}

	pub fn project_root(&self) -> Option<&str> {
		self.project_root.as_deref()
	}

	pub fn server_name(&self) -> Option<&str> {
		self.server_name.as_deref()
	}

	pub fn url(&self) -> Option<&str> {
		self.url.as_deref()
	}

	pub fn component(&self) -> Option<&str> {
		self.component.as_deref()
	}

	pub fn action(&self) -> Option<&str> {
		self.action.as_deref()
	}

	pub fn request_timeout(&self) -> Duration {
		self.request_timeout
	}

	pub fn notification_handler(&self) -> Option<&SharedNotificationHandler> {
		self.notification_handler.as_ref()
	}
}

impl fmt::Debug for Configuration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Configuration")
			.field("api_key", &REDACTED)
			.field("api_endpoint", &self.api_endpoint)
			.field("environment_name", &self.environment_name)
			.field("app_version", &self.app_version)
			.field("project_root", &self.project_root)
			.field("server_name", &self.server_name)
			.field("url", &self.url)
			.field("component", &self.component)
			.field("action", &self.action)
			.field("request_timeout", &self.request_timeout)
			.field("notification_handler", &self.notification_handler.is_some())
			.finish()
	}
}
