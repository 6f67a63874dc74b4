// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Delivery of notices to the collector.

use airbrake_core::{Frame, Notice};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, error};

use crate::configuration::Configuration;
use crate::error::{NotifierError, Result};

/// Notifier name reported to the collector.
pub const NOTIFIER_NAME: &str = "airbrake-rust";
/// Notifier version reported to the collector.
pub const NOTIFIER_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Notifier homepage reported to the collector.
pub const NOTIFIER_URL: &str = "https://github.com/airbrake/airbrake-rust";

/// Header carrying the project API key.
pub const API_KEY_HEADER: &str = "X-Airbrake-Token";

/// Sends serialized notices somewhere and reports the outcome.
///
/// Implementations are used from whatever threads call the client; they must
/// be thread-safe for the client to be shared.
pub trait Connection {
	fn send(&self, notice: &Notice) -> Result<String>;
}

/// Blocking HTTP connection to an Airbrake-compatible collector.
pub struct HttpConnection {
	http_client: Client,
	endpoint: String,
	api_key: String,
	context: NoticeContext,
}

impl HttpConnection {
	/// Creates a connection for a verified configuration.
	pub fn new(configuration: &Configuration) -> Result<Self> {
		let http_client = airbrake_common_http::blocking_builder()
			.timeout(configuration.request_timeout())
			.build()
			.map_err(NotifierError::RequestFailed)?;

		Ok(Self {
			http_client,
			endpoint: configuration.api_endpoint().to_string(),
			api_key: configuration.api_key().to_string(),
			context: NoticeContext::from_configuration(configuration),
		})
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	fn payload<'a>(&'a self, notice: &'a Notice) -> NoticePayload<'a> {
		NoticePayload {
			api_key: &self.api_key,
			notifier: NotifierInfo {
				name: NOTIFIER_NAME,
				version: NOTIFIER_VERSION,
				url: NOTIFIER_URL,
			},
			error: ErrorPayload {
				class: notice.error_class(),
				message: notice.error_message(),
				backtrace: notice.backtrace(),
			},
			request: self.context.request.as_ref(),
			server_environment: &self.context.server_environment,
		}
	}
}

impl Connection for HttpConnection {
	fn send(&self, notice: &Notice) -> Result<String> {
		let body = serde_json::to_vec(&self.payload(notice))?;

		debug!(
			endpoint = %self.endpoint,
			error_class = %notice.error_class(),
			"Sending notice"
		);

		let response = self
			.http_client
			.post(&self.endpoint)
			.header(CONTENT_TYPE, "application/json")
			.header(ACCEPT, "application/json")
			.header(API_KEY_HEADER, &self.api_key)
			.body(body)
			.send()?;

		let status = response.status();
		let text = response.text()?;

		if status.is_success() {
			debug!(status = status.as_u16(), "Notice delivered");
			Ok(text)
		} else {
			let status = status.as_u16();
			error!(status, message = %text, "Collector rejected notice");
			Err(NotifierError::ServerError {
				status,
				message: text,
			})
		}
	}
}

/// Per-configuration data attached to every notice.
#[derive(Debug)]
struct NoticeContext {
	request: Option<RequestInfo>,
	server_environment: ServerEnvironment,
}

impl NoticeContext {
	fn from_configuration(configuration: &Configuration) -> Self {
		let request = configuration.url().map(|url| RequestInfo {
			url: url.to_string(),
			component: configuration.component().map(str::to_string),
			action: configuration.action().map(str::to_string),
		});

		Self {
			request,
			server_environment: ServerEnvironment {
				environment_name: configuration.environment_name().to_string(),
				project_root: configuration.project_root().map(str::to_string),
				app_version: configuration.app_version().map(str::to_string),
				hostname: configuration.server_name().map(str::to_string),
			},
		}
	}
}

/// Request payload for the notices endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NoticePayload<'a> {
	api_key: &'a str,
	notifier: NotifierInfo,
	error: ErrorPayload<'a>,
	#[serde(skip_serializing_if = "Option::is_none")]
	request: Option<&'a RequestInfo>,
	server_environment: &'a ServerEnvironment,
}

#[derive(Debug, Serialize)]
struct NotifierInfo {
	name: &'static str,
	version: &'static str,
	url: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorPayload<'a> {
	class: &'a str,
	message: &'a str,
	backtrace: &'a [Frame],
}

#[derive(Debug, Serialize)]
struct RequestInfo {
	url: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	component: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	action: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerEnvironment {
	environment_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	project_root: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	app_version: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	hostname: Option<String>,
}
