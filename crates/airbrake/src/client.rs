// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Notifier client: builds notices and routes them to a handler or the collector.

use airbrake_core::{Exception, Notice, RawFrame};
use tracing::{debug, info};

use crate::backtrace::{BacktraceCapture, StackCapture};
use crate::configuration::Configuration;
use crate::connection::{Connection, HttpConnection};
use crate::error::Result;

/// Client for reporting errors to an Airbrake-compatible collector.
///
/// The configuration is verified when the client is built; a client that
/// exists can always send. Delivery is synchronous and errors from the handler
/// or the connection are returned as-is.
///
/// # Example
///
/// ```ignore
/// use airbrake::{Client, Configuration, Exception};
///
/// let client = Client::new(
///     Configuration::new("your_api_key")
///         .with_environment_name("staging")
///         .with_app_version(env!("CARGO_PKG_VERSION")),
/// )?;
///
/// // Report a message with the current call stack
/// client.notify_on_error("cache warmup failed", None)?;
///
/// // Report an explicit exception
/// let exception = Exception::new("RuntimeError", "boom").with_location("a.txt", 10);
/// client.notify_on_exception(&exception)?;
/// ```
pub struct Client<C = HttpConnection> {
	configuration: Configuration,
	connection: C,
	stack_capture: Box<dyn StackCapture>,
}

impl Client<HttpConnection> {
	/// Verifies `configuration` and builds a client that posts to its endpoint.
	pub fn new(configuration: Configuration) -> Result<Self> {
		Self::with_connection(configuration, HttpConnection::new)
	}
}

impl<C: Connection> Client<C> {
	/// Verifies `configuration` and builds a client around a custom connection.
	///
	/// `make_connection` is only called once verification has passed.
	pub fn with_connection<F>(configuration: Configuration, make_connection: F) -> Result<Self>
	where
		F: FnOnce(&Configuration) -> Result<C>,
	{
		configuration.verify()?;
		let connection = make_connection(&configuration)?;

		info!(
			endpoint = %configuration.api_endpoint(),
			environment = %configuration.environment_name(),
			handler = configuration.notification_handler().is_some(),
			"Airbrake client initialized"
		);

		Ok(Self {
			configuration,
			connection,
			stack_capture: Box::new(BacktraceCapture),
		})
	}

	/// Replaces the stack capture used when no backtrace is supplied.
	pub fn with_stack_capture<S>(mut self, stack_capture: S) -> Self
	where
		S: StackCapture + 'static,
	{
		self.stack_capture = Box::new(stack_capture);
		self
	}

	pub fn configuration(&self) -> &Configuration {
		&self.configuration
	}

	pub fn connection(&self) -> &C {
		&self.connection
	}

	/// Notify on an error message.
	///
	/// Without a `backtrace` the current call stack is captured, minus this
	/// call's own frame. An explicit empty backtrace is sent as empty.
	pub fn notify_on_error(
		&self,
		message: &str,
		backtrace: Option<Vec<RawFrame>>,
	) -> Result<String> {
		let backtrace = match backtrace {
			Some(frames) => frames,
			None => without_own_frame(self.stack_capture.capture()),
		};

		let notice = Notice::from_message(message, backtrace);
		self.notify(&notice)
	}

	/// Notify on an exception.
	///
	/// The exception's own trace is used when it has one; otherwise the
	/// current call stack is captured.
	pub fn notify_on_exception(&self, exception: &Exception) -> Result<String> {
		let backtrace = match exception.trace() {
			Some(trace) if !trace.is_empty() => trace.to_vec(),
			_ => without_own_frame(self.stack_capture.capture()),
		};

		let notice = Notice::from_exception(exception, backtrace);
		self.notify(&notice)
	}

	/// Notify on a Rust error value, reported at the caller's location.
	///
	/// The current call stack is captured, minus this call's own frame.
	#[track_caller]
	pub fn notify_on_std_error<E>(&self, error: &E) -> Result<String>
	where
		E: std::error::Error + ?Sized,
	{
		let exception = Exception::from_error(error);
		let notice = Notice::from_exception(
			&exception,
			without_own_frame(self.stack_capture.capture()),
		);
		self.notify(&notice)
	}

	/// Notify about the notice.
	///
	/// A configured notification handler receives the notice instead of the
	/// connection.
	pub fn notify(&self, notice: &Notice) -> Result<String> {
		match self.configuration.notification_handler() {
			Some(handler) => {
				debug!(
					error_class = %notice.error_class(),
					frames = notice.backtrace().len(),
					"Dispatching notice to notification handler"
				);
				handler.send_notification(notice)
			}
			None => {
				debug!(
					error_class = %notice.error_class(),
					frames = notice.backtrace().len(),
					"Dispatching notice to connection"
				);
				self.connection.send(notice)
			}
		}
	}
}

/// Drop the frame of the client method that triggered the capture.
fn without_own_frame(mut frames: Vec<RawFrame>) -> Vec<RawFrame> {
	if frames.len() > 1 {
		frames.remove(0);
	}
	frames
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backtrace::ExceptionBacktraceExt;
	use crate::error::{ConfigurationError, NotifierError};
	use proptest::prelude::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::{Arc, Mutex};

	#[derive(Clone, Default)]
	struct RecordingConnection {
		sent: Arc<Mutex<Vec<Notice>>>,
	}

	impl Connection for RecordingConnection {
		fn send(&self, notice: &Notice) -> Result<String> {
			self.sent.lock().unwrap().push(notice.clone());
			Ok("sent".to_string())
		}
	}

	struct FailingConnection;

	impl Connection for FailingConnection {
		fn send(&self, _notice: &Notice) -> Result<String> {
			Err(NotifierError::ServerError {
				status: 503,
				message: "unavailable".to_string(),
			})
		}
	}

	struct FixedStack(Vec<RawFrame>);

	impl StackCapture for FixedStack {
		fn capture(&self) -> Vec<RawFrame> {
			self.0.clone()
		}
	}

	fn stack() -> FixedStack {
		FixedStack(vec![
			RawFrame::new("src/client.rs", 1, "airbrake::client::Client::notify_on_error"),
			RawFrame::new("src/main.rs", 20, "app::run").with_args(["user=alice"]),
			RawFrame::new("src/main.rs", 5, "app::main").with_args(["argv"]),
		])
	}

	fn recording_client(
		config: Configuration,
	) -> (Client<RecordingConnection>, RecordingConnection) {
		let connection = RecordingConnection::default();
		let client = Client::with_connection(config, |_| Ok(connection.clone()))
			.unwrap()
			.with_stack_capture(stack());
		(client, connection)
	}

	#[test]
	fn test_new_requires_api_key() {
		let result = Client::new(Configuration::default());
		assert!(matches!(
			result,
			Err(NotifierError::Configuration(ConfigurationError::MissingApiKey))
		));
	}

	#[test]
	fn test_failed_verification_creates_no_connection() {
		let created = AtomicUsize::new(0);
		let result = Client::with_connection(Configuration::default(), |_| {
			created.fetch_add(1, Ordering::SeqCst);
			Ok(RecordingConnection::default())
		});

		assert!(matches!(result, Err(NotifierError::Configuration(_))));
		assert_eq!(created.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn test_new_success() {
		let client = Client::new(Configuration::new("key_123")).unwrap();
		assert_eq!(client.configuration().api_key(), "key_123");
		assert_eq!(client.connection().endpoint(), crate::DEFAULT_API_ENDPOINT);
	}

	#[test]
	fn test_notify_on_error_drops_own_frame_and_args() {
		let (client, connection) = recording_client(Configuration::new("key_123"));

		assert_eq!(client.notify_on_error("oops", None).unwrap(), "sent");

		let sent = connection.sent.lock().unwrap();
		assert_eq!(sent.len(), 1);
		let notice = &sent[0];
		assert_eq!(notice.error_class(), "Error");
		assert_eq!(notice.error_message(), "oops");
		assert_eq!(notice.backtrace().len(), 2);
		assert_eq!(notice.backtrace()[0].function.as_deref(), Some("app::run"));
		let json = serde_json::to_string(notice).unwrap();
		assert!(!json.contains("args"));
		assert!(!json.contains("user=alice"));
	}

	#[test]
	fn test_notify_on_error_with_empty_backtrace() {
		let (client, connection) = recording_client(Configuration::new("key_123"));

		client.notify_on_error("oops", Some(Vec::new())).unwrap();

		let sent = connection.sent.lock().unwrap();
		assert!(sent[0].backtrace().is_empty());
	}

	#[test]
	fn test_notify_on_error_keeps_single_captured_frame() {
		let connection = RecordingConnection::default();
		let client =
			Client::with_connection(Configuration::new("key_123"), |_| Ok(connection.clone()))
				.unwrap()
				.with_stack_capture(FixedStack(vec![RawFrame::new("src/main.rs", 3, "app::main")]));

		client.notify_on_error("oops", None).unwrap();

		let sent = connection.sent.lock().unwrap();
		assert_eq!(sent[0].backtrace().len(), 1);
	}

	#[test]
	fn test_notify_on_error_with_empty_capture() {
		let connection = RecordingConnection::default();
		let client =
			Client::with_connection(Configuration::new("key_123"), |_| Ok(connection.clone()))
				.unwrap()
				.with_stack_capture(FixedStack(Vec::new()));

		client.notify_on_error("oops", None).unwrap();

		let sent = connection.sent.lock().unwrap();
		assert!(sent[0].backtrace().is_empty());
	}

	#[test]
	fn test_notify_on_exception_formats_notice() {
		let (client, connection) = recording_client(Configuration::new("key_123"));
		let exception = Exception::new("RuntimeError", "boom").with_location("a.txt", 10);

		client.notify_on_exception(&exception).unwrap();

		let sent = connection.sent.lock().unwrap();
		assert_eq!(sent[0].error_class(), "RuntimeError");
		assert_eq!(sent[0].error_message(), "boom in a.txt on line 10");
		assert_eq!(sent[0].backtrace().len(), 2);
	}

	#[test]
	fn test_notify_on_exception_prefers_own_trace() {
		let (client, connection) = recording_client(Configuration::new("key_123"));
		let exception = Exception::new("IoError", "read failed")
			.with_location("src/io.rs", 7)
			.with_trace(vec![
				RawFrame::new("src/io.rs", 7, "app::io::read").with_args(["fd=3"]),
			]);

		client.notify_on_exception(&exception).unwrap();

		let sent = connection.sent.lock().unwrap();
		assert_eq!(sent[0].backtrace().len(), 1);
		assert_eq!(sent[0].backtrace()[0].function.as_deref(), Some("app::io::read"));
		assert!(!serde_json::to_string(&sent[0]).unwrap().contains("fd=3"));
	}

	#[test]
	fn test_notify_on_exception_falls_back_on_empty_trace() {
		let (client, connection) = recording_client(Configuration::new("key_123"));
		let exception = Exception::new("IoError", "read failed").with_trace(Vec::new());

		client.notify_on_exception(&exception).unwrap();

		let sent = connection.sent.lock().unwrap();
		assert_eq!(sent[0].backtrace()[0].function.as_deref(), Some("app::run"));
	}

	#[test]
	fn test_notify_on_std_error_reports_type_and_call_site() {
		let (client, connection) = recording_client(Configuration::new("key_123"));
		let error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing config");

		client.notify_on_std_error(&error).unwrap();

		let sent = connection.sent.lock().unwrap();
		assert_eq!(sent[0].error_class(), "std::io::error::Error");
		assert!(sent[0].error_message().starts_with("missing config in "));
		assert!(sent[0].error_message().contains("client.rs"));
	}

	#[test]
	fn test_handler_replaces_connection() {
		let calls = Arc::new(AtomicUsize::new(0));
		let handler_calls = Arc::clone(&calls);
		let config = Configuration::new("key_123").with_notification_handler(
			move |notice: &Notice| -> Result<String> {
				handler_calls.fetch_add(1, Ordering::SeqCst);
				Ok(format!("handled {}", notice.error_message()))
			},
		);
		let (client, connection) = recording_client(config);

		let result = client.notify_on_error("oops", Some(Vec::new())).unwrap();

		assert_eq!(result, "handled oops");
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert!(connection.sent.lock().unwrap().is_empty());
	}

	#[test]
	fn test_notify_sends_same_notice_once() {
		let (client, connection) = recording_client(Configuration::new("key_123"));
		let notice = Notice::from_message("direct", vec![RawFrame::new("a.rs", 1, "a")]);

		client.notify(&notice).unwrap();

		let sent = connection.sent.lock().unwrap();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0], notice);
	}

	#[test]
	fn test_handler_error_propagates() {
		let config = Configuration::new("key_123").with_notification_handler(
			|_: &Notice| -> Result<String> { Err(NotifierError::handler("queue full")) },
		);
		let (client, _) = recording_client(config);

		let err = client.notify_on_error("oops", Some(Vec::new())).unwrap_err();
		assert_eq!(err.to_string(), "notification handler failed: queue full");
	}

	#[test]
	fn test_connection_error_propagates() {
		let client =
			Client::with_connection(Configuration::new("key_123"), |_| Ok(FailingConnection))
				.unwrap();

		let err = client.notify_on_error("oops", Some(Vec::new())).unwrap_err();
		assert!(matches!(err, NotifierError::ServerError { status: 503, .. }));
	}

	fn capturing_client() -> (Client<RecordingConnection>, RecordingConnection) {
		let connection = RecordingConnection::default();
		let client =
			Client::with_connection(Configuration::new("key_123"), |_| Ok(connection.clone()))
				.unwrap();
		(client, connection)
	}

	fn top_function(connection: &RecordingConnection) -> String {
		let sent = connection.sent.lock().unwrap();
		sent[0].backtrace()[0]
			.function
			.clone()
			.expect("top frame should be symbolized")
	}

	#[inline(never)]
	fn report_error_from_here(client: &Client<RecordingConnection>) {
		client.notify_on_error("oops", None).unwrap();
	}

	#[inline(never)]
	fn report_std_error_from_here(client: &Client<RecordingConnection>) {
		let error = std::io::Error::other("disk full");
		client.notify_on_std_error(&error).unwrap();
	}

	#[inline(never)]
	fn raise_with_std_trace() -> Exception {
		Exception::new("RuntimeError", "boom")
			.with_std_backtrace(&std::backtrace::Backtrace::force_capture())
	}

	#[test]
	fn test_captured_stack_starts_at_caller() {
		let (client, connection) = capturing_client();

		report_error_from_here(&client);

		let top = top_function(&connection);
		assert!(
			top.ends_with("tests::report_error_from_here"),
			"unexpected top frame: {top}"
		);
	}

	#[test]
	fn test_std_error_stack_starts_at_caller() {
		let (client, connection) = capturing_client();

		report_std_error_from_here(&client);

		let top = top_function(&connection);
		assert!(
			top.ends_with("tests::report_std_error_from_here"),
			"unexpected top frame: {top}"
		);
	}

	#[test]
	fn test_exception_keeps_std_trace() {
		let (client, connection) = recording_client(Configuration::new("key_123"));

		client.notify_on_exception(&raise_with_std_trace()).unwrap();

		let top = top_function(&connection);
		assert!(
			top.ends_with("tests::raise_with_std_trace"),
			"unexpected top frame: {top}"
		);
		let sent = connection.sent.lock().unwrap();
		assert!(sent[0]
			.backtrace()
			.iter()
			.all(|frame| frame.function.as_deref() != Some("app::run")));
	}

	proptest! {
		#[test]
		fn notices_never_carry_frame_args(
			frames in proptest::collection::vec(
				("[a-z_]{1,12}", 1u32..5000, proptest::collection::vec("secret=[a-z0-9]{1,10}", 1..4)),
				0..6,
			)
		) {
			let raw: Vec<RawFrame> = frames
				.into_iter()
				.map(|(function, line, args)| {
					RawFrame::new("src/lib.rs", line, format!("app::{function}")).with_args(args)
				})
				.collect();
			let (client, connection) = recording_client(Configuration::new("key_123"));

			client.notify_on_error("oops", Some(raw.clone())).unwrap();
			client
				.notify_on_exception(&Exception::new("E", "m").with_trace(raw.clone()))
				.unwrap();

			let sent = connection.sent.lock().unwrap();
			prop_assert_eq!(sent.len(), 2);
			prop_assert_eq!(sent[0].backtrace().len(), raw.len());
			// An empty trace on the exception falls back to the captured stack.
			prop_assert_eq!(sent[1].backtrace().len(), if raw.is_empty() { 2 } else { raw.len() });
			for notice in sent.iter() {
				let json = serde_json::to_string(notice).unwrap();
				prop_assert!(!json.contains("\"args\""));
				for frame in &raw {
					for arg in &frame.args {
						let quoted = format!("\"{arg}\"");
						prop_assert!(!json.contains(&quoted));
					}
				}
			}
		}
	}
}
