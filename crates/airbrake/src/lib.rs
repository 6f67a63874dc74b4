// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Airbrake notifier for Rust applications.
//!
//! Errors are normalized into [`Notice`]s and delivered either to a local
//! [`NotificationHandler`] or, by default, over HTTP to an Airbrake-compatible
//! collector. Delivery is synchronous; nothing is queued, batched or retried.
//!
//! # Example
//!
//! ```ignore
//! use airbrake::{Client, Configuration};
//!
//! let client = Client::new(Configuration::new("your_api_key"))?;
//!
//! if let Err(e) = load_settings() {
//!     client.notify_on_std_error(&e)?;
//! }
//! ```

mod backtrace;
mod client;
mod configuration;
mod connection;
mod error;
mod handler;

pub use crate::backtrace::{
	parse_backtrace, BacktraceCapture, ExceptionBacktraceExt, StackCapture,
};
pub use client::Client;
pub use configuration::{
	Configuration, DEFAULT_API_ENDPOINT, DEFAULT_ENVIRONMENT, DEFAULT_REQUEST_TIMEOUT,
};
pub use connection::{
	Connection, HttpConnection, API_KEY_HEADER, NOTIFIER_NAME, NOTIFIER_URL, NOTIFIER_VERSION,
};
pub use error::{ConfigurationError, NotifierError, Result};
pub use handler::{NotificationHandler, SharedNotificationHandler};

// Re-export core types for convenience
pub use airbrake_core::{Exception, Frame, Notice, RawFrame, SourceLocation};
