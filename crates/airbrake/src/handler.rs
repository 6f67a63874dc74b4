// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local notification handlers.
//!
//! A [`NotificationHandler`] set on the [`Configuration`](crate::Configuration)
//! receives every notice instead of the HTTP connection. Use it to route
//! notices into an existing logging pipeline, or to capture them in tests.
//!
//! # Example
//!
//! ```ignore
//! use airbrake::{Client, Configuration, Notice};
//!
//! let config = Configuration::new("api_key")
//!     .with_notification_handler(|notice: &Notice| -> airbrake::Result<String> {
//!         eprintln!("{}: {}", notice.error_class(), notice.error_message());
//!         Ok("logged".to_string())
//!     });
//! let client = Client::new(config)?;
//! ```

use std::sync::Arc;

use airbrake_core::Notice;

use crate::error::Result;

/// Receives notices in place of the network connection.
pub trait NotificationHandler: Send + Sync {
	/// Handles one notice and returns the result reported to the caller.
	fn send_notification(&self, notice: &Notice) -> Result<String>;
}

impl<F> NotificationHandler for F
where
	F: Fn(&Notice) -> Result<String> + Send + Sync,
{
	fn send_notification(&self, notice: &Notice) -> Result<String> {
		self(notice)
	}
}

/// A shared handler reference as stored in the configuration.
pub type SharedNotificationHandler = Arc<dyn NotificationHandler>;
