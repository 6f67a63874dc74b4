// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The notice record handed to a handler or a connection.

use serde::{Deserialize, Serialize};

use crate::exception::Exception;
use crate::frame::{strip_args, Frame, RawFrame};
use crate::ERROR_CLASS;

/// A normalized error record.
///
/// Notices are built once per report and are read-only afterwards. Frames are
/// always converted from [`RawFrame`] on the way in, so a notice never holds
/// argument values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
	error_class: String,
	error_message: String,
	backtrace: Vec<Frame>,
}

impl Notice {
	/// Builds a notice from its parts.
	pub fn new<I>(
		error_class: impl Into<String>,
		error_message: impl Into<String>,
		backtrace: I,
	) -> Self
	where
		I: IntoIterator<Item = RawFrame>,
	{
		Self {
			error_class: error_class.into(),
			error_message: error_message.into(),
			backtrace: strip_args(backtrace),
		}
	}

	/// Builds a notice for a plain error message.
	pub fn from_message<I>(message: impl Into<String>, backtrace: I) -> Self
	where
		I: IntoIterator<Item = RawFrame>,
	{
		Self::new(ERROR_CLASS, message, backtrace)
	}

	/// Builds a notice for an exception using the given frames.
	///
	/// Frame selection is the caller's job; the exception's own trace is not
	/// consulted here.
	pub fn from_exception<I>(exception: &Exception, backtrace: I) -> Self
	where
		I: IntoIterator<Item = RawFrame>,
	{
		Self::new(exception.type_name(), exception.error_message(), backtrace)
	}

	pub fn error_class(&self) -> &str {
		&self.error_class
	}

	pub fn error_message(&self) -> &str {
		&self.error_message
	}

	pub fn backtrace(&self) -> &[Frame] {
		&self.backtrace
	}
}
