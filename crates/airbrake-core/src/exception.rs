// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Explicit exception values.

use std::fmt;
use std::panic::Location;

use crate::frame::RawFrame;

/// Where an exception was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
	pub file: String,
	pub line: u32,
}

impl SourceLocation {
	pub fn new(file: impl Into<String>, line: u32) -> Self {
		Self {
			file: file.into(),
			line,
		}
	}
}

impl From<&Location<'_>> for SourceLocation {
	fn from(location: &Location<'_>) -> Self {
		Self::new(location.file(), location.line())
	}
}

impl fmt::Display for SourceLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} on line {}", self.file, self.line)
	}
}

/// An error to report, described explicitly by the caller.
///
/// # Example
///
/// ```
/// use airbrake_core::Exception;
///
/// let exception = Exception::new("RuntimeError", "boom").with_location("a.txt", 10);
/// assert_eq!(exception.error_message(), "boom in a.txt on line 10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
	type_name: String,
	message: String,
	location: Option<SourceLocation>,
	trace: Option<Vec<RawFrame>>,
}

impl Exception {
	pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			message: message.into(),
			location: None,
			trace: None,
		}
	}

	/// Describes a Rust error value.
	///
	/// The type name is the error's concrete type and the location is the
	/// call site of this function.
	#[track_caller]
	pub fn from_error<E>(error: &E) -> Self
	where
		E: std::error::Error + ?Sized,
	{
		Self {
			type_name: std::any::type_name_of_val(error).to_string(),
			message: error.to_string(),
			location: Some(Location::caller().into()),
			trace: None,
		}
	}

	pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
		self.location = Some(SourceLocation::new(file, line));
		self
	}

	/// Attaches a trace captured when the exception was raised.
	pub fn with_trace(mut self, frames: Vec<RawFrame>) -> Self {
		self.trace = Some(frames);
		self
	}

	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn location(&self) -> Option<&SourceLocation> {
		self.location.as_ref()
	}

	pub fn trace(&self) -> Option<&[RawFrame]> {
		self.trace.as_deref()
	}

	/// Message as reported in a notice: `"{message} in {file} on line {line}"`.
	pub fn error_message(&self) -> String {
		match &self.location {
			Some(location) => format!("{} in {}", self.message, location),
			None => self.message.clone(),
		}
	}
}
