// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Backtrace frame types.

use serde::{Deserialize, Serialize};

/// A frame as produced by stack capture or handed in by a caller.
///
/// `args` holds stringified argument values when the source of the frame had
/// them. They are never forwarded: the only way into a [`Notice`](crate::Notice)
/// is through [`Frame`], which has no place to put them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
	pub file: Option<String>,
	pub line: Option<u32>,
	pub column: Option<u32>,
	pub function: Option<String>,
	pub args: Vec<String>,
}

impl RawFrame {
	/// Creates a frame pointing at `file:line` inside `function`.
	pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
		Self {
			file: Some(file.into()),
			line: Some(line),
			column: None,
			function: Some(function.into()),
			args: Vec::new(),
		}
	}

	/// Attaches argument values to the frame.
	pub fn with_args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.args = args.into_iter().map(Into::into).collect();
		self
	}
}

/// A backtrace entry in a notice: location and function, never arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub line: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub column: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub function: Option<String>,
}

impl From<RawFrame> for Frame {
	fn from(raw: RawFrame) -> Self {
		let RawFrame {
			file,
			line,
			column,
			function,
			args: _,
		} = raw;
		Self {
			file,
			line,
			column,
			function,
		}
	}
}

/// Converts raw frames into notice frames, discarding argument values.
pub fn strip_args<I>(frames: I) -> Vec<Frame>
where
	I: IntoIterator<Item = RawFrame>,
{
	frames.into_iter().map(Frame::from).collect()
}
