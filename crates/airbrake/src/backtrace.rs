// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack capture and backtrace parsing.

use airbrake_core::{Exception, RawFrame};
use rustc_demangle::demangle;

/// Function prefixes belonging to the capture machinery itself.
const CAPTURE_PREFIXES: &[&str] = &[
	"backtrace::",
	"<backtrace::",
	"airbrake::backtrace::",
	"<airbrake::backtrace::",
];

/// Function prefixes of std's own backtrace capture.
const STD_CAPTURE_PREFIXES: &[&str] = &["std::backtrace", "<std::backtrace"];

/// Captures the current call stack.
///
/// Implementations return frames innermost first, starting at the frame that
/// called [`StackCapture::capture`]; frames of the capture machinery are not
/// included. Capture never fails: when the stack cannot be walked or
/// resolved, fewer frames (possibly none) are returned.
pub trait StackCapture: Send + Sync {
	fn capture(&self) -> Vec<RawFrame>;
}

/// Stack capture backed by the `backtrace` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCapture;

impl StackCapture for BacktraceCapture {
	fn capture(&self) -> Vec<RawFrame> {
		let backtrace = ::backtrace::Backtrace::new();
		backtrace
			.frames()
			.iter()
			.flat_map(|frame| frame.symbols())
			.map(|symbol| RawFrame {
				file: symbol.filename().map(|path| path.display().to_string()),
				line: symbol.lineno(),
				column: symbol.colno(),
				function: symbol.name().map(|name| format!("{name:#}")),
				args: Vec::new(),
			})
			.skip_while(is_capture_frame)
			.collect()
	}
}

fn is_capture_frame(frame: &RawFrame) -> bool {
	frame
		.function
		.as_deref()
		.is_some_and(|function| CAPTURE_PREFIXES.iter().any(|p| function.starts_with(p)))
}

/// Parse a std backtrace into frames, innermost first.
///
/// Frames of std's capture machinery are skipped, so the first frame is the
/// function that captured the backtrace. A disabled or unsupported backtrace
/// yields no frames.
pub fn parse_backtrace(backtrace: &std::backtrace::Backtrace) -> Vec<RawFrame> {
	parse_backtrace_string(&format!("{backtrace:#}"))
		.into_iter()
		.skip_while(|frame| {
			frame.function.as_deref().is_some_and(|function| {
				STD_CAPTURE_PREFIXES.iter().any(|p| function.starts_with(p))
			})
		})
		.collect()
}

/// Attaching a std backtrace to an [`Exception`].
pub trait ExceptionBacktraceExt {
	/// Uses the frames of `backtrace` as the exception's own trace.
	fn with_std_backtrace(self, backtrace: &std::backtrace::Backtrace) -> Self;
}

impl ExceptionBacktraceExt for Exception {
	fn with_std_backtrace(self, backtrace: &std::backtrace::Backtrace) -> Self {
		self.with_trace(parse_backtrace(backtrace))
	}
}

/// Parse the full rendering of a std backtrace:
///
/// ```text
///    0: 0x55d0c3a1b2c4 - my_app[3f9c1e2d4b5a6978]::handlers::process::h0123456789abcdef
///              at ./src/handlers.rs:12:5
///    1: my_app::main
/// ```
fn parse_backtrace_string(bt_string: &str) -> Vec<RawFrame> {
	let mut frames: Vec<RawFrame> = Vec::new();

	for line in bt_string.lines() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		if let Some(location) = line.strip_prefix("at ") {
			if let Some(frame) = frames.last_mut() {
				apply_location(frame, location);
			}
			continue;
		}

		if let Some(function) = parse_function_line(line) {
			frames.push(RawFrame {
				function: Some(function),
				..Default::default()
			});
		}
	}

	frames
}

/// Parse a `N: function` line, returning the demangled function name.
fn parse_function_line(line: &str) -> Option<String> {
	let (index, function) = line.split_once(':')?;
	index.trim().parse::<u32>().ok()?;

	let function = function.trim();
	let function = match function.split_once(" - ") {
		Some((address, rest)) if address.starts_with("0x") => rest.trim(),
		_ => function,
	};
	if function.is_empty() {
		return None;
	}

	let demangled = format!("{:#}", demangle(function));
	Some(strip_disambiguators(strip_hash(&demangled)))
}

/// Remove `[0123abcd...]` crate disambiguators from a demangled path.
fn strip_disambiguators(function: &str) -> String {
	let mut cleaned = String::with_capacity(function.len());
	let mut rest = function;

	while let Some(start) = rest.find('[') {
		let after = &rest[start + 1..];
		match after.find(']') {
			Some(end)
				if end >= 8 && after[..end].chars().all(|c| c.is_ascii_hexdigit()) =>
			{
				cleaned.push_str(&rest[..start]);
				rest = &after[end + 1..];
			}
			_ => {
				cleaned.push_str(&rest[..=start]);
				rest = after;
			}
		}
	}

	cleaned.push_str(rest);
	cleaned
}

/// Fill in `file:line:col` from an `at` line.
fn apply_location(frame: &mut RawFrame, location: &str) {
	let mut parts = location.rsplitn(3, ':');
	let last = parts.next();
	let middle = parts.next();
	let rest = parts.next();

	match (rest, middle, last) {
		(Some(file), Some(line), Some(col)) if line.parse::<u32>().is_ok() => {
			frame.file = Some(file.to_string());
			frame.line = line.parse().ok();
			frame.column = col.parse().ok();
		}
		(_, Some(file), Some(line)) if line.parse::<u32>().is_ok() => {
			let file = match rest {
				Some(rest) => format!("{rest}:{file}"),
				None => file.to_string(),
			};
			frame.file = Some(file);
			frame.line = line.parse().ok();
		}
		_ => frame.file = Some(location.to_string()),
	}
}

/// Remove a trailing `::h<16 hex digits>` symbol hash.
fn strip_hash(function: &str) -> &str {
	match function.rsplit_once("::") {
		Some((path, hash))
			if hash.len() == 17
				&& hash.starts_with('h')
				&& hash[1..].chars().all(|c| c.is_ascii_hexdigit()) =>
		{
			path
		}
		_ => function,
	}
}
