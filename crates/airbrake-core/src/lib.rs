// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Airbrake notifier.
//!
//! This crate holds the data that flows from the application into the
//! notifier and out to a collector or a local handler. It performs no I/O and
//! is shared by the SDK crate (`airbrake`) and by anything that wants to
//! inspect notices, such as custom notification handlers or test doubles.
//!
//! # Overview
//!
//! - [`Notice`]: a normalized error record, ready for transmission
//! - [`Frame`]: one backtrace entry as it appears in a notice
//! - [`RawFrame`]: a captured or caller-supplied frame that may still carry
//!   argument values; converting it into a [`Frame`] drops them
//! - [`Exception`]: an explicit error value with type name, message, source
//!   location and an optional pre-captured trace

pub mod exception;
pub mod frame;
pub mod notice;

pub use exception::{Exception, SourceLocation};
pub use frame::{strip_args, Frame, RawFrame};
pub use notice::Notice;

/// Error class used for notices built from a bare message.
pub const ERROR_CLASS: &str = "Error";
