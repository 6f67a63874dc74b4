// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the Airbrake notifier.
//!
//! This crate provides a pre-configured blocking HTTP client with a
//! consistent User-Agent header.

mod client;

pub use client::{blocking_builder, user_agent};
