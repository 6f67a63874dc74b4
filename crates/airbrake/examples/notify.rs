// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: Report errors using the airbrake notifier.
//!
//! Run with:
//!   AIRBRAKE_API_KEY=xxx cargo run --example notify -p airbrake
//!
//! Without `AIRBRAKE_API_KEY` the notices are printed by a local handler
//! instead of being sent.

use airbrake::{Client, Configuration, Exception, Notice};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("airbrake=debug")),
		)
		.init();

	let api_key = std::env::var("AIRBRAKE_API_KEY").ok();
	let endpoint = std::env::var("AIRBRAKE_ENDPOINT")
		.unwrap_or_else(|_| airbrake::DEFAULT_API_ENDPOINT.to_string());

	let mut config = Configuration::new(api_key.clone().unwrap_or_else(|| "local".to_string()))
		.with_api_endpoint(&endpoint)
		.with_environment_name("development")
		.with_app_version("0.1.0-example")
		.with_server_name("example-host");

	if api_key.is_none() {
		println!("AIRBRAKE_API_KEY not set, printing notices locally");
		config = config.with_notification_handler(|notice: &Notice| -> airbrake::Result<String> {
			println!("{}", serde_json::to_string_pretty(notice)?);
			Ok("printed".to_string())
		});
	}

	let client = Client::new(config)?;

	println!("\nReporting an error message...");
	let result = client.notify_on_error("Example error from the airbrake notifier", None)?;
	println!("  Result: {}", result);

	println!("\nReporting an exception...");
	let exception = Exception::new("RuntimeError", "boom").with_location(file!(), line!());
	let result = client.notify_on_exception(&exception)?;
	println!("  Result: {}", result);

	println!("\nReporting a std error...");
	if let Err(e) = std::fs::read_to_string("/nonexistent/settings.toml") {
		let result = client.notify_on_std_error(&e)?;
		println!("  Result: {}", result);
	}

	Ok(())
}
