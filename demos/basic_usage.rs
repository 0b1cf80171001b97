//! Basic logger usage example
//!
//! Demonstrates the standard three-sink logger, every level, and the kinds
//! of payload it understands.
//!
//! Run with: cargo run --example basic_usage

use prefix_logger::prelude::*;
use prefix_logger::{info, warn};

#[derive(Debug)]
struct ConfigMissing;

impl std::fmt::Display for ConfigMissing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config file not found")
    }
}

impl std::error::Error for ConfigMissing {}

fn main() -> Result<()> {
    println!("=== Prefix Logger - Basic Usage Example ===\n");

    // Console plus logs/demo.<date>.log and logs/demo.<date>.error.log
    let logger = Logger::new("demo", "[basic]")?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Structured payloads:");
    logger.info(Value::object([
        ("user", Value::from("alice")),
        ("roles", Value::list(["admin", "ops"])),
        ("session", Value::object([("meta", Value::object([("ttl", 300)]))])),
    ]));
    logger.info(serde_json::json!({ "message": "objects with a message print just the message" }));

    println!("\n3. Errors keep their stack:");
    logger.error(Payload::from_error(&ConfigMissing));

    println!("\n4. Formatting macros:");
    let port = 8080;
    info!(logger, "listening on port {}", port);
    warn!(logger, "{} of {} workers ready", 3, 4);

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
