//! File logging example
//!
//! Demonstrates explicit configuration: log directory, retention, compression
//! of rotated files, and production (uncolored) output.
//!
//! Run with: cargo run --example file_logging

use prefix_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Prefix Logger - File Logging Example ===\n");

    let log_dir = std::env::temp_dir().join("prefix-logger-demo");
    let config = LoggerConfig::new("orders")
        .with_prefix("[orders]")
        .with_color_mode(ColorMode::Production)
        .with_log_dir(&log_dir)
        .with_retention_days(7)
        .with_compression(true);

    let logger = Logger::with_config(config)?;

    for i in 1..=5 {
        logger.info(format!("processed order #{}", i));
    }
    logger.warn("payment provider slow to respond");
    logger.error(ErrorPayload::new("order #6 rejected").with_stack("at validate (orders.rs:88)"));
    logger.flush()?;

    println!("Files in {}:", log_dir.display());
    for entry in fs::read_dir(&log_dir)? {
        let path = entry?.path();
        let lines = fs::read_to_string(&path).map(|c| c.lines().count()).unwrap_or(0);
        println!("  {} ({} lines)", path.display(), lines);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
