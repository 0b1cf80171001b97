//! Async logging example
//!
//! Demonstrates a builder-made logger that hands lines to a worker thread,
//! with the drop counters reported at the end.
//!
//! Run with: cargo run --example async_logging

use prefix_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Prefix Logger - Async Logging Example ===\n");

    let mut logger = Logger::builder()
        .prefix("[async]")
        .sink(ConsoleSink::new(), SinkConfig::console())
        .sink(ConsoleSink::stderr(), SinkConfig::error_file())
        .async_mode(1000)
        .build();

    println!("1. Logging from the main thread:");
    for i in 0..5 {
        logger.info(format!("tick {}", i));
    }
    logger.flush()?;

    println!("\n2. Logging from several threads:");
    let shared = Arc::new(
        Logger::builder()
            .prefix("[worker]")
            .sink(ConsoleSink::new(), SinkConfig::console())
            .async_mode(1000)
            .build(),
    );
    let handles: Vec<_> = (0..3)
        .map(|t| {
            let logger = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..3 {
                    logger.debug(format!("worker {} step {}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }
    shared.flush()?;

    println!("\n3. Shutdown:");
    logger.error("shutting down");
    let clean = logger.shutdown(Duration::from_secs(5));
    println!(
        "   clean shutdown: {}, delivered: {}, dropped: {}",
        clean,
        logger.metrics().total_logged(),
        logger.dropped_count()
    );

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
