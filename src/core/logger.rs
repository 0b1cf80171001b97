//! Main logger implementation
//!
//! `Logger::log` classifies the payload, renders the line on the calling
//! thread, and hands it to the sinks selected by the severity router. The
//! line is immutable from that point on, so concurrent callers never share
//! mutable state; each sink serializes its own writes.

use super::{
    color::ColorMode,
    config::LoggerConfig,
    error::Result,
    event::{LogEvent, Payload},
    formatter::LineFormatter,
    inspect::InspectOptions,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    router::SeverityRouter,
    sink::{Sink, SinkConfig, SinkHandle},
};
use crate::sinks::{ConsoleSink, DailyRotatingFileSink, FileRole, RetentionPolicy};
use crossbeam_channel::{bounded, Sender, TrySendError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Used when the logger is dropped without explicit shutdown, and as the
/// upper bound `flush` waits for queued lines in async mode.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Sinks plus the router that selects among them. Read-only after
/// construction; shared between callers and the async worker.
struct Dispatcher {
    router: SeverityRouter,
    sinks: Vec<SinkHandle>,
    metrics: Arc<LoggerMetrics>,
}

impl Dispatcher {
    /// Deliver one line to every routed sink. A failing sink is reported on
    /// stderr and skipped; the others still receive the line.
    fn dispatch(&self, level: LogLevel, line: &str) {
        let mut has_error = false;

        for id in self.router.route(level) {
            let Some(handle) = self.sinks.get(id.0) else {
                continue;
            };
            if let Err(e) = handle.deliver(level, line) {
                eprintln!("[LOGGER ERROR] Sink '{}' failed to write: {}", handle.name(), e);
                self.metrics.record_sink_failure();
                has_error = true;
            }
        }

        if !has_error {
            self.metrics.record_logged();
        }
    }

    /// Flush every sink, returning the first failure after trying all of them
    fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for handle in &self.sinks {
            if let Err(e) = handle.flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", handle.name(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

pub struct Logger {
    project_name: String,
    prefix: String,
    formatter: LineFormatter,
    inspect: InspectOptions,
    dispatcher: Arc<Dispatcher>,
    sender: Option<Sender<(LogLevel, String)>>,
    async_handle: Option<thread::JoinHandle<()>>,
    /// Lines accepted by the async queue and not yet dispatched
    pending: Arc<AtomicUsize>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create the standard three-sink logger writing under `<cwd>/logs`.
    ///
    /// Sinks: colorized console (all levels), `<project>.<date>.log` (all
    /// levels, uncolored), `<project>.<date>.error.log` (errors only,
    /// uncolored). Both files keep 15 days of history.
    ///
    /// # Errors
    ///
    /// Returns error if the project name is invalid or a log file cannot be opened
    pub fn new(project_name: impl Into<String>, prefix: impl Into<String>) -> Result<Self> {
        Self::with_config(LoggerConfig::new(project_name).with_prefix(prefix))
    }

    /// Create the standard three-sink logger from explicit configuration.
    ///
    /// With [`LoggerConfig::async_buffer`] set, lines are written by a worker
    /// thread and a slow sink never delays the caller.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or a log file cannot be opened
    pub fn with_config(config: LoggerConfig) -> Result<Self> {
        config.validate()?;

        let policy = RetentionPolicy::new()
            .with_max_age_days(config.retention_days)
            .with_compression(config.compress_rotated);
        let general = DailyRotatingFileSink::with_policy(
            &config.log_dir,
            &config.project_name,
            FileRole::General,
            policy.clone(),
        )?;
        let errors = DailyRotatingFileSink::with_policy(
            &config.log_dir,
            &config.project_name,
            FileRole::ErrorOnly,
            policy,
        )?;

        let mut builder = Logger::builder()
            .prefix(config.prefix)
            .color_mode(config.color_mode)
            .sink(ConsoleSink::new(), SinkConfig::console())
            .sink(general, SinkConfig::file())
            .sink(errors, SinkConfig::error_file());
        if let Some(capacity) = config.async_buffer {
            builder = builder.async_mode(capacity);
        }

        let mut logger = builder.build();
        logger.project_name = config.project_name;
        Ok(logger)
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use prefix_logger::prelude::*;
    ///
    /// let sink = MemorySink::new("capture");
    /// let lines = sink.buffer();
    /// let logger = Logger::builder()
    ///     .prefix("API")
    ///     .color_mode(ColorMode::Production)
    ///     .sink(sink, SinkConfig::file())
    ///     .build();
    ///
    /// logger.info("ready");
    /// assert!(lines.lines()[0].ends_with(": [INFO] ready"));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Log a payload at `level`. Never fails and never panics because of a sink.
    pub fn log(&self, level: LogLevel, payload: impl Into<Payload>) {
        let event = LogEvent::classify_with(&payload.into(), &self.inspect);
        let line = self.formatter.render(&self.prefix, level, &event);
        self.send_line(level, line);
    }

    fn send_line(&self, level: LogLevel, line: String) {
        let Some(ref sender) = self.sender else {
            self.dispatcher.dispatch(level, &line);
            return;
        };

        self.pending.fetch_add(1, Ordering::AcqRel);
        match sender.try_send((level, line)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                self.metrics.record_queue_full();
                self.alert_and_drop();
            }
            Err(TrySendError::Disconnected(_)) => {
                // Logger is shutting down
                self.pending.fetch_sub(1, Ordering::AcqRel);
            }
        }
    }

    /// Drop a line with an alert on the first drop and every 1000th after
    fn alert_and_drop(&self) {
        let dropped_count = self.metrics.record_dropped();

        if dropped_count == 0 || (dropped_count + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Queue full, {} log lines dropped. \
                 Consider increasing the async buffer size.",
                dropped_count + 1
            );
        }
    }

    #[inline]
    pub fn debug(&self, payload: impl Into<Payload>) {
        self.log(LogLevel::Debug, payload);
    }

    #[inline]
    pub fn info(&self, payload: impl Into<Payload>) {
        self.log(LogLevel::Info, payload);
    }

    #[inline]
    pub fn warn(&self, payload: impl Into<Payload>) {
        self.log(LogLevel::Warn, payload);
    }

    #[inline]
    pub fn error(&self, payload: impl Into<Payload>) {
        self.log(LogLevel::Error, payload);
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn color_mode(&self) -> ColorMode {
        self.formatter.color_mode()
    }

    /// Number of registered sinks
    pub fn sink_count(&self) -> usize {
        self.dispatcher.sinks.len()
    }

    /// Whether lines are delivered by a worker thread
    pub fn is_async(&self) -> bool {
        self.sender.is_some()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Get the number of lines dropped by a full async queue
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Flush every sink. In async mode, first waits (up to
    /// [`DEFAULT_SHUTDOWN_TIMEOUT`]) for queued lines to be dispatched.
    ///
    /// # Errors
    ///
    /// Returns the first sink flush failure
    pub fn flush(&self) -> Result<()> {
        if self.sender.is_some() {
            let start = Instant::now();
            while self.pending.load(Ordering::Acquire) > 0 {
                if start.elapsed() >= DEFAULT_SHUTDOWN_TIMEOUT {
                    eprintln!(
                        "[LOGGER WARNING] {} queued log lines not yet written at flush",
                        self.pending.load(Ordering::Acquire)
                    );
                    break;
                }
                thread::sleep(Duration::from_millis(1));
            }
        }
        self.dispatcher.flush()
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Closes the async queue, waits for the worker to drain it, and flushes
    /// every sink. Later `log` calls are delivered synchronously.
    ///
    /// # Returns
    ///
    /// `true` if shutdown completed successfully within timeout, `false` otherwise
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        if !self.stop_worker(timeout) {
            return false;
        }

        if let Err(e) = self.dispatcher.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }

        true
    }

    fn stop_worker(&mut self, timeout: Duration) -> bool {
        // Closing the channel lets the worker drain what is queued and exit
        drop(self.sender.take());

        let Some(handle) = self.async_handle.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Async worker thread panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Async worker thread did not finish within {:?}. \
                     Some log lines may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.stop_worker(DEFAULT_SHUTDOWN_TIMEOUT);

        if let Err(e) = self.dispatcher.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped log lines (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use prefix_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .prefix("[jobs]")
///     .color_mode(ColorMode::Interactive)
///     .sink(ConsoleSink::new(), SinkConfig::console())
///     .async_mode(1000)
///     .build();
/// logger.info("started");
/// ```
pub struct LoggerBuilder {
    prefix: String,
    color_mode: ColorMode,
    inspect: InspectOptions,
    sinks: Vec<(Box<dyn Sink>, SinkConfig)>,
    async_buffer: Option<usize>,
}

impl LoggerBuilder {
    /// Create a builder with no prefix, no sinks and the color mode from the environment
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            color_mode: ColorMode::from_env(),
            inspect: InspectOptions::default(),
            sinks: Vec::new(),
            async_buffer: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Override how structured payloads are inspected
    #[must_use = "builder methods return a new value"]
    pub fn inspect_options(mut self, options: InspectOptions) -> Self {
        self.inspect = options;
        self
    }

    /// Add a sink with its routing and filtering configuration
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S, config: SinkConfig) -> Self {
        self.sinks.push((Box::new(sink), config));
        self
    }

    /// Deliver lines from a worker thread through a bounded queue.
    ///
    /// Lines are still formatted on the calling thread. When the queue is
    /// full the line is dropped and counted rather than blocking the caller.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size.max(1));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let metrics = Arc::new(LoggerMetrics::new());
        let mut router = SeverityRouter::new();
        let sinks = self
            .sinks
            .into_iter()
            .map(|(sink, config)| {
                router.register(config.scope);
                SinkHandle::new(sink, config)
            })
            .collect();
        let dispatcher = Arc::new(Dispatcher {
            router,
            sinks,
            metrics: Arc::clone(&metrics),
        });
        let pending = Arc::new(AtomicUsize::new(0));

        let (sender, async_handle) = match self.async_buffer {
            Some(size) => Self::spawn_worker(size, &dispatcher, &pending),
            None => (None, None),
        };

        Logger {
            project_name: String::new(),
            prefix: self.prefix,
            formatter: LineFormatter::new(self.color_mode),
            inspect: self.inspect,
            dispatcher,
            sender,
            async_handle,
            pending,
            metrics,
        }
    }

    fn spawn_worker(
        buffer_size: usize,
        dispatcher: &Arc<Dispatcher>,
        pending: &Arc<AtomicUsize>,
    ) -> (Option<Sender<(LogLevel, String)>>, Option<thread::JoinHandle<()>>) {
        let (sender, receiver) = bounded::<(LogLevel, String)>(buffer_size);
        let worker_dispatcher = Arc::clone(dispatcher);
        let worker_pending = Arc::clone(pending);

        let spawned = thread::Builder::new()
            .name("prefix-logger".to_string())
            .spawn(move || {
                for (level, line) in receiver.iter() {
                    worker_dispatcher.dispatch(level, &line);
                    worker_pending.fetch_sub(1, Ordering::AcqRel);
                }
                let _ = worker_dispatcher.flush();
            });

        match spawned {
            Ok(handle) => (Some(sender), Some(handle)),
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to spawn async worker, logging synchronously: {}",
                    e
                );
                (None, None)
            }
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
