//! Structured logging and optional span export.
//!
//! The terminal belongs to the UI, so every `tracing` event goes to files in
//! the data directory instead:
//!
//! ```text
//! tracing ─┬─▶ fmt layer ───────────────────────────▶ gcal-tui.log
//!          └─▶ tracing-opentelemetry ─▶ SDK ─▶ OTLP ─▶ gcal-tui-otlp.json
//! ```
//!
//! Both files rotate at 10 MB and keep three backups. The span file is only
//! written when `otlp_traces = true`.
//!
//! # Configuration
//!
//! The filter is resolved from:
//! 1. `RUST_LOG`
//! 2. `trace_level` in `config.toml`
//! 3. `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with a file exporter
//! - [`span_formatter`]: OTLP/JSON encoding of span batches
//! - [`file_writer`]: Size-rotated log file

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::RotatingFile;
pub use init::{init_tracing, LOG_FILE_NAME, TRACE_FILE_NAME};
