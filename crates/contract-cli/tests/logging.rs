//! Tests for logging setup.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use contract_cli::logging::{
    LogConfig, LogFormat, REDACTED_VALUE, init_logging_with_writer, log_data_enabled,
    redact_value,
};

#[derive(Clone, Default)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

struct BufferGuard {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("buffer lock poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = BufferGuard;

    fn make_writer(&'a self) -> Self::Writer {
        BufferGuard {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

#[test]
fn config_builders_set_fields() {
    let config = LogConfig::default()
        .with_level_filter(LevelFilter::DEBUG)
        .with_format(LogFormat::Compact)
        .with_timestamps(true)
        .with_log_data(true);
    assert_eq!(config.level_filter, LevelFilter::DEBUG);
    assert_eq!(config.format, LogFormat::Compact);
    assert!(config.with_timestamps);
    assert!(config.log_data);
    assert!(config.log_file.is_none());
}

#[test]
fn json_logs_reach_writer_and_values_stay_redacted() {
    let writer = BufferWriter::default();
    let mut config = LogConfig::default()
        .with_format(LogFormat::Json)
        .with_ansi(false);
    config.use_env_filter = false;
    init_logging_with_writer(&config, writer.clone());

    assert!(!log_data_enabled());
    assert_eq!(redact_value("RSSMRA80A01H501U"), REDACTED_VALUE);

    tracing::warn!(field = "Codice Fiscale", "value rejected");
    tracing::info!("below the configured level");

    let output = String::from_utf8(writer.buffer.lock().expect("buffer").clone())
        .expect("utf8 log output");
    assert!(output.contains("value rejected"));
    assert!(output.contains("Codice Fiscale"));
    assert!(!output.contains("below the configured level"));
}
