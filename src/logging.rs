// logging.rs - tracing -> browser console
//
// fmt layer without timestamps (no clock on wasm32-unknown-unknown) and
// without ANSI. Each event is buffered and handed to the console method
// matching its level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _};
use wasm_bindgen::JsValue;
use web_sys::console;

use crate::error::{Error, Result};

/// Install the global subscriber.
///
/// `directives` uses `RUST_LOG` syntax, e.g. `"drift_engine=debug"`. Anything
/// unparseable is skipped; unset means warnings and errors only.
pub fn init(directives: Option<&str>) -> Result<()> {
    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_writer(ConsoleMakeWriter)
        .with_filter(filter(directives));

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

fn filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// One event's worth of formatted text
struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self { level, buf: Vec::new() }
    }

    /// Drain the buffer as a single line, `None` if nothing was written
    fn take_line(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let text = String::from_utf8_lossy(&self.buf).trim_end().to_owned();
        self.buf.clear();
        Some(text)
    }

    fn emit(&mut self) {
        let Some(line) = self.take_line() else { return };
        let line = JsValue::from_str(&line);
        match self.level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            Level::DEBUG => console::debug_1(&line),
            Level::TRACE => console::log_1(&line),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        self.emit();
    }
}
