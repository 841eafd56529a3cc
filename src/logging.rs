use anyhow::{Context, Result};
use configuration::LoggingSettings;
use std::io::IsTerminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::{
    self, MakeWriter,
    format::{Compact, DefaultFields, Format},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "roomstat.log";

/// Installs the global subscriber: compact stderr output, plus a daily
/// rolling file when `logging.directory` is set.
///
/// `RUST_LOG` wins over the configured filter. The returned guard flushes the
/// file writer on drop and must live until the program exits.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let env_filter = build_filter(&settings.filter)?;

    // Plain text when stderr is redirected.
    let stderr_layer = console_layer(std::io::stderr, std::io::stderr().is_terminal());

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).with_context(|| {
                format!("Failed to create log directory '{}'", directory.display())
            })?;
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(guard)
}

/// The human-facing fmt layer: one compact line per event.
pub(crate) fn console_layer<S, W>(writer: W, ansi: bool) -> fmt::Layer<S, DefaultFields, Format<Compact>, W>
where
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .compact()
        .with_level(true)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
}

fn build_filter(fallback: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .with_context(|| format!("Invalid log filter '{fallback}'")),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// An in-memory `MakeWriter` for asserting on console output.
    #[derive(Clone, Default)]
    pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn configured_filter_must_parse() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(build_filter("warn,database=debug").is_ok());
        assert!(build_filter("database=loud").is_err());
    }

    #[test]
    fn plain_console_output_has_no_escape_codes() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry().with(console_layer(captured.clone(), false));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(rows = 3, "Report failed.");
        });

        let output = captured.contents();
        assert!(output.contains("Report failed."), "{output:?}");
        assert!(output.contains("rows=3"), "{output:?}");
        assert!(!output.contains('\u{1b}'), "{output:?}");
    }
}
