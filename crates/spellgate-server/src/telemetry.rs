//! Logging setup and the per-request access log.
//!
//! Diagnostics go to stdout through a `tracing_subscriber` fmt layer filtered
//! by `RUST_LOG` (or the configured level). Completed checks are additionally
//! emitted as events with target [`ACCESS_TARGET`]; when an access log file is
//! configured, a second fmt layer formats exactly those events and hands each
//! line to a writer task over a channel. Only that task touches the file: it
//! appends through a buffered writer and flushes periodically and on request.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::{LookupSpan, Registry};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ServerConfig;

/// Target of access-log events.
pub const ACCESS_TARGET: &str = "spellgate::access";

/// How often buffered access lines are written out.
pub const ACCESS_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

enum Command {
    Line(Vec<u8>),
    Flush(oneshot::Sender<io::Result<()>>),
}

/// Handle to an append-only access log file.
///
/// Writing never touches the file on the caller's thread; lines are queued
/// for the writer task started by [`AccessLog::open`].
#[derive(Clone)]
pub struct AccessLog {
    tx: mpsc::UnboundedSender<Command>,
}

impl AccessLog {
    /// Open `path` for appending, creating it if needed, and start the
    /// writer task flushing every `flush_every`. Must be called inside a
    /// tokio runtime.
    pub fn open(path: &Path, flush_every: Duration) -> io::Result<(Self, JoinHandle<()>)> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(BufWriter::new(file), rx, flush_every));
        Ok((Self { tx }, writer))
    }

    /// Write every line queued so far to the file.
    pub async fn flush(&self) -> io::Result<()> {
        let (ack, done) = oneshot::channel();
        self.tx.send(Command::Flush(ack)).map_err(|_| writer_gone())?;
        done.await.map_err(|_| writer_gone())?
    }

    fn send_line(&self, line: Vec<u8>) {
        // A stopped writer only happens at runtime shutdown; the line is lost.
        let _ = self.tx.send(Command::Line(line));
    }
}

fn writer_gone() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "access log writer stopped")
}

async fn run_writer(
    mut out: BufWriter<File>,
    mut rx: mpsc::UnboundedReceiver<Command>,
    flush_every: Duration,
) {
    let mut ticker = tokio::time::interval(flush_every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Line(line)) => {
                    if let Err(e) = out.write_all(&line) {
                        tracing::warn!(error = %e, "failed to write access log");
                    }
                }
                Some(Command::Flush(ack)) => {
                    let _ = ack.send(out.flush());
                }
                None => break,
            },
            _ = ticker.tick() => {
                if let Err(e) = out.flush() {
                    tracing::warn!(error = %e, "failed to flush access log");
                }
            }
        }
    }

    if let Err(e) = out.flush() {
        tracing::warn!(error = %e, "failed to flush access log");
    }
}

/// Collects one formatted event and queues it when dropped.
pub struct AccessLogWriter<'a> {
    log: &'a AccessLog,
    line: Vec<u8>,
}

impl Write for AccessLogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.line.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for AccessLogWriter<'_> {
    fn drop(&mut self) {
        if !self.line.is_empty() {
            self.log.send_line(std::mem::take(&mut self.line));
        }
    }
}

impl<'a> MakeWriter<'a> for AccessLog {
    type Writer = AccessLogWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        AccessLogWriter {
            log: self,
            line: Vec::new(),
        }
    }
}

/// Layer that writes access events, and only those, to `log`.
pub fn access_layer<S>(log: AccessLog) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(log)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter_fn(|meta| meta.target() == ACCESS_TARGET))
}

/// Keeps the access log writer alive.
pub struct TelemetryGuard {
    access_log: Option<AccessLog>,
    writer: Option<JoinHandle<()>>,
}

impl TelemetryGuard {
    pub fn access_log(&self) -> Option<&AccessLog> {
        self.access_log.as_ref()
    }

    /// Write out pending access lines. Call before the runtime shuts down.
    pub async fn shutdown(self) {
        if let Some(log) = &self.access_log {
            if let Err(e) = log.flush().await {
                eprintln!("access log flush error: {e}");
            }
        }
        if let Some(writer) = self.writer {
            writer.abort();
        }
    }
}

/// Install the global subscriber. Must be called inside a tokio runtime.
///
/// An access log that cannot be opened is reported and skipped; the service
/// keeps running without it.
pub fn init_telemetry(config: &ServerConfig) -> anyhow::Result<TelemetryGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (access_log, writer, open_error) = match &config.access_log {
        Some(path) => match AccessLog::open(path, ACCESS_FLUSH_INTERVAL) {
            Ok((log, writer)) => (Some(log), Some(writer), None),
            Err(e) => (None, None, Some((path.clone(), e))),
        },
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(access_log.clone().map(access_layer::<Registry>))
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .try_init()?;

    if let Some((path, e)) = open_error {
        tracing::warn!(path = %path.display(), error = %e, "access log disabled");
    }

    Ok(TelemetryGuard { access_log, writer })
}

/// Emit the access line for one completed check.
pub fn record_access(parts: usize, client: &str, check_ms: u64, wait_ms: u64, queued: usize) {
    tracing::info!(
        target: ACCESS_TARGET,
        parts,
        client,
        check_ms,
        wait_ms,
        queued,
        "checked {parts} parts for {client} in {check_ms} with {wait_ms} of wait"
    );
}
