//! Progress reporting for the bytes a zap run reads.
//!
//! The bar itself is drawn by `tracing-indicatif`: it belongs to a span, so log lines
//! emitted while it is shown are printed above it instead of tearing it apart.
//! See <https://docs.rs/tracing-indicatif>.

use std::fmt::Write;
use std::io::Read;
use std::time::{Duration, Instant};

use indicatif::ProgressStyle;
use tracing::{debug, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Wraps a reader and advances the progress bar of `span` by every byte read.
///
/// A disabled span (for example [`Span::none`]) turns the monitor into a plain pass-through.
pub struct ProgressMonitor<R: Read> {
    /// Bytes the reader is expected to yield
    pub total: u64,
    pub read: u64,
    reader: R,
    span: Span,
    started: Instant,
    reported: bool,
}

impl<R: Read> ProgressMonitor<R> {
    pub fn new(reader: R, total: u64, span: Span) -> Self {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template(
            "{span_child_prefix}{wide_bar} {binary_bytes}/{binary_total_bytes} [est. {eta} remaining]",
        )
        .expect("progress bar template is valid");
        span.pb_set_style(&style);
        span.pb_set_length(total);
        Self {
            total,
            read: 0,
            reader,
            span,
            started: Instant::now(),
            reported: false,
        }
    }

    /// The span the progress bar is attached to. Enter it while reading to show the bar.
    pub fn span(&self) -> &Span {
        &self.span
    }

    fn update(&mut self, delta: u64) {
        self.span.pb_inc(delta);
        if self.read >= self.total && !self.reported {
            self.reported = true;
            let elapsed = self.started.elapsed();
            debug!(
                "read {} in {} ({}/s avg)",
                fmt_size(self.total),
                fmt_duration(elapsed),
                fmt_size(bytes_per_second(self.total, elapsed))
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let out = self.reader.read(buf)?;
        self.read += out as u64;
        self.update(out as u64);
        Ok(out)
    }
}

fn bytes_per_second(bytes: u64, elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        (bytes as f64 / secs) as u64
    } else {
        bytes
    }
}

/// Human readable binary size: "B", "KiB", "MiB", ...
pub fn fmt_size(size_in_bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    let mut unit_index = 0;
    let mut scaled = size_in_bytes as f64;
    while scaled >= 1024.0 && unit_index < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit_index += 1;
    }
    if unit_index > 0 {
        format!("{:.2}{}", scaled, UNITS[unit_index])
    } else {
        format!("{}{}", size_in_bytes, UNITS[0])
    }
}

/// Human readable duration, e.g. "1h 20m 30s" or "7.00ms"
pub fn fmt_duration(duration: Duration) -> String {
    let as_secs = duration.as_secs_f64();
    let whole_secs = duration.as_secs();
    let hours = whole_secs / 3600;
    let minutes = (whole_secs / 60) % 60;
    let secs_portion = as_secs - (whole_secs - whole_secs % 60) as f64;

    let mut output = String::with_capacity(12);
    if hours > 0 {
        write!(&mut output, "{hours}h ").unwrap();
    }
    if minutes > 0 {
        write!(&mut output, "{minutes}m ").unwrap();
    }
    if as_secs >= 60.0 {
        if secs_portion >= 0.5 {
            write!(&mut output, "{:.0}s", secs_portion.round()).unwrap();
        }
    } else if secs_portion > 4.0 {
        write!(&mut output, "{secs_portion:.1}s").unwrap();
    } else if secs_portion >= 1.0 {
        write!(&mut output, "{secs_portion:.2}s").unwrap();
    } else if secs_portion > 0.0 {
        write!(&mut output, "{:.2}ms", secs_portion * 1000.0).unwrap();
    } else {
        output.push_str("0s");
    }
    output.trim_end().to_string()
}
