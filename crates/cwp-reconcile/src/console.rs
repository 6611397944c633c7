use std::fmt;
use std::io::Write;

/// Operator-facing progress and summary output.
///
/// Write failures are dropped (logged at debug): a closed stdout must not
/// stop the delete phase halfway through the list.
pub struct Console<'a> {
    out: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out }
    }

    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            tracing::debug!(error = %e, "console write failed");
        }
    }

    /// Write without a newline (progress lines are completed after the call).
    pub fn partial(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.flush()) {
            tracing::debug!(error = %e, "console write failed");
        }
    }

    pub fn blank(&mut self) {
        self.line(format_args!(""));
    }
}
