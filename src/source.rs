// src/source.rs
//! Line source abstraction over the byte-stream transport

use crate::error::{Result, TrackerError};
use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// A handle yielding raw text lines. The tracking loop owns its source
/// exclusively; nothing else touches it.
///
/// `read_line` must return within roughly `timeout` so the loop can observe
/// its stop flag promptly; `Ok(None)` means "no complete line yet", not end
/// of stream.
pub trait LineSource {
    fn read_line(
        &mut self,
        timeout: Duration,
    ) -> impl Future<Output = Result<Option<String>>> + Send;

    fn close(&mut self) -> impl Future<Output = ()> + Send;
}

/// Serial-port line source backed by tokio-serial.
pub struct SerialLineSource {
    reader: BufReader<SerialStream>,
    partial: Vec<u8>,
}

impl SerialLineSource {
    /// Open the serial device. Failure here aborts the caller's `start`
    /// attempt.
    pub async fn open(address: &str, baud_rate: u32) -> Result<Self> {
        let stream = tokio_serial::new(address, baud_rate)
            .open_native_async()
            .map_err(|e| {
                TrackerError::SourceOpen(format!("failed to open {}: {}", address, e))
            })?;

        log::info!("opened serial source {} at {} baud", address, baud_rate);

        Ok(Self {
            reader: BufReader::new(stream),
            partial: Vec::new(),
        })
    }
}

impl LineSource for SerialLineSource {
    async fn read_line(&mut self, timeout: Duration) -> Result<Option<String>> {
        // `partial` persists across calls, so a read interrupted by the
        // timeout keeps the bytes it already consumed and the line is
        // completed on a later call.
        let read = self.reader.read_until(b'\n', &mut self.partial);

        match tokio::time::timeout(timeout, read).await {
            Err(_) => Ok(None),
            Ok(Ok(0)) => Ok(None),
            Ok(Ok(_)) => {
                let raw = std::mem::take(&mut self.partial);
                // Invalid byte sequences are replaced, never fatal.
                Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
            }
            Ok(Err(e)) => Err(TrackerError::SourceRead(e.to_string())),
        }
    }

    async fn close(&mut self) {
        self.partial.clear();
    }
}

/// Line source replaying a fixed sequence, then reporting no data. Used by
/// tests and offline demos in place of a real device.
pub struct ReplayLineSource {
    lines: VecDeque<String>,
}

impl ReplayLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ReplayLineSource {
    async fn read_line(&mut self, timeout: Duration) -> Result<Option<String>> {
        match self.lines.pop_front() {
            Some(line) => Ok(Some(line)),
            None => {
                // Exhausted: behave like a quiet device within its timeout.
                tokio::time::sleep(timeout).await;
                Ok(None)
            }
        }
    }

    async fn close(&mut self) {
        self.lines.clear();
    }
}
