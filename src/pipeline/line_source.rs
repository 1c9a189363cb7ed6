// src/pipeline/line_source.rs

//! First pipeline stage: split an input stream into lines.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::errors::{RatexecError, Result};

use super::handoff::{HandoffReceiver, HandoffSender, handoff};

/// Spawn the line source over `input`.
///
/// Lines are handed downstream without their `\n` / `\r\n` terminator; a
/// trailing line without a newline still counts. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD rather than rejected. The returned
/// receiver closes at end-of-input, and also on a read error, so downstream
/// stages see both the same way. The join handle resolves to the number of
/// lines produced, or to [`RatexecError::InputError`] if reading failed.
pub fn spawn_line_source<R>(input: R) -> (HandoffReceiver<String>, JoinHandle<Result<u64>>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = handoff();
    let handle = tokio::spawn(read_lines(input, tx));
    (rx, handle)
}

async fn read_lines<R>(input: R, tx: HandoffSender<String>) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut segments = BufReader::new(input).split(b'\n');
    let mut produced: u64 = 0;

    loop {
        match segments.next_segment().await {
            Ok(Some(bytes)) => {
                let line = decode_line(bytes);
                trace!(line = %line, "read input line");
                if tx.send(line).await.is_err() {
                    debug!(produced, "downstream closed; stopping line source");
                    return Ok(produced);
                }
                produced += 1;
            }
            Ok(None) => {
                debug!(produced, "input exhausted");
                return Ok(produced);
            }
            Err(source) => {
                warn!(produced, error = %source, "reading input failed; ending input");
                return Err(RatexecError::InputError {
                    lines_read: produced,
                    source,
                });
            }
        }
    }
}

fn decode_line(mut bytes: Vec<u8>) -> String {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }

    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(e) => {
            debug!(error = %e.utf8_error(), "input line is not valid UTF-8; replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
