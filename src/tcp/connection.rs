//! Per-connection protocol handler.
//!
//! One query per line. The connection persists across queries until
//! the client disconnects or sends something the protocol cannot
//! accept (over-long line, invalid UTF-8).

use crate::core::error::{LineQueryError, Result};
use crate::core::services::Services;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tracing::{debug, error, info, warn};

/// Verdict for a term present in the reference file.
pub const RESPONSE_EXISTS: &str = "STRING EXISTS";

/// Verdict for a term absent from the reference file.
pub const RESPONSE_NOT_FOUND: &str = "STRING NOT FOUND";

/// Sent when the PSK prefix check fails. The connection stays open.
pub const RESPONSE_AUTH_FAILED: &str = "Authentication failed - PSK mismatch.";

/// Sent when a query cannot be served (unreadable reference file,
/// malformed input).
pub const RESPONSE_SERVER_ERROR: &str = "Could not handle your request. Please try again later.";

/// Serve one accepted connection to completion.
///
/// Errors never escape: every outcome is logged and the socket is
/// dropped on the way out.
pub async fn handle(stream: TcpStream, peer: SocketAddr, services: Arc<Services>) {
    debug!(peer = %peer, "Connection established");

    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let max_line = services.config.limits.max_line_bytes;
    let mut buf = Vec::with_capacity(max_line.min(1024));

    loop {
        buf.clear();

        // One byte past the limit distinguishes "exactly at the
        // limit" from "too long".
        match (&mut reader)
            .take(max_line as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await
        {
            Ok(0) => {
                debug!(peer = %peer, "Client disconnected");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                debug!(peer = %peer, "Read error: {e}");
                break;
            }
        }

        let raw = match decode_query(&buf, max_line) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(peer = %peer, "{e}");
                let _ = write_line(&mut writer, RESPONSE_SERVER_ERROR).await;
                if e.closes_connection() {
                    break;
                }
                continue;
            }
        };

        let term = match services.auth.authenticate(raw) {
            Ok(term) => term,
            Err(_) => {
                warn!(peer = %peer, "PSK authentication failed");
                if write_line(&mut writer, RESPONSE_AUTH_FAILED).await.is_err() {
                    break;
                }
                continue;
            }
        };
        debug!(peer = %peer, query = %term, "Query received");

        let start = Instant::now();
        let verdict = match services.search.contains(term).await {
            Ok(true) => RESPONSE_EXISTS,
            Ok(false) => RESPONSE_NOT_FOUND,
            Err(e) => {
                // Unreadable reference file fails this query only
                error!(peer = %peer, "Search failed: {e}");
                if write_line(&mut writer, RESPONSE_SERVER_ERROR).await.is_err() {
                    break;
                }
                continue;
            }
        };
        let elapsed = start.elapsed();

        if let Err(e) = write_line(&mut writer, verdict).await {
            debug!(peer = %peer, "Write error: {e}");
            break;
        }

        info!(
            peer = %peer,
            query = %term,
            verdict = %verdict,
            duration_us = elapsed.as_micros() as u64,
            "Query completed"
        );
    }
}

/// Validate one received line and strip its framing.
///
/// Strips one trailing terminator, then any NUL padding left by
/// clients that send fixed-size buffers.
fn decode_query(buf: &[u8], max_line: usize) -> Result<&str> {
    if buf.len() > max_line && !buf.ends_with(b"\n") {
        return Err(LineQueryError::Protocol(format!(
            "query exceeds {max_line} byte line limit"
        )));
    }

    let raw = std::str::from_utf8(buf)
        .map_err(|e| LineQueryError::Protocol(format!("query is not valid UTF-8: {e}")))?;

    let raw = raw.strip_suffix('\n').unwrap_or(raw);
    let raw = raw.strip_suffix('\r').unwrap_or(raw);
    Ok(raw.trim_end_matches('\0'))
}

async fn write_line(writer: &mut OwnedWriteHalf, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_lf() {
        assert_eq!(decode_query(b"apple\n", 1024).unwrap(), "apple");
    }

    #[test]
    fn test_decode_strips_crlf() {
        assert_eq!(decode_query(b"apple\r\n", 1024).unwrap(), "apple");
    }

    #[test]
    fn test_decode_strips_nul_padding() {
        assert_eq!(decode_query(b"apple\0\0\0\n", 1024).unwrap(), "apple");
    }

    #[test]
    fn test_decode_accepts_unterminated_line() {
        assert_eq!(decode_query(b"apple", 1024).unwrap(), "apple");
    }

    #[test]
    fn test_decode_keeps_interior_whitespace() {
        assert_eq!(decode_query(b"apple pie \n", 1024).unwrap(), "apple pie ");
    }

    #[test]
    fn test_decode_rejects_over_long_line() {
        let buf = vec![b'a'; 65];
        let err = decode_query(&buf, 64).unwrap_err();
        assert!(err.closes_connection());
    }

    #[test]
    fn test_decode_allows_line_at_limit() {
        let mut buf = vec![b'a'; 64];
        buf.push(b'\n');
        assert_eq!(decode_query(&buf, 64).unwrap().len(), 64);
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_query(b"\xff\xfe\n", 1024).unwrap_err();
        assert!(err.closes_connection());
    }
}
