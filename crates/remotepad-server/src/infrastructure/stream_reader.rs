//! Line-oriented reader over a connection's byte stream.
//!
//! Callers built on top of this reader only ever see two outcomes: "here is
//! a line" or "the stream ended".  Closure of the connection — whether by
//! this process or by the peer — reads as end-of-stream, never as an error.
//! Detection is by typed [`std::io::ErrorKind`], not by matching error
//! message text, so it does not break across platform versions.
//!
//! Any transport error that does not indicate closure propagates unchanged.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Buffered line reader that treats connection closure as end-of-stream.
///
/// The reader owns the stream; dropping it closes the connection.
pub struct StreamReader<R> {
    inner: BufReader<R>,
}

impl<R: AsyncRead + Unpin> StreamReader<R> {
    pub fn new(stream: R) -> Self {
        Self { inner: BufReader::new(stream) }
    }

    /// Reads the next line, with the terminator stripped.
    ///
    /// Returns `Ok(None)` at end-of-stream and when the transport reports
    /// that the connection is closed on either end.
    ///
    /// # Errors
    ///
    /// Propagates any transport error that does not indicate closure.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.inner.read_line(&mut line).await {
            Ok(0) => Ok(None),
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                }
                if line.ends_with('\r') {
                    line.pop();
                }
                Ok(Some(line))
            }
            Err(e) if is_closed(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Whether an I/O error means the connection is closed (locally or
/// remotely) rather than genuinely failed.
pub(crate) fn is_closed(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_reads_one_line_without_terminator() {
        let (mut client, server) = tokio::io::duplex(256);
        let mut reader = StreamReader::new(server);

        client.write_all(b"mouseMove(10,20);\n").await.unwrap();

        let line = reader.read_line().await.unwrap();
        assert_eq!(line.as_deref(), Some("mouseMove(10,20);"));
    }

    #[tokio::test]
    async fn test_strips_carriage_return_line_endings() {
        let (mut client, server) = tokio::io::duplex(256);
        let mut reader = StreamReader::new(server);

        client.write_all(b"keyPress(65)\r\n").await.unwrap();

        let line = reader.read_line().await.unwrap();
        assert_eq!(line.as_deref(), Some("keyPress(65)"));
    }

    #[tokio::test]
    async fn test_reads_multiple_lines_in_order() {
        let (mut client, server) = tokio::io::duplex(256);
        let mut reader = StreamReader::new(server);

        client.write_all(b"first\nsecond\n").await.unwrap();

        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_peer_close_reads_as_end_of_stream() {
        let (client, server) = tokio::io::duplex(256);
        let mut reader = StreamReader::new(server);

        drop(client);

        assert_eq!(reader.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unterminated_final_line_is_still_delivered() {
        let (mut client, server) = tokio::io::duplex(256);
        let mut reader = StreamReader::new(server);

        client.write_all(b"keyPress(65)").await.unwrap();
        drop(client);

        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("keyPress(65)"));
        assert_eq!(reader.read_line().await.unwrap(), None);
    }

    #[test]
    fn test_closure_error_kinds_are_recognized() {
        for kind in [
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::BrokenPipe,
            io::ErrorKind::NotConnected,
        ] {
            assert!(is_closed(&io::Error::new(kind, "closed")), "{kind:?}");
        }
    }

    #[test]
    fn test_other_error_kinds_are_not_closure() {
        assert!(!is_closed(&io::Error::new(io::ErrorKind::PermissionDenied, "denied")));
        assert!(!is_closed(&io::Error::new(io::ErrorKind::TimedOut, "timeout")));
    }
}
