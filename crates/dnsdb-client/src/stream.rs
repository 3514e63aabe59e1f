//! Newline-delimited JSON decoding.
//!
//! Lookup endpoints answer with one JSON object per line rather than a JSON
//! array, so bodies are decoded line by line as they arrive.

use dnsdb_core::{DnsdbError, LookupError, LookupResult, Result};
use futures_util::TryStreamExt;
use serde::de::DeserializeOwned;
use std::io;
use std::marker::PhantomData;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

type LineReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// Lazy sequence of records decoded from a newline-delimited body.
///
/// Each line is decoded into a fresh `T`. The stream ends at the end of the
/// body or after the first error; records already yielded stay with the
/// caller. Dropping the stream early closes the underlying connection.
pub struct RecordStream<T> {
    reader: LineReader,
    buf: Vec<u8>,
    line: usize,
    finished: bool,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> RecordStream<T> {
    /// Decode the body of an HTTP response
    pub(crate) fn from_response(response: reqwest::Response) -> Self {
        let body = response.bytes_stream().map_err(io::Error::other);
        Self::from_reader(StreamReader::new(Box::pin(body)))
    }

    /// Decode from any buffered reader
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        Self {
            reader: Box::new(reader),
            buf: Vec::new(),
            line: 0,
            finished: false,
            _record: PhantomData,
        }
    }

    /// Number of physical lines read so far
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line
    }

    /// Decode the next record.
    ///
    /// Every line is decoded, so an empty line or one that is not UTF-8 is a
    /// decode error. Returns `None` once the body is exhausted or an error has
    /// been returned.
    pub async fn next(&mut self) -> Option<Result<T>> {
        if self.finished {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf).await {
            Ok(0) => {
                self.finished = true;
                return None;
            }
            Ok(_) => {}
            Err(e) => {
                self.finished = true;
                return Some(Err(DnsdbError::Io(e.to_string())));
            }
        }
        self.line += 1;

        let decoded = serde_json::from_slice(trim_line_end(&self.buf)).map_err(|source| {
            DnsdbError::Decode {
                line: self.line,
                source,
            }
        });
        if decoded.is_err() {
            self.finished = true;
        }
        Some(decoded)
    }

    /// Drain the stream into a vector, keeping the records decoded before a
    /// failure alongside the failure.
    pub async fn collect_records(mut self) -> LookupResult<T> {
        let mut records = Vec::new();
        while let Some(next) = self.next().await {
            match next {
                Ok(record) => records.push(record),
                Err(e) => return Err(LookupError::new(records, e)),
            }
        }
        Ok(records)
    }
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl<T> std::fmt::Debug for RecordStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("line", &self.line)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
