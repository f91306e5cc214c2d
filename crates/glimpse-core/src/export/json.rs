//! JSON and JSON Lines output for processed records.
//!
//! JSON output is a single array, which `glimpse export` can read back.

use serde::Serialize;
use std::io::{self, Write};

/// Record serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat {
    /// One array holding every record
    Array,
    /// One object per line
    Lines,
}

impl JsonFormat {
    /// Parse a format name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Array),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::Lines),
            _ => None,
        }
    }
}

/// Writes record batches in either format.
pub struct RecordWriter<W: Write> {
    writer: W,
    format: JsonFormat,
    pretty: bool,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    /// `pretty` only affects [`JsonFormat::Array`].
    pub fn new(writer: W, format: JsonFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            written: 0,
        }
    }

    /// Write a batch and flush.
    pub fn write_records<T: Serialize>(&mut self, records: &[T]) -> io::Result<()> {
        match self.format {
            JsonFormat::Array => {
                let encoded = if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, records)
                } else {
                    serde_json::to_writer(&mut self.writer, records)
                };
                encoded.map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
            JsonFormat::Lines => {
                for record in records {
                    serde_json::to_writer(&mut self.writer, record).map_err(io::Error::other)?;
                    writeln!(self.writer)?;
                }
            }
        }
        self.written += records.len();
        self.writer.flush()
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
