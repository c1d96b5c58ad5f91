//! Property record CSV sink
//!
//! New files start with a UTF-8 byte-order mark so spreadsheet tools
//! pick up the Vietnamese text correctly, followed by the 20-column
//! header. Existing files are appended to untouched.

use crate::extract::{PropertyRecord, FIELD_NAMES};
use crate::sink::SinkResult;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Append-only, flush-per-record sink for property records
pub struct RecordSink {
    writer: csv::Writer<File>,
}

impl RecordSink {
    /// Opens (or creates) the record CSV, writing BOM and header only
    /// when the file is new or empty
    pub fn open(path: &Path) -> SinkResult<Self> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let needs_header = file.metadata()?.len() == 0;

        if needs_header {
            file.write_all(UTF8_BOM)?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(FIELD_NAMES)?;
            writer.flush()?;
        }

        Ok(Self { writer })
    }

    /// Appends one record and flushes it to disk
    pub fn append(&mut self, record: &PropertyRecord) -> SinkResult<()> {
        self.writer.write_record(record.as_row())?;
        self.writer.flush()?;
        Ok(())
    }
}
