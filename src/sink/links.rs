//! Link CSV: written by discovery, read back by extraction

use crate::sink::{SinkError, SinkResult};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Header and lookup name of the single link column
pub const LINK_COLUMN: &str = "URL";

/// Example item URLs used when the link list cannot be read
pub const FALLBACK_LINKS: &[&str] = &[
    "https://batdongsan.com.vn/ban-nha-biet-thu-lien-ke-xa-tan-hoi-7-prj-vinhomes-wonder-city/mua-vin-dan-phuong-dip-30-04-khi-1-ngay-bang-20-nam-co-den-mot-lan-gia-tu-18-70-ty-pr42821633",
    "https://batdongsan.com.vn/ban-can-ho-chung-cu-phuong-phuc-dong-prj-sunshine-green-iconic/-dan-ban-ch-1-ngu-4-ty-2-ngu-6-ty-3-ngu-8-ty-duplex-13-ty-pr42262144",
    "https://batdongsan.com.vn/ban-dat-xa-giao-phong/chinh-chu-can-tien-ban-nhanh-2-can-duong-lon-di-thang-ra-bien-quat-lam-gia-re-nhat-pr42839922",
];

/// Append-only, flush-per-row sink for discovered item URLs
pub struct LinkSink {
    writer: csv::Writer<File>,
}

impl LinkSink {
    /// Opens (or creates) the link CSV, writing the header only when the
    /// file is new or empty
    pub fn open(path: &Path) -> SinkResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record([LINK_COLUMN])?;
            writer.flush()?;
        }

        Ok(Self { writer })
    }

    /// Appends one link and flushes it to disk
    pub fn append(&mut self, url: &str) -> SinkResult<()> {
        self.writer.write_record([url])?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads the item URL list from a link CSV
///
/// Fails when the file is unreadable or lacks the URL column; the
/// caller decides whether to fall back to [`FALLBACK_LINKS`].
pub fn read_link_list(path: &Path) -> SinkResult<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;

    let column = reader
        .headers()?
        .iter()
        .position(|name| name == LINK_COLUMN)
        .ok_or_else(|| SinkError::MissingColumn(LINK_COLUMN.to_string()))?;

    let mut urls = Vec::new();
    for row in reader.records() {
        let row = row?;
        if let Some(url) = row.get(column) {
            if !url.is_empty() {
                urls.push(url.to_string());
            }
        }
    }

    Ok(urls)
}
