//! Stage two: structured field extraction from item pages
//!
//! Populates a [`PropertyRecord`] through cascading strategies: primary
//! selectors, spec-table label classification, secondary selectors,
//! regex fallbacks over page text, and project-name derivation from the
//! URL. Missing elements leave empty-string defaults; no step ever
//! fails the whole extraction.

mod record;
mod rules;

pub use record::{PropertyRecord, FIELD_COUNT, FIELD_NAMES};
pub use rules::{classify, LabelRule, SpecField, LABEL_RULES};

use crate::render::DocumentView;
use regex::Regex;

/// Elements whose presence means an item page has finished loading
pub const ITEM_READY_SELECTORS: &[&str] = &["div.re__pr-title", "h1.re__pr-title"];

const TITLE_SELECTORS: &[&str] = &["div.re__pr-title h1", "h1.re__pr-title"];
const PRICE_SELECTORS: &[&str] = &[
    "span.re__pr-title-price-value",
    "div.re__pr-title-price-value",
];
const AREA_SELECTORS: &[&str] = &[
    "span.re__pr-title-area-value",
    "div.re__pr-title-area-value",
];

const SPEC_ITEM_SELECTOR: &str = "div.re__pr-specs-content-item";
const SPEC_LABEL_SELECTOR: &str = "div.re__pr-specs-content-item-label";
const SPEC_VALUE_SELECTOR: &str = "div.re__pr-specs-content-item-value";

const SHORT_INFO_ITEM_SELECTOR: &str = "div.re__pr-short-info-item";
const SHORT_INFO_LABEL_SELECTOR: &str = "span.title";
const SHORT_INFO_VALUE_SELECTOR: &str = "span.value";

const ADDRESS_SELECTORS: &[&str] = &[
    "div.re__pr-short-info span.re__pr-short-info-address",
    "span.re__pr-short-info-address",
];
const DESCRIPTION_SELECTORS: &[&str] = &["div.re__pr-description", "div.re__section-description"];
const CONTACT_NAME_SELECTORS: &[&str] = &["div.re__contact-name", "div.re__contact-info-name"];
const CONTACT_PHONE_SELECTORS: &[&str] = &["div.re__btn-phone-mobile", "div.re__btn-phone"];

/// Extracts a fully-populated record from a rendered item page
pub struct FieldExtractor {
    bedroom_pattern: Regex,
    bathroom_pattern: Regex,
    project_pattern: Regex,
}

impl FieldExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            bedroom_pattern: Regex::new(r"(\d+)\s*phòng ngủ")?,
            bathroom_pattern: Regex::new(r"(\d+)\s*(?:phòng tắm|vệ sinh)")?,
            project_pattern: Regex::new(r"prj-([^/]+)")?,
        })
    }

    /// Populates a record from the page; never fails
    ///
    /// The url field is set first, unconditionally, so the caller gets
    /// a usable row even when every other strategy comes up empty.
    pub fn extract(&self, doc: &DocumentView, url: &str) -> PropertyRecord {
        let mut record = PropertyRecord::for_url(url);

        self.apply_primary_fields(doc, &mut record);
        self.apply_spec_items(doc, &mut record);
        self.apply_short_info(doc, &mut record);
        self.apply_secondary_fields(doc, &mut record);
        self.apply_text_fallbacks(doc, &mut record);
        self.apply_url_project(url, &mut record);

        record
    }

    fn apply_primary_fields(&self, doc: &DocumentView, record: &mut PropertyRecord) {
        record.title = find_text(doc, TITLE_SELECTORS, "title");
        record.price = find_text(doc, PRICE_SELECTORS, "price");
        record.area = find_text(doc, AREA_SELECTORS, "area");
    }

    /// Walks the spec table, classifying each label/value pair
    ///
    /// A malformed item (missing label or value) is skipped; the rest of
    /// the table is still processed.
    fn apply_spec_items(&self, doc: &DocumentView, record: &mut PropertyRecord) {
        for item in doc.find_all(SPEC_ITEM_SELECTOR) {
            let Some(label_el) = DocumentView::find_in(item, SPEC_LABEL_SELECTOR) else {
                tracing::debug!("Spec item without a label, skipping");
                continue;
            };
            let Some(value_el) = DocumentView::find_in(item, SPEC_VALUE_SELECTOR) else {
                tracing::debug!("Spec item without a value, skipping");
                continue;
            };

            let label = DocumentView::text_of(label_el);
            if let Some(field) = rules::classify(&label) {
                record.set_spec(field, DocumentView::text_of(value_el));
            }
        }
    }

    /// Reads the short-info strip (area, price per m², posted date)
    fn apply_short_info(&self, doc: &DocumentView, record: &mut PropertyRecord) {
        for item in doc.find_all(SHORT_INFO_ITEM_SELECTOR) {
            let Some(label_el) = DocumentView::find_in(item, SHORT_INFO_LABEL_SELECTOR) else {
                continue;
            };
            let Some(value_el) = DocumentView::find_in(item, SHORT_INFO_VALUE_SELECTOR) else {
                continue;
            };

            let label = DocumentView::text_of(label_el).to_lowercase();
            let value = DocumentView::text_of(value_el);

            if label.contains("giá/m") {
                record.price_per_sqm = value;
            } else if label.contains("ngày đăng") {
                record.posted_date = value;
            } else if label.contains("diện tích") && record.area.is_empty() {
                record.area = value;
            }
        }
    }

    fn apply_secondary_fields(&self, doc: &DocumentView, record: &mut PropertyRecord) {
        record.address = find_text(doc, ADDRESS_SELECTORS, "address");
        record.description = find_text(doc, DESCRIPTION_SELECTORS, "description");
        record.contact_name = find_text(doc, CONTACT_NAME_SELECTORS, "contact name");
        record.contact_phone = find_text(doc, CONTACT_PHONE_SELECTORS, "contact phone");
    }

    /// Regex fallback over the whole page text for bedrooms/bathrooms
    fn apply_text_fallbacks(&self, doc: &DocumentView, record: &mut PropertyRecord) {
        if record.bedrooms.is_empty() || record.bathrooms.is_empty() {
            let text = doc.full_text();

            if record.bedrooms.is_empty() {
                if let Some(n) = first_capture(&self.bedroom_pattern, &text) {
                    tracing::debug!("Bedrooms recovered from page text");
                    record.bedrooms = n;
                }
            }

            if record.bathrooms.is_empty() {
                if let Some(n) = first_capture(&self.bathroom_pattern, &text) {
                    tracing::debug!("Bathrooms recovered from page text");
                    record.bathrooms = n;
                }
            }
        }
    }

    /// Derives a human-readable project name from the URL slug
    fn apply_url_project(&self, url: &str, record: &mut PropertyRecord) {
        if !record.project.is_empty() {
            return;
        }

        if let Some(captures) = self.project_pattern.captures(url) {
            if let Some(slug) = captures.get(1) {
                record.project = title_case(&slug.as_str().replace('-', " "));
            }
        }
    }
}

fn find_text(doc: &DocumentView, selectors: &[&str], what: &str) -> String {
    match doc.find_first(selectors) {
        Some(element) => DocumentView::text_of(element),
        None => {
            tracing::debug!("{} not found", what);
            String::new()
        }
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

fn title_case(words: &str) -> String {
    words
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new().unwrap()
    }

    const FULL_PAGE: &str = r#"
        <html><body>
          <div class="re__pr-title"><h1>Bán nhà riêng quận 7</h1></div>
          <span class="re__pr-title-price-value">5,2 tỷ</span>
          <span class="re__pr-title-area-value">80 m²</span>
          <div class="re__pr-short-info">
            <div class="re__pr-short-info-item">
              <span class="title">Giá/m²</span><span class="value">65 tr/m²</span>
            </div>
            <div class="re__pr-short-info-item">
              <span class="title">Ngày đăng</span><span class="value">01/04/2025</span>
            </div>
            <span class="re__pr-short-info-address">Đường Nguyễn Thị Thập, Quận 7</span>
          </div>
          <div class="re__pr-specs-content-item">
            <div class="re__pr-specs-content-item-label">Số phòng ngủ</div>
            <div class="re__pr-specs-content-item-value">3</div>
          </div>
          <div class="re__pr-specs-content-item">
            <div class="re__pr-specs-content-item-label">Số phòng vệ sinh</div>
            <div class="re__pr-specs-content-item-value">2</div>
          </div>
          <div class="re__pr-specs-content-item">
            <div class="re__pr-specs-content-item-label">Pháp lý</div>
            <div class="re__pr-specs-content-item-value">Sổ đỏ</div>
          </div>
          <div class="re__pr-description">Nhà đẹp, gần chợ.</div>
          <div class="re__contact-name">Anh Minh</div>
          <div class="re__btn-phone">0901 234 567</div>
        </body></html>
    "#;

    #[test]
    fn test_full_extraction() {
        let doc = DocumentView::parse(FULL_PAGE);
        let record = extractor().extract(&doc, "https://x.vn/ban-nha-pr1");

        assert_eq!(record.title, "Bán nhà riêng quận 7");
        assert_eq!(record.price, "5,2 tỷ");
        assert_eq!(record.area, "80 m²");
        assert_eq!(record.price_per_sqm, "65 tr/m²");
        assert_eq!(record.posted_date, "01/04/2025");
        assert_eq!(record.bedrooms, "3");
        assert_eq!(record.bathrooms, "2");
        assert_eq!(record.legal_status, "Sổ đỏ");
        assert_eq!(record.address, "Đường Nguyễn Thị Thập, Quận 7");
        assert_eq!(record.description, "Nhà đẹp, gần chợ.");
        assert_eq!(record.contact_name, "Anh Minh");
        assert_eq!(record.contact_phone, "0901 234 567");
        assert_eq!(record.url, "https://x.vn/ban-nha-pr1");
    }

    #[test]
    fn test_empty_page_yields_bare_record() {
        let doc = DocumentView::parse("<html><body></body></html>");
        let record = extractor().extract(&doc, "https://x.vn/ban-gone");

        assert_eq!(record.url, "https://x.vn/ban-gone");
        let row = record.as_row();
        assert!(row[..FIELD_COUNT - 1].iter().all(|v| v.is_empty()));
    }

    #[test]
    fn test_bedrooms_regex_fallback_from_body_text() {
        let html = r#"
            <html><body>
              <h1 class="re__pr-title">Bán căn hộ</h1>
              <p>Căn hộ rộng rãi có 3 phòng ngủ và 2 vệ sinh, view sông.</p>
            </body></html>
        "#;
        let doc = DocumentView::parse(html);
        let record = extractor().extract(&doc, "https://x.vn/ban-ch");

        assert_eq!(record.bedrooms, "3");
        assert_eq!(record.bathrooms, "2");
    }

    #[test]
    fn test_spec_table_takes_precedence_over_regex() {
        let html = r#"
            <html><body>
              <div class="re__pr-specs-content-item">
                <div class="re__pr-specs-content-item-label">Số phòng ngủ</div>
                <div class="re__pr-specs-content-item-value">4</div>
              </div>
              <p>quảng cáo nói 9 phòng ngủ</p>
            </body></html>
        "#;
        let doc = DocumentView::parse(html);
        let record = extractor().extract(&doc, "https://x.vn/ban-x");
        assert_eq!(record.bedrooms, "4");
    }

    #[test]
    fn test_malformed_spec_item_does_not_abort_table() {
        let html = r#"
            <html><body>
              <div class="re__pr-specs-content-item">
                <div class="re__pr-specs-content-item-label">Số tầng</div>
              </div>
              <div class="re__pr-specs-content-item">
                <div class="re__pr-specs-content-item-label">Mặt tiền</div>
                <div class="re__pr-specs-content-item-value">5 m</div>
              </div>
            </body></html>
        "#;
        let doc = DocumentView::parse(html);
        let record = extractor().extract(&doc, "https://x.vn/ban-y");
        assert!(record.floors.is_empty());
        assert_eq!(record.facade, "5 m");
    }

    #[test]
    fn test_project_derived_from_url_slug() {
        let doc = DocumentView::parse("<html><body></body></html>");
        let record = extractor().extract(
            &doc,
            "https://x.vn/ban-can-ho-prj-sunshine-green-iconic/can-2-ngu-pr42",
        );
        assert_eq!(record.project, "Sunshine Green Iconic");
    }

    #[test]
    fn test_page_project_beats_url_slug() {
        let html = r#"
            <html><body>
              <div class="re__pr-specs-content-item">
                <div class="re__pr-specs-content-item-label">Dự án</div>
                <div class="re__pr-specs-content-item-value">Vinhomes Wonder City</div>
              </div>
            </body></html>
        "#;
        let doc = DocumentView::parse(html);
        let record = extractor().extract(&doc, "https://x.vn/ban-prj-khac-name/pr1");
        assert_eq!(record.project, "Vinhomes Wonder City");
    }

    #[test]
    fn test_url_without_project_slug_leaves_default() {
        let doc = DocumentView::parse("<html><body></body></html>");
        let record = extractor().extract(&doc, "https://x.vn/ban-dat-xa-giao-phong/pr9");
        assert!(record.project.is_empty());
    }

    #[test]
    fn test_short_info_area_only_fills_gap() {
        let html = r#"
            <html><body>
              <span class="re__pr-title-area-value">80 m²</span>
              <div class="re__pr-short-info-item">
                <span class="title">Diện tích</span><span class="value">79 m²</span>
              </div>
            </body></html>
        "#;
        let doc = DocumentView::parse(html);
        let record = extractor().extract(&doc, "https://x.vn/ban-z");
        assert_eq!(record.area, "80 m²");
    }

    #[test]
    fn test_title_case_helper() {
        assert_eq!(title_case("vinhomes wonder city"), "Vinhomes Wonder City");
        assert_eq!(title_case(""), "");
    }
}
