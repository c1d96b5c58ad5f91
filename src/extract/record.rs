//! The fixed-schema property record
//!
//! Every record carries exactly these 20 fields in this order. Absent
//! data is an empty string, never a missing column; `url` is set before
//! any extraction is attempted so even a total failure yields a usable
//! row.

use crate::extract::rules::SpecField;

/// Number of columns in a property record
pub const FIELD_COUNT: usize = 20;

/// Column names, in output order
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "title",
    "price",
    "price_per_sqm",
    "area",
    "bedrooms",
    "bathrooms",
    "floors",
    "house_direction",
    "balcony_direction",
    "road_width",
    "facade",
    "legal_status",
    "property_type",
    "project",
    "address",
    "description",
    "contact_name",
    "contact_phone",
    "posted_date",
    "url",
];

/// One extracted property listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyRecord {
    pub title: String,
    pub price: String,
    pub price_per_sqm: String,
    pub area: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub floors: String,
    pub house_direction: String,
    pub balcony_direction: String,
    pub road_width: String,
    pub facade: String,
    pub legal_status: String,
    pub property_type: String,
    pub project: String,
    pub address: String,
    pub description: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub posted_date: String,
    pub url: String,
}

impl PropertyRecord {
    /// A fresh record with only the source URL populated
    pub fn for_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }

    /// Assigns a value to the field a label rule classified
    pub fn set_spec(&mut self, field: SpecField, value: String) {
        match field {
            SpecField::Bedrooms => self.bedrooms = value,
            SpecField::Bathrooms => self.bathrooms = value,
            SpecField::Floors => self.floors = value,
            SpecField::HouseDirection => self.house_direction = value,
            SpecField::BalconyDirection => self.balcony_direction = value,
            SpecField::RoadWidth => self.road_width = value,
            SpecField::Facade => self.facade = value,
            SpecField::LegalStatus => self.legal_status = value,
            SpecField::PropertyType => self.property_type = value,
            SpecField::Project => self.project = value,
        }
    }

    /// Field values in column order, for the CSV sink
    pub fn as_row(&self) -> [&str; FIELD_COUNT] {
        [
            &self.title,
            &self.price,
            &self.price_per_sqm,
            &self.area,
            &self.bedrooms,
            &self.bathrooms,
            &self.floors,
            &self.house_direction,
            &self.balcony_direction,
            &self.road_width,
            &self.facade,
            &self.legal_status,
            &self.property_type,
            &self.project,
            &self.address,
            &self.description,
            &self.contact_name,
            &self.contact_phone,
            &self.posted_date,
            &self.url,
        ]
    }
}
