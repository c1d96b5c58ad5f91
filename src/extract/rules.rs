//! Label classification for spec-table rows
//!
//! An ordered rule table maps label substrings (case-insensitive) to
//! record fields. The first matching rule wins; unmatched labels are
//! ignored. Note that a bare "WC" label is not matched by the bathroom
//! rule, which requires "phòng tắm" or "vệ sinh" to appear.

/// Record fields that can be filled from the spec table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecField {
    Bedrooms,
    Bathrooms,
    Floors,
    HouseDirection,
    BalconyDirection,
    RoadWidth,
    Facade,
    LegalStatus,
    PropertyType,
    Project,
}

/// One classification rule: any needle present in the lowercased label
/// assigns the value to `field`
pub struct LabelRule {
    pub needles: &'static [&'static str],
    pub field: SpecField,
}

/// The rule table, consulted in order
pub const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        needles: &["phòng ngủ"],
        field: SpecField::Bedrooms,
    },
    LabelRule {
        needles: &["phòng tắm", "vệ sinh"],
        field: SpecField::Bathrooms,
    },
    LabelRule {
        needles: &["số tầng"],
        field: SpecField::Floors,
    },
    LabelRule {
        needles: &["hướng nhà"],
        field: SpecField::HouseDirection,
    },
    LabelRule {
        needles: &["hướng ban công"],
        field: SpecField::BalconyDirection,
    },
    LabelRule {
        needles: &["đường vào", "đường rộng"],
        field: SpecField::RoadWidth,
    },
    LabelRule {
        needles: &["mặt tiền"],
        field: SpecField::Facade,
    },
    LabelRule {
        needles: &["pháp lý"],
        field: SpecField::LegalStatus,
    },
    LabelRule {
        needles: &["loại tin", "loại bds"],
        field: SpecField::PropertyType,
    },
    LabelRule {
        needles: &["dự án"],
        field: SpecField::Project,
    },
];

/// Classifies a spec-table label against the rule table
pub fn classify(label: &str) -> Option<SpecField> {
    let label = label.to_lowercase();
    LABEL_RULES
        .iter()
        .find(|rule| rule.needles.iter().any(|needle| label.contains(needle)))
        .map(|rule| rule.field)
}
