//! Static catalog of selectable report types.
//!
//! The backend selects its generation behavior from the label alone;
//! the client passes labels through unmodified and never interprets
//! them.

pub const REPORT_TYPES: &[&str] = &[
    "Summarize Clinical Notes",
    "Explain Medical Terminology",
];

/// Default selection offered to a front end before the user picks one.
pub fn default_report_type() -> &'static str {
    REPORT_TYPES[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_catalog_entry() {
        assert_eq!(default_report_type(), REPORT_TYPES[0]);
    }

    #[test]
    fn catalog_is_non_empty_and_ordered() {
        assert!(!REPORT_TYPES.is_empty());
        assert_eq!(REPORT_TYPES[0], "Summarize Clinical Notes");
    }
}
