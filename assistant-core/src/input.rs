use crate::model::Query;

/// The two user-editable fields and the derived "can submit" flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputController {
    location: String,
    date: String,
}

impl InputController {
    pub fn new(location: impl Into<String>, date: impl Into<String>) -> Self {
        Self { location: location.into(), date: date.into() }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    /// Location is non-blank and the date has the `YYYY-MM-DD` shape.
    pub fn can_submit(&self) -> bool {
        !self.location.trim().is_empty() && is_iso_date_shape(&self.date)
    }

    /// The query to submit, or `None` while submission is not allowed.
    pub fn query(&self) -> Option<Query> {
        self.can_submit().then(|| Query {
            location: self.location.trim().to_string(),
            date: self.date.clone(),
        })
    }
}

/// Purely syntactic: four digits, '-', two digits, '-', two digits.
/// Calendar validity is not checked, so "2024-13-99" passes.
pub fn is_iso_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_location_blocks_submission() {
        assert!(!InputController::new(" ", "2024-01-01").can_submit());
        assert!(!InputController::new("", "2024-01-01").can_submit());
        assert!(!InputController::new("\t\n", "2024-01-01").can_submit());
    }

    #[test]
    fn single_digit_segments_are_rejected() {
        assert!(!InputController::new("Zagreb", "2024-1-1").can_submit());
        assert!(!InputController::new("Zagreb", "24-01-01").can_submit());
    }

    #[test]
    fn well_formed_input_can_submit() {
        assert!(InputController::new("Zagreb", "2024-01-01").can_submit());
        assert!(InputController::new("  Zagreb  ", "2024-01-01").can_submit());
    }

    #[test]
    fn date_shape_is_syntactic_only() {
        assert!(is_iso_date_shape("2024-13-99"));
        assert!(is_iso_date_shape("0000-00-00"));

        assert!(!is_iso_date_shape("2024/01/01"));
        assert!(!is_iso_date_shape("2024-01-01 "));
        assert!(!is_iso_date_shape(" 2024-01-01"));
        assert!(!is_iso_date_shape("2024-01-0a"));
        assert!(!is_iso_date_shape("2024-01-011"));
        assert!(!is_iso_date_shape(""));
        // Non-ASCII digits do not count.
        assert!(!is_iso_date_shape("２０２４-01-01"));
    }

    #[test]
    fn query_trims_location_but_not_date() {
        let input = InputController::new("  Split ", "2025-06-01");
        let query = input.query().expect("input is valid");
        assert_eq!(query.location, "Split");
        assert_eq!(query.date, "2025-06-01");
    }

    #[test]
    fn query_is_none_until_fields_are_valid() {
        let mut input = InputController::default();
        assert!(input.query().is_none());

        input.set_location("Rijeka");
        assert!(input.query().is_none());

        input.set_date("2025-06-01");
        assert!(input.can_submit());
        assert_eq!(input.location(), "Rijeka");
        assert_eq!(input.date(), "2025-06-01");

        input.set_location("   ");
        assert!(!input.can_submit());
    }
}
