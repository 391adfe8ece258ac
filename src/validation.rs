//! Car Draft Validation
//!
//! Field rules for the create/edit form, checked before anything is sent
//! to the backend.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::CarDraft;

const IMAGE_PATTERN: &str = r"^(https?://.+|assets/images/.+\.(png|jpg|jpeg|gif|webp))$";
pub const MIN_YEAR: i32 = 1990;

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    ImageUrl,
    InvalidFormat,
}

/// One failed rule. `field` uses the wire name; array entries are `gallery[2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub rule: Rule,
}

impl FieldError {
    fn new(field: impl Into<String>, rule: Rule) -> Self {
        Self { field: field.into(), rule }
    }

    pub fn message(&self) -> String {
        match &self.rule {
            Rule::Required => "This field is required".to_string(),
            Rule::MinLength(n) => format!("Minimum length is {} characters", n),
            Rule::MaxLength(n) => format!("Maximum length is {} characters", n),
            Rule::Min(n) => format!("Minimum value is {}", n),
            Rule::Max(n) => format!("Maximum value is {}", n),
            Rule::InvalidFormat => "Invalid format".to_string(),
            Rule::ImageUrl => {
                "Please enter a valid URL (http://, https://) or local asset path (assets/images/...)".to_string()
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message())
    }
}

fn image_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(IMAGE_PATTERN).ok()).as_ref()
}

pub fn is_valid_image_ref(value: &str) -> bool {
    image_pattern().is_some_and(|re| re.is_match(value))
}

struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, Rule::Required));
        }
    }

    fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min {
            self.errors.push(FieldError::new(field, Rule::MinLength(min)));
        } else if len > max {
            self.errors.push(FieldError::new(field, Rule::MaxLength(max)));
        }
    }

    fn range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) {
        match value {
            Some(v) if !v.is_finite() => self.errors.push(FieldError::new(field, Rule::InvalidFormat)),
            Some(v) if v < min => self.errors.push(FieldError::new(field, Rule::Min(min))),
            Some(v) if v > max => self.errors.push(FieldError::new(field, Rule::Max(max))),
            _ => {}
        }
    }

    fn max_len(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.length(field, value, 0, max);
        }
    }

    fn image(&mut self, field: &str, value: &str) {
        if !value.is_empty() && !is_valid_image_ref(value) {
            self.errors.push(FieldError::new(field, Rule::ImageUrl));
        }
    }
}

/// Validate a draft against the form rules. `current_year` bounds the model year.
pub fn validate_draft(draft: &CarDraft, current_year: i32) -> Result<(), Vec<FieldError>> {
    let mut c = Checker { errors: Vec::new() };

    c.required("brand", &draft.brand);
    if draft.model.trim().is_empty() {
        c.required("model", &draft.model);
    } else {
        c.length("model", &draft.model, 1, 50);
    }
    c.range("year", Some(draft.year as f64), MIN_YEAR as f64, (current_year + 1) as f64);
    c.required("color", &draft.color);
    c.range("price", Some(draft.price), 0.0, 10_000_000.0);

    c.range("mileage", draft.mileage, 0.0, 1_000_000.0);
    c.max_len("engine", draft.engine.as_deref(), 100);
    c.range("horsepower", draft.horsepower.map(f64::from), 0.0, 5000.0);
    c.range("acceleration", draft.acceleration, 0.0, 60.0);
    c.range("doors", draft.doors.map(f64::from), 1.0, 10.0);
    c.range("seats", draft.seats.map(f64::from), 1.0, 20.0);
    c.range("fuelConsumption", draft.fuel_consumption, 0.0, 50.0);
    c.range("co2Emission", draft.co2_emission, 0.0, 1000.0);

    c.max_len("description", draft.description.as_deref(), 1000);
    c.max_len("warranty", draft.warranty.as_deref(), 200);
    if let Some(url) = draft.image_url.as_deref() {
        c.image("imageUrl", url);
    }

    for (i, feature) in draft.features.iter().enumerate() {
        c.length(&format!("features[{}]", i), feature, 0, 100);
    }
    for (i, color) in draft.color_options.iter().enumerate() {
        c.length(&format!("colorOptions[{}]", i), color, 0, 30);
    }
    for (i, image) in draft.gallery.iter().enumerate() {
        c.image(&format!("gallery[{}]", i), image);
    }

    if c.errors.is_empty() {
        Ok(())
    } else {
        Err(c.errors)
    }
}
