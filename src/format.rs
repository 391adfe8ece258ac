//! Formatting & Lookup Helpers
//!
//! Pure presentation functions for car properties: prices, mileage,
//! engine and warranty text, car age, and color swatches.

use std::sync::OnceLock;

use regex::Regex;

pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_COLOR: &str = "#6b7280";

/// Exact (lowercase) marketing color names
const EXACT_COLORS: &[(&str, &str)] = &[
    ("crystal white", "#ffffff"),
    ("midnight black", "#000000"),
    ("metallic silver", "#c0c0c0"),
    ("electric blue", "#2563eb"),
    ("jet black", "#000000"),
    ("alpine white", "#ffffff"),
    ("mineral gray", "#6b7280"),
    ("red multi-coat", "#dc2626"),
    ("pearl white", "#f8fafc"),
    ("solid black", "#000000"),
    ("deep blue metallic", "#1e40af"),
    ("iridium silver", "#c0c0c0"),
    ("obsidian black", "#000000"),
    ("polar white", "#ffffff"),
    ("sky blue mica", "#0ea5e9"),
    ("crystal white pearl", "#f8fafc"),
    ("meteor gray mica", "#6b7280"),
];

/// Substring fallbacks; first match wins, so order matters
const BASIC_COLORS: &[(&str, &str)] = &[
    ("red", "#dc2626"),
    ("blue", "#2563eb"),
    ("green", "#16a34a"),
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("silver", "#c0c0c0"),
    ("gray", "#6b7280"),
    ("grey", "#6b7280"),
    ("yellow", "#eab308"),
    ("orange", "#ea580c"),
    ("purple", "#9333ea"),
    ("brown", "#92400e"),
];

/// CSS color for a color name
pub fn color_value(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if let Some((_, hex)) = EXACT_COLORS.iter().find(|(n, _)| *n == lower) {
        return *hex;
    }
    BASIC_COLORS
        .iter()
        .find(|(basic, _)| lower.contains(basic))
        .map(|(_, hex)| *hex)
        .unwrap_or(DEFAULT_COLOR)
}

/// Insert thousands separators into an integer string (`-1000` -> `-1,000`)
fn group_digits(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}", sign, out)
}

/// Grouped number with a fixed number of decimals.
/// Ties round away from zero; `{:.N}` alone would round them to even.
fn grouped_fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    let text = format!("{:.*}", decimals, rounded);
    match text.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group_digits(int), frac),
        None => group_digits(&text),
    }
}

/// Grouped number with up to three decimals, trailing zeros dropped
fn grouped(value: f64) -> String {
    let text = grouped_fixed(value, 3);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

/// Round half away from zero and drop the fraction
fn whole(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// `$500`, `$2,500`, `$15K`, `$1.5M`
pub fn format_price(price: f64) -> String {
    if price >= 1_000_000.0 {
        format!("${}M", grouped_fixed(price / 1_000_000.0, 1))
    } else if price >= 10_000.0 {
        format!("${}K", whole(price / 1_000.0))
    } else {
        format!("${}", grouped(price))
    }
}

/// `5,000 km`, `250K km`
pub fn format_mileage(mileage: f64) -> String {
    if mileage >= 100_000.0 {
        format!("{}K km", whole(mileage / 1_000.0))
    } else {
        format!("{} km", grouped(mileage))
    }
}

fn engine_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"\bI4\b", "Inline-4"),
            (r"\bI6\b", "Inline-6"),
            (r"(?i)\bTurbo\b", "Turbo"),
            (r"(?i)\bElectric Motor\b", "Electric"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
        .collect()
    })
}

/// Expand cylinder shorthand and normalize motor names
pub fn format_engine(engine: &str) -> String {
    engine_rules()
        .iter()
        .fold(engine.to_string(), |text, (re, replacement)| re.replace_all(&text, *replacement).into_owned())
}

fn warranty_patterns() -> Option<&'static (Regex, Regex)> {
    static PATTERNS: OnceLock<Option<(Regex, Regex)>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| Some((Regex::new(r"(\d+)\s*year").ok()?, Regex::new(r"(\d+[,.]?\d*)\s*km").ok()?)))
        .as_ref()
}

/// `No warranty`, `N years / K km`, or the text unchanged
pub fn format_warranty(warranty: &str) -> String {
    let lower = warranty.to_lowercase();
    if lower.contains("no warranty") || lower.contains("as-is") {
        return "No warranty".to_string();
    }

    if let Some((years_re, km_re)) = warranty_patterns() {
        let years = years_re.captures(warranty).and_then(|c| c.get(1));
        let km = km_re.captures(warranty).and_then(|c| c.get(1));
        if let (Some(years), Some(km)) = (years, km) {
            return format!("{} years / {} km", years.as_str(), km.as_str());
        }
    }
    warranty.to_string()
}

/// Zero consumption means an electric car
pub fn format_fuel_consumption(consumption: f64) -> String {
    if consumption == 0.0 {
        "Electric".to_string()
    } else {
        format!("{} L/100km", consumption)
    }
}

pub fn format_age(year: i32, current_year: i32) -> String {
    match current_year - year {
        0 => "Brand New".to_string(),
        1 => "1 year old".to_string(),
        age => format!("{} years old", age),
    }
}

pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

/// Cut at the last space before `max_len` and append an ellipsis
pub fn truncate_description(description: &str, max_len: usize) -> String {
    if description.chars().count() <= max_len {
        return description.to_string();
    }
    let truncated: String = description.chars().take(max_len).collect();
    match truncated.rfind(' ') {
        Some(space) if space > 0 => format!("{}...", &truncated[..space]),
        _ => format!("{}...", truncated),
    }
}

pub fn short_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    format!("{}...", text.chars().take(max_len).collect::<String>())
}

/// Property kinds understood by [`display_property`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarProperty {
    Description { max_len: usize },
    Price,
    Mileage,
    Engine,
    Warranty,
    FuelConsumption,
    Year,
    ShortText { max_len: usize },
    Plain,
}

impl CarProperty {
    pub const DESCRIPTION: CarProperty = CarProperty::Description { max_len: 150 };
    pub const SHORT_TEXT: CarProperty = CarProperty::ShortText { max_len: 30 };
}

/// A raw property value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for PropertyValue<'a> {
    fn from(text: &'a str) -> Self {
        PropertyValue::Text(text)
    }
}

impl<'a> From<&'a String> for PropertyValue<'a> {
    fn from(text: &'a String) -> Self {
        PropertyValue::Text(text)
    }
}

impl From<f64> for PropertyValue<'_> {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<u32> for PropertyValue<'_> {
    fn from(n: u32) -> Self {
        PropertyValue::Number(n as f64)
    }
}

impl From<i32> for PropertyValue<'_> {
    fn from(n: i32) -> Self {
        PropertyValue::Number(n as f64)
    }
}

/// Format an optional property; missing or empty values render as `N/A`.
/// Kind/value mismatches fall back to the plain value.
pub fn display_property(value: Option<PropertyValue<'_>>, kind: CarProperty) -> String {
    display_property_at(value, kind, current_year())
}

fn display_property_at(value: Option<PropertyValue<'_>>, kind: CarProperty, year_now: i32) -> String {
    let value = match value {
        None | Some(PropertyValue::Text("")) => return NOT_AVAILABLE.to_string(),
        Some(value) => value,
    };

    match (kind, value) {
        (CarProperty::Description { max_len }, PropertyValue::Text(t)) => truncate_description(t, max_len),
        (CarProperty::ShortText { max_len }, PropertyValue::Text(t)) => short_text(t, max_len),
        (CarProperty::Engine, PropertyValue::Text(t)) => format_engine(t),
        (CarProperty::Warranty, PropertyValue::Text(t)) => format_warranty(t),
        (CarProperty::Price, PropertyValue::Number(n)) => format_price(n),
        (CarProperty::Mileage, PropertyValue::Number(n)) => format_mileage(n),
        (CarProperty::FuelConsumption, PropertyValue::Number(n)) => format_fuel_consumption(n),
        (CarProperty::Year, PropertyValue::Number(n)) => format_age(n as i32, year_now),
        (_, PropertyValue::Text(t)) => t.to_string(),
        (_, PropertyValue::Number(n)) => format!("{}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_value() {
        assert_eq!(color_value("dark red"), "#dc2626");
        assert_eq!(color_value("electric blue"), "#2563eb");
        assert_eq!(color_value("Electric Blue"), "#2563eb");
        assert_eq!(color_value("chartreuse"), "#6b7280");
        assert_eq!(color_value("Pearl White"), "#f8fafc");
        // "red" precedes "blue" in the basic table
        assert_eq!(color_value("reddish blue"), "#dc2626");
        assert_eq!(color_value("Dark Grey"), "#6b7280");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "$0");
        assert_eq!(format_price(500.0), "$500");
        assert_eq!(format_price(2500.0), "$2,500");
        assert_eq!(format_price(15000.0), "$15K");
        assert_eq!(format_price(85000.0), "$85K");
        assert_eq!(format_price(1500000.0), "$1.5M");
        assert_eq!(format_price(2500000.0), "$2.5M");
        assert_eq!(format_price(5000000.0), "$5.0M");
        assert_eq!(format_price(999999999.0), "$1,000.0M");
        assert_eq!(format_price(-1000.0), "$-1,000");
        assert_eq!(format_price(45000.0), "$45K");
    }

    #[test]
    fn test_format_price_rounds_ties_away_from_zero() {
        assert_eq!(format_price(1_250_000.0), "$1.3M");
        assert_eq!(format_price(1_350_000.0), "$1.4M");
        assert_eq!(format_price(2.0625), "$2.063");
        assert_eq!(format_price(-2.0625), "$-2.063");
        assert_eq!(format_price(12_500.0), "$13K");
    }

    #[test]
    fn test_format_mileage() {
        assert_eq!(format_mileage(0.0), "0 km");
        assert_eq!(format_mileage(5000.0), "5,000 km");
        assert_eq!(format_mileage(15000.0), "15,000 km");
        assert_eq!(format_mileage(100000.0), "100K km");
        assert_eq!(format_mileage(250000.0), "250K km");
        assert_eq!(format_mileage(500000.0), "500K km");
        assert_eq!(format_mileage(-5000.0), "-5,000 km");
    }

    #[test]
    fn test_format_engine() {
        assert_eq!(format_engine("2.0L I4 Turbo"), "2.0L Inline-4 Turbo");
        assert_eq!(format_engine("3.0L I6"), "3.0L Inline-6");
        assert_eq!(format_engine("3.0L V6"), "3.0L V6");
        assert_eq!(format_engine("5.0L V8"), "5.0L V8");
        assert_eq!(format_engine("3.0L V6 turbo"), "3.0L V6 Turbo");
        assert_eq!(format_engine("Electric Motor"), "Electric");
        assert_eq!(format_engine("electric motor"), "Electric");
        assert_eq!(format_engine("1.8L 4-cylinder"), "1.8L 4-cylinder");
    }

    #[test]
    fn test_format_warranty() {
        assert_eq!(format_warranty("No warranty"), "No warranty");
        assert_eq!(format_warranty("As-is condition"), "No warranty");
        assert_eq!(format_warranty("AS-IS"), "No warranty");
        assert_eq!(format_warranty("3 years / 100,000 km"), "3 years / 100,000 km");
        assert_eq!(format_warranty("5 year 160000 km warranty"), "5 years / 160000 km");
        assert_eq!(format_warranty("Lifetime powertrain"), "Lifetime powertrain");
    }

    #[test]
    fn test_format_fuel_consumption() {
        assert_eq!(format_fuel_consumption(0.0), "Electric");
        assert_eq!(format_fuel_consumption(8.5), "8.5 L/100km");
        assert_eq!(format_fuel_consumption(12.2), "12.2 L/100km");
        assert_eq!(format_fuel_consumption(7.0), "7 L/100km");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(2025, 2025), "Brand New");
        assert_eq!(format_age(2024, 2025), "1 year old");
        assert_eq!(format_age(2021, 2025), "4 years old");
        assert_eq!(format_age(2011, 2025), "14 years old");
    }

    #[test]
    fn test_truncate_description() {
        let short = "A reliable sedan";
        assert_eq!(truncate_description(short, 50), short);

        let long = "This is a very long description that keeps going well past the limit";
        let result = truncate_description(long, 20);
        assert_eq!(result, "This is a very long...");
        assert!(result.len() <= 23);

        let no_spaces = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(truncate_description(no_spaces, 5), "abcde...");
    }

    #[test]
    fn test_short_text() {
        assert_eq!(short_text("short", 20), "short");
        let result = short_text("The quick brown fox jumps over the lazy dog", 25);
        assert_eq!(result.len(), 28);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_display_property() {
        assert_eq!(display_property(None, CarProperty::DESCRIPTION), "N/A");
        assert_eq!(display_property(Some("".into()), CarProperty::Plain), "N/A");
        assert_eq!(display_property(Some(45000.0.into()), CarProperty::Price), "$45K");
        assert_eq!(display_property(Some(15000.0.into()), CarProperty::Mileage), "15,000 km");
        assert_eq!(display_property(Some("3.0L V6 Turbo".into()), CarProperty::Engine), "3.0L V6 Turbo");
        assert_eq!(
            display_property(Some("4 years 100000 km".into()), CarProperty::Warranty),
            "4 years / 100000 km"
        );
        assert_eq!(display_property(Some(9.5.into()), CarProperty::FuelConsumption), "9.5 L/100km");
        assert_eq!(display_property(Some("Automatic".into()), CarProperty::Plain), "Automatic");
        assert_eq!(display_property_at(Some(2019.into()), CarProperty::Year, 2025), "6 years old");
    }
}
