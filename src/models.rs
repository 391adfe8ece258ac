//! Frontend Models
//!
//! Data structures matching the catalog backend's JSON payloads.

use serde::{Deserialize, Serialize};

/// Backend-assigned car identifier
pub type CarId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Hatchback,
    Coupe,
    Convertible,
    Wagon,
    Van,
    Truck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drivetrain {
    #[serde(rename = "FWD")]
    Fwd,
    #[serde(rename = "RWD")]
    Rwd,
    #[serde(rename = "AWD")]
    Awd,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [Self::Petrol, Self::Diesel, Self::Electric, Self::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petrol => "Petrol",
            Self::Diesel => "Diesel",
            Self::Electric => "Electric",
            Self::Hybrid => "Hybrid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl BodyType {
    pub const ALL: [BodyType; 8] = [
        Self::Sedan,
        Self::Suv,
        Self::Hatchback,
        Self::Coupe,
        Self::Convertible,
        Self::Wagon,
        Self::Van,
        Self::Truck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedan => "Sedan",
            Self::Suv => "SUV",
            Self::Hatchback => "Hatchback",
            Self::Coupe => "Coupe",
            Self::Convertible => "Convertible",
            Self::Wagon => "Wagon",
            Self::Van => "Van",
            Self::Truck => "Truck",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == s)
    }
}

impl Drivetrain {
    pub const ALL: [Drivetrain; 3] = [Self::Fwd, Self::Rwd, Self::Awd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fwd => "FWD",
            Self::Rwd => "RWD",
            Self::Awd => "AWD",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

/// Car record without an identifier.
///
/// This is the request body for `POST /cars`; the backend assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDraft {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<BodyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drivetrain: Option<Drivetrain>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub color_options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_consumption: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_emission: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horsepower: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<f64>,
}

/// Car data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    #[serde(flatten)]
    pub data: CarDraft,
}

impl Car {
    pub fn new(id: CarId, data: CarDraft) -> Self {
        Self { id, data }
    }

    /// Display title, e.g. "Toyota Corolla"
    pub fn title(&self) -> String {
        format!("{} {}", self.data.brand, self.data.model)
    }

    /// Case-insensitive substring match on brand or model.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.data.brand.to_lowercase().contains(needle)
            || self.data.model.to_lowercase().contains(needle)
    }
}

/// Logged-in user as returned by the auth endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl User {
    /// `name`, else "First Last", else the email
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() { self.email.clone() } else { full }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_car_wire_format_is_flat_camel_case() {
        let value = json!({
            "id": 7,
            "brand": "BMW",
            "model": "X5",
            "year": 2023,
            "color": "Black",
            "price": 55000,
            "imageUrl": "assets/images/bmw-x5-1.png",
            "fuelType": "Diesel",
            "bodyType": "SUV",
            "drivetrain": "AWD",
            "features": ["Leather Seats", "Navigation"],
            "isNew": true
        });

        let car: Car = serde_json::from_value(value).unwrap();
        assert_eq!(car.id, 7);
        assert_eq!(car.data.brand, "BMW");
        assert_eq!(car.data.price, 55000.0);
        assert_eq!(car.data.body_type, Some(BodyType::Suv));
        assert_eq!(car.data.drivetrain, Some(Drivetrain::Awd));
        assert_eq!(car.data.features.len(), 2);
        assert!(car.data.gallery.is_empty());
        assert_eq!(car.data.mileage, None);
    }

    #[test]
    fn test_user_display_name() {
        let user: User =
            serde_json::from_value(json!({"id": 1, "firstName": "John", "lastName": "Doe", "email": "j@d.com"})).unwrap();
        assert_eq!(user.first_name.as_deref(), Some("John"));
        assert_eq!(user.display_name(), "John Doe");

        let named = User { name: Some("Johnny".to_string()), ..user.clone() };
        assert_eq!(named.display_name(), "Johnny");

        let bare = User { id: 2, email: "a@b.c".to_string(), ..Default::default() };
        assert_eq!(bare.display_name(), "a@b.c");
    }

    #[test]
    fn test_draft_omits_absent_fields() {
        let draft = CarDraft {
            brand: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2023,
            color: "Blue".to_string(),
            price: 25000.0,
            ..Default::default()
        };

        let value = serde_json::to_value(&draft).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("gallery"));
    }

    #[test]
    fn test_matches_brand_or_model() {
        let car = Car::new(1, CarDraft {
            brand: "Tesla".to_string(),
            model: "Model 3".to_string(),
            ..Default::default()
        });
        assert!(car.matches("tes"));
        assert!(car.matches("model"));
        assert!(!car.matches("bmw"));
    }

    #[test]
    fn test_enum_parse() {
        assert_eq!(BodyType::parse("SUV"), Some(BodyType::Suv));
        assert_eq!(FuelType::parse("Hybrid"), Some(FuelType::Hybrid));
        assert_eq!(Drivetrain::parse("4WD"), None);
    }
}
