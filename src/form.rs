//! Car Form Model
//!
//! String-backed state for the create/edit form and its conversion to a
//! [`CarDraft`]. Parsing errors and rule violations come back together.

use crate::models::{BodyType, Car, CarDraft, Drivetrain, FuelType};
use crate::validation::{validate_draft, FieldError, Rule};

pub const BRANDS: &[&str] = &[
    "Toyota", "BMW", "Tesla", "Mercedes-Benz", "Mazda", "Audi", "Honda", "Ford", "Volkswagen", "Hyundai",
];
pub const TRANSMISSIONS: &[&str] = &["Manual", "Automatic"];
pub const COLORS: &[&str] = &[
    "White", "Black", "Silver", "Gray", "Red", "Blue", "Green", "Yellow", "Orange", "Purple", "Brown",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Brand,
    Model,
    Year,
    Color,
    Price,
    Mileage,
    FuelType,
    Transmission,
    Engine,
    Horsepower,
    Acceleration,
    BodyType,
    Doors,
    Seats,
    Drivetrain,
    FuelConsumption,
    Co2Emission,
    Description,
    Warranty,
    ImageUrl,
    Features,
    ColorOptions,
    Gallery,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Brand => "Brand",
            Field::Model => "Model",
            Field::Year => "Year",
            Field::Color => "Color",
            Field::Price => "Price ($)",
            Field::Mileage => "Mileage (km)",
            Field::FuelType => "Fuel Type",
            Field::Transmission => "Transmission",
            Field::Engine => "Engine",
            Field::Horsepower => "Horsepower",
            Field::Acceleration => "0-100 km/h (s)",
            Field::BodyType => "Body Type",
            Field::Doors => "Doors",
            Field::Seats => "Seats",
            Field::Drivetrain => "Drivetrain",
            Field::FuelConsumption => "Fuel Consumption (L/100km)",
            Field::Co2Emission => "CO2 Emission (g/km)",
            Field::Description => "Description",
            Field::Warranty => "Warranty",
            Field::ImageUrl => "Main Image URL",
            Field::Features => "Features (one per line)",
            Field::ColorOptions => "Color Options (one per line)",
            Field::Gallery => "Gallery Images (one per line)",
        }
    }

    /// Wire name, matching [`FieldError::field`]
    pub fn key(&self) -> &'static str {
        match self {
            Field::Brand => "brand",
            Field::Model => "model",
            Field::Year => "year",
            Field::Color => "color",
            Field::Price => "price",
            Field::Mileage => "mileage",
            Field::FuelType => "fuelType",
            Field::Transmission => "transmission",
            Field::Engine => "engine",
            Field::Horsepower => "horsepower",
            Field::Acceleration => "acceleration",
            Field::BodyType => "bodyType",
            Field::Doors => "doors",
            Field::Seats => "seats",
            Field::Drivetrain => "drivetrain",
            Field::FuelConsumption => "fuelConsumption",
            Field::Co2Emission => "co2Emission",
            Field::Description => "description",
            Field::Warranty => "warranty",
            Field::ImageUrl => "imageUrl",
            Field::Features => "features",
            Field::ColorOptions => "colorOptions",
            Field::Gallery => "gallery",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::Year
                | Field::Price
                | Field::Mileage
                | Field::Horsepower
                | Field::Acceleration
                | Field::Doors
                | Field::Seats
                | Field::FuelConsumption
                | Field::Co2Emission
        )
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Field::Description | Field::Features | Field::ColorOptions | Field::Gallery)
    }

    /// Fixed choices for select inputs
    pub fn options(&self) -> Option<Vec<&'static str>> {
        match self {
            Field::Brand => Some(BRANDS.to_vec()),
            Field::Color => Some(COLORS.to_vec()),
            Field::Transmission => Some(TRANSMISSIONS.to_vec()),
            Field::FuelType => Some(FuelType::ALL.iter().map(|f| f.as_str()).collect()),
            Field::BodyType => Some(BodyType::ALL.iter().map(|b| b.as_str()).collect()),
            Field::Drivetrain => Some(Drivetrain::ALL.iter().map(|d| d.as_str()).collect()),
            _ => None,
        }
    }
}

/// Raw form input, one string per field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarForm {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub price: String,
    pub mileage: String,
    pub fuel_type: String,
    pub transmission: String,
    pub engine: String,
    pub horsepower: String,
    pub acceleration: String,
    pub body_type: String,
    pub doors: String,
    pub seats: String,
    pub drivetrain: String,
    pub fuel_consumption: String,
    pub co2_emission: String,
    pub description: String,
    pub warranty: String,
    pub image_url: String,
    pub features: String,
    pub color_options: String,
    pub gallery: String,
    pub is_new: bool,
}

fn opt_num<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn lines(items: &[String]) -> String {
    items.join("\n")
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect()
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl CarForm {
    /// Blank form for a new car, defaulting the year
    pub fn new(current_year: i32) -> Self {
        Self { year: current_year.to_string(), ..Default::default() }
    }

    pub fn from_car(car: &Car) -> Self {
        let d = &car.data;
        Self {
            brand: d.brand.clone(),
            model: d.model.clone(),
            year: d.year.to_string(),
            color: d.color.clone(),
            price: d.price.to_string(),
            mileage: opt_num(d.mileage),
            fuel_type: d.fuel_type.map(|f| f.as_str().to_string()).unwrap_or_default(),
            transmission: d.transmission.clone().unwrap_or_default(),
            engine: d.engine.clone().unwrap_or_default(),
            horsepower: opt_num(d.horsepower),
            acceleration: opt_num(d.acceleration),
            body_type: d.body_type.map(|b| b.as_str().to_string()).unwrap_or_default(),
            doors: opt_num(d.doors),
            seats: opt_num(d.seats),
            drivetrain: d.drivetrain.map(|x| x.as_str().to_string()).unwrap_or_default(),
            fuel_consumption: opt_num(d.fuel_consumption),
            co2_emission: opt_num(d.co2_emission),
            description: d.description.clone().unwrap_or_default(),
            warranty: d.warranty.clone().unwrap_or_default(),
            image_url: d.image_url.clone().unwrap_or_default(),
            features: lines(&d.features),
            color_options: lines(&d.color_options),
            gallery: lines(&d.gallery),
            is_new: d.is_new.unwrap_or(false),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Brand => &self.brand,
            Field::Model => &self.model,
            Field::Year => &self.year,
            Field::Color => &self.color,
            Field::Price => &self.price,
            Field::Mileage => &self.mileage,
            Field::FuelType => &self.fuel_type,
            Field::Transmission => &self.transmission,
            Field::Engine => &self.engine,
            Field::Horsepower => &self.horsepower,
            Field::Acceleration => &self.acceleration,
            Field::BodyType => &self.body_type,
            Field::Doors => &self.doors,
            Field::Seats => &self.seats,
            Field::Drivetrain => &self.drivetrain,
            Field::FuelConsumption => &self.fuel_consumption,
            Field::Co2Emission => &self.co2_emission,
            Field::Description => &self.description,
            Field::Warranty => &self.warranty,
            Field::ImageUrl => &self.image_url,
            Field::Features => &self.features,
            Field::ColorOptions => &self.color_options,
            Field::Gallery => &self.gallery,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Brand => &mut self.brand,
            Field::Model => &mut self.model,
            Field::Year => &mut self.year,
            Field::Color => &mut self.color,
            Field::Price => &mut self.price,
            Field::Mileage => &mut self.mileage,
            Field::FuelType => &mut self.fuel_type,
            Field::Transmission => &mut self.transmission,
            Field::Engine => &mut self.engine,
            Field::Horsepower => &mut self.horsepower,
            Field::Acceleration => &mut self.acceleration,
            Field::BodyType => &mut self.body_type,
            Field::Doors => &mut self.doors,
            Field::Seats => &mut self.seats,
            Field::Drivetrain => &mut self.drivetrain,
            Field::FuelConsumption => &mut self.fuel_consumption,
            Field::Co2Emission => &mut self.co2_emission,
            Field::Description => &mut self.description,
            Field::Warranty => &mut self.warranty,
            Field::ImageUrl => &mut self.image_url,
            Field::Features => &mut self.features,
            Field::ColorOptions => &mut self.color_options,
            Field::Gallery => &mut self.gallery,
        };
        *slot = value;
    }

    /// Parse and validate. Empty optional fields become `None`.
    pub fn to_draft(&self, current_year: i32) -> Result<CarDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        fn parse<T: std::str::FromStr>(field: Field, text: &str, errors: &mut Vec<FieldError>) -> Option<T> {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            match text.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    errors.push(FieldError { field: field.key().to_string(), rule: Rule::InvalidFormat });
                    None
                }
            }
        }

        let year = parse::<i32>(Field::Year, &self.year, &mut errors);
        let price = parse::<f64>(Field::Price, &self.price, &mut errors);
        if self.year.trim().is_empty() {
            errors.push(FieldError { field: Field::Year.key().to_string(), rule: Rule::Required });
        }
        if self.price.trim().is_empty() {
            errors.push(FieldError { field: Field::Price.key().to_string(), rule: Rule::Required });
        }

        let draft = CarDraft {
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year: year.unwrap_or_default(),
            color: self.color.trim().to_string(),
            price: price.unwrap_or_default(),
            image_url: non_empty(&self.image_url),
            gallery: split_lines(&self.gallery),
            mileage: parse(Field::Mileage, &self.mileage, &mut errors),
            fuel_type: FuelType::parse(self.fuel_type.trim()),
            transmission: non_empty(&self.transmission),
            engine: non_empty(&self.engine),
            description: non_empty(&self.description),
            features: split_lines(&self.features),
            body_type: BodyType::parse(self.body_type.trim()),
            doors: parse(Field::Doors, &self.doors, &mut errors),
            seats: parse(Field::Seats, &self.seats, &mut errors),
            drivetrain: Drivetrain::parse(self.drivetrain.trim()),
            color_options: split_lines(&self.color_options),
            fuel_consumption: parse(Field::FuelConsumption, &self.fuel_consumption, &mut errors),
            co2_emission: parse(Field::Co2Emission, &self.co2_emission, &mut errors),
            warranty: non_empty(&self.warranty),
            is_new: Some(self.is_new),
            horsepower: parse(Field::Horsepower, &self.horsepower, &mut errors),
            acceleration: parse(Field::Acceleration, &self.acceleration, &mut errors),
        };

        // Rule checks only make sense once every number parsed
        if !errors.is_empty() {
            return Err(errors);
        }
        validate_draft(&draft, current_year)?;
        Ok(draft)
    }
}

/// First error message for a field, if any
pub fn error_for(errors: &[FieldError], field: Field) -> Option<String> {
    let key = field.key();
    errors
        .iter()
        .find(|e| e.field == key || e.field.starts_with(&format!("{}[", key)))
        .map(|e| e.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CarForm {
        CarForm {
            brand: "Honda".to_string(),
            model: "Civic".to_string(),
            year: "2023".to_string(),
            color: "Blue".to_string(),
            price: "25000".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_form_converts() {
        let draft = filled().to_draft(2025).unwrap();
        assert_eq!(draft.brand, "Honda");
        assert_eq!(draft.year, 2023);
        assert_eq!(draft.price, 25000.0);
        assert_eq!(draft.mileage, None);
        assert_eq!(draft.fuel_type, None);
        assert!(draft.gallery.is_empty());
        assert_eq!(draft.is_new, Some(false));
    }

    #[test]
    fn test_lists_and_enums() {
        let form = CarForm {
            fuel_type: "Hybrid".to_string(),
            body_type: "SUV".to_string(),
            drivetrain: "AWD".to_string(),
            gallery: "assets/images/a.png\n\n  assets/images/b.png  \n".to_string(),
            features: "Bluetooth\nNavigation".to_string(),
            ..filled()
        };
        let draft = form.to_draft(2025).unwrap();
        assert_eq!(draft.fuel_type, Some(FuelType::Hybrid));
        assert_eq!(draft.body_type, Some(BodyType::Suv));
        assert_eq!(draft.drivetrain, Some(Drivetrain::Awd));
        assert_eq!(draft.gallery, vec!["assets/images/a.png", "assets/images/b.png"]);
        assert_eq!(draft.features.len(), 2);
    }

    #[test]
    fn test_unparseable_numbers() {
        let form = CarForm { price: "cheap".to_string(), doors: "4.5".to_string(), ..filled() };
        let errors = form.to_draft(2025).unwrap_err();
        assert_eq!(error_for(&errors, Field::Price).as_deref(), Some("Invalid format"));
        assert_eq!(error_for(&errors, Field::Doors).as_deref(), Some("Invalid format"));
        assert_eq!(error_for(&errors, Field::Brand), None);
    }

    #[test]
    fn test_nan_price_is_rejected() {
        let form = CarForm { price: "NaN".to_string(), acceleration: "inf".to_string(), ..filled() };
        let errors = form.to_draft(2025).unwrap_err();
        assert_eq!(error_for(&errors, Field::Price).as_deref(), Some("Invalid format"));
        assert_eq!(error_for(&errors, Field::Acceleration).as_deref(), Some("Invalid format"));
    }

    #[test]
    fn test_rule_violations_surface() {
        let form = CarForm { brand: String::new(), year: "1980".to_string(), ..filled() };
        let errors = form.to_draft(2025).unwrap_err();
        assert_eq!(error_for(&errors, Field::Brand).as_deref(), Some("This field is required"));
        assert_eq!(error_for(&errors, Field::Year).as_deref(), Some("Minimum value is 1990"));
    }

    #[test]
    fn test_missing_required_numbers() {
        let form = CarForm { price: "  ".to_string(), ..filled() };
        let errors = form.to_draft(2025).unwrap_err();
        assert_eq!(error_for(&errors, Field::Price).as_deref(), Some("This field is required"));
    }

    #[test]
    fn test_from_car_round_trip() {
        let draft = CarForm {
            mileage: "15000".to_string(),
            engine: "2.0L I4".to_string(),
            gallery: "assets/images/a.png".to_string(),
            ..filled()
        }
        .to_draft(2025)
        .unwrap();
        let car = Car::new(3, draft.clone());

        let form = CarForm::from_car(&car);
        assert_eq!(form.get(Field::Mileage), "15000");
        assert_eq!(form.to_draft(2025).unwrap(), draft);
    }

    #[test]
    fn test_set_and_get() {
        let mut form = CarForm::new(2025);
        assert_eq!(form.get(Field::Year), "2025");
        form.set(Field::Warranty, "3 years".to_string());
        assert_eq!(form.warranty, "3 years");
    }

    #[test]
    fn test_gallery_error_maps_to_field() {
        let form = CarForm { gallery: "assets/images/a.png\nbad".to_string(), ..filled() };
        let errors = form.to_draft(2025).unwrap_err();
        assert!(error_for(&errors, Field::Gallery).is_some());
    }
}
