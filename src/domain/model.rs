use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{parse_non_negative_f64, parse_non_negative_u32};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input of one price estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleAttributes {
    pub brand: String,
    pub fuel_type: String,
    pub transmission: String,
    pub mileage: f64,
    pub years_used: f64,
    pub accident_count: u32,
    pub clean_title: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    #[default]
    Sale,
    Trade,
}

impl FromStr for TradeType {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sale" => Ok(TradeType::Sale),
            "trade" => Ok(TradeType::Trade),
            other => Err(AdvisorError::validation(
                "trade_type",
                format!("'{}' is neither 'sale' nor 'trade'", other),
            )),
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Sale => write!(f, "sale"),
            TradeType::Trade => write!(f, "trade"),
        }
    }
}

/// Names of the editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FuelType,
    Transmission,
    Color,
    CleanTitle,
    Mileage,
    Accident,
    Brand,
    YearsUsed,
    Model,
    TradeType,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::FuelType,
        FormField::Transmission,
        FormField::Color,
        FormField::CleanTitle,
        FormField::Mileage,
        FormField::Accident,
        FormField::Brand,
        FormField::YearsUsed,
        FormField::Model,
        FormField::TradeType,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::FuelType => "fuel_type",
            FormField::Transmission => "transmission",
            FormField::Color => "color",
            FormField::CleanTitle => "clean_title",
            FormField::Mileage => "mileage",
            FormField::Accident => "accident",
            FormField::Brand => "brand",
            FormField::YearsUsed => "years_used",
            FormField::Model => "model",
            FormField::TradeType => "trade_type",
        }
    }
}

impl FromStr for FormField {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        FormField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| AdvisorError::validation(s, "unknown form field"))
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Form fields exactly as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub fuel_type: String,
    pub transmission: String,
    pub color: String,
    pub clean_title: String,
    pub mileage: String,
    pub accident: String,
    pub brand: String,
    pub years_used: String,
    pub model: String,
    pub trade_type: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            fuel_type: "gasoline".to_string(),
            transmission: "automatic".to_string(),
            color: "black".to_string(),
            clean_title: "yes".to_string(),
            mileage: "0".to_string(),
            accident: "0".to_string(),
            brand: "toyota".to_string(),
            years_used: "0".to_string(),
            model: String::new(),
            trade_type: "sale".to_string(),
        }
    }
}

impl FormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FuelType => &self.fuel_type,
            FormField::Transmission => &self.transmission,
            FormField::Color => &self.color,
            FormField::CleanTitle => &self.clean_title,
            FormField::Mileage => &self.mileage,
            FormField::Accident => &self.accident,
            FormField::Brand => &self.brand,
            FormField::YearsUsed => &self.years_used,
            FormField::Model => &self.model,
            FormField::TradeType => &self.trade_type,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with_field(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FormField::FuelType => next.fuel_type = value,
            FormField::Transmission => next.transmission = value,
            FormField::Color => next.color = value,
            FormField::CleanTitle => next.clean_title = value,
            FormField::Mileage => next.mileage = value,
            FormField::Accident => next.accident = value,
            FormField::Brand => next.brand = value,
            FormField::YearsUsed => next.years_used = value,
            FormField::Model => next.model = value,
            FormField::TradeType => next.trade_type = value,
        }
        next
    }

    pub fn parse(&self) -> Result<VehicleForm> {
        Ok(VehicleForm {
            fuel_type: self.fuel_type.trim().to_string(),
            transmission: self.transmission.trim().to_string(),
            color: self.color.trim().to_string(),
            clean_title: parse_clean_title(&self.clean_title)?,
            mileage: parse_non_negative_f64("mileage", &self.mileage)?,
            accident: parse_non_negative_u32("accident", &self.accident)?,
            brand: self.brand.trim().to_string(),
            years_used: parse_non_negative_f64("years_used", &self.years_used)?,
            model: self.model.trim().to_string(),
            trade_type: self.trade_type.parse()?,
        })
    }
}

/// Only explicit yes/no spellings are accepted; any other text is rejected
/// instead of silently counting as a dirty title.
pub fn parse_clean_title(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => Err(AdvisorError::validation(
            "clean_title",
            format!("'{}' is not one of yes/no", raw),
        )),
    }
}

/// A fully parsed form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleForm {
    pub fuel_type: String,
    pub transmission: String,
    pub color: String,
    pub clean_title: bool,
    pub mileage: f64,
    pub accident: u32,
    pub brand: String,
    pub years_used: f64,
    pub model: String,
    pub trade_type: TradeType,
}

impl VehicleForm {
    /// The estimator only sees whether an accident happened, not how many.
    pub fn to_attributes(&self) -> VehicleAttributes {
        VehicleAttributes {
            brand: self.brand.clone(),
            fuel_type: self.fuel_type.clone(),
            transmission: self.transmission.clone(),
            mileage: self.mileage,
            years_used: self.years_used,
            accident_count: u32::from(self.accident >= 1),
            clean_title: self.clean_title,
        }
    }
}

/// Every factor that went into one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub mileage_factor: f64,
    pub age_factor: f64,
    pub accident_factor: f64,
    pub brand_factor: f64,
    pub fuel_factor: f64,
    pub transmission_factor: f64,
    pub title_factor: f64,
    pub market_adjustment: f64,
    /// Price after every adjustment except the random variation and the floor.
    pub pre_variation_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub price: f64,
    pub variation: f64,
    pub breakdown: PriceBreakdown,
    pub estimated_at: DateTime<Utc>,
}

impl PriceEstimate {
    pub fn formatted_price(&self) -> String {
        format!("{:.2}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_parses() {
        let form = FormInput::default().parse().unwrap();
        assert_eq!(form.brand, "toyota");
        assert_eq!(form.fuel_type, "gasoline");
        assert_eq!(form.transmission, "automatic");
        assert!(form.clean_title);
        assert_eq!(form.mileage, 0.0);
        assert_eq!(form.trade_type, TradeType::Sale);
    }

    #[test]
    fn test_accident_count_collapses_to_flag() {
        let form = FormInput::default()
            .with_field(FormField::Accident, "4")
            .parse()
            .unwrap();
        assert_eq!(form.accident, 4);
        assert_eq!(form.to_attributes().accident_count, 1);

        let form = FormInput::default().parse().unwrap();
        assert_eq!(form.to_attributes().accident_count, 0);
    }

    #[test]
    fn test_clean_title_spellings() {
        assert!(parse_clean_title("Yes").unwrap());
        assert!(parse_clean_title("1").unwrap());
        assert!(!parse_clean_title("no").unwrap());
        assert!(!parse_clean_title("FALSE").unwrap());
        assert!(parse_clean_title("maybe").is_err());
        assert!(parse_clean_title("").is_err());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(field.name().parse::<FormField>().unwrap(), field);
        }
        assert!("colour".parse::<FormField>().is_err());
    }

    #[test]
    fn test_invalid_numbers_name_the_field() {
        let err = FormInput::default()
            .with_field(FormField::YearsUsed, "ten")
            .parse()
            .unwrap_err();
        assert!(err.to_string().contains("years_used"));

        let err = FormInput::default()
            .with_field(FormField::TradeType, "lease")
            .parse()
            .unwrap_err();
        assert!(err.to_string().contains("trade_type"));
    }
}
