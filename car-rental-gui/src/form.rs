//! Editable form fields and their validation.

use car_rental_db::{Car, NewCar};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("All fields are required.")]
    MissingField,
    #[error("Year must be an integer.")]
    InvalidYear,
    #[error("Rate must be a number.")]
    InvalidRate,
}

/// Text mirror of a car's non-id fields, bound to the form widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct CarForm {
    pub make: String,
    pub model: String,
    pub year: String,
    pub rate: String,
    pub available: bool,
}

impl Default for CarForm {
    fn default() -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            year: String::new(),
            rate: String::new(),
            available: true,
        }
    }
}

impl CarForm {
    pub fn from_car(car: &Car) -> Self {
        Self {
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year.to_string(),
            rate: car.rate_per_day.to_string(),
            available: car.available,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate the fields and build the car they describe.
    ///
    /// Text is trimmed first; every field is required.
    pub fn parse(&self) -> Result<NewCar, FormError> {
        let make = self.make.trim();
        let model = self.model.trim();
        let year = self.year.trim();
        let rate = self.rate.trim();

        if make.is_empty() || model.is_empty() || year.is_empty() || rate.is_empty() {
            return Err(FormError::MissingField);
        }

        let year: i32 = year.parse().map_err(|_| FormError::InvalidYear)?;
        let rate_per_day = rate
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or(FormError::InvalidRate)?;

        Ok(NewCar {
            make: make.to_string(),
            model: model.to_string(),
            year,
            rate_per_day,
            available: self.available,
        })
    }
}
