//! Data model types for the rental inventory.

/// Store-assigned identifier of a car row.
pub type CarId = i64;

/// A rentable vehicle as persisted in the `cars` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub rate_per_day: f64,
    /// `true` = rentable, `false` = currently rented.
    pub available: bool,
}

/// A car that has not been stored yet, so it has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub rate_per_day: f64,
    pub available: bool,
}

impl NewCar {
    /// Attach the id the store generated for this car.
    pub fn with_id(self, id: CarId) -> Car {
        Car {
            id,
            make: self.make,
            model: self.model,
            year: self.year,
            rate_per_day: self.rate_per_day,
            available: self.available,
        }
    }
}
