use std::time::Instant;

use car_rental_db::{Car, CarId, StoreError};

// -- Table rows --

/// One rendered row of the inventory table.
///
/// Built from a `Car` snapshot so the table never binds to storage types.
#[derive(Debug, Clone, PartialEq)]
pub struct CarRow {
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: String,
    pub rate: String,
    pub status: Availability,
}

impl From<&Car> for CarRow {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id,
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year.to_string(),
            rate: format!("{:.2}", car.rate_per_day),
            status: Availability::from_flag(car.available),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Rented,
}

impl Availability {
    pub fn from_flag(available: bool) -> Self {
        if available {
            Availability::Available
        } else {
            Availability::Rented
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Rented => "Rented",
        }
    }

    pub fn color(&self) -> egui::Color32 {
        match self {
            Availability::Available => egui::Color32::from_rgb(39, 174, 96),
            Availability::Rented => egui::Color32::from_rgb(243, 156, 18),
        }
    }
}

// -- Notices --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn color(&self) -> egui::Color32 {
        match self {
            NoticeKind::Info => egui::Color32::from_rgb(52, 152, 219),
            NoticeKind::Warning => egui::Color32::from_rgb(220, 180, 30),
            NoticeKind::Error => egui::Color32::from_rgb(220, 50, 50),
        }
    }
}

/// A message waiting to be shown to the user in a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: "Info",
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: "Validation",
            message: message.into(),
        }
    }

    /// Carries the raw failure description, nothing more.
    pub fn database(error: &StoreError) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Database Error",
            message: error.to_string(),
        }
    }
}

// -- Background operations --

pub struct BackgroundOperation {
    pub id: u64,
    pub description: String,
    pub started: Instant,
}

impl BackgroundOperation {
    pub fn new(id: u64, description: String) -> Self {
        Self {
            id,
            description,
            started: Instant::now(),
        }
    }
}

static NEXT_OP_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

pub fn next_operation_id() -> u64 {
    NEXT_OP_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
}

// -- Messages --

/// A single-row change whose result is reported as `Ok(bool)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update(CarId),
    Delete(CarId),
    SetAvailability { id: CarId, available: bool },
}

impl Mutation {
    pub fn car_id(&self) -> CarId {
        match *self {
            Mutation::Update(id) | Mutation::Delete(id) => id,
            Mutation::SetAvailability { id, .. } => id,
        }
    }

    /// Text for the activity bar and the log.
    pub fn describe(&self) -> String {
        match *self {
            Mutation::Update(id) => format!("Updating car {}", id),
            Mutation::Delete(id) => format!("Deleting car {}", id),
            Mutation::SetAvailability {
                id,
                available: false,
            } => format!("Renting out car {}", id),
            Mutation::SetAvailability {
                id,
                available: true,
            } => format!("Returning car {}", id),
        }
    }
}

/// Messages sent from background threads to the UI thread.
///
/// Each carries the id of the operation that produced it so results of
/// superseded operations can be dropped.
#[derive(Debug)]
pub enum AppMessage {
    Listed {
        op_id: u64,
        result: Result<Vec<Car>, StoreError>,
    },
    Created {
        op_id: u64,
        result: Result<Car, StoreError>,
    },
    Mutated {
        op_id: u64,
        mutation: Mutation,
        result: Result<bool, StoreError>,
    },
}

impl AppMessage {
    pub fn op_id(&self) -> u64 {
        match self {
            AppMessage::Listed { op_id, .. }
            | AppMessage::Created { op_id, .. }
            | AppMessage::Mutated { op_id, .. } => *op_id,
        }
    }
}
