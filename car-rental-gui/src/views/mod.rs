pub mod inventory;
pub mod startup_error;
