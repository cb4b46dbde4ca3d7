//! car-rental GUI
//!
//! Desktop front end for the rental inventory. Store calls run on
//! background threads and report back to the UI thread over MPSC channels.

pub mod app;
pub mod backend;
pub mod controller;
pub mod form;
pub mod settings;
pub mod state;
pub mod views;
pub mod widgets;

/// Window and heading title.
pub const APP_TITLE: &str = "Car Rental Management System";
