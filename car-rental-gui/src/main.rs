//! car-rental GUI
//!
//! Desktop application for managing a car-rental inventory.

use car_rental_db::CarStore;
use car_rental_gui::APP_TITLE;
use car_rental_gui::app::{CarRentalApp, StartupErrorApp};
use car_rental_gui::settings;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = settings::load_settings();
    let config = settings.database.store_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1000.0, 600.0]),
        ..Default::default()
    };

    match CarStore::connect(&config) {
        Ok(store) => eframe::run_native(
            APP_TITLE,
            options,
            Box::new(move |cc| Ok(Box::new(CarRentalApp::new(cc, store)))),
        ),
        Err(e) => {
            log::error!("Cannot open inventory database: {}", e);
            let message = e.to_string();
            eframe::run_native(
                APP_TITLE,
                options,
                Box::new(move |_cc| Ok(Box::new(StartupErrorApp::new(message)))),
            )
        }
    }
}
