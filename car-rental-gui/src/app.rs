use std::time::Duration;

use car_rental_db::CarStore;

use crate::controller::Controller;
use crate::views;
use crate::widgets;

/// Main application state.
pub struct CarRentalApp {
    /// Inventory snapshot, selection, form, and the in-flight store call.
    pub controller: Controller,
}

impl CarRentalApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: CarStore) -> Self {
        let mut controller = Controller::new(store, Some(cc.egui_ctx.clone()));
        controller.refresh();
        Self { controller }
    }

    /// True while a dialog should capture all input.
    pub fn modal_open(&self) -> bool {
        self.controller.current_notice().is_some() || self.controller.is_confirming_delete()
    }
}

impl eframe::App for CarRentalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain background messages
        self.controller.process_messages();

        // Keep the spinner moving while a store call is out
        if self.controller.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("title_bar").show(ctx, views::inventory::show_title);

        egui::TopBottomPanel::bottom("activity_bar").show(ctx, |ui| {
            widgets::activity_bar::show(ui, &self.controller);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            views::inventory::show(ui, self);
        });

        // Dialogs last so they draw above the panels
        if self.controller.is_confirming_delete() {
            widgets::dialogs::show_delete_confirmation(ctx, &mut self.controller);
        } else {
            widgets::dialogs::show_notice(ctx, &mut self.controller);
        }
    }
}

/// Shown instead of the inventory when the database cannot be opened.
pub struct StartupErrorApp {
    pub message: String,
}

impl StartupErrorApp {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl eframe::App for StartupErrorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            views::startup_error::show(ui, &self.message);
        });
    }
}
