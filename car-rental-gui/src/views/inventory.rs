use egui::{Color32, RichText};

use crate::app::CarRentalApp;
use crate::state::Availability;
use crate::widgets;

const TITLE_COLOR: Color32 = Color32::from_rgb(25, 42, 86);

const ADD_COLOR: Color32 = Color32::from_rgb(39, 174, 96);
const UPDATE_COLOR: Color32 = Color32::from_rgb(41, 128, 185);
const DELETE_COLOR: Color32 = Color32::from_rgb(192, 57, 43);
const REFRESH_COLOR: Color32 = Color32::from_rgb(142, 68, 173);
const RENT_COLOR: Color32 = Color32::from_rgb(243, 156, 18);
const RETURN_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

/// Render the centered window heading.
pub fn show_title(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(10.0);
        ui.label(
            RichText::new(crate::APP_TITLE)
                .size(22.0)
                .strong()
                .color(TITLE_COLOR),
        );
        ui.add_space(10.0);
    });
}

/// Render the two-pane inventory view: car table | form and actions.
pub fn show(ui: &mut egui::Ui, app: &mut CarRentalApp) {
    let interactive = !app.modal_open();

    ui.add_enabled_ui(interactive, |ui| {
        // Form and buttons (right)
        egui::SidePanel::right("car_editor")
            .resizable(false)
            .exact_width(300.0)
            .show_inside(ui, |ui| {
                ui.add_space(8.0);
                widgets::car_form::show(ui, &mut app.controller.form);
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(8.0);
                show_actions(ui, app);
            });

        // Table (center, fills remaining space)
        egui::CentralPanel::default().show_inside(ui, |ui| {
            show_summary(ui, app);
            ui.add_space(2.0);
            widgets::car_table::show(ui, &mut app.controller);
        });
    });
}

fn show_summary(ui: &mut egui::Ui, app: &CarRentalApp) {
    let rows = app.controller.rows();
    let rented = rows
        .iter()
        .filter(|r| r.status == Availability::Rented)
        .count();
    ui.label(format!(
        "{} cars | {} available | {} rented",
        rows.len(),
        rows.len() - rented,
        rented
    ));
}

fn show_actions(ui: &mut egui::Ui, app: &mut CarRentalApp) {
    let idle = !app.controller.is_busy();
    let controller = &mut app.controller;

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(12.0, 8.0);

        if action_button(ui, "Add", ADD_COLOR, idle).clicked() {
            controller.create_from_form();
        }
        if action_button(ui, "Update", UPDATE_COLOR, idle).clicked() {
            controller.update_selected();
        }
        if action_button(ui, "Delete", DELETE_COLOR, idle).clicked() {
            controller.request_delete();
        }
        if action_button(ui, "Refresh", REFRESH_COLOR, idle).clicked() {
            controller.refresh();
        }
        if action_button(ui, "Rent", RENT_COLOR, idle).clicked() {
            controller.rent_selected();
        }
        if action_button(ui, "Return", RETURN_COLOR, idle).clicked() {
            controller.return_selected();
        }
    });
}

fn action_button(ui: &mut egui::Ui, text: &str, fill: Color32, enabled: bool) -> egui::Response {
    let label = RichText::new(text).strong().color(Color32::WHITE);
    ui.add_enabled(
        enabled,
        egui::Button::new(label)
            .fill(fill)
            .min_size(egui::vec2(80.0, 28.0)),
    )
    .on_hover_cursor(egui::CursorIcon::PointingHand)
}
