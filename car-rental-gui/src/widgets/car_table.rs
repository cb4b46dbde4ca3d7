use egui_extras::{Column, TableBuilder};

use crate::controller::Controller;
use crate::widgets::status_badge;

/// Render the inventory table. Clicking a row selects it; clicking the
/// selected row again clears the selection.
pub fn show(ui: &mut egui::Ui, controller: &mut Controller) {
    let rows = controller.rows();
    let selected = controller.selected();

    if rows.is_empty() {
        ui.centered_and_justified(|ui| {
            if controller.is_busy() {
                ui.spinner();
            } else {
                ui.weak("No cars yet. Fill in the form and press Add.");
            }
        });
        return;
    }

    let available_height = ui.available_height();
    let text_height = egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y)
        + 8.0;

    let mut clicked = None;

    let table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(50.0).at_least(40.0)) // ID
        .column(Column::initial(140.0).at_least(80.0)) // Make
        .column(Column::initial(140.0).at_least(80.0)) // Model
        .column(Column::initial(60.0).at_least(50.0)) // Year
        .column(Column::initial(80.0).at_least(60.0)) // Rate/Day
        .column(Column::remainder().at_least(90.0)) // Available
        .min_scrolled_height(0.0)
        .max_scroll_height(available_height);

    table
        .header(24.0, |mut header| {
            for title in ["ID", "Make", "Model", "Year", "Rate/Day", "Available"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(text_height, rows.len(), |mut row| {
                let data = &rows[row.index()];
                row.set_selected(selected == Some(data.id));

                let id_text = data.id.to_string();
                let mut row_clicked = false;
                for text in [
                    id_text.as_str(),
                    data.make.as_str(),
                    data.model.as_str(),
                    data.year.as_str(),
                    data.rate.as_str(),
                ] {
                    row.col(|ui| {
                        let response = ui.add(egui::Label::new(text).sense(egui::Sense::click()));
                        if response.clicked() {
                            row_clicked = true;
                        }
                    });
                }

                // Availability
                row.col(|ui| {
                    let badge = status_badge::show(ui, data.status);
                    let label =
                        ui.add(egui::Label::new(data.status.label()).sense(egui::Sense::click()));
                    if badge.clicked() || label.clicked() {
                        row_clicked = true;
                    }
                });

                if row_clicked {
                    clicked = Some(data.id);
                }
            });
        });

    if let Some(id) = clicked {
        controller.toggle_selection(id);
    }
}
