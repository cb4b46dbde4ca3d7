use crate::form::CarForm;

/// Render the editable fields for a car.
pub fn show(ui: &mut egui::Ui, form: &mut CarForm) {
    egui::Grid::new("car_form")
        .num_columns(2)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            text_row(ui, "Make:", &mut form.make, 160.0);
            text_row(ui, "Model:", &mut form.model, 160.0);
            text_row(ui, "Year:", &mut form.year, 80.0);
            text_row(ui, "Rate / Day:", &mut form.rate, 100.0);

            ui.label("Status:");
            ui.checkbox(&mut form.available, "Available");
            ui.end_row();
        });
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, width: f32) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(width));
    ui.end_row();
}
