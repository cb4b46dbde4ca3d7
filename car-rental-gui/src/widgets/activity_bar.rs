use crate::controller::Controller;

/// Render the status line: the in-flight store call, or the database in use.
pub fn show(ui: &mut egui::Ui, controller: &Controller) {
    ui.horizontal(|ui| match controller.pending() {
        Some(op) => {
            ui.spinner();
            ui.label(&op.description);
        }
        None => {
            ui.weak(format!("Database: {}", controller.store_path().display()));
        }
    });
}
