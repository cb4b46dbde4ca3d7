/// Render the fatal startup screen: the failure and a way out.
pub fn show(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 4.0);
        ui.heading("Cannot open the inventory database");
        ui.add_space(16.0);
        ui.colored_label(egui::Color32::from_rgb(220, 50, 50), message);
        ui.add_space(8.0);
        ui.weak(format!(
            "Check the [database] section of {} or the {} environment variable.",
            crate::settings::settings_path().display(),
            crate::settings::ENV_DB_URL
        ));
        ui.add_space(16.0);
        if ui.button("Quit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}
