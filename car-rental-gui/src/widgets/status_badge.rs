use crate::state::Availability;

/// Draw a small colored circle indicating whether a car can be rented.
pub fn show(ui: &mut egui::Ui, status: Availability) -> egui::Response {
    let color = status.color();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::click());
    if ui.is_rect_visible(rect) {
        ui.painter().circle_filled(rect.center(), 4.0, color);
    }
    response
}
