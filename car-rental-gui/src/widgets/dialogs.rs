use crate::controller::Controller;

/// Show the oldest queued notice as a modal message.
pub fn show_notice(ctx: &egui::Context, controller: &mut Controller) {
    let Some(notice) = controller.current_notice() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(notice.title)
        .id(egui::Id::new("notice_dialog"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(notice.kind.color(), &notice.message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        controller.dismiss_notice();
    }
}

/// Ask before deleting the selected car.
pub fn show_delete_confirmation(ctx: &egui::Context, controller: &mut Controller) {
    let mut answer = None;
    egui::Window::new("Confirm")
        .id(egui::Id::new("delete_confirmation"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Delete selected car?");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    answer = Some(true);
                }
                if ui.button("No").clicked() {
                    answer = Some(false);
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        answer = Some(false);
    }

    match answer {
        Some(true) => {
            controller.delete_selected();
        }
        Some(false) => controller.cancel_delete(),
        None => {}
    }
}
