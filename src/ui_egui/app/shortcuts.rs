use super::SchedulerApp;
use crate::ui_egui::drag::CancelReason;

impl SchedulerApp {
    pub(super) fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                // An in-flight drag wins over the dialog
                if self.drag.is_active() {
                    self.drag.cancel(CancelReason::Escape);
                } else if self.dialog.is_some() {
                    self.dialog = None;
                }
            }
        });
    }
}
