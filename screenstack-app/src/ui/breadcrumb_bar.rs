use eframe::egui;

use crate::app::ScreenStackApp;

const CRUMB_COLOR: egui::Color32 = egui::Color32::from_gray(150);
const CURRENT_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 200, 255);

impl ScreenStackApp {
    /// Top bar with a back button and the navigation history. Must be drawn
    /// before the container's `CentralPanel`.
    pub(crate) fn draw_breadcrumb_bar(&mut self, ctx: &egui::Context) {
        if !self.preferences.show_breadcrumbs {
            return;
        }
        use egui_material_icons::icons::*;

        let can_go_back = self.screens.can_go_back();
        let mut back_clicked = false;

        egui::TopBottomPanel::top("breadcrumb_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let back = egui::Button::new(egui::RichText::new(ICON_ARROW_BACK).size(18.0))
                    .frame(false);
                if ui
                    .add_enabled(can_go_back, back)
                    .on_hover_text("Back (Esc)")
                    .clicked()
                {
                    back_clicked = true;
                }
                ui.separator();

                let crumbs = self.screens.breadcrumbs().as_slice();
                for (i, id) in crumbs.iter().enumerate() {
                    if i > 0 {
                        ui.label(egui::RichText::new(ICON_CHEVRON_RIGHT).color(CRUMB_COLOR));
                    }
                    let text = egui::RichText::new(id.simple_name());
                    if i + 1 == crumbs.len() {
                        ui.label(text.strong().color(CURRENT_COLOR));
                    } else {
                        ui.label(text.color(CRUMB_COLOR));
                    }
                }
            });
        });

        if back_clicked {
            self.back_requested = true;
        }
    }
}
