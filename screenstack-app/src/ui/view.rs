use eframe::egui;

use screenstack_layout::Widget;

use crate::app::ScreenStackApp;

const CONTENT_MAX_WIDTH: f32 = 560.0;

impl ScreenStackApp {
    /// Draw the displayed view with the container's current opacity. A clicked
    /// button's handler is stored for dispatch after the frame.
    pub(crate) fn draw_container(&mut self, ctx: &egui::Context) {
        let opacity = self.screens.opacity();
        let mut clicked = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.set_opacity(opacity);
            let Some(view) = self.screens.displayed_view() else {
                return;
            };
            ui.vertical_centered(|ui| {
                ui.set_max_width(CONTENT_MAX_WIDTH);
                draw_widgets(ui, &view.root.children, &mut clicked);
            });
        });

        if clicked.is_some() {
            self.pending_handler = clicked;
        }
    }
}

fn draw_widgets(ui: &mut egui::Ui, widgets: &[Widget], clicked: &mut Option<String>) {
    for widget in widgets {
        match widget {
            Widget::Heading { text } => {
                ui.heading(text.as_str());
            }
            Widget::Label { text } => {
                ui.label(text.as_str());
            }
            Widget::Button { text, on_click } => {
                if ui.button(text.as_str()).clicked() {
                    *clicked = Some(on_click.clone());
                }
            }
            Widget::Separator => {
                ui.separator();
            }
            Widget::Spacer { height } => ui.add_space(*height),
            Widget::Row { children } => {
                ui.horizontal(|ui| draw_widgets(ui, children, clicked));
            }
            Widget::Column { children } => {
                ui.vertical(|ui| draw_widgets(ui, children, clicked));
            }
        }
    }
}
