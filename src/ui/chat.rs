// src/ui/chat.rs
use eframe::egui;

use crate::dashboard::Dashboard;
use crate::state::Role;

pub fn show_chat_view(ui: &mut egui::Ui, dashboard: &mut Dashboard) {
    ui.horizontal(|ui| {
        ui.heading("Ask about company results");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🗑 Clear").clicked() {
                dashboard.clear_chat();
            }
        });
    });

    if let Some(symbol) = dashboard.state().chat_focus.clone() {
        ui.horizontal(|ui| {
            ui.label(format!("Asking about {symbol}"));
            if ui.small_button("✖").clicked() {
                dashboard.clear_focus();
            }
        });
    }

    ui.separator();

    let input_height = 36.0;
    egui::ScrollArea::vertical()
        .id_source("chat_scroll")
        .max_height(ui.available_height() - input_height)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            let turns = dashboard.state().chat.turns();
            if turns.is_empty() {
                ui.label("Try: \"How did Wipro perform this quarter?\"");
            }
            for turn in turns {
                let layout = match turn.role {
                    Role::User => egui::Layout::right_to_left(egui::Align::TOP),
                    Role::Bot => egui::Layout::left_to_right(egui::Align::TOP),
                };
                ui.with_layout(layout, |ui| {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_max_width(ui.available_width() * 0.75);
                        if turn.pending {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.weak(&turn.text);
                            });
                        } else {
                            ui.label(&turn.text);
                        }
                    });
                });
                ui.add_space(4.0);
            }
        });

    ui.separator();

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(dashboard.chat_input_mut())
                .hint_text("Ask about any company's results...")
                .desired_width(ui.available_width() - 80.0),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.button("Send").clicked() || entered {
            dashboard.submit_chat();
            response.request_focus();
        }
    });
}
