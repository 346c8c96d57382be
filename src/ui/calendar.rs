// src/ui/calendar.rs
use eframe::egui;

use crate::dashboard::Dashboard;

pub fn show_calendar_view(ui: &mut egui::Ui, dashboard: &mut Dashboard) {
    ui.heading("Upcoming Results");
    ui.add_space(4.0);

    let state = dashboard.state();
    if state.upcoming.is_loading() && state.upcoming.data().is_empty() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading upcoming results...");
        });
        return;
    }

    if state.upcoming.data().is_empty() {
        ui.label("No upcoming results announced.");
        return;
    }

    let mut clicked: Option<(String, String)> = None;

    egui::ScrollArea::vertical()
        .id_source("calendar_scroll")
        .show(ui, |ui| {
            for item in state.upcoming.data() {
                let processing = state.processing.is_processing(&item.company_name);

                let response = ui
                    .group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(item.card_label()).strong());
                                if let Some(sector) = &item.sector {
                                    ui.small(sector);
                                }
                            });

                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if processing {
                                    ui.spinner();
                                }
                                if let (Some(quarter), Some(year)) = (&item.quarter, &item.financial_year) {
                                    ui.small(format!("{quarter} {year}"));
                                }
                            });
                        });
                    })
                    .response
                    .interact(egui::Sense::click());

                if processing {
                    response.on_hover_text("Processing...");
                } else if response.on_hover_text("Click to analyze results").clicked() {
                    clicked = Some((item.company_name.clone(), item.company_symbol.clone()));
                }
                ui.add_space(4.0);
            }
        });

    if let Some((company, ticker)) = clicked {
        dashboard.process(&company, &ticker);
    }
}
