// src/ui/latest.rs
use eframe::egui;

use crate::api::AnalyzedResult;
use crate::dashboard::Dashboard;
use crate::utils::{format_amount, format_growth};

pub fn show_latest_view(ui: &mut egui::Ui, dashboard: &mut Dashboard) {
    ui.heading("Latest Analyzed Results");
    ui.add_space(4.0);

    let state = dashboard.state();
    if state.latest.is_loading() && state.latest.data().is_empty() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading analyzed results...");
        });
        return;
    }

    if state.latest.data().is_empty() {
        ui.label("No results analyzed yet. Pick a company from the calendar to start.");
        return;
    }

    let mut ask_about: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_source("latest_scroll")
        .show(ui, |ui| {
            for result in state.latest.data() {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    show_result_card(ui, result, &mut ask_about);
                });
                ui.add_space(6.0);
            }
        });

    if let Some(symbol) = ask_about {
        dashboard.ask_about(&symbol);
    }
}

fn show_result_card(ui: &mut egui::Ui, result: &AnalyzedResult, ask_about: &mut Option<String>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&result.company_name).heading());
        if let (Some(quarter), Some(year)) = (&result.quarter, &result.financial_year) {
            ui.label(format!("{quarter} {year}"));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(symbol) = &result.company_symbol {
                if ui.button("💬 Ask about").clicked() {
                    *ask_about = Some(symbol.clone());
                }
            }
            ui.small(format!("Analyzed {}", result.analyzed_at.format("%d %b %Y %H:%M")));
        });
    });

    ui.add_space(4.0);

    let metrics = &result.metrics;
    egui::Grid::new(("metrics_grid", &result.company_name, result.analyzed_at))
        .num_columns(2)
        .spacing([24.0, 2.0])
        .show(ui, |ui| {
            let rows = [
                ("Revenue", format_amount(metrics.revenue)),
                ("Profit after tax", format_amount(metrics.profit_after_tax)),
                ("EPS", format_amount(metrics.eps)),
                ("YoY growth", format_growth(metrics.yoy_growth)),
                ("QoQ growth", format_growth(metrics.qoq_growth)),
            ];
            for (label, value) in rows {
                ui.label(label);
                ui.label(value);
                ui.end_row();
            }
            if metrics.operating_margin.is_some() {
                ui.label("Operating margin");
                ui.label(format_growth(metrics.operating_margin).trim_start_matches('+'));
                ui.end_row();
            }
        });

    if let Some(insights) = &result.insights {
        ui.add_space(4.0);
        ui.label(insights);
    }

    for highlight in &result.highlights {
        ui.colored_label(egui::Color32::from_rgb(46, 160, 67), format!("▲ {highlight}"));
    }
    for flag in &result.red_flags {
        ui.colored_label(egui::Color32::RED, format!("⚠ {flag}"));
    }
}
