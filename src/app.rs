// src/app.rs
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use tokio::runtime::Runtime;

use crate::api::MarketApi;
use crate::dashboard::Dashboard;
use crate::state::{BackendStatus, Tab};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct KhabriApp {
    dashboard: Dashboard,
    // Keeps the worker threads alive for as long as the window is open
    _runtime: Runtime,
}

impl KhabriApp {
    pub fn new(api: Arc<dyn MarketApi>, runtime: Runtime, toast_duration: Duration) -> Self {
        let mut dashboard = Dashboard::new(api, runtime.handle().clone(), toast_duration);
        dashboard.start();
        Self {
            dashboard,
            _runtime: runtime,
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("📈 Market Khabri");
            ui.separator();

            let active = self.dashboard.state().active_tab();
            for tab in Tab::ALL {
                if ui.selectable_label(active == tab, tab.label()).clicked() {
                    self.dashboard.select_tab(tab);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match &self.dashboard.state().backend {
                    BackendStatus::Unknown => {
                        ui.weak("● connecting");
                    }
                    BackendStatus::Online { checked_at } => {
                        ui.colored_label(egui::Color32::from_rgb(46, 160, 67), "● online")
                            .on_hover_text(format!("Checked at {}", checked_at.format("%H:%M:%S")));
                    }
                    BackendStatus::Offline(reason) => {
                        ui.colored_label(egui::Color32::RED, "● offline").on_hover_text(reason.as_str());
                    }
                }

                if let Some(key) = self.dashboard.state().active_tab().resource() {
                    let state = self.dashboard.state();
                    let loading = state.loader_status(key) == crate::state::LoadStatus::Loading;
                    let loaded_at = match key {
                        crate::state::ResourceKey::Upcoming => state.upcoming.loaded_at(),
                        crate::state::ResourceKey::Latest => state.latest.loaded_at(),
                    };

                    if ui.add_enabled(!loading, egui::Button::new("🔄 Refresh")).clicked() {
                        self.dashboard.refresh();
                    }
                    if loading {
                        ui.spinner();
                    } else if let Some(loaded_at) = loaded_at {
                        ui.weak(format!("Updated {}", loaded_at.format("%H:%M")));
                    }
                }
            });
        });
    }

    fn show_error(&mut self, ctx: &egui::Context) {
        let Some(key) = self.dashboard.state().active_tab().resource() else {
            return;
        };

        // Show error modal if needed
        let error_msg = self.dashboard.state().load_error(key).map(str::to_owned);
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_TOP, [0.0, 48.0])
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.dashboard.dismiss_error(key);
                    }
                });
        }
    }

    fn show_toast(&self, ctx: &egui::Context) {
        if let Some(toast) = self.dashboard.state().toast.current() {
            egui::Area::new(egui::Id::new("toast"))
                .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(&toast.message);
                    });
                });
        }
    }
}

impl eframe::App for KhabriApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.dashboard.drain_events();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.dashboard.state().active_tab() {
                Tab::Calendar => crate::ui::calendar::show_calendar_view(ui, &mut self.dashboard),
                Tab::Latest => crate::ui::latest::show_latest_view(ui, &mut self.dashboard),
                Tab::Chat => crate::ui::chat::show_chat_view(ui, &mut self.dashboard),
            }
        });

        self.show_error(ctx);
        self.show_toast(ctx);

        if self.dashboard.state().has_pending_work() {
            let wake = self
                .dashboard
                .state()
                .toast
                .current()
                .map(|toast| toast.expires_at.saturating_duration_since(Instant::now()))
                .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL));
            ctx.request_repaint_after(wake);
        }
    }
}
