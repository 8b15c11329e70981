use std::time::Duration;

use egui::RichText;

use super::state::ActiveTab;
use super::{SchedulerApp, SessionEvent};
use crate::models::block::Block;
use crate::services::sync::WriteIntent;
use crate::ui_egui::block_dialog::{render_block_dialog, BlockDialogResult, BlockDialogState};
use crate::ui_egui::drag::CancelReason;
use crate::ui_egui::views::grid_view::render_grid_view;
use crate::ui_egui::views::instructors_view::render_instructors_view;
use crate::ui_egui::views::kpi_view::render_kpi_view;
use crate::ui_egui::views::live_view::render_live_view;
use crate::ui_egui::views::rooms_view::render_rooms_view;
use crate::ui_egui::views::search_view::render_search_view;

impl SchedulerApp {
    pub(super) fn handle_update(&mut self, ctx: &egui::Context) {
        self.poll_io();
        self.handle_keyboard_shortcuts(ctx);
        self.handle_teardown_sources(ctx);

        self.render_top_bar(ctx);
        self.render_status_bar(ctx);
        self.render_central(ctx);
        self.render_dialog(ctx);
        self.toasts.render(ctx);

        // Keep the clock and the live board moving while idle
        let wait = if self.state.active_tab == ActiveTab::Live {
            Duration::from_secs(self.context.config().live_refresh_secs.clamp(1, 60))
        } else {
            Duration::from_secs(1)
        };
        ctx.request_repaint_after(wait);
    }

    fn poll_io(&mut self) {
        match self.context.poll_session() {
            Some(SessionEvent::Writable) => {
                self.toasts.success("Session ready, editing available");
            }
            Some(SessionEvent::ReadOnly(error)) => {
                self.state.edit_mode = false;
                self.drag.cancel(CancelReason::EditModeOff);
                self.toasts
                    .warning(format!("Read-only mode: {}", error));
            }
            None => {}
        }
        self.context.poll_snapshots();
    }

    /// Focus loss and a hidden window both tear an in-flight drag down, the
    /// same way a pointer-cancel would.
    fn handle_teardown_sources(&mut self, ctx: &egui::Context) {
        if !self.drag.is_active() {
            return;
        }
        let (focused, minimized) = ctx.input(|i| {
            (
                i.viewport().focused.unwrap_or(true),
                i.viewport().minimized.unwrap_or(false),
            )
        });
        if !focused {
            self.drag.cancel(CancelReason::FocusLost);
        } else if minimized {
            self.drag.cancel(CancelReason::WindowHidden);
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Studio Scheduler").heading());
                ui.separator();

                let mut selected_day = self.context.day();
                egui::ComboBox::from_id_source("day_selector")
                    .selected_text(selected_day.label())
                    .show_ui(ui, |ui| {
                        for day in &self.context.config().days {
                            ui.selectable_value(&mut selected_day, *day, day.label());
                        }
                    });
                if selected_day != self.context.day() {
                    self.drag.cancel(CancelReason::DayChanged);
                    self.dialog = None;
                    self.state.live_offset = 0;
                    self.context.select_day(selected_day);
                }

                ui.separator();
                let read_only = self.context.read_only();
                ui.add_enabled_ui(!read_only, |ui| {
                    let before = self.state.edit_mode;
                    ui.checkbox(&mut self.state.edit_mode, "Edit mode");
                    if before && !self.state.edit_mode {
                        self.drag.cancel(CancelReason::EditModeOff);
                    }
                });
                if read_only {
                    ui.label(RichText::new("read-only").weak());
                }
                if self.state.edit_mode {
                    ui.label(
                        RichText::new("EDITING")
                            .color(egui::Color32::from_rgb(200, 120, 0))
                            .strong(),
                    );
                }
                if self.drag.is_dragging() {
                    let badge = if self.drag.copy_active() { "Copy" } else { "Move" };
                    ui.label(RichText::new(badge).strong());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for tab in ActiveTab::ALL.iter().rev() {
                        ui.selectable_value(&mut self.state.active_tab, *tab, tab.label());
                    }
                });
            });
        });
    }

    fn render_central(&mut self, ctx: &egui::Context) {
        let mut edit_request: Option<Block> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let allow_edit = self.state.edit_mode && !self.context.read_only();
            match self.state.active_tab {
                ActiveTab::Grid => {
                    let interaction = egui::ScrollArea::both()
                        .show(ui, |ui| {
                            render_grid_view(
                                ui,
                                self.context.store(),
                                self.context.index(),
                                self.context.grid(),
                                self.context.config(),
                                &self.palette,
                                &mut self.drag,
                                self.context.day(),
                                self.state.edit_mode,
                                self.context.read_only(),
                                self.dialog.is_some(),
                            )
                        })
                        .inner;

                    if let Some(reason) = interaction.rejected {
                        self.toasts.warning(format!("Drop refused: {}", reason));
                    }
                    if let Some(intent) = interaction.committed {
                        self.dispatch_intent(intent);
                    }
                    if let Some(block) = interaction.edit_block {
                        edit_request = Some(block);
                    }
                    if let Some(cell) = interaction.create_at {
                        self.dialog = Some(BlockDialogState::new_block(
                            self.context.day(),
                            cell,
                            self.context.grid(),
                        ));
                    }
                }
                ActiveTab::Live => {
                    edit_request = egui::ScrollArea::vertical()
                        .show(ui, |ui| {
                            render_live_view(
                                ui,
                                self.context.store(),
                                self.context.grid(),
                                self.context.config(),
                                self.context.day(),
                                &mut self.state.live_offset,
                                allow_edit,
                            )
                        })
                        .inner;
                }
                ActiveTab::Rooms => {
                    edit_request = egui::ScrollArea::vertical()
                        .show(ui, |ui| {
                            render_rooms_view(
                                ui,
                                self.context.store(),
                                self.context.config(),
                                allow_edit,
                            )
                        })
                        .inner;
                }
                ActiveTab::Instructors => {
                    edit_request = egui::ScrollArea::vertical()
                        .show(ui, |ui| {
                            render_instructors_view(
                                ui,
                                self.context.store(),
                                self.context.config(),
                                &self.palette,
                                &mut self.state.instructor_filter,
                                allow_edit,
                            )
                        })
                        .inner;
                }
                ActiveTab::Search => {
                    edit_request = egui::ScrollArea::vertical()
                        .show(ui, |ui| {
                            render_search_view(
                                ui,
                                self.context.store(),
                                self.context.config(),
                                &mut self.state.search_query,
                                allow_edit,
                            )
                        })
                        .inner;
                }
                ActiveTab::Kpis => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        render_kpi_view(
                            ui,
                            self.context.store(),
                            self.context.grid(),
                            self.context.config(),
                            self.context.day(),
                        );
                    });
                }
            }
        });

        if let Some(block) = edit_request {
            if self.state.edit_mode && !self.context.read_only() {
                self.dialog = Some(BlockDialogState::edit_block(&block));
            }
        }
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(mut dialog) = self.dialog.take() else {
            return;
        };
        let result = render_block_dialog(
            ctx,
            &mut dialog,
            self.context.grid(),
            self.context.config(),
            self.context.store(),
        );
        match result {
            BlockDialogResult::KeepOpen => {
                self.dialog = Some(dialog);
            }
            BlockDialogResult::Cancelled => {}
            BlockDialogResult::Save(intent) => {
                if !self.dispatch_intent(intent) {
                    // Keep the dialog open so nothing typed is lost
                    self.dialog = Some(dialog);
                }
            }
            BlockDialogResult::Delete(id) => {
                if !self.dispatch_intent(WriteIntent::Delete(id)) {
                    self.dialog = Some(dialog);
                }
            }
        }
    }

    /// Send a validated intent to the store. Failures are surfaced and never
    /// retried here; the next snapshot reconciles the grid.
    fn dispatch_intent(&mut self, intent: WriteIntent) -> bool {
        match self.context.apply_intent(intent) {
            Ok(()) => true,
            Err(error) => {
                log::warn!("Write rejected: {}", error);
                self.toasts
                    .error(format!("Could not save: {}. Try again by hand.", error));
                false
            }
        }
    }
}
