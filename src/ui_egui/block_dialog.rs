//! Create/edit dialog for a block.
//!
//! The final label is a one-way projection of the structured fields (group,
//! instructor, modality, note). Editing the label by hand sets a
//! manual-override flag on the dialog state and the projection stops; the
//! flag lives here, never on the persisted block.

use egui::{ComboBox, Context, RichText};

use crate::config::AppConfig;
use crate::models::block::{compose_text, Block, BlockId};
use crate::models::day::Day;
use crate::models::grid::{GridCell, TimeGrid};
use crate::services::schedule::store::BlockStore;
use crate::services::schedule::validator::{ConflictValidator, PlacementError};
use crate::services::sync::WriteIntent;
use crate::utils::time::to_hhmm;

/// State for the block editing dialog
pub struct BlockDialogState {
    pub block_id: Option<BlockId>,
    pub day: Day,
    pub room_index: usize,
    pub start_min: i32,
    pub end_min: i32,
    pub group: String,
    pub instructor: String,
    pub modality: String,
    pub note: String,
    pub text: String,
    /// Set once the operator edits the label by hand; suppresses the
    /// projection from the structured fields.
    pub manual_text: bool,
    pub error_message: Option<String>,
    confirm_delete: bool,
}

impl BlockDialogState {
    /// Dialog for a new block anchored at an empty cell. The end defaults to
    /// one slot after the start.
    pub fn new_block(day: Day, cell: GridCell, grid: &TimeGrid) -> Self {
        Self {
            block_id: None,
            day,
            room_index: cell.room_index,
            start_min: cell.slot_start,
            end_min: cell.slot_start + grid.step_min(),
            group: String::new(),
            instructor: String::new(),
            modality: String::new(),
            note: String::new(),
            text: String::new(),
            manual_text: false,
            error_message: None,
            confirm_delete: false,
        }
    }

    /// Dialog pre-filled from an existing block.
    pub fn edit_block(block: &Block) -> Self {
        Self {
            block_id: block.id.clone(),
            day: block.day,
            room_index: block.room_index,
            start_min: block.start_min,
            end_min: block.end_min,
            group: block.group.clone(),
            instructor: block.instructor.clone(),
            modality: block.modality.clone(),
            note: block.note.clone(),
            text: block.text.clone(),
            // An existing explicit label counts as manually set
            manual_text: !block.text.trim().is_empty(),
            error_message: None,
            confirm_delete: false,
        }
    }

    fn sync_text_from_fields(&mut self) {
        if self.manual_text {
            return;
        }
        self.text = compose_text(&self.group, &self.instructor, &self.modality, &self.note);
    }

    /// The block these fields describe. `id` is preserved for edits and
    /// absent for creations.
    pub fn payload(&self) -> Block {
        Block {
            id: self.block_id.clone(),
            day: self.day,
            room_index: self.room_index,
            start_min: self.start_min,
            end_min: self.end_min,
            text: self.text.trim().to_string(),
            group: self.group.trim().to_string(),
            instructor: self.instructor.trim().to_string(),
            modality: self.modality.trim().to_string(),
            note: self.note.trim().to_string(),
        }
    }

    /// Validate and produce the write intent, or record why not.
    fn try_save(&mut self, store: &BlockStore, grid: &TimeGrid) -> Option<WriteIntent> {
        let block = self.payload();

        if let Err(message) = block.validate() {
            self.error_message = Some(message);
            return None;
        }

        let validator = ConflictValidator::new(store, grid);
        if let Err(reason) = validator.validate_placement(
            block.day,
            block.room_index,
            block.start_min,
            block.end_min,
            self.block_id.as_ref(),
        ) {
            self.error_message = Some(match reason {
                PlacementError::OutOfBounds { .. } => {
                    "End time is invalid or outside the grid".to_string()
                }
                PlacementError::Overlap { conflicting } => format!(
                    "Collides with \"{}\" in the same room",
                    conflicting.display_text()
                ),
            });
            return None;
        }

        Some(match self.block_id.clone() {
            Some(id) => WriteIntent::Update(id, block),
            None => WriteIntent::Create(block),
        })
    }
}

/// Outcome of rendering the dialog for one frame.
pub enum BlockDialogResult {
    KeepOpen,
    Save(WriteIntent),
    Delete(BlockId),
    Cancelled,
}

pub fn render_block_dialog(
    ctx: &Context,
    state: &mut BlockDialogState,
    grid: &TimeGrid,
    config: &AppConfig,
    store: &BlockStore,
) -> BlockDialogResult {
    let mut result = BlockDialogResult::KeepOpen;
    let title = if state.block_id.is_some() {
        "Edit block"
    } else {
        "New block"
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Grid::new("block_dialog_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Day:");
                    ui.label(state.day.label());
                    ui.end_row();

                    ui.label("Room:");
                    ui.label(config.room_label(state.room_index));
                    ui.end_row();

                    ui.label("Start:");
                    ui.label(to_hhmm(state.start_min));
                    ui.end_row();

                    ui.label("End:");
                    ComboBox::from_id_source("block_end_min")
                        .selected_text(to_hhmm(state.end_min))
                        .show_ui(ui, |ui| {
                            let mut m = state.start_min + grid.step_min();
                            while m <= grid.end_min() {
                                ui.selectable_value(&mut state.end_min, m, to_hhmm(m));
                                m += grid.step_min();
                            }
                        });
                    ui.end_row();

                    ui.label("Group:");
                    if ui.text_edit_singleline(&mut state.group).changed() {
                        state.sync_text_from_fields();
                    }
                    ui.end_row();

                    ui.label("Instructor:");
                    if ui.text_edit_singleline(&mut state.instructor).changed() {
                        state.sync_text_from_fields();
                    }
                    ui.end_row();

                    ui.label("Modality:");
                    if ui.text_edit_singleline(&mut state.modality).changed() {
                        state.sync_text_from_fields();
                    }
                    ui.end_row();

                    ui.label("Note:");
                    if ui.text_edit_singleline(&mut state.note).changed() {
                        state.sync_text_from_fields();
                    }
                    ui.end_row();

                    ui.label("Label:");
                    if ui.text_edit_singleline(&mut state.text).changed() {
                        state.manual_text = true;
                    }
                    ui.end_row();
                });

            if let Some(message) = &state.error_message {
                ui.colored_label(egui::Color32::from_rgb(220, 60, 60), message);
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    if let Some(intent) = state.try_save(store, grid) {
                        result = BlockDialogResult::Save(intent);
                    }
                }
                if ui.button("Cancel").clicked() {
                    result = BlockDialogResult::Cancelled;
                }

                if let Some(id) = state.block_id.clone() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if state.confirm_delete {
                            if ui
                                .button(RichText::new("Really delete?").color(
                                    egui::Color32::from_rgb(220, 60, 60),
                                ))
                                .clicked()
                            {
                                result = BlockDialogResult::Delete(id);
                            }
                        } else if ui.button("Delete").clicked() {
                            state.confirm_delete = true;
                        }
                    });
                }
            });
        });

    result
}
