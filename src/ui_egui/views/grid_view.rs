//! The room × slot table: block rendering, hit-testing, and the pointer
//! feed into the drag engine.
//!
//! Geometry is recomputed every frame; `GridLayout` maps between screen
//! positions and lattice cells, which is all the drag engine needs from the
//! rendering layer.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::config::AppConfig;
use crate::models::block::Block;
use crate::models::day::Day;
use crate::models::grid::{GridCell, TimeGrid};
use crate::services::schedule::indexer::GridIndex;
use crate::services::schedule::store::BlockStore;
use crate::services::schedule::validator::{ConflictValidator, PlacementError};
use crate::services::sync::WriteIntent;
use crate::ui_egui::drag::{DragEngine, DragGates, DragModifiers, DropOutcome, PointerId};
use crate::utils::time::{format_range, now_minutes, to_hhmm};

use super::palette::InstructorPalette;

pub const TIME_LABEL_WIDTH: f32 = 64.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const SLOT_HEIGHT: f32 = 34.0;
pub const MIN_COLUMN_WIDTH: f32 = 96.0;
const CELL_INSET: f32 = 1.0;

/// What the grid wants the app to do after this frame.
#[derive(Default)]
pub struct GridInteraction {
    /// Block clicked for editing (click, not drag).
    pub edit_block: Option<Block>,
    /// Empty cell clicked in edit mode: open the create dialog here.
    pub create_at: Option<GridCell>,
    /// A validated move/copy came out of a drop.
    pub committed: Option<WriteIntent>,
    /// A drop failed validation; tell the operator why.
    pub rejected: Option<PlacementError>,
}

/// Frame-local mapping between screen space and lattice cells.
pub(crate) struct GridLayout {
    origin: Pos2,
    col_width: f32,
    row_height: f32,
    grid: TimeGrid,
    room_count: usize,
}

impl GridLayout {
    pub(crate) fn new(origin: Pos2, col_width: f32, grid: TimeGrid, room_count: usize) -> Self {
        Self {
            origin,
            col_width,
            row_height: SLOT_HEIGHT,
            grid,
            room_count,
        }
    }

    pub(crate) fn cell_rect(&self, cell: GridCell) -> Rect {
        let row = ((cell.slot_start - self.grid.start_min()) / self.grid.step_min()) as f32;
        let min = Pos2::new(
            self.origin.x + cell.room_index as f32 * self.col_width,
            self.origin.y + row * self.row_height,
        );
        Rect::from_min_size(min, Vec2::new(self.col_width, self.row_height))
    }

    /// Rect spanning `span` slots from the anchor cell.
    pub(crate) fn block_rect(&self, cell: GridCell, span: usize) -> Rect {
        let mut rect = self.cell_rect(cell);
        rect.set_height(self.row_height * span as f32);
        rect
    }

    /// The lattice cell under a screen position, if any.
    pub(crate) fn cell_at(&self, pos: Pos2) -> Option<GridCell> {
        let rel = pos - self.origin;
        if rel.x < 0.0 || rel.y < 0.0 {
            return None;
        }
        let room_index = (rel.x / self.col_width) as usize;
        let row = (rel.y / self.row_height) as usize;
        if room_index >= self.room_count || row >= self.grid.slot_count() {
            return None;
        }
        Some(GridCell {
            slot_start: self.grid.start_min() + row as i32 * self.grid.step_min(),
            room_index,
        })
    }

    fn y_for_minutes(&self, minutes: i32) -> f32 {
        let frac = (minutes - self.grid.start_min()) as f32 / self.grid.step_min() as f32;
        self.origin.y + frac * self.row_height
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_grid_view(
    ui: &mut egui::Ui,
    store: &BlockStore,
    index: &GridIndex,
    grid: &TimeGrid,
    config: &AppConfig,
    palette: &InstructorPalette,
    engine: &mut DragEngine,
    day: Day,
    edit_mode: bool,
    read_only: bool,
    dialog_open: bool,
) -> GridInteraction {
    let mut result = GridInteraction::default();
    let room_count = config.room_count();

    let available = ui.available_width();
    let col_width =
        ((available - TIME_LABEL_WIDTH) / room_count as f32).max(MIN_COLUMN_WIDTH);
    let desired = Vec2::new(
        TIME_LABEL_WIDTH + col_width * room_count as f32,
        HEADER_HEIGHT + SLOT_HEIGHT * grid.slot_count() as f32,
    );

    let (response, painter) = ui.allocate_painter(desired, Sense::click_and_drag());
    let top_left = response.rect.min;
    let layout = GridLayout::new(
        Pos2::new(top_left.x + TIME_LABEL_WIDTH, top_left.y + HEADER_HEIGHT),
        col_width,
        *grid,
        room_count,
    );

    let visuals = ui.visuals().clone();
    let border = visuals.widgets.noninteractive.bg_stroke.color;
    let faint = visuals.faint_bg_color;

    // Header row: room labels
    for room_index in 0..room_count {
        let rect = Rect::from_min_size(
            Pos2::new(layout.origin.x + room_index as f32 * col_width, top_left.y),
            Vec2::new(col_width, HEADER_HEIGHT),
        );
        painter.rect_filled(rect.shrink(CELL_INSET), 3.0, faint);
        let label = config
            .rooms
            .get(room_index)
            .map(|s| s.replace('\n', " "))
            .unwrap_or_default();
        painter
            .with_clip_rect(rect.shrink(2.0))
            .text(
                rect.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(12.0),
                visuals.strong_text_color(),
            );
    }

    // Slot rows: time labels and empty-cell backgrounds
    for slot_start in grid.slots() {
        let row_rect = layout.cell_rect(GridCell {
            slot_start,
            room_index: 0,
        });
        let label_pos = Pos2::new(top_left.x + TIME_LABEL_WIDTH - 6.0, row_rect.center().y);
        painter.text(
            label_pos,
            Align2::RIGHT_CENTER,
            to_hhmm(slot_start),
            FontId::proportional(11.0),
            visuals.weak_text_color(),
        );

        for room_index in 0..room_count {
            let cell = GridCell {
                slot_start,
                room_index,
            };
            let rect = layout.cell_rect(cell).shrink(CELL_INSET);
            if index.occupant_at(cell).is_some() {
                continue;
            }
            painter.rect_stroke(rect, 2.0, Stroke::new(0.5, border));
            if edit_mode && !read_only {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "+",
                    FontId::proportional(12.0),
                    visuals.weak_text_color(),
                );
            }
        }
    }

    // Blocks, anchored with their slot spans
    for block in store.all().filter(|b| b.day == day) {
        let Some(id) = block.id.as_ref() else {
            continue;
        };
        let anchor = GridCell {
            slot_start: block.start_min,
            room_index: block.room_index,
        };
        let rect = layout
            .block_rect(anchor, index.span_of(id))
            .shrink(CELL_INSET + 1.0);

        // Hide the source block's body while it is being moved (not copied)
        let being_moved = engine.is_dragging()
            && !engine.copy_active()
            && engine.session().map(|s| s.source().id.as_ref()) == Some(Some(id));

        let fill = palette
            .color_for_block(block)
            .unwrap_or_else(|| visuals.widgets.inactive.weak_bg_fill);
        let fill = if being_moved {
            fill.gamma_multiply(0.35)
        } else {
            fill
        };
        painter.rect_filled(rect, 4.0, fill);
        painter.rect_stroke(rect, 4.0, Stroke::new(1.0, border));

        let clipped = painter.with_clip_rect(rect.shrink(3.0));
        clipped.text(
            rect.left_top() + Vec2::new(5.0, 3.0),
            Align2::LEFT_TOP,
            block.display_text(),
            FontId::proportional(12.0),
            Color32::from_rgb(25, 25, 35),
        );
        clipped.text(
            rect.left_top() + Vec2::new(5.0, 19.0),
            Align2::LEFT_TOP,
            format_range(block.start_min, block.end_min),
            FontId::proportional(10.0),
            Color32::from_rgb(70, 70, 90),
        );
        if !block.note.trim().is_empty() {
            clipped.text(
                rect.left_top() + Vec2::new(5.0, 33.0),
                Align2::LEFT_TOP,
                block.note.trim(),
                FontId::proportional(10.0),
                Color32::from_rgb(70, 70, 90),
            );
        }
    }

    // Current time indicator when viewing today's grid
    let now = now_minutes();
    if day == Day::today() && now >= grid.start_min() && now < grid.end_min() {
        let y = layout.y_for_minutes(now);
        let line_color = Color32::from_rgb(255, 100, 100);
        painter.circle_filled(Pos2::new(layout.origin.x - 4.0, y), 3.0, line_color);
        painter.line_segment(
            [
                Pos2::new(layout.origin.x, y),
                Pos2::new(layout.origin.x + col_width * room_count as f32, y),
            ],
            Stroke::new(2.0, line_color),
        );
    }

    // Pointer feed into the drag engine
    let gates = DragGates {
        edit_mode,
        read_only,
        dialog_open,
    };
    let validator = ConflictValidator::new(store, grid);
    let (pressed, released, pointer_pos, modifiers) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
            DragModifiers {
                alt: i.modifiers.alt,
                ctrl: i.modifiers.ctrl,
                command: i.modifiers.mac_cmd,
            },
        )
    });

    if pressed {
        if let Some(pos) = pointer_pos {
            if let Some(cell) = layout.cell_at(pos) {
                if let Some(block) = index.occupant_at(cell).and_then(|id| store.get(id)) {
                    engine.pointer_down(PointerId::PRIMARY, pos, modifiers, block, gates);
                }
            }
        }
    }

    if engine.is_active() {
        if let Some(pos) = pointer_pos {
            engine.pointer_move(PointerId::PRIMARY, pos, modifiers, layout.cell_at(pos));
        }
        engine.evaluate_hover(&validator);
    }

    // Hover decoration, redrawn from engine state each frame
    if let Some(hover) = engine.hover() {
        let rect = layout.cell_rect(hover.cell).shrink(CELL_INSET);
        let (stroke_color, fill) = if hover.legal {
            (
                Color32::from_rgb(60, 120, 255),
                Color32::from_rgba_unmultiplied(60, 120, 255, 18),
            )
        } else {
            (
                Color32::from_rgb(230, 70, 70),
                Color32::from_rgba_unmultiplied(230, 70, 70, 24),
            )
        };
        painter.rect_filled(rect, 2.0, fill);
        painter.rect_stroke(rect, 2.0, Stroke::new(2.0, stroke_color));
    }

    if released {
        let cell = pointer_pos.and_then(|pos| layout.cell_at(pos));
        match engine.pointer_up(PointerId::PRIMARY, cell, &validator) {
            DropOutcome::Click(block) => result.edit_block = Some(block),
            DropOutcome::Committed(intent) => result.committed = Some(intent),
            DropOutcome::Rejected(reason) => result.rejected = Some(reason),
            DropOutcome::NoChange | DropOutcome::Ignored => {}
        }
    }

    // Clicking an empty cell in edit mode opens the create dialog. A drag
    // never ends in `clicked`, so this cannot fire after a drop.
    if response.clicked() && edit_mode && !read_only && !dialog_open {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some(cell) = layout.cell_at(pos) {
                if index.occupant_at(cell).is_none() {
                    result.create_at = Some(cell);
                }
            }
        }
    }

    // Drag proxy, on the foreground layer so it rides over everything
    if let (Some(pos), Some(session)) = (engine.proxy_pos(), engine.session()) {
        let label = format!(
            "{} · {}",
            if engine.copy_active() { "COPY" } else { "MOVE" },
            session.source().display_text()
        );
        let proxy_painter = ui.ctx().layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("block_drag_proxy"),
        ));
        let galley = proxy_painter.layout_no_wrap(
            label,
            FontId::proportional(12.0),
            Color32::from_rgb(25, 25, 35),
        );
        let padding = Vec2::new(10.0, 6.0);
        let rect = Rect::from_min_size(pos + Vec2::new(14.0, 14.0), galley.size() + padding * 2.0);
        proxy_painter.rect_filled(rect, 6.0, Color32::from_rgba_unmultiplied(255, 255, 255, 235));
        proxy_painter.rect_stroke(rect, 6.0, Stroke::new(1.0, border));
        proxy_painter.galley(rect.min + padding, galley, Color32::from_rgb(25, 25, 35));
        ui.ctx().request_repaint();
    }

    result
}
