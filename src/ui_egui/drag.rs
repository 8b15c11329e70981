//! Pointer-driven move/copy of blocks across the grid.
//!
//! A small state machine: `idle -> armed -> dragging -> (dropped | cancelled)
//! -> idle`. Arming happens on a primary press over a block; the armed state
//! becomes a drag only once the pointer travels past a pixel threshold, so a
//! press-and-release below the threshold stays a plain click and opens the
//! editor instead. While dragging, the hovered cell is re-validated against
//! the conflict gate at most once per frame, and every drop is validated
//! again at release time against the store as it is in that instant.

use egui::Pos2;

use crate::models::block::Block;
use crate::models::grid::GridCell;
use crate::services::schedule::validator::{ConflictValidator, PlacementError};
use crate::services::sync::WriteIntent;

/// Default pointer travel, in pixels, separating a click from a drag.
pub const DRAG_THRESHOLD_PX: f32 = 7.0;

/// Identity of the pointer that armed the session. The desktop backend only
/// reports one logical pointer, but keeping the id explicit makes the
/// one-session-at-a-time rule enforceable and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerId(pub u64);

impl PointerId {
    pub const PRIMARY: PointerId = PointerId(0);
}

/// Modifier keys sampled from the event stream. Any of Alt/Ctrl/Command
/// requests a copy instead of a move; re-sampled on every move event so the
/// operator can switch mid-drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragModifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub command: bool,
}

impl DragModifiers {
    pub fn copy_requested(&self) -> bool {
        self.alt || self.ctrl || self.command
    }
}

/// Preconditions sampled at press time. Arming is refused unless edit mode
/// is on, the session is writable, and no dialog is open.
#[derive(Debug, Clone, Copy)]
pub struct DragGates {
    pub edit_mode: bool,
    pub read_only: bool,
    pub dialog_open: bool,
}

impl DragGates {
    fn allow_arming(&self) -> bool {
        self.edit_mode && !self.read_only && !self.dialog_open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragPhase {
    Armed,
    Dragging,
}

/// The hovered drop cell and whether the candidate interval is legal there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTarget {
    pub cell: GridCell,
    pub legal: bool,
}

/// Ephemeral per-interaction state. Owned by the engine, never persisted.
/// The source block and its duration are captured at press time and stay
/// fixed even when snapshots replace the store mid-drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    pointer: PointerId,
    origin: Pos2,
    source: Block,
    copy: bool,
    duration_min: i32,
    phase: DragPhase,
    proxy_pos: Pos2,
    pending_cell: Option<GridCell>,
    hover: Option<HoverTarget>,
}

impl DragSession {
    pub fn source(&self) -> &Block {
        &self.source
    }

    pub fn copy(&self) -> bool {
        self.copy
    }

    pub fn duration_min(&self) -> i32 {
        self.duration_min
    }
}

/// Result of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Armed,
    Ignored,
}

/// Result of a move event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No session, or the event belongs to another pointer.
    Idle,
    /// Still below the drag threshold.
    Armed,
    /// The threshold was crossed on this event; a proxy should appear.
    DragStarted,
    Dragging,
}

/// Result of the once-per-frame hover evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    /// Same cell, same verdict; decoration stays untouched (no flicker).
    Unchanged,
    /// New cell or flipped verdict; clear the old decoration, apply this.
    Changed(Option<HoverTarget>),
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// No session, or the event belongs to another pointer.
    Ignored,
    /// Released below the threshold: a plain click on the source block.
    Click(Block),
    /// Dropped outside the grid, or a move with no net displacement.
    NoChange,
    /// The final cell failed validation; reason is surfaced to the operator.
    Rejected(PlacementError),
    /// Exactly one validated write intent.
    Committed(WriteIntent),
}

/// What tore an interaction down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    PointerCancelled,
    FocusLost,
    WindowHidden,
    Escape,
    DayChanged,
    EditModeOff,
}

/// The drag/copy state machine. One instance per app; at most one session at
/// a time. The app feeds it raw pointer events unconditionally and the
/// engine ignores whatever does not concern it.
pub struct DragEngine {
    threshold_px: f32,
    session: Option<DragSession>,
}

impl DragEngine {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.session,
            Some(DragSession {
                phase: DragPhase::Dragging,
                ..
            })
        )
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether the current session would copy rather than move.
    pub fn copy_active(&self) -> bool {
        self.session.as_ref().map(|s| s.copy).unwrap_or(false)
    }

    /// Where the visual proxy should draw; tracks every move event.
    pub fn proxy_pos(&self) -> Option<Pos2> {
        self.session
            .as_ref()
            .filter(|s| s.phase == DragPhase::Dragging)
            .map(|s| s.proxy_pos)
    }

    /// The currently hovered drop target, as of the last evaluation.
    pub fn hover(&self) -> Option<HoverTarget> {
        self.session.as_ref().and_then(|s| s.hover)
    }

    /// Primary-button press over a block. Arms a session when the gates
    /// allow it, the block is persisted, and no session is active.
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        pos: Pos2,
        modifiers: DragModifiers,
        source: &Block,
        gates: DragGates,
    ) -> PressOutcome {
        if !gates.allow_arming() || self.session.is_some() || source.id.is_none() {
            return PressOutcome::Ignored;
        }

        self.session = Some(DragSession {
            pointer,
            origin: pos,
            source: source.clone(),
            copy: modifiers.copy_requested(),
            duration_min: source.duration_min(),
            phase: DragPhase::Armed,
            proxy_pos: pos,
            pending_cell: None,
            hover: None,
        });
        log::debug!(
            "Drag armed on block {:?} at ({:.0}, {:.0})",
            source.id,
            pos.x,
            pos.y
        );
        PressOutcome::Armed
    }

    /// Move event. Updates the proxy position and the copy flag on every
    /// call; promotes armed to dragging past the threshold; records the cell
    /// under the pointer for the next hover evaluation.
    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        pos: Pos2,
        modifiers: DragModifiers,
        cell: Option<GridCell>,
    ) -> MoveOutcome {
        let threshold = self.threshold_px;
        let Some(session) = self.session.as_mut().filter(|s| s.pointer == pointer) else {
            return MoveOutcome::Idle;
        };

        session.copy = modifiers.copy_requested();
        session.proxy_pos = pos;

        if session.phase == DragPhase::Armed {
            let displacement = (pos - session.origin).length();
            if displacement < threshold {
                return MoveOutcome::Armed;
            }
            session.phase = DragPhase::Dragging;
            session.pending_cell = cell;
            log::debug!("Drag started after {:.1}px of travel", displacement);
            return MoveOutcome::DragStarted;
        }

        session.pending_cell = cell;
        MoveOutcome::Dragging
    }

    /// Validate the pending hover cell. Call at most once per frame; the
    /// verdict is recomputed each call (modifier toggles and inbound
    /// snapshots can flip it in place) but reported as `Changed` only when
    /// the cell or its legality differs from what was last applied.
    pub fn evaluate_hover(&mut self, validator: &ConflictValidator<'_>) -> HoverChange {
        let Some(session) = self
            .session
            .as_mut()
            .filter(|s| s.phase == DragPhase::Dragging)
        else {
            return HoverChange::Unchanged;
        };

        let target = session.pending_cell.map(|cell| {
            let start_min = cell.slot_start;
            let end_min = start_min + session.duration_min;
            let ignore = if session.copy {
                None
            } else {
                session.source.id.as_ref()
            };
            let legal = validator
                .validate_placement(
                    session.source.day,
                    cell.room_index,
                    start_min,
                    end_min,
                    ignore,
                )
                .is_ok();
            HoverTarget { cell, legal }
        });

        if target == session.hover {
            return HoverChange::Unchanged;
        }
        session.hover = target;
        HoverChange::Changed(target)
    }

    /// Release. Below the threshold this is a click; otherwise the final
    /// cell is re-validated against the store as of this instant and at most
    /// one write intent comes out. The session is torn down in every case.
    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        cell: Option<GridCell>,
        validator: &ConflictValidator<'_>,
    ) -> DropOutcome {
        if self
            .session
            .as_ref()
            .map(|s| s.pointer != pointer)
            .unwrap_or(true)
        {
            return DropOutcome::Ignored;
        }
        let session = self.session.take().expect("session checked above");

        if session.phase == DragPhase::Armed {
            return DropOutcome::Click(session.source);
        }

        let Some(cell) = cell else {
            return DropOutcome::NoChange;
        };

        let start_min = cell.slot_start;
        let end_min = start_min + session.duration_min;

        if !session.copy
            && cell.room_index == session.source.room_index
            && start_min == session.source.start_min
        {
            return DropOutcome::NoChange;
        }

        let ignore = if session.copy {
            None
        } else {
            session.source.id.as_ref()
        };
        if let Err(reason) = validator.validate_placement(
            session.source.day,
            cell.room_index,
            start_min,
            end_min,
            ignore,
        ) {
            log::debug!("Drop refused: {}", reason);
            return DropOutcome::Rejected(reason);
        }

        let intent = if session.copy {
            WriteIntent::Create(session.source.copied_to(cell.room_index, start_min, end_min))
        } else {
            let id = session
                .source
                .id
                .clone()
                .expect("armed sessions always hold a persisted block");
            WriteIntent::Update(id, session.source.moved_to(cell.room_index, start_min, end_min))
        };
        DropOutcome::Committed(intent)
    }

    /// Tear down any active session: proxy, hover, copy indicator, all of
    /// it. Reachable from every state and idempotent; invoking it while idle
    /// has no observable effect.
    pub fn cancel(&mut self, reason: CancelReason) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!(
                    "Drag on block {:?} cancelled: {:?}",
                    session.source.id,
                    reason
                );
                true
            }
            None => false,
        }
    }
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::BlockId;
    use crate::models::day::Day;
    use crate::models::grid::TimeGrid;
    use crate::services::schedule::store::BlockStore;

    fn grid() -> TimeGrid {
        TimeGrid::new(570, 1200, 30).unwrap()
    }

    fn block(id: &str, room: usize, start: i32, end: i32) -> Block {
        let mut b = Block::new(Day::Monday, room, start, end).unwrap();
        b.id = Some(BlockId::from(id));
        b.text = "class".to_string();
        b
    }

    fn store_with(blocks: Vec<Block>) -> BlockStore {
        let mut store = BlockStore::new();
        store.replace_all(blocks);
        store
    }

    fn open_gates() -> DragGates {
        DragGates {
            edit_mode: true,
            read_only: false,
            dialog_open: false,
        }
    }

    fn cell(slot_start: i32, room_index: usize) -> GridCell {
        GridCell {
            slot_start,
            room_index,
        }
    }

    fn no_mods() -> DragModifiers {
        DragModifiers::default()
    }

    fn alt() -> DragModifiers {
        DragModifiers {
            alt: true,
            ..Default::default()
        }
    }

    /// Press, then move far enough to start dragging.
    fn start_drag(engine: &mut DragEngine, source: &Block, mods: DragModifiers) {
        let outcome = engine.pointer_down(
            PointerId::PRIMARY,
            Pos2::new(100.0, 100.0),
            mods,
            source,
            open_gates(),
        );
        assert_eq!(outcome, PressOutcome::Armed);
        let outcome = engine.pointer_move(PointerId::PRIMARY, Pos2::new(120.0, 120.0), mods, None);
        assert_eq!(outcome, MoveOutcome::DragStarted);
    }

    #[test]
    fn test_arming_requires_open_gates() {
        let source = block("a", 2, 600, 630);
        let mut engine = DragEngine::default();

        for gates in [
            DragGates {
                edit_mode: false,
                read_only: false,
                dialog_open: false,
            },
            DragGates {
                edit_mode: true,
                read_only: true,
                dialog_open: false,
            },
            DragGates {
                edit_mode: true,
                read_only: false,
                dialog_open: true,
            },
        ] {
            let outcome =
                engine.pointer_down(PointerId::PRIMARY, Pos2::ZERO, no_mods(), &source, gates);
            assert_eq!(outcome, PressOutcome::Ignored);
            assert!(!engine.is_active());
        }
    }

    #[test]
    fn test_arming_requires_persisted_block() {
        let draft = Block::new(Day::Monday, 2, 600, 630).unwrap();
        let mut engine = DragEngine::default();
        let outcome =
            engine.pointer_down(PointerId::PRIMARY, Pos2::ZERO, no_mods(), &draft, open_gates());
        assert_eq!(outcome, PressOutcome::Ignored);
    }

    #[test]
    fn test_second_pointer_is_ignored_while_active() {
        let source = block("a", 2, 600, 630);
        let mut engine = DragEngine::default();
        engine.pointer_down(PointerId(1), Pos2::ZERO, no_mods(), &source, open_gates());

        let outcome =
            engine.pointer_down(PointerId(2), Pos2::ZERO, no_mods(), &source, open_gates());
        assert_eq!(outcome, PressOutcome::Ignored);

        // Events from the other pointer do not disturb the session
        assert_eq!(
            engine.pointer_move(PointerId(2), Pos2::new(500.0, 500.0), no_mods(), None),
            MoveOutcome::Idle
        );
        let store = store_with(vec![source]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        assert_eq!(
            engine.pointer_up(PointerId(2), None, &validator),
            DropOutcome::Ignored
        );
        assert!(engine.is_active());
    }

    #[test]
    fn test_click_below_threshold_opens_editor() {
        let source = block("a", 2, 600, 630);
        let store = store_with(vec![source.clone()]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        engine.pointer_down(
            PointerId::PRIMARY,
            Pos2::new(100.0, 100.0),
            no_mods(),
            &source,
            open_gates(),
        );
        // Wiggle inside the threshold
        let outcome = engine.pointer_move(
            PointerId::PRIMARY,
            Pos2::new(103.0, 102.0),
            no_mods(),
            Some(cell(630, 2)),
        );
        assert_eq!(outcome, MoveOutcome::Armed);

        let outcome = engine.pointer_up(PointerId::PRIMARY, Some(cell(630, 2)), &validator);
        assert_eq!(outcome, DropOutcome::Click(source));
        assert!(!engine.is_active());
    }

    #[test]
    fn test_legal_move_commits_update() {
        let source = block("a", 2, 600, 630);
        let store = store_with(vec![source.clone()]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, no_mods());
        let outcome = engine.pointer_up(PointerId::PRIMARY, Some(cell(660, 5)), &validator);

        match outcome {
            DropOutcome::Committed(WriteIntent::Update(id, moved)) => {
                assert_eq!(id, BlockId::from("a"));
                assert_eq!(moved.room_index, 5);
                assert_eq!(moved.start_min, 660);
                assert_eq!(moved.end_min, 690);
                assert_eq!(moved.text, source.text);
            }
            other => panic!("expected a committed update, got {:?}", other),
        }
        assert!(!engine.is_active());
    }

    #[test]
    fn test_overlapping_drop_is_rejected() {
        let source = block("a", 2, 600, 630);
        let occupant = block("b", 3, 600, 660);
        let store = store_with(vec![source.clone(), occupant]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, no_mods());
        // Aligned slot inside b's interval
        let outcome = engine.pointer_up(PointerId::PRIMARY, Some(cell(630, 3)), &validator);

        assert!(matches!(
            outcome,
            DropOutcome::Rejected(PlacementError::Overlap { .. })
        ));
        assert!(!engine.is_active());
    }

    #[test]
    fn test_copy_via_modifier_commits_create() {
        let source = block("a", 1, 540, 570);
        let store = store_with(vec![source.clone()]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, alt());
        let outcome = engine.pointer_up(PointerId::PRIMARY, Some(cell(540, 4)), &validator);

        match outcome {
            DropOutcome::Committed(WriteIntent::Create(copy)) => {
                assert_eq!(copy.id, None);
                assert_eq!(copy.room_index, 4);
                assert_eq!(copy.start_min, 540);
                assert_eq!(copy.end_min, 570);
                assert_eq!(copy.text, source.text);
            }
            other => panic!("expected a committed create, got {:?}", other),
        }
    }

    #[test]
    fn test_copy_collides_with_its_own_source() {
        let source = block("a", 1, 540, 570);
        let store = store_with(vec![source.clone()]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, alt());
        // Dropping the copy exactly on its source interval must fail
        let outcome = engine.pointer_up(PointerId::PRIMARY, Some(cell(540, 1)), &validator);
        assert!(matches!(
            outcome,
            DropOutcome::Rejected(PlacementError::Overlap { .. })
        ));
    }

    #[test]
    fn test_move_back_to_origin_is_a_no_op() {
        let source = block("a", 2, 600, 630);
        let store = store_with(vec![source.clone()]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, no_mods());
        let outcome = engine.pointer_up(PointerId::PRIMARY, Some(cell(600, 2)), &validator);
        assert_eq!(outcome, DropOutcome::NoChange);
    }

    #[test]
    fn test_drop_outside_grid_is_a_no_op() {
        let source = block("a", 2, 600, 630);
        let store = store_with(vec![source.clone()]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, no_mods());
        let outcome = engine.pointer_up(PointerId::PRIMARY, None, &validator);
        assert_eq!(outcome, DropOutcome::NoChange);
    }

    #[test]
    fn test_modifier_toggle_mid_drag_switches_intent() {
        let source = block("a", 2, 600, 630);
        let store = store_with(vec![source.clone()]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, no_mods());
        assert!(!engine.copy_active());

        engine.pointer_move(
            PointerId::PRIMARY,
            Pos2::new(140.0, 140.0),
            alt(),
            Some(cell(660, 5)),
        );
        assert!(engine.copy_active());

        let outcome = engine.pointer_up(PointerId::PRIMARY, Some(cell(660, 5)), &validator);
        assert!(matches!(
            outcome,
            DropOutcome::Committed(WriteIntent::Create(_))
        ));
    }

    #[test]
    fn test_hover_reports_change_only_on_cell_or_verdict_change() {
        let source = block("a", 2, 600, 630);
        let occupant = block("b", 3, 600, 660);
        let store = store_with(vec![source.clone(), occupant]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, no_mods());

        engine.pointer_move(
            PointerId::PRIMARY,
            Pos2::new(130.0, 130.0),
            no_mods(),
            Some(cell(660, 5)),
        );
        assert_eq!(
            engine.evaluate_hover(&validator),
            HoverChange::Changed(Some(HoverTarget {
                cell: cell(660, 5),
                legal: true,
            }))
        );

        // Same cell on the next frame: no re-application, no flicker
        engine.pointer_move(
            PointerId::PRIMARY,
            Pos2::new(131.0, 131.0),
            no_mods(),
            Some(cell(660, 5)),
        );
        assert_eq!(engine.evaluate_hover(&validator), HoverChange::Unchanged);

        // Illegal cell flips the verdict
        engine.pointer_move(
            PointerId::PRIMARY,
            Pos2::new(132.0, 132.0),
            no_mods(),
            Some(cell(630, 3)),
        );
        assert_eq!(
            engine.evaluate_hover(&validator),
            HoverChange::Changed(Some(HoverTarget {
                cell: cell(630, 3),
                legal: false,
            }))
        );

        // Leaving the grid clears the hover
        engine.pointer_move(PointerId::PRIMARY, Pos2::new(300.0, 300.0), no_mods(), None);
        assert_eq!(
            engine.evaluate_hover(&validator),
            HoverChange::Changed(None)
        );
    }

    #[test]
    fn test_move_hover_ignores_own_source_but_copy_does_not() {
        let source = block("a", 2, 600, 660);
        let store = store_with(vec![source.clone()]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, no_mods());
        engine.pointer_move(
            PointerId::PRIMARY,
            Pos2::new(130.0, 130.0),
            no_mods(),
            Some(cell(630, 2)),
        );
        // A move overlapping its own prior placement is legal
        assert_eq!(
            engine.evaluate_hover(&validator),
            HoverChange::Changed(Some(HoverTarget {
                cell: cell(630, 2),
                legal: true,
            }))
        );

        // Toggling to copy flips the verdict in place on the same cell
        engine.pointer_move(
            PointerId::PRIMARY,
            Pos2::new(130.0, 130.0),
            alt(),
            Some(cell(630, 2)),
        );
        assert_eq!(
            engine.evaluate_hover(&validator),
            HoverChange::Changed(Some(HoverTarget {
                cell: cell(630, 2),
                legal: false,
            }))
        );
    }

    #[test]
    fn test_snapshot_mid_drag_is_seen_at_drop_time() {
        let source = block("a", 2, 600, 630);
        let g = grid();
        let mut engine = DragEngine::default();

        let store = store_with(vec![source.clone()]);
        {
            let validator = ConflictValidator::new(&store, &g);
            start_drag(&mut engine, &source, no_mods());
            engine.pointer_move(
                PointerId::PRIMARY,
                Pos2::new(130.0, 130.0),
                no_mods(),
                Some(cell(660, 5)),
            );
            assert_eq!(
                engine.evaluate_hover(&validator),
                HoverChange::Changed(Some(HoverTarget {
                    cell: cell(660, 5),
                    legal: true,
                }))
            );
        }

        // A concurrent writer takes the target interval mid-drag
        let store = store_with(vec![source, block("c", 5, 660, 690)]);
        let validator = ConflictValidator::new(&store, &g);
        let outcome = engine.pointer_up(PointerId::PRIMARY, Some(cell(660, 5)), &validator);
        assert!(matches!(
            outcome,
            DropOutcome::Rejected(PlacementError::Overlap { .. })
        ));
    }

    #[test]
    fn test_cancel_tears_down_from_armed_and_dragging() {
        let source = block("a", 2, 600, 630);
        let mut engine = DragEngine::default();

        engine.pointer_down(
            PointerId::PRIMARY,
            Pos2::ZERO,
            no_mods(),
            &source,
            open_gates(),
        );
        assert!(engine.cancel(CancelReason::FocusLost));
        assert!(!engine.is_active());
        assert!(engine.hover().is_none());
        assert!(engine.proxy_pos().is_none());

        start_drag(&mut engine, &source, no_mods());
        assert!(engine.cancel(CancelReason::Escape));
        assert!(!engine.is_active());
    }

    #[test]
    fn test_cancel_when_idle_is_idempotent() {
        let mut engine = DragEngine::default();
        assert!(!engine.cancel(CancelReason::PointerCancelled));
        assert!(!engine.cancel(CancelReason::WindowHidden));
        assert!(!engine.is_active());
    }

    #[test]
    fn test_no_write_after_cancel() {
        let source = block("a", 2, 600, 630);
        let store = store_with(vec![source.clone()]);
        let g = grid();
        let validator = ConflictValidator::new(&store, &g);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, no_mods());
        engine.cancel(CancelReason::WindowHidden);

        let outcome = engine.pointer_up(PointerId::PRIMARY, Some(cell(660, 5)), &validator);
        assert_eq!(outcome, DropOutcome::Ignored);
    }

    #[test]
    fn test_proxy_tracks_every_move_while_dragging() {
        let source = block("a", 2, 600, 630);
        let mut engine = DragEngine::default();

        start_drag(&mut engine, &source, no_mods());
        engine.pointer_move(PointerId::PRIMARY, Pos2::new(200.0, 50.0), no_mods(), None);
        assert_eq!(engine.proxy_pos(), Some(Pos2::new(200.0, 50.0)));
    }
}
