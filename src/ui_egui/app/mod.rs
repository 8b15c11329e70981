mod context;
mod lifecycle;
mod shortcuts;
mod state;
mod status_bar;
mod toast;

pub use context::{AppContext, SessionEvent};

use crate::config::AppConfig;
use crate::services::session::SessionProvider;
use crate::services::sync::SyncAdapter;
use crate::ui_egui::block_dialog::BlockDialogState;
use crate::ui_egui::drag::DragEngine;
use crate::ui_egui::views::palette::InstructorPalette;
use state::AppState;
use toast::ToastManager;

/// The scheduler desktop app: one day's room × slot grid, kept in sync with
/// the shared store, edited by direct manipulation.
pub struct SchedulerApp {
    context: AppContext,
    state: AppState,
    drag: DragEngine,
    dialog: Option<BlockDialogState>,
    palette: InstructorPalette,
    toasts: ToastManager,
}

impl SchedulerApp {
    pub fn new(
        config: AppConfig,
        adapter: Box<dyn SyncAdapter>,
        provider: impl SessionProvider,
    ) -> Self {
        let palette = InstructorPalette::from_config(&config.instructor_palette);
        let drag = DragEngine::new(config.drag_threshold_px);
        Self {
            context: AppContext::new(config, adapter, provider),
            state: AppState::default(),
            drag,
            dialog: None,
            palette,
            toasts: ToastManager::default(),
        }
    }
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_update(ctx);
    }
}
