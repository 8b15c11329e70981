/// Which main view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Grid,
    Live,
    Rooms,
    Instructors,
    Search,
    Kpis,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 6] = [
        ActiveTab::Grid,
        ActiveTab::Live,
        ActiveTab::Rooms,
        ActiveTab::Instructors,
        ActiveTab::Search,
        ActiveTab::Kpis,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActiveTab::Grid => "Grid",
            ActiveTab::Live => "Live",
            ActiveTab::Rooms => "Rooms",
            ActiveTab::Instructors => "Instructors",
            ActiveTab::Search => "Search",
            ActiveTab::Kpis => "KPIs",
        }
    }
}

/// Per-session UI state outside the scheduling core.
pub struct AppState {
    pub active_tab: ActiveTab,
    pub edit_mode: bool,
    /// Slot paging offset for the live board.
    pub live_offset: i32,
    pub instructor_filter: String,
    pub search_query: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: ActiveTab::Grid,
            edit_mode: false,
            live_offset: 0,
            instructor_filter: String::new(),
            search_query: String::new(),
        }
    }
}
