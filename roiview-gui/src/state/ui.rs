//! UI panel visibility and transient view state.

/// UI toggles that are not part of the session.
pub struct UiState {
    /// Whether the side panel with the minimap is visible.
    pub show_side_panel: bool,
    /// Whether the usage instructions are expanded.
    pub show_instructions: bool,
    /// Whether keyboard shortcuts are active.
    pub keyboard_shortcuts: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_side_panel: true,
            show_instructions: true,
            keyboard_shortcuts: true,
        }
    }
}
