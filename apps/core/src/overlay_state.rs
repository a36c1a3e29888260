#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    /// Center the window, raise it and focus the search field.
    ShowAndFocus,
    Hide,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    visible: bool,
}

impl OverlayState {
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hotkey press and status-icon click share this transition.
    pub fn toggle(&mut self) -> WindowAction {
        self.visible = !self.visible;
        if self.visible {
            WindowAction::ShowAndFocus
        } else {
            WindowAction::Hide
        }
    }

    pub fn on_escape(&mut self) -> bool {
        self.hide()
    }

    pub fn on_action_executed(&mut self) -> bool {
        self.hide()
    }

    fn hide(&mut self) -> bool {
        if self.visible {
            self.visible = false;
            return true;
        }
        false
    }
}
