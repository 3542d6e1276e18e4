//! Operation mode state machine
//!
//! One manipulation mode is active at a time. Drag modes double as the
//! "movement allowed" state; resize and rotate lock the selection in
//! place while their gesture is interpreted.

/// The active manipulation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    /// No tool armed; selection and movement still work
    None,
    Resize,
    Rotate,
    /// Drag on the camera-facing vertical plane
    AxisDragXY,
    /// Drag on the floor plane
    #[default]
    AxisDragXZ,
}

/// Holds the current mode and answers the queries tools route through
#[derive(Debug, Default)]
pub struct OperationModes {
    current: OperationMode,
}

impl OperationModes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_mode(&self) -> OperationMode {
        self.current
    }

    pub fn is_current_mode(&self, mode: OperationMode) -> bool {
        self.current == mode
    }

    /// Switch to `mode` unconditionally, returning the mode it replaced
    pub fn set_mode(&mut self, mode: OperationMode) -> OperationMode {
        std::mem::replace(&mut self.current, mode)
    }

    /// Arm `mode`, or revert to floor dragging if it is already armed.
    ///
    /// Returns the mode that is now current, so callers can update
    /// button highlights.
    pub fn toggle_mode(&mut self, mode: OperationMode) -> OperationMode {
        if self.current == mode {
            self.current = OperationMode::AxisDragXZ;
        } else {
            self.current = mode;
        }
        self.current
    }

    /// Movement is allowed in both drag modes and with no tool armed
    pub fn can_move(&self) -> bool {
        matches!(
            self.current,
            OperationMode::AxisDragXY | OperationMode::AxisDragXZ | OperationMode::None
        )
    }

    /// True while drags ride the camera-facing vertical plane
    pub fn is_xy_mode(&self) -> bool {
        self.current == OperationMode::AxisDragXY
    }

    /// True while a mode that blocks movement is armed
    pub fn is_non_move_operation_active(&self) -> bool {
        matches!(self.current, OperationMode::Resize | OperationMode::Rotate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_floor_drag() {
        let modes = OperationModes::new();
        assert_eq!(modes.current_mode(), OperationMode::AxisDragXZ);
        assert!(modes.can_move());
        assert!(!modes.is_xy_mode());
    }

    #[test]
    fn test_toggle_arms_then_reverts() {
        let mut modes = OperationModes::new();
        assert_eq!(modes.toggle_mode(OperationMode::Resize), OperationMode::Resize);
        assert!(modes.is_non_move_operation_active());
        assert!(!modes.can_move());

        // Toggling the armed mode again falls back to floor dragging
        assert_eq!(modes.toggle_mode(OperationMode::Resize), OperationMode::AxisDragXZ);
        assert!(modes.can_move());
    }

    #[test]
    fn test_toggle_between_modes() {
        let mut modes = OperationModes::new();
        modes.toggle_mode(OperationMode::Rotate);
        assert_eq!(modes.toggle_mode(OperationMode::Resize), OperationMode::Resize);
    }

    #[test]
    fn test_set_mode_returns_previous() {
        let mut modes = OperationModes::new();
        let prev = modes.set_mode(OperationMode::AxisDragXY);
        assert_eq!(prev, OperationMode::AxisDragXZ);
        assert!(modes.is_xy_mode());
        assert!(modes.can_move());
    }

    #[test]
    fn test_none_allows_movement() {
        let mut modes = OperationModes::new();
        modes.set_mode(OperationMode::None);
        assert!(modes.can_move());
        assert!(!modes.is_non_move_operation_active());
    }
}
