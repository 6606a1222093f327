use glam::Vec3;

/// A high-level action that any embodiment mode (keyboard, VR) can produce.
///
/// The world consumes actions, never raw device events.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Steer the player along a planar direction. Zero stops steering.
    Steer(Vec3),
    /// Jump, if the character supports it.
    Jump,
    /// Mute or unmute the ambient track.
    ToggleAudio,
    /// Ask the host to end the session.
    Quit,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steer_carries_its_direction() {
        let action = Action::Steer(Vec3::new(1.0, 0.0, -1.0));
        assert!(matches!(action, Action::Steer(d) if d.z < 0.0));
        assert_ne!(action, Action::Steer(Vec3::ZERO));
    }

    #[test]
    fn menu_actions_are_distinct() {
        assert_ne!(Action::ToggleAudio, Action::Quit);
        assert_ne!(Action::Quit, Action::Noop);
    }
}
