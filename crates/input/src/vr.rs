use prizehunt_common::EntityId;

/// Binds VR controllers to the player character.
pub trait VrBinder {
    fn bind_character(&mut self, character: EntityId);
}

/// Binder for sessions without a headset.
#[derive(Debug, Default)]
pub struct NullVrBinder {
    bound: Option<EntityId>,
}

impl NullVrBinder {
    pub fn bound(&self) -> Option<EntityId> {
        self.bound
    }
}

impl VrBinder for NullVrBinder {
    fn bind_character(&mut self, character: EntityId) {
        tracing::debug!(character = %character.short(), "no headset; binding recorded only");
        self.bound = Some(character);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_binder_records_character() {
        let mut binder = NullVrBinder::default();
        let id = EntityId::new();
        binder.bind_character(id);
        assert_eq!(binder.bound(), Some(id));
    }
}
