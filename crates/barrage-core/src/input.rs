//! Logical input contract.
//!
//! The external keyboard wiring reports physical keys through `key_down` /
//! `key_up`. The simulation only ever asks about logical [`Action`]s:
//! level-triggered (`is_action_active`) and edge-triggered
//! (`just_activated` / `just_deactivated`). Edge sets live for one tick and
//! are cleared by `advance()`.

use std::collections::HashSet;

use crate::config::KeyBindings;
use crate::enums::Action;

#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    held_keys: HashSet<String>,
    activated: HashSet<Action>,
    deactivated: HashSet<Action>,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held_keys: HashSet::new(),
            activated: HashSet::new(),
            deactivated: HashSet::new(),
        }
    }

    /// Record a physical key press. Auto-repeat of a held key is ignored.
    pub fn key_down(&mut self, key: &str) {
        if self.held_keys.contains(key) {
            return;
        }
        let newly_active: Vec<Action> = self
            .bindings
            .actions_for(key)
            .filter(|&action| !self.is_action_active(action))
            .collect();
        self.held_keys.insert(key.to_string());
        for action in newly_active {
            self.activated.insert(action);
        }
    }

    /// Record a physical key release.
    pub fn key_up(&mut self, key: &str) {
        if !self.held_keys.remove(key) {
            return;
        }
        let released: Vec<Action> = self
            .bindings
            .actions_for(key)
            .filter(|&action| !self.is_action_active(action))
            .collect();
        for action in released {
            self.deactivated.insert(action);
        }
    }

    /// True while any key bound to `action` is held.
    pub fn is_action_active(&self, action: Action) -> bool {
        self.bindings
            .keys_for(action)
            .any(|key| self.held_keys.contains(key))
    }

    /// True if `action` went from inactive to active since the last `advance()`.
    pub fn just_activated(&self, action: Action) -> bool {
        self.activated.contains(&action)
    }

    /// True if `action` went from active to inactive since the last `advance()`.
    pub fn just_deactivated(&self, action: Action) -> bool {
        self.deactivated.contains(&action)
    }

    /// Clear edge-triggered state. Called once at the end of every tick.
    pub fn advance(&mut self) {
        self.activated.clear();
        self.deactivated.clear();
    }

    /// Drop all held keys and edges (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.held_keys.clear();
        self.advance();
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputState {
        InputState::new(KeyBindings::default())
    }

    #[test]
    fn press_sets_level_and_edge() {
        let mut input = input();
        input.key_down("Space");
        assert!(input.is_action_active(Action::Shoot));
        assert!(input.just_activated(Action::Shoot));
        assert!(!input.just_activated(Action::Left));

        input.advance();
        assert!(input.is_action_active(Action::Shoot));
        assert!(!input.just_activated(Action::Shoot));
    }

    #[test]
    fn release_sets_deactivated_edge() {
        let mut input = input();
        input.key_down("KeyA");
        input.advance();
        input.key_up("KeyA");
        assert!(!input.is_action_active(Action::Left));
        assert!(input.just_deactivated(Action::Left));
        input.advance();
        assert!(!input.just_deactivated(Action::Left));
    }

    #[test]
    fn second_key_for_same_action_has_no_new_edge() {
        let mut input = input();
        input.key_down("ArrowLeft");
        input.advance();
        input.key_down("KeyA");
        assert!(!input.just_activated(Action::Left));

        // Releasing one of two held keys keeps the action active.
        input.key_up("ArrowLeft");
        assert!(input.is_action_active(Action::Left));
        assert!(!input.just_deactivated(Action::Left));
    }

    #[test]
    fn auto_repeat_is_ignored() {
        let mut input = input();
        input.key_down("Space");
        input.advance();
        input.key_down("Space");
        assert!(!input.just_activated(Action::Shoot));
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut input = input();
        input.key_down("KeyZ");
        for action in Action::ALL {
            assert!(!input.is_action_active(action));
            assert!(!input.just_activated(action));
        }
        input.key_up("KeyQ");
    }
}
