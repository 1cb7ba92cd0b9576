// src/agent/components.rs
use bevy::prelude::*;

/// What kind of creature an entity is: one tagged enum rather than a type
/// per species. Systems match on it where behavior differs; movement params
/// and looks hang off it below.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Species {
    Predator,
    Prey,
    Snack,
}

impl Species {
    /// Movement tuning, or `None` for species that stay put until moved by
    /// something else (snacks only relocate when eaten).
    pub fn mobility(self) -> Option<Mobility> {
        match self {
            Species::Predator => Some(Mobility::new(2.5, 2.0)),
            Species::Prey => Some(Mobility::new(2.0, 2.5)),
            Species::Snack => None,
        }
    }

    /// Distance from the entity origin down to its feet.
    pub fn grounded_offset(self) -> f32 {
        match self {
            Species::Predator => 0.35,
            Species::Prey => 0.55,
            Species::Snack => 0.3,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Species::Predator => Color::srgb_u8(178, 56, 50),
            Species::Prey => Color::srgb_u8(124, 144, 255),
            Species::Snack => Color::srgb_u8(240, 195, 80),
        }
    }
}

/// Turn-and-thrust movement state for roaming agents.
///
/// Impulses feed `turn` and `momentum`; friction bleeds both off every tick,
/// so an agent that stops receiving impulses coasts to a halt.
#[derive(Component, Clone, Debug)]
pub struct Mobility {
    /// Facing in the ground plane, radians; 0 points along +x.
    pub heading: f32,
    /// Turn rate, radians per second.
    pub turn: f32,
    /// Forward speed, world units per second.
    pub momentum: f32,
    pub max_speed: f32,
    pub max_turn: f32,
    /// Per-tick decay factor applied to `turn` and `momentum`.
    pub friction: f32,
}

impl Mobility {
    pub fn new(max_speed: f32, max_turn: f32) -> Self {
        Self {
            heading: 0.0,
            turn: 0.0,
            momentum: 0.0,
            max_speed,
            max_turn,
            friction: 0.99,
        }
    }

    /// Add forward impulse, capped at `max_speed`.
    pub fn thrust(&mut self, amount: f32) {
        self.momentum = (self.momentum + amount).clamp(-self.max_speed, self.max_speed);
    }

    /// Add turn impulse, capped at `max_turn`. Positive steers toward +z.
    pub fn steer(&mut self, amount: f32) {
        self.turn = (self.turn + amount).clamp(-self.max_turn, self.max_turn);
    }
}

/// Keeps an entity's feet on the terrain: each tick its vertical coordinate
/// is corrected to the surface height plus this offset.
#[derive(Component)]
pub struct Grounded {
    pub offset: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thrust_and_steer_saturate_at_their_caps() {
        let mut m = Mobility::new(2.0, 1.5);
        for _ in 0..10 {
            m.thrust(0.8);
            m.steer(0.6);
        }
        assert_eq!(m.momentum, 2.0);
        assert_eq!(m.turn, 1.5);

        for _ in 0..20 {
            m.thrust(-0.8);
            m.steer(-0.6);
        }
        assert_eq!(m.momentum, -2.0);
        assert_eq!(m.turn, -1.5);
    }

    #[test]
    fn only_roaming_species_get_mobility() {
        assert!(Species::Predator.mobility().is_some());
        assert!(Species::Prey.mobility().is_some());
        assert!(Species::Snack.mobility().is_none());
    }
}
