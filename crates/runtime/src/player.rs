//! Player kinematics and flashlight state.
//!
//! Input arrives as a normalized [`InputActions`] set; device polling and key
//! bindings belong to the client.

use lantern_core::{InputActions, PlayerFlags, PlayerSnapshot, Vec2};

use crate::config::PlayerTuning;

/// Advances the player one frame at a time.
#[derive(Clone, Debug)]
pub struct PlayerController {
    tuning: PlayerTuning,
    room_width: f32,
}

impl PlayerController {
    pub fn new(tuning: PlayerTuning, room_width: f32) -> Self {
        Self { tuning, room_width }
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    /// Applies one frame of held actions.
    ///
    /// `boss` is the position of a living, active boss. While the high beam
    /// is held the player turns to face it regardless of movement direction.
    pub fn step(&self, player: &mut PlayerSnapshot, actions: InputActions, boss: Option<Vec2>) {
        let t = &self.tuning;
        let crouching = actions.contains(InputActions::CROUCH);
        let high_beam = actions.contains(InputActions::HIGH_BEAM);
        let flashlight = actions.contains(InputActions::FLASHLIGHT);

        if flashlight && high_beam {
            player.battery = (player.battery - t.beam_drain).max(0.0);
        }
        player.battery = player.battery.clamp(0.0, t.max_battery);

        let max_speed = if crouching { t.crouch_speed } else { t.walk_speed };
        let input = actions.horizontal();
        let mut vx = player.velocity_x;
        if input != 0.0 {
            vx += input * t.acceleration;
        } else {
            vx *= t.friction;
        }
        if vx.abs() > max_speed {
            vx = vx.signum() * max_speed;
        }
        if vx.abs() < t.min_velocity {
            vx = 0.0;
        }

        let previous_x = player.position.x;
        let mut x = previous_x + vx;
        let right_edge = (self.room_width - player.size.x).max(0.0);
        if x < 0.0 {
            x = 0.0;
            vx = 0.0;
        }
        if x > right_edge {
            x = right_edge;
            vx = 0.0;
        }

        let mut facing_right = player.facing_right();
        match boss {
            Some(boss) if high_beam => {
                if boss.x > previous_x {
                    facing_right = true;
                } else if boss.x < previous_x {
                    facing_right = false;
                }
            }
            _ if input < 0.0 => facing_right = false,
            _ if input > 0.0 => facing_right = true,
            _ => {}
        }

        let mut flags = PlayerFlags::empty();
        flags.set(PlayerFlags::FACING_RIGHT, facing_right);
        flags.set(PlayerFlags::CROUCHING, crouching);
        flags.set(PlayerFlags::FLASHLIGHT, flashlight);
        flags.set(PlayerFlags::HIGH_BEAM, high_beam);

        player.position.x = x;
        player.velocity_x = vx;
        player.flags = flags;
        player.health = player.health.max(0.0);
    }

    /// Removes `amount` health, never going below zero.
    pub fn damage(player: &mut PlayerSnapshot, amount: f32) {
        player.health = (player.health - amount).max(0.0);
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(PlayerTuning::default(), 1600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32) -> PlayerSnapshot {
        PlayerSnapshot::new(Vec2::new(x, 400.0))
    }

    #[test]
    fn accelerates_up_to_walk_speed() {
        let controller = PlayerController::default();
        let mut player = player_at(500.0);

        controller.step(&mut player, InputActions::RIGHT, None);
        assert!((player.velocity_x - 0.8).abs() < 1e-6);

        for _ in 0..20 {
            controller.step(&mut player, InputActions::RIGHT, None);
        }
        assert_eq!(player.velocity_x, 5.0);
        assert!(player.facing_right());
    }

    #[test]
    fn crouching_caps_speed() {
        let controller = PlayerController::default();
        let mut player = player_at(500.0).with_velocity(5.0);

        controller.step(&mut player, InputActions::RIGHT | InputActions::CROUCH, None);
        assert_eq!(player.velocity_x, 2.0);
        assert!(player.is_crouching());
    }

    #[test]
    fn friction_brings_the_player_to_rest() {
        let controller = PlayerController::default();
        let mut player = player_at(500.0).with_velocity(4.0);

        for _ in 0..30 {
            controller.step(&mut player, InputActions::empty(), None);
        }
        assert_eq!(player.velocity_x, 0.0);
    }

    #[test]
    fn walls_stop_the_player() {
        let controller = PlayerController::default();
        let mut player = player_at(2.0).with_velocity(-5.0);

        controller.step(&mut player, InputActions::LEFT, None);
        assert_eq!(player.position.x, 0.0);
        assert_eq!(player.velocity_x, 0.0);
        assert!(!player.facing_right());

        let mut player = player_at(1559.0).with_velocity(5.0);
        controller.step(&mut player, InputActions::RIGHT, None);
        assert_eq!(player.position.x, 1560.0);
    }

    #[test]
    fn high_beam_turns_toward_the_boss() {
        let controller = PlayerController::default();
        let mut player = player_at(800.0);
        let beam = InputActions::FLASHLIGHT | InputActions::HIGH_BEAM | InputActions::RIGHT;

        controller.step(&mut player, beam, Some(Vec2::new(600.0, 400.0)));
        assert!(!player.facing_right());

        // Without a boss to lock onto, movement decides.
        controller.step(&mut player, beam, None);
        assert!(player.facing_right());
    }

    #[test]
    fn focused_beam_drains_the_battery() {
        let controller = PlayerController::default();
        let mut player = player_at(500.0).with_battery(0.5);

        controller.step(&mut player, InputActions::FLASHLIGHT, None);
        assert_eq!(player.battery, 0.5);

        let beam = InputActions::FLASHLIGHT | InputActions::HIGH_BEAM;
        controller.step(&mut player, beam, None);
        assert!((player.battery - 0.2).abs() < 1e-6);
        assert!(player.beam_powered());

        controller.step(&mut player, beam, None);
        assert_eq!(player.battery, 0.0);
        assert!(!player.beam_powered());
    }

    #[test]
    fn damage_never_goes_negative() {
        let mut player = player_at(500.0).with_health(10.0);
        PlayerController::damage(&mut player, 25.0);
        assert_eq!(player.health, 0.0);
    }
}
