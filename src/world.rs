use log::info;
use rand::Rng;

use crate::collision::player_overlaps;
use crate::constants::*;
use crate::entities::{Bubble, Mud, Player, Tint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// All mutable session state, advanced once per frame by [`World::step`].
/// Pure logic: no I/O, no timers — the caller supplies the clock. Timestamps
/// are milliseconds since the session started.
pub struct World {
    pub player: Player,
    pub bubbles: Vec<Bubble>,
    pub mud: Vec<Mud>,
    pub score: u32,
    pub phase: Phase,
    pub bubble_interval_ms: f64,
    last_bubble_ms: f64,
    last_mud_ms: f64,
    tint_until_ms: Option<f64>,
}

impl World {
    pub fn new() -> Self {
        World {
            player: Player::new(),
            bubbles: Vec::new(),
            mud: Vec::new(),
            score: 0,
            phase: Phase::Running,
            bubble_interval_ms: BUBBLE_INTERVAL_BASE_MS,
            last_bubble_ms: 0.0,
            last_mud_ms: 0.0,
            tint_until_ms: None,
        }
    }

    /// Back to the initial state; the session clock restarts at zero, so any
    /// pending tint revert is dropped with the rest of the old session.
    pub fn reset(&mut self) {
        *self = World::new();
        info!("Session reset");
    }

    /// One frame: spawn, move, collide, settle score and tint.
    pub fn step(&mut self, now_ms: f64, rng: &mut impl Rng) {
        if self.phase == Phase::GameOver {
            return;
        }

        self.spawn(now_ms, rng);
        self.player.update();
        self.advance_bubbles();
        self.advance_mud();
        self.check_collisions(now_ms);

        if let Some(until) = self.tint_until_ms {
            if now_ms >= until {
                self.player.tint = Tint::Normal;
                self.tint_until_ms = None;
            }
        }
    }

    fn spawn(&mut self, now_ms: f64, rng: &mut impl Rng) {
        if now_ms - self.last_bubble_ms > self.bubble_interval_ms {
            let bubble = Bubble::spawn(rng);
            info!(
                "Bubble spawned at x={:.0}, size={:.0}, speed={:.1}",
                bubble.pos.x, bubble.size, bubble.speed
            );
            self.bubbles.push(bubble);
            self.last_bubble_ms = now_ms;
        }
        if now_ms - self.last_mud_ms > MUD_INTERVAL_MS {
            self.mud.push(Mud::spawn(rng));
            self.last_mud_ms = now_ms;
        }
    }

    /// Bubbles fall; each one escaping past the bottom scores a point and
    /// feeds the difficulty ramp.
    fn advance_bubbles(&mut self) {
        let mut escaped = 0u32;
        self.bubbles.retain_mut(|bubble| {
            bubble.update();
            if bubble.past_bottom() {
                escaped += 1;
                false
            } else {
                true
            }
        });
        for _ in 0..escaped {
            self.score += 1;
            if self.score % SCORE_MILESTONE == 0 && self.bubble_interval_ms > BUBBLE_INTERVAL_MIN_MS
            {
                self.bubble_interval_ms -= BUBBLE_INTERVAL_STEP_MS;
                info!(
                    "Score {} reached, bubble interval now {}ms",
                    self.score, self.bubble_interval_ms
                );
            }
        }
    }

    fn advance_mud(&mut self) {
        self.mud.retain_mut(|mud| {
            mud.update();
            !mud.past_bottom()
        });
    }

    fn check_collisions(&mut self, now_ms: f64) {
        for bubble in &self.bubbles {
            if player_overlaps(&self.player, bubble.pos, bubble.size) {
                self.phase = Phase::GameOver;
                info!("Bubble hit player, game over at score {}", self.score);
                return;
            }
        }

        let player = &self.player;
        let mut collected = 0u32;
        self.mud.retain(|mud| {
            if player_overlaps(player, mud.pos, mud.size) {
                collected += 1;
                false
            } else {
                true
            }
        });
        if collected > 0 {
            self.score += collected * MUD_BONUS_SCORE;
            self.player.tint = Tint::Muddy;
            self.tint_until_ms = Some(now_ms + MUD_TINT_DURATION_MS);
            info!("Mud collected, score {}", self.score);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Intent;
    use crate::types::Vec2;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// A bubble well away from the player, one step above the bottom edge.
    fn escaping_bubble() -> Bubble {
        Bubble { pos: Vec2::new(0.0, 639.5), size: 20.0, speed: 1.0 }
    }

    #[test]
    fn player_stays_on_canvas_under_held_input() {
        let mut world = World::new();
        let mut rng = rng();
        world.player.intent = Intent { left: true, down: true, ..Intent::default() };
        for _ in 0..300 {
            // Constant timestamp: kinematics run, spawner stays quiet.
            world.step(16.0, &mut rng);
            assert!(world.player.pos.x >= 0.0);
            assert!(world.player.pos.x <= CANVAS_WIDTH - PLAYER_WIDTH);
            assert!(world.player.pos.y >= 0.0);
            assert!(world.player.pos.y <= CANVAS_HEIGHT - PLAYER_HEIGHT);
        }
        assert_eq!(world.player.pos, Vec2::new(0.0, CANVAS_HEIGHT - PLAYER_HEIGHT));
    }

    #[test]
    fn escaped_bubble_scores_one_point() {
        let mut world = World::new();
        let mut rng = rng();
        world.bubbles.push(escaping_bubble());
        world.step(16.0, &mut rng);
        assert_eq!(world.score, 1);
        assert!(world.bubbles.is_empty());
        assert_eq!(world.phase, Phase::Running);
    }

    #[test]
    fn tenth_point_drops_the_spawn_interval() {
        let mut world = World::new();
        let mut rng = rng();
        for _ in 0..10 {
            world.bubbles.push(escaping_bubble());
            world.step(16.0, &mut rng);
        }
        assert_eq!(world.score, 10);
        assert_eq!(world.bubble_interval_ms, 900.0);
    }

    #[test]
    fn spawn_interval_floors_at_minimum() {
        let mut world = World::new();
        let mut rng = rng();
        for _ in 0..90 {
            world.bubbles.push(escaping_bubble());
            world.step(16.0, &mut rng);
        }
        assert_eq!(world.score, 90);
        assert_eq!(world.bubble_interval_ms, BUBBLE_INTERVAL_MIN_MS);
    }

    #[test]
    fn mud_pickup_scores_bonus_and_tints_player() {
        let mut world = World::new();
        let mut rng = rng();
        world.mud.push(Mud { pos: Vec2::new(225.0, 560.0), size: MUD_SIZE, speed: 0.5 });
        world.step(16.0, &mut rng);
        assert_eq!(world.score, MUD_BONUS_SCORE);
        assert!(world.mud.is_empty());
        assert_eq!(world.player.tint, Tint::Muddy);
    }

    #[test]
    fn tint_reverts_after_the_delay() {
        let mut world = World::new();
        let mut rng = rng();
        world.mud.push(Mud { pos: Vec2::new(225.0, 560.0), size: MUD_SIZE, speed: 0.5 });
        world.step(16.0, &mut rng);
        assert_eq!(world.player.tint, Tint::Muddy);

        world.step(3000.0, &mut rng);
        assert_eq!(world.player.tint, Tint::Muddy, "expiry is 16 + 3000ms");
        world.step(3016.0, &mut rng);
        assert_eq!(world.player.tint, Tint::Normal);
    }

    #[test]
    fn missed_mud_disappears_silently() {
        let mut world = World::new();
        let mut rng = rng();
        world.mud.push(Mud { pos: Vec2::new(0.0, 639.9), size: MUD_SIZE, speed: 1.0 });
        world.step(16.0, &mut rng);
        assert!(world.mud.is_empty());
        assert_eq!(world.score, 0);
    }

    #[test]
    fn bubble_overlap_ends_the_session_and_halts_updates() {
        let mut world = World::new();
        let mut rng = rng();
        // Player at (215,540), bubble just below at (215,600) size 40.
        world.bubbles.push(Bubble { pos: Vec2::new(215.0, 600.0), size: 40.0, speed: 0.1 });
        world.step(16.0, &mut rng);
        assert_eq!(world.phase, Phase::GameOver);
        assert_eq!(world.bubbles.len(), 1, "colliding bubble is not consumed");

        // Frozen after game over: no movement, no spawning, even with the
        // clock far past every interval.
        let y_before = world.bubbles[0].pos.y;
        world.player.intent = Intent { right: true, ..Intent::default() };
        world.step(60_000.0, &mut rng);
        assert_eq!(world.bubbles[0].pos.y, y_before);
        assert_eq!(world.bubbles.len(), 1);
        assert!(world.mud.is_empty());
        assert_eq!(world.player.pos, Vec2::new(215.0, 540.0));
    }

    #[test]
    fn reset_restores_the_initial_session() {
        let mut world = World::new();
        let mut rng = rng();
        // Ramp the difficulty, collect a mud, then die.
        for _ in 0..10 {
            world.bubbles.push(escaping_bubble());
            world.step(16.0, &mut rng);
        }
        world.mud.push(Mud { pos: Vec2::new(225.0, 560.0), size: MUD_SIZE, speed: 0.5 });
        world.step(17.0, &mut rng);
        world.bubbles.push(Bubble { pos: Vec2::new(215.0, 600.0), size: 40.0, speed: 0.1 });
        world.step(18.0, &mut rng);
        assert_eq!(world.phase, Phase::GameOver);

        world.reset();
        assert_eq!(world.score, 0);
        assert_eq!(world.phase, Phase::Running);
        assert!(world.bubbles.is_empty());
        assert!(world.mud.is_empty());
        assert_eq!(world.bubble_interval_ms, BUBBLE_INTERVAL_BASE_MS);
        assert_eq!(world.player.pos, Vec2::new(215.0, 540.0));
        assert_eq!(world.player.tint, Tint::Normal);

        // The stale tint revert cannot fire in the new session.
        world.step(10_000.0, &mut rng);
        assert_eq!(world.player.tint, Tint::Normal);
    }

    #[test]
    fn spawner_honors_both_intervals() {
        let mut world = World::new();
        let mut rng = rng();
        world.step(1000.0, &mut rng);
        assert!(world.bubbles.is_empty(), "elapsed must exceed the interval");
        world.step(1001.0, &mut rng);
        assert_eq!(world.bubbles.len(), 1);
        assert!(world.mud.is_empty());
        world.step(5001.0, &mut rng);
        assert_eq!(world.mud.len(), 1);
    }
}
