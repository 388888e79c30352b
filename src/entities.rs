use rand::Rng;

use crate::constants::*;
use crate::input::Intent;
use crate::rendering::{
    Canvas, Viewport, BUBBLE_COLOR, BUBBLE_SHINE_COLOR, DIRT_PATCH_COLOR, MUD_COLOR,
    MUD_SPOT_COLOR, PLAYER_COLOR, PLAYER_FACE_COLOR, PLAYER_MUDDY_COLOR,
};
use crate::types::{clamp_coordinate, Vec2};

/// Player sprite color state. `Muddy` is the temporary tint after picking up
/// a mud power-up; expiry is tracked by the world clock, not a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Normal,
    Muddy,
}

pub struct Player {
    pub pos: Vec2,
    pub intent: Intent,
    pub tint: Tint,
}

impl Player {
    pub fn new() -> Self {
        Player {
            pos: Vec2::new(
                (CANVAS_WIDTH - PLAYER_WIDTH) / 2.0,
                CANVAS_HEIGHT - PLAYER_START_BOTTOM_OFFSET,
            ),
            intent: Intent::default(),
            tint: Tint::Normal,
        }
    }

    /// Moves by the fixed speed in each held direction, then clamps the
    /// bounding box to the canvas.
    pub fn update(&mut self) {
        if self.intent.left {
            self.pos.x -= PLAYER_SPEED;
        }
        if self.intent.right {
            self.pos.x += PLAYER_SPEED;
        }
        if self.intent.up {
            self.pos.y -= PLAYER_SPEED;
        }
        if self.intent.down {
            self.pos.y += PLAYER_SPEED;
        }
        self.pos.x = clamp_coordinate(self.pos.x, CANVAS_WIDTH - PLAYER_WIDTH);
        self.pos.y = clamp_coordinate(self.pos.y, CANVAS_HEIGHT - PLAYER_HEIGHT);
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + PLAYER_WIDTH / 2.0,
            self.pos.y + PLAYER_HEIGHT / 2.0,
        )
    }

    pub fn draw(&self, canvas: &mut Canvas, vp: &Viewport) {
        let body = match self.tint {
            Tint::Normal => PLAYER_COLOR,
            Tint::Muddy => PLAYER_MUDDY_COLOR,
        };
        let x0 = vp.cell_x(self.pos.x);
        let y0 = vp.cell_y(self.pos.y);
        let w = vp.cell_x(self.pos.x + PLAYER_WIDTH) - x0;
        let h = vp.cell_y(self.pos.y + PLAYER_HEIGHT) - y0;
        canvas.fill_rect(x0, y0, w, h, '\u{2588}', body);

        // Face: eyes and a smile, scaled proportionally like the original art.
        let eye_y = vp.cell_y(self.pos.y + PLAYER_HEIGHT * 0.3);
        canvas.set_cell(vp.cell_x(self.pos.x + PLAYER_WIDTH * 0.3), eye_y, 'o', PLAYER_FACE_COLOR);
        canvas.set_cell(vp.cell_x(self.pos.x + PLAYER_WIDTH * 0.7), eye_y, 'o', PLAYER_FACE_COLOR);
        let smile_y = vp.cell_y(self.pos.y + PLAYER_HEIGHT * 0.55);
        for sx in 0..3 {
            canvas.set_cell(
                vp.cell_x(self.pos.x + PLAYER_WIDTH * 0.4) + sx,
                smile_y,
                '_',
                PLAYER_FACE_COLOR,
            );
        }

        // Dirt patches.
        canvas.set_cell(
            vp.cell_x(self.pos.x + 10.0),
            vp.cell_y(self.pos.y + 15.0),
            '*',
            DIRT_PATCH_COLOR,
        );
        canvas.set_cell(
            vp.cell_x(self.pos.x + PLAYER_WIDTH - 12.0),
            vp.cell_y(self.pos.y + 25.0),
            '*',
            DIRT_PATCH_COLOR,
        );
        canvas.set_cell(
            vp.cell_x(self.pos.x + PLAYER_WIDTH / 2.0),
            vp.cell_y(self.pos.y + PLAYER_HEIGHT - 20.0),
            '*',
            DIRT_PATCH_COLOR,
        );
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

/// Falling hazard; any overlap with the player ends the session.
pub struct Bubble {
    pub pos: Vec2,
    pub size: f64,
    pub speed: f64,
}

impl Bubble {
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let size = rng.gen_range(BUBBLE_SIZE_MIN..BUBBLE_SIZE_MAX);
        Bubble {
            pos: Vec2::new(rng.gen_range(0.0..CANVAS_WIDTH - size), -size),
            size,
            speed: rng.gen_range(BUBBLE_SPEED_MIN..BUBBLE_SPEED_MAX),
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
    }

    /// Top edge past the bottom boundary.
    pub fn past_bottom(&self) -> bool {
        self.pos.y > CANVAS_HEIGHT
    }

    pub fn draw(&self, canvas: &mut Canvas, vp: &Viewport) {
        let r = self.size / 2.0;
        let cx = vp.cell_x(self.pos.x + r);
        let cy = vp.cell_y(self.pos.y + r);
        canvas.fill_ellipse(cx, cy, vp.len_x(r), vp.len_y(r), 'o', BUBBLE_COLOR);
        // Shine highlight toward the upper-left, as in the original.
        let sx = vp.cell_x(self.pos.x + self.size / 3.0);
        let sy = vp.cell_y(self.pos.y + self.size / 3.0);
        canvas.set_cell(sx, sy, '*', BUBBLE_SHINE_COLOR);
    }
}

/// Falling bonus; overlap with the player grants score and a temporary tint.
pub struct Mud {
    pub pos: Vec2,
    pub size: f64,
    pub speed: f64,
}

impl Mud {
    pub fn spawn(rng: &mut impl Rng) -> Self {
        Mud {
            pos: Vec2::new(rng.gen_range(0.0..CANVAS_WIDTH - MUD_SIZE), -MUD_SIZE),
            size: MUD_SIZE,
            speed: rng.gen_range(MUD_SPEED_MIN..MUD_SPEED_MAX),
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn past_bottom(&self) -> bool {
        self.pos.y > CANVAS_HEIGHT
    }

    pub fn draw(&self, canvas: &mut Canvas, vp: &Viewport) {
        let r = self.size / 2.0;
        let cx = vp.cell_x(self.pos.x + r);
        let cy = vp.cell_y(self.pos.y + r);
        canvas.fill_ellipse(cx, cy, vp.len_x(r), vp.len_y(r), '#', MUD_COLOR);
        canvas.set_cell(
            vp.cell_x(self.pos.x + self.size / 3.0),
            vp.cell_y(self.pos.y + self.size / 3.0),
            '+',
            MUD_SPOT_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn player_starts_centered_above_the_bottom() {
        let player = Player::new();
        assert_eq!(player.pos, Vec2::new(215.0, 540.0));
        assert_eq!(player.tint, Tint::Normal);
    }

    #[test]
    fn player_clamps_at_every_edge() {
        let mut player = Player::new();
        player.intent = Intent { left: true, up: true, ..Intent::default() };
        for _ in 0..200 {
            player.update();
        }
        assert_eq!(player.pos, Vec2::new(0.0, 0.0));

        player.intent = Intent { right: true, down: true, ..Intent::default() };
        for _ in 0..200 {
            player.update();
        }
        assert_eq!(
            player.pos,
            Vec2::new(CANVAS_WIDTH - PLAYER_WIDTH, CANVAS_HEIGHT - PLAYER_HEIGHT)
        );
    }

    #[test]
    fn spawned_attributes_stay_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let bubble = Bubble::spawn(&mut rng);
            assert!(bubble.size >= BUBBLE_SIZE_MIN && bubble.size < BUBBLE_SIZE_MAX);
            assert!(bubble.speed >= BUBBLE_SPEED_MIN && bubble.speed < BUBBLE_SPEED_MAX);
            assert!(bubble.pos.x >= 0.0 && bubble.pos.x + bubble.size <= CANVAS_WIDTH);
            assert_eq!(bubble.pos.y, -bubble.size);

            let mud = Mud::spawn(&mut rng);
            assert_eq!(mud.size, MUD_SIZE);
            assert!(mud.speed >= MUD_SPEED_MIN && mud.speed < MUD_SPEED_MAX);
            assert!(mud.pos.x >= 0.0 && mud.pos.x + mud.size <= CANVAS_WIDTH);
        }
    }
}
