#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }
}

/// Hard boundary clamp: the playfield does not wrap or bounce.
pub fn clamp_coordinate(value: f64, max: f64) -> f64 {
    value.clamp(0.0, max)
}
