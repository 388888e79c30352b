use crate::constants::{PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::entities::Player;
use crate::types::Vec2;

/// Approximate circle-vs-rectangle overlap: the entity circle (top-left `pos`,
/// diameter `size`) against the player box, by per-axis center distance
/// against the summed half-extents.
pub fn player_overlaps(player: &Player, pos: Vec2, size: f64) -> bool {
    let center = player.center();
    let r = size / 2.0;
    let dx = (pos.x + r - center.x).abs();
    let dy = (pos.y + r - center.y).abs();
    dx <= PLAYER_WIDTH / 2.0 + r && dy <= PLAYER_HEIGHT / 2.0 + r
}
