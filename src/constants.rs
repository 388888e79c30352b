// --- Game Constants ---
// The playfield is a fixed logical canvas; the renderer scales it onto
// whatever cell grid the terminal provides.
pub const CANVAS_WIDTH: f64 = 480.0;
pub const CANVAS_HEIGHT: f64 = 640.0;

pub const PLAYER_WIDTH: f64 = 50.0;
pub const PLAYER_HEIGHT: f64 = 70.0;
pub const PLAYER_SPEED: f64 = 5.0; // Units per frame per held direction
pub const PLAYER_START_BOTTOM_OFFSET: f64 = 100.0;

pub const BUBBLE_INTERVAL_BASE_MS: f64 = 1000.0;
pub const BUBBLE_INTERVAL_STEP_MS: f64 = 100.0;
pub const BUBBLE_INTERVAL_MIN_MS: f64 = 200.0;
pub const BUBBLE_SIZE_MIN: f64 = 20.0;
pub const BUBBLE_SIZE_MAX: f64 = 50.0;
pub const BUBBLE_SPEED_MIN: f64 = 1.0;
pub const BUBBLE_SPEED_MAX: f64 = 3.0;

pub const MUD_INTERVAL_MS: f64 = 5000.0;
pub const MUD_SIZE: f64 = 30.0;
pub const MUD_SPEED_MIN: f64 = 0.5;
pub const MUD_SPEED_MAX: f64 = 2.0;
pub const MUD_BONUS_SCORE: u32 = 5;
pub const MUD_TINT_DURATION_MS: f64 = 3000.0;

pub const SCORE_MILESTONE: u32 = 10; // Interval drops every this many points

pub const FRAME_MS: f64 = 16.0; // ~60 FPS frame budget
