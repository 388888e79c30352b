use crossterm::event::{KeyCode, KeyEventKind};

/// Directional movement flags, one per held direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Intent {
    pub fn or(self, other: Intent) -> Intent {
        Intent {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }
}

/// Tracks which directions are held, from key press/release events.
///
/// Terminals without key-release reporting never clear a held flag, so when
/// `release_supported` is false a press registers as a one-frame tap instead;
/// the player then moves one step per keystroke (auto-repeat included).
#[derive(Debug)]
pub struct InputState {
    release_supported: bool,
    held: Intent,
    tapped: Intent,
}

impl InputState {
    pub fn new(release_supported: bool) -> Self {
        InputState {
            release_supported,
            held: Intent::default(),
            tapped: Intent::default(),
        }
    }

    pub fn key_event(&mut self, code: KeyCode, kind: KeyEventKind) {
        let (held, tapped) = match code {
            KeyCode::Char('a' | 'A') | KeyCode::Left => {
                (&mut self.held.left, &mut self.tapped.left)
            }
            KeyCode::Char('d' | 'D') | KeyCode::Right => {
                (&mut self.held.right, &mut self.tapped.right)
            }
            KeyCode::Char('w' | 'W') | KeyCode::Up => (&mut self.held.up, &mut self.tapped.up),
            KeyCode::Char('s' | 'S') | KeyCode::Down => {
                (&mut self.held.down, &mut self.tapped.down)
            }
            _ => return,
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.release_supported {
                    *held = true;
                } else {
                    *tapped = true;
                }
            }
            KeyEventKind::Release => {
                *held = false;
                *tapped = false;
            }
        }
    }

    pub fn intent(&self) -> Intent {
        self.held.or(self.tapped)
    }

    /// Taps last a single frame; call once per frame after the world step.
    pub fn end_frame(&mut self) {
        self.tapped = Intent::default();
    }

    pub fn clear(&mut self) {
        self.held = Intent::default();
        self.tapped = Intent::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_and_release_clears_held_flag() {
        let mut input = InputState::new(true);
        input.key_event(KeyCode::Left, KeyEventKind::Press);
        assert!(input.intent().left);
        input.end_frame();
        assert!(input.intent().left, "held flag must survive frame boundaries");
        input.key_event(KeyCode::Left, KeyEventKind::Release);
        assert!(!input.intent().left);
    }

    #[test]
    fn wasd_and_arrows_are_aliases() {
        let mut input = InputState::new(true);
        input.key_event(KeyCode::Char('w'), KeyEventKind::Press);
        assert!(input.intent().up);
        input.key_event(KeyCode::Up, KeyEventKind::Release);
        assert!(!input.intent().up);
    }

    #[test]
    fn tap_lasts_one_frame_without_release_support() {
        let mut input = InputState::new(false);
        input.key_event(KeyCode::Char('d'), KeyEventKind::Press);
        assert!(input.intent().right);
        input.end_frame();
        assert!(!input.intent().right);
    }
}
