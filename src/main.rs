use std::env;
use std::io;

use crossterm::{
    cursor::{Hide, Show},
    event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal::{disable_raw_mode, enable_raw_mode, size, supports_keyboard_enhancement},
};
use log::{error, info};

use bubble_dodge::game::Game;
use bubble_dodge::rendering::{Canvas, OutputTarget, ScreenBuffer};
use bubble_dodge::terminal_io::SimulatedInput;

fn key(frame: u64, code: KeyCode, kind: KeyEventKind) -> (u64, Event) {
    (
        frame,
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)),
    )
}

/// Scripted session for `--debug`: slide right, then down, then quit.
fn debug_script() -> SimulatedInput {
    SimulatedInput::new(vec![
        key(5, KeyCode::Right, KeyEventKind::Press),
        key(40, KeyCode::Right, KeyEventKind::Release),
        key(45, KeyCode::Down, KeyEventKind::Press),
        key(70, KeyCode::Down, KeyEventKind::Release),
        key(75, KeyCode::Left, KeyEventKind::Press),
        key(110, KeyCode::Left, KeyEventKind::Release),
        key(180, KeyCode::Char('q'), KeyEventKind::Press),
    ])
}

fn main() -> io::Result<()> {
    simple_logging::log_to_file("bubble-dodge.log", log::LevelFilter::Info)?;
    info!("Starting bubble-dodge");

    let args: Vec<String> = env::args().collect();
    let debug_mode_active = args.len() > 1 && args[1] == "--debug";

    let mut stdout_target;
    let mut simulated_input: Option<SimulatedInput> = None;
    let terminal_width: u16;
    let terminal_height: u16;
    let mut release_events_supported = false;

    if debug_mode_active {
        info!("Debug mode enabled");
        let mut debug_width = 80;
        let mut debug_height = 24;
        if args.len() >= 4 {
            debug_width = args[2].parse::<u16>().unwrap_or(80);
            debug_height = args[3].parse::<u16>().unwrap_or(24);
        }
        terminal_width = debug_width;
        terminal_height = debug_height;
        info!("Debug resolution set to {}x{}", terminal_width, terminal_height);
        stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(terminal_width, terminal_height));
        simulated_input = Some(debug_script());
    } else {
        enable_raw_mode().map_err(|e| {
            error!("Failed to enable raw mode: {}", e);
            e
        })?;
        let (width, height) = size().map_err(|e| {
            error!("Failed to get terminal size: {}", e);
            e
        })?;
        terminal_width = width;
        terminal_height = height;
        stdout_target = OutputTarget::Stdout(io::stdout());
        info!("Terminal size: {}x{}", terminal_width, terminal_height);

        // Held-direction movement needs key-release reporting; fall back to
        // per-keystroke taps where the terminal cannot provide it.
        release_events_supported = supports_keyboard_enhancement().unwrap_or(false);
        if release_events_supported {
            stdout_target.execute_other_command(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            info!("Key release reporting enabled");
        } else {
            info!("Key release reporting unavailable, using tap movement");
        }

        let canvas = Canvas::new(terminal_width, terminal_height);
        canvas.clear_screen_manual(&mut stdout_target, terminal_width, terminal_height)?;
        stdout_target.execute_other_command(Hide)?;
    }

    let max_frames: Option<u64> = if !debug_mode_active && args.len() > 1 {
        args[1].parse::<u64>().ok()
    } else if debug_mode_active && args.len() > 4 {
        args[4].parse::<u64>().ok()
    } else {
        None
    };

    let mut game = Game::new(
        terminal_width,
        terminal_height,
        stdout_target,
        simulated_input,
        debug_mode_active,
        max_frames,
        release_events_supported,
    );
    let result = game.run();

    if !debug_mode_active {
        if release_events_supported {
            let _ = game.stdout_target.execute_other_command(PopKeyboardEnhancementFlags);
        }
        let _ = game.stdout_target.execute_other_command(Show);
        disable_raw_mode().map_err(|e| {
            error!("Failed to disable raw mode on exit: {}", e);
            e
        })?;
    }
    info!("Exiting bubble-dodge");
    result
}
