use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind},
};
use log::{error, info};

use crate::constants::FRAME_MS;
use crate::input::InputState;
use crate::rendering::{Canvas, OutputTarget, Viewport, HUD_COLOR};
use crate::terminal_io::SimulatedInput;
use crate::world::{Phase, World};

pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
    release_events_supported: bool,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
        release_events_supported: bool,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            debug_mode_active,
            max_frames,
            release_events_supported,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        if !self.debug_mode_active {
            self.show_title_screen()?;
        }

        let mut world = World::new();
        let mut input = InputState::new(self.debug_mode_active || self.release_events_supported);
        let mut rng = rand::thread_rng();
        let mut canvas = Canvas::new(self.terminal_width, self.terminal_height);

        let mut running = true;
        let mut frame_count: u64 = 0;
        // Session clock; restarted from zero on reset.
        let mut session_start = Instant::now();
        let mut session_frames: u64 = 0;

        while running && self.max_frames.is_none_or(|max| frame_count < max) {
            let frame_start = Instant::now();

            self.handle_input(
                &mut running,
                &mut world,
                &mut input,
                &mut session_start,
                &mut session_frames,
                frame_count,
            )?;

            if canvas.width != self.terminal_width || canvas.height != self.terminal_height {
                canvas = Canvas::new(self.terminal_width, self.terminal_height);
            }
            let viewport = Viewport::new(self.terminal_width, self.terminal_height);

            if world.phase == Phase::Running {
                let now_ms = if self.debug_mode_active {
                    session_frames as f64 * FRAME_MS
                } else {
                    session_start.elapsed().as_secs_f64() * 1000.0
                };
                world.player.intent = input.intent();
                world.step(now_ms, &mut rng);
                input.end_frame();
                if world.phase == Phase::GameOver {
                    input.clear();
                }
            }

            canvas.clear();
            world.player.draw(&mut canvas, &viewport);
            for bubble in &world.bubbles {
                bubble.draw(&mut canvas, &viewport);
            }
            for mud in &world.mud {
                mud.draw(&mut canvas, &viewport);
            }
            self.draw_hud(&mut canvas, &world);
            if world.phase == Phase::GameOver {
                self.draw_game_over_panel(&mut canvas, world.score);
            }
            self.render(&canvas)?;

            frame_count += 1;
            session_frames += 1;

            if !self.debug_mode_active {
                let elapsed = frame_start.elapsed();
                let budget = Duration::from_millis(FRAME_MS as u64);
                if elapsed < budget {
                    std::thread::sleep(budget - elapsed);
                }
            }
        }
        Ok(())
    }

    fn handle_input(
        &mut self,
        running: &mut bool,
        world: &mut World,
        input: &mut InputState,
        session_start: &mut Instant,
        session_frames: &mut u64,
        frame_count: u64,
    ) -> io::Result<()> {
        let mut events = Vec::new();
        if self.debug_mode_active {
            if let Some(sim_input) = &mut self.simulated_input {
                events = sim_input.take(frame_count);
            }
        } else {
            while event::poll(Duration::ZERO).map_err(|e| {
                error!("Failed to poll event: {}", e);
                e
            })? {
                events.push(event::read().map_err(|e| {
                    error!("Failed to read event: {}", e);
                    e
                })?);
            }
        }

        for event in events {
            match event {
                Event::Key(key_event) => {
                    let pressed = key_event.kind != KeyEventKind::Release;
                    match key_event.code {
                        KeyCode::Char('q') | KeyCode::Esc if pressed => *running = false,
                        KeyCode::Char('r') if pressed && world.phase == Phase::GameOver => {
                            world.reset();
                            input.clear();
                            *session_start = Instant::now();
                            *session_frames = 0;
                        }
                        code if world.phase == Phase::Running => {
                            input.key_event(code, key_event.kind);
                        }
                        _ => {}
                    }
                }
                Event::Resize(new_width, new_height) => {
                    self.terminal_width = new_width;
                    self.terminal_height = new_height;
                    info!("Terminal resized to {}x{}", new_width, new_height);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn draw_hud(&self, canvas: &mut Canvas, world: &World) {
        canvas.write_text(0, 0, &format!("Score: {}", world.score), HUD_COLOR);
        let controls = "Move: WASD/Arrows   Quit: q";
        let y = self.terminal_height.saturating_sub(1) as i32;
        canvas.write_text(0, y, controls, HUD_COLOR);
    }

    fn draw_game_over_panel(&self, canvas: &mut Canvas, score: u32) {
        let lines = [
            "GAME OVER".to_string(),
            format!("Score: {}", score),
            "Press r to restart".to_string(),
        ];
        let cx = self.terminal_width as i32 / 2;
        let cy = self.terminal_height as i32 / 2;
        for (i, line) in lines.iter().enumerate() {
            let x = cx - line.chars().count() as i32 / 2;
            canvas.write_text(x, cy - 1 + i as i32, line, HUD_COLOR);
        }
    }

    fn render(&mut self, canvas: &Canvas) -> io::Result<()> {
        if let OutputTarget::ScreenBuffer(sb) = &mut self.stdout_target {
            sb.clear();
            for y in 0..canvas.height.min(sb.height) {
                for x in 0..canvas.width.min(sb.width) {
                    sb.set_char(x, y, canvas.char_at(x, y));
                }
            }
            sb.print_to_log();
            return Ok(());
        }
        canvas.render(&mut self.stdout_target).map_err(|e| {
            error!("Failed to render frame: {}", e);
            e
        })?;
        self.stdout_target.flush()
    }

    fn show_title_screen(&mut self) -> io::Result<()> {
        let title_art = [
            r" ____  _   _ ____  ____  _     _____   ____   ___  ____   ____ _____ ",
            r"| __ )| | | | __ )| __ )| |   | ____| |  _ \ / _ \|  _ \ / ___| ____|",
            r"|  _ \| | | |  _ \|  _ \| |   |  _|   | | | | | | | | | | |  _|  _|  ",
            r"| |_) | |_| | |_) | |_) | |___| |___  | |_| | |_| | |_| | |_| | |___ ",
            r"|____/ \___/|____/|____/|_____|_____| |____/ \___/|____/ \____|_____|",
        ];

        let title_start_y = (self.terminal_height / 2).saturating_sub(title_art.len() as u16 / 2);
        for (i, line) in title_art.iter().enumerate() {
            let x = (self.terminal_width / 2).saturating_sub(line.len() as u16 / 2);
            self.stdout_target.execute_move_to(MoveTo(x, title_start_y + i as u16))?;
            write!(self.stdout_target, "{}", line)?;
        }

        let press_any_key_msg = "Dodge the bubbles, catch the mud. Press any key to start...";
        let msg_x = (self.terminal_width / 2).saturating_sub(press_any_key_msg.len() as u16 / 2);
        self.stdout_target
            .execute_move_to(MoveTo(msg_x, self.terminal_height.saturating_sub(5)))?;
        write!(self.stdout_target, "{}", press_any_key_msg)?;
        self.stdout_target.flush()?;

        loop {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Release {
                    break;
                }
            }
        }

        let canvas = Canvas::new(self.terminal_width, self.terminal_height);
        canvas.clear_screen_manual(
            &mut self.stdout_target,
            self.terminal_width,
            self.terminal_height,
        )?;
        self.stdout_target.flush()
    }
}
