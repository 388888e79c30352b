pub mod collision;
pub mod constants;
pub mod entities;
pub mod game;
pub mod input;
pub mod rendering;
pub mod terminal_io;
pub mod types;
pub mod world;
