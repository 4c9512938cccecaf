pub mod board;
pub mod config;
pub mod entity;
pub mod event;
pub mod game;
pub mod game_loop;
pub mod renderer;
pub mod ticker;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_main;
#[cfg(target_arch = "wasm32")]
pub mod web_renderer;

pub use board::{Board, Cell};
pub use config::GameConfig;
pub use entity::{Direction, Position};
pub use event::{Collision, GameEvent};
pub use game::{Game, GameState, TickOutcome};
pub use game_loop::GameLoop;
pub use renderer::{Input, Renderer};
pub use ticker::Ticker;

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;

#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
