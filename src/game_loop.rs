use crate::config::GameConfig;
use crate::game::{Game, TickOutcome};
use crate::renderer::{Input, Renderer};
use crate::ticker::Ticker;
use std::io;
use tracing::debug;

/// Glue between the engine, a renderer and the fixed-rate ticker.
/// Hosts call [`GameLoop::frame`] as often as they like.
pub struct GameLoop<R: Renderer> {
    game: Game,
    renderer: R,
    ticker: Ticker,
    quit: bool,
}

impl<R: Renderer> GameLoop<R> {
    pub fn new(config: GameConfig, renderer: R) -> Self {
        Self::with_game(Game::new(config), renderer)
    }

    pub fn with_game(game: Game, renderer: R) -> Self {
        let ticker = Ticker::new(game.config().tick_interval());
        Self {
            game,
            renderer,
            ticker,
            quit: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn init(&mut self) -> io::Result<()> {
        self.renderer.init()?;
        self.renderer.present()
    }

    pub fn handle_input(&mut self, input: Input, now_ms: f64) {
        match input {
            Input::Direction(direction) => self.game.set_direction(direction),
            Input::Start => {
                self.game.start();
                self.ticker.start(now_ms);
            }
            Input::Quit => {
                debug!("quit requested");
                self.ticker.stop();
                self.quit = true;
            }
        }
    }

    /// Polls input, runs at most one tick if one is due and forwards the
    /// resulting events to the renderer.
    pub fn frame(&mut self, now_ms: f64) -> io::Result<()> {
        if let Some(input) = self.renderer.poll_input()? {
            self.handle_input(input, now_ms);
        }

        if self.ticker.poll(now_ms) {
            if let TickOutcome::Collided(_) = self.game.on_tick() {
                self.ticker.stop();
            }
        }

        for event in self.game.drain_events() {
            self.renderer.handle_event(&event)?;
        }
        self.renderer.present()
    }

    pub fn shutdown(&mut self) -> io::Result<()> {
        self.renderer.cleanup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::entity::{Direction, Position};
    use crate::event::{Collision, GameEvent};
    use crate::game::GameState;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct RecordingRenderer {
        inputs: VecDeque<Input>,
        events: Vec<GameEvent>,
        presented: usize,
        initialized: bool,
        cleaned_up: bool,
    }

    impl Renderer for RecordingRenderer {
        fn init(&mut self) -> io::Result<()> {
            self.initialized = true;
            Ok(())
        }

        fn handle_event(&mut self, event: &GameEvent) -> io::Result<()> {
            self.events.push(*event);
            Ok(())
        }

        fn present(&mut self) -> io::Result<()> {
            self.presented += 1;
            Ok(())
        }

        fn cleanup(&mut self) -> io::Result<()> {
            self.cleaned_up = true;
            Ok(())
        }

        fn poll_input(&mut self) -> io::Result<Option<Input>> {
            Ok(self.inputs.pop_front())
        }
    }

    fn new_loop() -> GameLoop<RecordingRenderer> {
        GameLoop::with_game(
            Game::with_seed(GameConfig::default(), 42),
            RecordingRenderer::default(),
        )
    }

    #[test]
    fn test_nothing_happens_before_start() {
        let mut game_loop = new_loop();
        game_loop.init().unwrap();
        assert!(game_loop.renderer().initialized);

        game_loop.frame(0.0).unwrap();
        game_loop.frame(1_000.0).unwrap();

        assert_eq!(game_loop.game().state(), GameState::Idle);
        assert!(game_loop.renderer().events.is_empty());
    }

    #[test]
    fn test_start_input_redraws_and_ticks_on_schedule() {
        let mut game_loop = new_loop();
        game_loop.renderer_mut().inputs.push_back(Input::Start);

        game_loop.frame(0.0).unwrap();
        let events = &game_loop.renderer().events;
        assert_eq!(events.first(), Some(&GameEvent::BoardReset { size: 10 }));
        assert_eq!(events.last(), Some(&GameEvent::ScoreChanged(4)));
        let after_start = events.len();

        // Not due yet
        game_loop.frame(50.0).unwrap();
        assert_eq!(game_loop.renderer().events.len(), after_start);
        assert_eq!(game_loop.game().head(), Some(Position::new(0, 3)));

        game_loop.frame(100.0).unwrap();
        assert_eq!(game_loop.game().head(), Some(Position::new(0, 4)));
        assert!(game_loop.renderer().events[after_start..].contains(&GameEvent::CellChanged {
            position: Position::new(0, 4),
            cell: Cell::Snake,
        }));
    }

    #[test]
    fn test_collision_stops_ticking() {
        let mut game_loop = new_loop();
        game_loop.handle_input(Input::Start, 0.0);
        game_loop.handle_input(Input::Direction(Direction::Up), 0.0);

        game_loop.frame(100.0).unwrap();
        assert_eq!(game_loop.game().state(), GameState::GameOver);
        assert_eq!(
            game_loop.renderer().events.last(),
            Some(&GameEvent::GameOver {
                cause: Collision::Wall
            })
        );

        let seen = game_loop.renderer().events.len();
        game_loop.frame(200.0).unwrap();
        game_loop.frame(300.0).unwrap();
        assert_eq!(game_loop.renderer().events.len(), seen);

        // Start again re-arms the ticker
        game_loop.handle_input(Input::Start, 300.0);
        game_loop.frame(400.0).unwrap();
        assert_eq!(game_loop.game().state(), GameState::Running);
        assert_eq!(game_loop.game().head(), Some(Position::new(0, 4)));
    }

    #[test]
    fn test_quit_and_shutdown() {
        let mut game_loop = new_loop();
        game_loop.renderer_mut().inputs.push_back(Input::Quit);
        game_loop.frame(0.0).unwrap();
        assert!(game_loop.should_quit());

        game_loop.shutdown().unwrap();
        assert!(game_loop.renderer().cleaned_up);
    }

    #[test]
    fn test_every_frame_is_presented() {
        let mut game_loop = new_loop();
        game_loop.init().unwrap();
        for t in 0..5 {
            game_loop.frame(t as f64 * 10.0).unwrap();
        }
        assert_eq!(game_loop.renderer().presented, 6);
    }
}
