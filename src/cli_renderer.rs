use crate::board::Cell;
use crate::entity::{Direction, Position};
use crate::event::{Collision, GameEvent};
use crate::renderer::{Input, Renderer};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ready,
    Playing,
    Over(Collision),
}

/// Terminal front end. Keeps its own copy of the board, built only from
/// engine events.
pub struct CliRenderer {
    size: usize,
    cells: Vec<Cell>,
    score: u32,
    status: Status,
    dirty: bool,
    active: bool,
    last_render: Instant,
    target_frame_time: Duration,
    input_timeout: Duration,
}

impl CliRenderer {
    /// `size` is the board shown before the first game starts.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            score: 0,
            status: Status::Ready,
            dirty: true,
            active: false,
            last_render: Instant::now(),
            // Target 30 FPS for smooth rendering
            target_frame_time: Duration::from_millis(33),
            input_timeout: Duration::from_millis(10),
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let size = self.size as i32;
        if pos.row < 0 || pos.col < 0 || pos.row >= size || pos.col >= size {
            return None;
        }
        Some((pos.row * size + pos.col) as usize)
    }

    fn draw_cell(&self, cell: Cell, stdout: &mut io::Stdout) -> io::Result<()> {
        match cell {
            Cell::Empty => {
                queue!(stdout, SetBackgroundColor(Color::Black), Print("  "))?;
            }
            Cell::Snake => {
                queue!(stdout, SetBackgroundColor(Color::Green), Print("  "))?;
            }
            Cell::Food => {
                queue!(
                    stdout,
                    SetBackgroundColor(Color::Black),
                    SetForegroundColor(Color::Red),
                    Print("()")
                )?;
            }
        }
        Ok(())
    }

    fn draw_border_row(&self, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(
            stdout,
            SetBackgroundColor(Color::DarkGrey),
            Print("  ".repeat(self.size + 2)),
            ResetColor,
            Print("\r\n")
        )
    }

    fn draw_info(&self, stdout: &mut io::Stdout) -> io::Result<()> {
        let info_row = (self.size + 3) as u16;
        queue!(
            stdout,
            cursor::MoveTo(0, info_row),
            terminal::Clear(ClearType::FromCursorDown),
            ResetColor,
            Print(format!("Score: {}", self.score)),
            cursor::MoveTo(0, info_row + 1),
            Print("Controls: Arrow Keys to move | S to start | Q to quit")
        )?;

        match self.status {
            Status::Ready => {
                queue!(
                    stdout,
                    cursor::MoveTo(0, info_row + 2),
                    SetForegroundColor(Color::Yellow),
                    Print("Press S to start"),
                    ResetColor
                )?;
            }
            Status::Over(cause) => {
                let reason = match cause {
                    Collision::Wall => "hit the wall",
                    Collision::SelfCollision => "bit itself",
                };
                queue!(
                    stdout,
                    cursor::MoveTo(0, info_row + 2),
                    SetForegroundColor(Color::Red),
                    Print(format!("GAME OVER! The snake {}. Press S to play again", reason)),
                    ResetColor
                )?;
            }
            Status::Playing => {}
        }

        Ok(())
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        Ok(())
    }

    fn handle_event(&mut self, event: &GameEvent) -> io::Result<()> {
        match *event {
            GameEvent::BoardReset { size } => {
                self.size = size;
                self.cells = vec![Cell::Empty; size * size];
                self.status = Status::Playing;
            }
            GameEvent::CellChanged { position, cell } => {
                if let Some(idx) = self.index(position) {
                    self.cells[idx] = cell;
                }
            }
            GameEvent::ScoreChanged(score) => self.score = score,
            GameEvent::GameOver { cause } => self.status = Status::Over(cause),
        }
        self.dirty = true;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Frame rate limiting: skip rendering if nothing changed or not enough time has passed
        if !self.dirty || self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }

        self.last_render = Instant::now();
        self.dirty = false;

        let mut stdout = io::stdout();

        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.draw_border_row(&mut stdout)?;

        for row in self.cells.chunks(self.size.max(1)) {
            queue!(stdout, SetBackgroundColor(Color::DarkGrey), Print("  "))?;
            for &cell in row {
                self.draw_cell(cell, &mut stdout)?;
            }
            queue!(
                stdout,
                SetBackgroundColor(Color::DarkGrey),
                Print("  "),
                ResetColor,
                Print("\r\n")
            )?;
        }
        self.draw_border_row(&mut stdout)?;

        self.draw_info(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if event::poll(self.input_timeout)? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                if kind == KeyEventKind::Release {
                    return Ok(None);
                }
                return Ok(key_to_input(code));
            }
        }
        Ok(None)
    }
}

fn key_to_input(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char(' ') | KeyCode::Enter => {
            Some(Input::Start)
        }
        KeyCode::Up => Some(Input::Direction(Direction::Up)),
        KeyCode::Down => Some(Input::Direction(Direction::Down)),
        KeyCode::Left => Some(Input::Direction(Direction::Left)),
        KeyCode::Right => Some(Input::Direction(Direction::Right)),
        _ => None,
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
