use crate::board::Cell;
use crate::entity::{Direction, Position};
use crate::event::GameEvent;
use crate::renderer::{Input, Renderer};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, KeyboardEvent};

// Element ids expected in the host page
const BOARD_ID: &str = "board";
const SCORE_ID: &str = "scoreBoard";
const GAME_OVER_ID: &str = "gameOver";
const START_ID: &str = "start";

fn cell_class(cell: Cell) -> &'static str {
    match cell {
        Cell::Empty => "emptySquare",
        Cell::Snake => "snakeSquare",
        Cell::Food => "foodSquare",
    }
}

fn square_id(pos: Position) -> String {
    format!("{}-{}", pos.row, pos.col)
}

fn to_io_error(err: JsValue) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{:?}", err))
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has the wrong element type", id)))
}

/// DOM front end: one `div` per square, styled through CSS classes.
pub struct WebRenderer {
    window: web_sys::Window,
    document: Document,
    board: Element,
    score_board: HtmlElement,
    game_over_sign: HtmlElement,
    start_button: HtmlButtonElement,
    squares: Vec<Element>,
    size: usize,

    // Filled by DOM listeners, drained once per frame
    pending_input: Rc<RefCell<VecDeque<Input>>>,
}

impl WebRenderer {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let board = element_by_id::<Element>(&document, BOARD_ID)?;
        let score_board = element_by_id::<HtmlElement>(&document, SCORE_ID)?;
        let game_over_sign = element_by_id::<HtmlElement>(&document, GAME_OVER_ID)?;
        let start_button = element_by_id::<HtmlButtonElement>(&document, START_ID)?;

        Ok(Self {
            window,
            document,
            board,
            score_board,
            game_over_sign,
            start_button,
            squares: Vec::new(),
            size: 0,
            pending_input: Rc::new(RefCell::new(VecDeque::new())),
        })
    }

    fn setup_keyboard_listener(&self) -> Result<(), JsValue> {
        let pending_input = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if let Some(direction) = Direction::from_key_code(&event.code()) {
                pending_input
                    .borrow_mut()
                    .push_back(Input::Direction(direction));
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        self.window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;

        closure.forget(); // Keep listener alive
        Ok(())
    }

    fn setup_start_listener(&self) -> Result<(), JsValue> {
        let pending_input = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            pending_input.borrow_mut().push_back(Input::Start);
        }) as Box<dyn FnMut(web_sys::Event)>);

        self.start_button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;

        closure.forget();
        Ok(())
    }

    fn rebuild_board(&mut self, size: usize) -> Result<(), JsValue> {
        self.board.set_inner_html("");
        self.squares.clear();
        self.squares.reserve(size * size);

        for row in 0..size {
            for col in 0..size {
                let square = self.document.create_element("div")?;
                square.set_class_name(&format!("square {}", cell_class(Cell::Empty)));
                square.set_id(&square_id(Position::new(row as i32, col as i32)));
                self.board.append_child(&square)?;
                self.squares.push(square);
            }
        }
        self.size = size;
        Ok(())
    }

    fn draw_square(&self, pos: Position, cell: Cell) {
        let size = self.size as i32;
        if pos.row < 0 || pos.col < 0 || pos.row >= size || pos.col >= size {
            return;
        }
        if let Some(square) = self.squares.get((pos.row * size + pos.col) as usize) {
            square.set_class_name(&format!("square {}", cell_class(cell)));
        }
    }

    fn show_game_over(&self, visible: bool) -> Result<(), JsValue> {
        let display = if visible { "block" } else { "none" };
        self.game_over_sign.style().set_property("display", display)?;
        // The start control is only usable while no game is running
        self.start_button.set_disabled(!visible);
        Ok(())
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        self.setup_keyboard_listener().map_err(to_io_error)?;
        self.setup_start_listener().map_err(to_io_error)?;

        self.game_over_sign
            .style()
            .set_property("display", "none")
            .map_err(to_io_error)?;
        self.start_button.set_disabled(false);
        Ok(())
    }

    fn handle_event(&mut self, event: &GameEvent) -> io::Result<()> {
        match *event {
            GameEvent::BoardReset { size } => {
                self.rebuild_board(size).map_err(to_io_error)?;
                self.show_game_over(false).map_err(to_io_error)?;
            }
            GameEvent::CellChanged { position, cell } => self.draw_square(position, cell),
            GameEvent::ScoreChanged(score) => self.score_board.set_inner_text(&score.to_string()),
            GameEvent::GameOver { .. } => self.show_game_over(true).map_err(to_io_error)?,
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // DOM updates are already visible
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // No cleanup needed for web
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().pop_front())
    }
}
