use crate::{GameConfig, GameLoop, WebRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_animation_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let callback = callback.borrow();
    let closure = callback.as_ref().ok_or("animation callback missing")?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}

/// Entry point called from the host page once the module is loaded.
/// The game itself begins when the start button is clicked.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"[WASM] Starting Snake initialization...".into());

    let renderer = match WebRenderer::new() {
        Ok(renderer) => renderer,
        Err(e) => {
            web_sys::console::error_1(&format!("[WASM] Failed to find page elements: {:?}", e).into());
            return Err(e);
        }
    };

    let mut game_loop = GameLoop::new(GameConfig::default(), renderer);
    game_loop
        .init()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let game_loop = Rc::new(RefCell::new(game_loop));

    let window = web_sys::window().ok_or("no window")?;
    let performance = window.performance().ok_or("no performance")?;

    // Setup requestAnimationFrame loop; the ticker inside the game loop
    // decides which frames advance the snake.
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let current_time = performance.now();

        if let Err(e) = game_loop.borrow_mut().frame(current_time) {
            web_sys::console::error_1(&format!("[WASM] Frame failed: {}", e).into());
            return; // Stop loop on error
        }

        // Schedule next frame
        if let Err(e) = request_animation_frame(&f) {
            web_sys::console::error_1(&e);
        }
    }) as Box<dyn FnMut()>));

    request_animation_frame(&g)?;

    web_sys::console::log_1(&"[WASM] Ready. Press Start to play.".into());

    Ok(())
}
