//! Web Toybox entry point
//!
//! On wasm this wires the two demo pages (calculator and breaker) to their
//! engines; everything here is translation between DOM events and the
//! command/snapshot interfaces. On native it runs a short headless self-check.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use web_toybox::breaker::{BreakerState, Phase, TickInput, tick};
    use web_toybox::calc::{Calculator, Operator};
    use web_toybox::consts::*;
    use web_toybox::{History, Settings, format_value};

    /// State behind the calculator page
    struct CalcApp {
        engine: Calculator,
        history: History,
        settings: Settings,
    }

    impl CalcApp {
        fn new() -> Self {
            Self {
                engine: Calculator::new(),
                history: History::load(),
                settings: Settings::load(),
            }
        }

        /// Translate one key (button `data-key` or keyboard key) into an
        /// engine command. Unknown keys are ignored.
        fn press(&mut self, key: &str) {
            match key {
                "=" | "Enter" => self.resolve_equals(),
                "." | "," => self.engine.input_decimal(),
                "Backspace" => self.engine.handle_backspace(),
                "Delete" => self.engine.clear_entry(),
                "Escape" => self.engine.reset(),
                "%" => self.engine.apply_percent(),
                "n" | "N" => self.engine.toggle_sign(),
                _ => {
                    let mut chars = key.chars();
                    if let (Some(c), None) = (chars.next(), chars.next()) {
                        if c.is_ascii_digit() {
                            self.engine.input_digit(c);
                        } else if let Some(op) = Operator::from_char(c) {
                            self.engine.handle_operator(op);
                        }
                    }
                }
            }
        }

        /// Equals additionally records the resolved calculation
        fn resolve_equals(&mut self) {
            let before = self.engine.snapshot();
            self.engine.handle_equals();
            let after = self.engine.snapshot();

            let resolved = after.error.is_none() && after.operator.is_none();
            if let (Some(first), Some(op), true) = (before.first_operand, before.operator, resolved)
            {
                let expression = format!("{} {} {}", format_value(first), op, before.display_value);
                self.history
                    .record(expression, after.display_value, js_sys::Date::now());
                self.history.save();
            }
        }

        /// Push the current snapshot into the page
        fn render(&self, document: &Document) {
            let snap = self.engine.snapshot();

            if let Some(el) = document.get_element_by_id("calc-display") {
                el.set_text_content(Some(snap.screen_text()));
                if snap.error.is_some() {
                    let _ = el.class_list().add_1("error");
                } else {
                    let _ = el.class_list().remove_1("error");
                }
            }

            // Pending operation indicator, e.g. "5 +"
            if let Some(el) = document.get_element_by_id("calc-pending") {
                let text = match (snap.first_operand, snap.operator) {
                    (Some(first), Some(op)) => format!("{} {}", format_value(first), op),
                    _ => String::new(),
                };
                el.set_text_content(Some(&text));
            }

            self.render_history(document);
        }

        fn render_history(&self, document: &Document) {
            let Some(list) = document.get_element_by_id("history-list") else {
                return;
            };
            list.set_text_content(None);
            if !self.settings.show_history {
                return;
            }
            for entry in &self.history.entries {
                if let Ok(item) = document.create_element("li") {
                    item.set_text_content(Some(&format!(
                        "{} = {}",
                        entry.expression, entry.result
                    )));
                    let _ = list.append_child(&item);
                }
            }
        }

        fn apply_theme(&self, document: &Document) {
            if let Some(body) = document.body() {
                body.set_class_name(self.settings.theme.dom_class());
            }
        }
    }

    /// Copy text to the system clipboard (best effort, promise dropped)
    fn copy_to_clipboard(text: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.navigator().clipboard().write_text(text);
            log::info!("Copied \"{}\" to clipboard", text);
        }
    }

    fn setup_calculator(document: &Document) {
        let app = Rc::new(RefCell::new(CalcApp::new()));
        {
            let a = app.borrow();
            a.apply_theme(document);
            a.render(document);
        }

        // Button grid: every element carrying data-key issues that key
        if let Ok(buttons) = document.query_selector_all("[data-key]") {
            for i in 0..buttons.length() {
                let Some(node) = buttons.item(i) else { continue };
                let Ok(el) = node.dyn_into::<Element>() else {
                    continue;
                };
                let Some(key) = el.get_attribute("data-key") else {
                    continue;
                };
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let document = web_sys::window().unwrap().document().unwrap();
                    let mut a = app.borrow_mut();
                    a.press(&key);
                    a.render(&document);
                });
                let _ =
                    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Physical keyboard
        {
            let app = app.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                if !a.settings.keyboard_input {
                    return;
                }
                let key = event.key();
                a.press(&key);
                let document = web_sys::window().unwrap().document().unwrap();
                a.render(&document);
            });
            let _ =
                window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Copy the displayed value
        if let Some(btn) = document.get_element_by_id("copy-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let snap = app.borrow().engine.snapshot();
                copy_to_clipboard(&snap.display_value);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Theme toggle
        if let Some(btn) = document.get_element_by_id("theme-toggle") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut a = app.borrow_mut();
                a.settings.toggle_theme();
                a.settings.save();
                a.apply_theme(&document);
                log::info!("Theme: {}", a.settings.theme.as_str());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clear history
        if let Some(btn) = document.get_element_by_id("history-clear") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut a = app.borrow_mut();
                a.history.clear();
                a.history.save();
                a.render(&document);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        log::info!("Calculator page ready");
    }

    /// State behind the breaker page
    struct BreakerApp {
        state: BreakerState,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        ctx: CanvasRenderingContext2d,
    }

    impl BreakerApp {
        /// Run fixed simulation steps for the elapsed frame time
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.serve = false;
                self.input.pause = false;
            }
        }

        fn render(&self) {
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

            // HUD strip
            ctx.set_fill_style_str("rgba(255, 255, 255, 0.08)");
            ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, HUD_HEIGHT as f64);
            ctx.set_fill_style_str("#e8ecf1");
            ctx.set_font("14px sans-serif");
            ctx.set_text_align("left");
            let _ = ctx.fill_text(&format!("Score: {}", self.state.score), 12.0, 20.0);
            ctx.set_text_align("center");
            let _ = ctx.fill_text(
                &format!("Lives: {}", self.state.lives),
                FIELD_WIDTH as f64 / 2.0,
                20.0,
            );
            ctx.set_text_align("right");
            let _ = ctx.fill_text(
                &format!("Level: {}", self.state.level),
                FIELD_WIDTH as f64 - 12.0,
                20.0,
            );

            // Bricks, tinted by remaining strength
            const COLORS: [&str; 3] = ["#6cf0ff", "#5ef7c6", "#ffc857"];
            for brick in self.state.bricks.iter().filter(|b| b.alive) {
                let color = COLORS[(brick.strength.max(1) as usize - 1) % COLORS.len()];
                ctx.set_fill_style_str(color);
                ctx.fill_rect(
                    brick.pos.x as f64,
                    brick.pos.y as f64,
                    BRICK_WIDTH as f64,
                    BRICK_HEIGHT as f64,
                );
            }

            // Paddle
            ctx.set_fill_style_str("#51c3ff");
            ctx.fill_rect(
                self.state.paddle.x as f64,
                self.state.paddle.top() as f64,
                self.state.paddle.width as f64,
                PADDLE_HEIGHT as f64,
            );

            // Ball
            ctx.set_fill_style_str("#ffc857");
            ctx.begin_path();
            let _ = ctx.arc(
                self.state.ball.pos.x as f64,
                self.state.ball.pos.y as f64,
                self.state.ball.radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();

            // Phase overlay
            let message = match self.state.phase {
                Phase::Ready => Some("Space to serve"),
                Phase::Paused => Some("Paused - Space or P to resume"),
                Phase::GameOver => Some("Game over - R to restart"),
                Phase::Cleared => Some("Cleared! Congratulations - R to restart"),
                Phase::Playing => None,
            };
            if let Some(message) = message {
                ctx.set_fill_style_str("#e8ecf1");
                ctx.set_font("22px sans-serif");
                ctx.set_text_align("center");
                let _ = ctx.fill_text(
                    message,
                    FIELD_WIDTH as f64 / 2.0,
                    FIELD_HEIGHT as f64 / 2.0,
                );
            }
        }
    }

    fn setup_breaker(canvas: HtmlCanvasElement) {
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(BreakerApp {
            state: BreakerState::new(seed),
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: 0.0,
            ctx,
        }));
        log::info!("Breaker initialized with seed: {}", seed);

        // Keyboard: arrows steer, space serves/resumes, P pauses, R restarts
        {
            let app = app.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    "ArrowRight" => a.input.dir = 1.0,
                    "ArrowLeft" => a.input.dir = -1.0,
                    " " => {
                        if a.state.phase == Phase::Paused {
                            a.input.pause = true;
                        } else {
                            a.input.serve = true;
                        }
                    }
                    "p" | "P" => a.input.pause = true,
                    "r" | "R" => {
                        let seed = js_sys::Date::now() as u64;
                        a.state = BreakerState::new(seed);
                        a.input = TickInput::default();
                        log::info!("Breaker restarted with seed: {}", seed);
                    }
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    "ArrowRight" if a.input.dir > 0.0 => a.input.dir = 0.0,
                    "ArrowLeft" if a.input.dir < 0.0 => a.input.dir = 0.0,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        request_animation_frame(app);
    }

    fn request_animation_frame(app: Rc<RefCell<BreakerApp>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<BreakerApp>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;
            a.update(dt);
            a.render();
        }
        request_animation_frame(app);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Web Toybox starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // One crate serves both pages; wire whichever widgets are present
        if document.get_element_by_id("calc-display").is_some() {
            setup_calculator(&document);
        }
        if let Some(el) = document.get_element_by_id("breaker-canvas") {
            let canvas: HtmlCanvasElement = el.dyn_into().expect("not a canvas");
            setup_breaker(canvas);
        }

        log::info!("Web Toybox running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Web Toybox (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web pages");

    println!("\nRunning engine self-checks...");
    check_calculator();
    check_breaker();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn check_calculator() {
    use web_toybox::calc::{Calculator, Operator};

    let mut calc = Calculator::new();
    calc.input_digit('1');
    calc.handle_operator(Operator::Add);
    calc.input_digit('2');
    calc.handle_equals();
    assert_eq!(calc.snapshot().display_value, "3");

    calc.handle_operator(Operator::Divide);
    calc.input_digit('0');
    calc.handle_equals();
    assert!(calc.snapshot().error.is_some());

    calc.input_digit('5');
    let snap = calc.snapshot();
    assert!(snap.error.is_none());
    assert_eq!(snap.display_value, "5");

    println!("✓ Calculator engine checks passed!");
}

#[cfg(not(target_arch = "wasm32"))]
fn check_breaker() {
    use web_toybox::breaker::{BreakerState, Phase, TickInput, tick};
    use web_toybox::consts::SIM_DT;

    let mut state = BreakerState::new(12345);
    let serve = TickInput {
        serve: true,
        ..Default::default()
    };
    tick(&mut state, &serve, SIM_DT);
    assert_eq!(state.phase, Phase::Playing);

    for _ in 0..600 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    assert!(state.time_ticks > 0);
    log::info!(
        "Breaker after 5s: score {} lives {} phase {:?}",
        state.score,
        state.lives,
        state.phase
    );

    println!("✓ Breaker simulation checks passed!");
}
