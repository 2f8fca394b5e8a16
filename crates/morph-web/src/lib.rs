pub mod runner;

pub use runner::GameRunner;

/// Session seed from the browser's `Math.random()`; never 0.
pub fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    ((hi << 32) | lo).max(1)
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_init_with_engine_config, game_tick,
///   input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use morph_engine::*;
///
/// mod game;
/// use game::MyCard;
///
/// morph_web::export_game!(MyCard, "my-card");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `morph_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        /// Run `f` against the live runner. Calls before `game_init` are ignored.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: call before game_init()", $game_name);
                        None
                    }
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            init_runner(None);
        }

        /// `game_init` with JSON overriding engine settings (pool size, seed, ...).
        #[wasm_bindgen]
        pub fn game_init_with_engine_config(json: &str) {
            init_runner(Some(json));
        }

        fn init_runner(engine_json: Option<&str>) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let entropy = $crate::entropy_seed();
            let runner = match engine_json {
                Some(json) => $crate::GameRunner::with_overrides(game, json, entropy),
                None => $crate::GameRunner::new(game, entropy),
            };

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_load_config(json: &str) {
            with_runner(|r| r.configure(json));
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_click(region: u32) {
            with_runner(|r| r.push_input(InputEvent::Click { region }));
        }

        #[wasm_bindgen]
        pub fn game_press_start(region: u32) {
            with_runner(|r| r.push_input(InputEvent::PressStart { region }));
        }

        #[wasm_bindgen]
        pub fn game_press_end(region: u32) {
            with_runner(|r| r.push_input(InputEvent::PressEnd { region }));
        }

        #[wasm_bindgen]
        pub fn game_set_camera(x: f32, z: f32) {
            with_runner(|r| r.set_camera(x, z));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_positions_ptr() -> *const f32 {
            with_runner(|r| r.positions_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_colors_ptr() -> *const f32 {
            with_runner(|r| r.colors_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_particle_count() -> u32 {
            with_runner(|r| r.particle_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_positions_dirty() -> bool {
            with_runner(|r| r.positions_dirty()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn get_colors_dirty() -> bool {
            with_runner(|r| r.colors_dirty()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn get_effects_ptr() -> *const f32 {
            with_runner(|r| r.effects_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_effects_point_count() -> u32 {
            with_runner(|r| r.effects_point_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_effects_point_size() -> f32 {
            morph_engine::effects::EFFECT_POINT_SIZE
        }

        #[wasm_bindgen]
        pub fn get_stars_ptr() -> *const f32 {
            with_runner(|r| r.stars_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_star_count() -> u32 {
            with_runner(|r| r.star_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        // ---- View accessors ----

        #[wasm_bindgen]
        pub fn get_auto_rotate() -> f32 {
            with_runner(|r| r.auto_rotate()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_point_size() -> f32 {
            with_runner(|r| r.point_size()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_blur() -> bool {
            with_runner(|r| r.blur()).unwrap_or(false)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_pool_size() -> u32 {
            with_runner(|r| r.pool_size()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_effect_points() -> u32 {
            with_runner(|r| r.max_effect_points()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
