pub mod runner;

pub use runner::ViewerRunner;

/// Generate all `#[wasm_bindgen]` exports for a viewer build.
///
/// Generates:
/// - `thread_local!` storage for the ViewerRunner
/// - `with_runner()` helper, which is a no-op before init and after teardown
/// - All wasm-bindgen exports (lifecycle, input, textures, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod bodies;
/// mod system;
/// use system::SolarSystem;
///
/// orrery_web::export_viewer!(SolarSystem, "solar-system");
/// ```
///
/// # Arguments
///
/// - `$orrery_type`: a type implementing `orrery_engine::Orrery` with a `new()` constructor
/// - `$name`: a string literal used in log messages
#[macro_export]
macro_rules! export_viewer {
    ($orrery_type:ty, $name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ViewerRunner<$orrery_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::ViewerRunner<$orrery_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        /// Build the scene. `seed` drives phase offsets, stars and ring speckles;
        /// pass NaN to seed from the clock. `config_json` overrides the built-in config.
        #[wasm_bindgen]
        pub fn viewer_init(seed: f64, config_json: Option<String>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            if console_log::init_with_level(log::Level::Info).is_err() {
                web_sys::console::warn_1(&JsValue::from_str("orrery: logger already installed"));
            }

            let orrery = <$orrery_type>::new();
            let config = match config_json {
                Some(json) => ViewerConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
                None => orrery.config(),
            };
            let seed = if seed.is_finite() { seed as u64 } else { js_sys::Date::now() as u64 };
            let runner = $crate::ViewerRunner::new(orrery, config.with_seed(seed))
                .map_err(|e| JsValue::from_str(&e.to_string()))?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized (seed {})", $name, seed);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn viewer_start(now_ms: f64) {
            with_runner(|r| r.start(now_ms));
        }

        /// Returns false once the loop is stopped; the host stops requesting frames.
        #[wasm_bindgen]
        pub fn viewer_tick(now_ms: f64) -> bool {
            with_runner(|r| r.tick(now_ms)).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn viewer_teardown() {
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            if let Some(mut runner) = runner {
                runner.teardown();
                log::info!("{}: torn down", $name);
            }
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn viewer_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn viewer_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn viewer_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        /// Focus a body by name; `None` returns to the overview.
        #[wasm_bindgen]
        pub fn viewer_focus(name: Option<String>) {
            with_runner(|r| r.push_input(InputEvent::Focus { name }));
        }

        #[wasm_bindgen]
        pub fn viewer_reset_view() {
            with_runner(|r| r.push_input(InputEvent::Custom { kind: commands::RESET_VIEW, a: 0.0, b: 0.0, c: 0.0 }));
        }

        #[wasm_bindgen]
        pub fn viewer_set_speed(days_per_second: f32) {
            with_runner(|r| {
                r.push_input(InputEvent::Custom { kind: commands::SET_SPEED, a: days_per_second, b: 0.0, c: 0.0 })
            });
        }

        #[wasm_bindgen]
        pub fn viewer_toggle_orbits() {
            with_runner(|r| r.push_input(InputEvent::Custom { kind: commands::TOGGLE_ORBITS, a: 0.0, b: 0.0, c: 0.0 }));
        }

        #[wasm_bindgen]
        pub fn viewer_toggle_fullscreen() {
            with_runner(|r| {
                r.push_input(InputEvent::Custom { kind: commands::TOGGLE_FULLSCREEN, a: 0.0, b: 0.0, c: 0.0 })
            });
        }

        #[wasm_bindgen]
        pub fn viewer_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Textures ----

        #[wasm_bindgen]
        pub fn viewer_pending_textures() -> js_sys::Array {
            let paths = with_runner(|r| r.pending_textures()).unwrap_or_default();
            paths.into_iter().map(|p| JsValue::from_str(&p)).collect()
        }

        #[wasm_bindgen]
        pub fn viewer_texture_loaded(path: &str, width: u32, height: u32, rgba: &[u8]) -> bool {
            with_runner(|r| r.texture_loaded(path, width, height, rgba)).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn viewer_texture_failed(path: &str, reason: &str) {
            with_runner(|r| r.texture_failed(path, reason));
        }

        #[wasm_bindgen]
        pub fn viewer_updated_textures() -> Vec<u32> {
            with_runner(|r| r.take_updated_textures()).unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn viewer_texture_id(path: &str) -> i32 {
            with_runner(|r| r.texture_id(path)).unwrap_or(-1)
        }

        #[wasm_bindgen]
        pub fn get_texture_ptr(id: u32) -> *const u8 {
            with_runner(|r| r.texture_ptr(id)).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_texture_width(id: u32) -> u32 {
            with_runner(|r| r.texture_width(id)).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_texture_height(id: u32) -> u32 {
            with_runner(|r| r.texture_height(id)).unwrap_or(0)
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_events_len() -> u32 {
            with_runner(|r| r.events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_event_floats() -> u32 {
            with_runner(|r| r.event_floats()).unwrap_or(0)
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
        pub fn get_orbit_ptr(body: u32) -> *const f32 {
            with_runner(|r| r.orbit_ptr(body)).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_orbit_point_count(body: u32) -> u32 {
            with_runner(|r| r.orbit_point_count(body)).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_clear_color() -> u32 {
            with_runner(|r| r.clear_color()).unwrap_or(0)
        }

        // ---- UI state ----

        #[wasm_bindgen]
        pub fn get_body_names() -> js_sys::Array {
            let names = with_runner(|r| r.body_names()).unwrap_or_default();
            names.into_iter().map(|n| JsValue::from_str(&n)).collect()
        }

        #[wasm_bindgen]
        pub fn get_speed() -> f64 {
            with_runner(|r| r.speed()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_orbits_visible() -> bool {
            with_runner(|r| r.orbits_visible()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn get_fullscreen() -> bool {
            with_runner(|r| r.is_fullscreen()).unwrap_or(false)
        }
    };
}
