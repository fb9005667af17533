pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // initializes logging using the `log` crate; the page config may lower or raise it
    _ = console_log::init_with_level(log::Level::Info);

    system::bootstrap::run();
}
