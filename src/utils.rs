pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Routes `log` records to the browser console. Later calls are no-ops.
pub fn init_logging(level: log::Level) {
    #[cfg(target_arch = "wasm32")]
    console_log::init_with_level(level).ok();
    #[cfg(not(target_arch = "wasm32"))]
    let _ = level;
}

// Console timer around a scope, shows up in the browser's performance tools
#[cfg(target_arch = "wasm32")]
pub struct Timer<'a> {
    name: &'a str,
}

#[cfg(target_arch = "wasm32")]
impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        web_sys::console::time_with_label(name);
        Timer { name }
    }
}

#[cfg(target_arch = "wasm32")]
impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        web_sys::console::time_end_with_label(self.name);
    }
}
