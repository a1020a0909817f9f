fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "info");
        }
        env_logger::init();
        log::error!("portfolio_fx runs inside a browser page, build it for wasm32-unknown-unknown");
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        // trace here, the page config narrows it with log::set_max_level
        if let Err(e) = console_log::init_with_level(log::Level::Trace) {
            web_sys::console::warn_1(&format!("console logger not installed: {}", e).into());
        }
        if let Err(e) = portfolio_fx::host::web::start() {
            log::error!("Failed to start portfolio effects: {:?}", e);
        }
    }
}
