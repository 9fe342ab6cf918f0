use log::Level;
use std::env::var;
use std::sync::Once;

static LOGGER: Once = Once::new();

pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = if var("RUST_LOG").is_err() {
            simple_logger::init_with_level(Level::Info)
        } else {
            simple_logger::init_with_env()
        };
    });
}
