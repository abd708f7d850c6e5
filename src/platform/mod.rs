//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (leaderboard timestamps)
//! - Run seeds
//! - Logger setup

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// A fresh seed for a new run
pub fn random_seed() -> u64 {
    // Mix the clock so back-to-back restarts still differ
    let ms = now_ms();
    let bits = ms.to_bits() ^ (ms.fract() * 1e9) as u64;
    bits.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(17)
}

/// Install the logger for the current target
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Logger already initialised");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    if env_logger::try_init().is_err() {
        log::warn!("Logger already initialised");
    }
}
