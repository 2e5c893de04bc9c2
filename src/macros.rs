//! Small crate-wide convenience macros.

/// Log a formatted message to the browser console.
///
/// Compiled out of release builds.  On non-wasm targets (native unit tests)
/// the arguments are still type-checked but nothing is printed, so pure code
/// paths never reach a JS import.
///
/// ```rust,ignore
/// debug_log!("rebuilt opacity map {}x{}", w, h);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(all(debug_assertions, target_arch = "wasm32"))]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(all(debug_assertions, target_arch = "wasm32")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log a warning to the browser console, in every build profile.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Format a pixel length for inline styles (`12.5` → `"12.5px"`).
#[macro_export]
macro_rules! px {
    ($value:expr) => {
        format!("{}px", $value)
    };
}
