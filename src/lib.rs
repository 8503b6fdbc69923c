/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("connect", "Connecting to {}", target);
/// log_status!("pipeline", "{}: {} document(s)", collection, count);
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod core;
pub mod utils;

// Users can write `mflix::pipeline` instead of `mflix::core::pipeline`
pub use crate::core::*;
pub use crate::utils::*;
