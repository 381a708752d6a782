pub mod cc {
    pub const RESET: &str = "\x1b[0m";
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    pub const LIGHT_BLUE: &str = "\x1b[94m";
}

pub mod logging {
    use std::{fs::OpenOptions, io::Write, path::PathBuf};

    /// Round logs are off unless `DEBUG_LOGS=true`.
    pub fn enabled() -> bool {
        std::env::var("DEBUG_LOGS").is_ok_and(|v| v.eq_ignore_ascii_case("true"))
    }

    pub fn log_path() -> PathBuf {
        std::env::var("FUNDINGROUND_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs").join("fundinground.log"))
    }

    pub fn write_line(line: &str) {
        if !enabled() {
            return;
        }
        let path = log_path();
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

/// Appends a timestamped, colored line to the round log file.
#[macro_export]
macro_rules! log {
    ($fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log!($crate::writing::cc::LIGHT_GRAY, $fmt $(, $($arg)+)?)
    };

    ($color:expr, $fmt:literal $(, $($arg:tt)+)?) => {
        $crate::writing::logging::write_line(&format!(
            "{} | {}{}{}",
            chrono::Utc::now().format("%H:%M:%S%.3f"),
            $color,
            format_args!($fmt $(, $($arg)+)?),
            $crate::writing::cc::RESET,
        ))
    };
}
