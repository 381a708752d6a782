use std::io::{StdoutLock, Write};

pub mod cc {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    pub const LIGHT_BLUE: &str = "\x1b[94m";
}

/// Timestamped line on stderr, optionally colored with one of [`cc`].
#[macro_export]
macro_rules! log {
    // plain literal first so a format string is never taken for a color
    ($fmt:literal $(, $($arg:tt)+)?) => {
        $crate::log!($crate::libs::writing::cc::LIGHT_GRAY, $fmt $(, $($arg)+)?)
    };

    ($color:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
        let mut _stderr = ::std::io::stderr().lock();
        let _ = ::std::io::Write::write_fmt(
            &mut _stderr,
            format_args!(
                "{}{} | {}{}{}\n",
                $crate::libs::writing::cc::LIGHT_GRAY,
                time,
                $color,
                format_args!($fmt $(, $($arg)+)?),
                $crate::libs::writing::cc::RESET,
            ),
        );
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        let mut _stderr = ::std::io::stderr().lock();
        let _ = ::std::io::Write::write_fmt(
            &mut _stderr,
            format_args!(
                "{}{}{}\n",
                $crate::libs::writing::cc::ORANGE,
                format_args!($($arg)*),
                $crate::libs::writing::cc::RESET,
            ),
        );
    }};
}

/// Colored output on stdout for command results.
pub struct Colors<'a> {
    lock: StdoutLock<'a>,
}

impl<'a> Colors<'a> {
    pub fn new(lock: StdoutLock<'a>) -> Self {
        Self { lock }
    }

    pub fn cprint(&mut self, text: &str, color: &str) {
        let _ = writeln!(self.lock, "{}{}{}", color, text, cc::RESET);
    }

    /// `label: value` with the label dimmed.
    pub fn field(&mut self, label: &str, value: impl std::fmt::Display) {
        let _ = writeln!(self.lock, "{}{label}:{} {value}", cc::LIGHT_GRAY, cc::RESET);
    }
}
