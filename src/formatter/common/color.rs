use std::io;

/// Whether a formatter emits ANSI colors.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ColorSetting {
    /// Use colors when the target is a terminal.
    #[default]
    Automatic,
    Always,
    Never,
}

pub(crate) mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

/// Targets that can tell whether colored output makes sense for them.
pub trait SupportsColor {
    fn supports_color(&self) -> bool;
}

impl<T: io::IsTerminal> SupportsColor for T {
    fn supports_color(&self) -> bool {
        self.is_terminal()
    }
}

impl ColorSetting {
    pub fn use_color<W: SupportsColor>(self, target: &W) -> bool {
        match self {
            ColorSetting::Automatic => target.supports_color(),
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }
}
