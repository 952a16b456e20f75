use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Light/dark mode flag.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }
}

/// Read-only theme input. The renderer reads it once per frame and never
/// writes it.
pub trait ThemeSource {
    fn is_dark(&self) -> bool;

    fn theme(&self) -> Theme {
        Theme::from_dark(self.is_dark())
    }
}

impl ThemeSource for Theme {
    fn is_dark(&self) -> bool {
        Theme::is_dark(*self)
    }
}

/// Host-owned theme flag that can be flipped while a renderer is running.
#[derive(Clone, Debug)]
pub struct ThemeSwitch(Arc<AtomicBool>);

impl Default for ThemeSwitch {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl ThemeSwitch {
    pub fn new(theme: Theme) -> Self {
        Self(Arc::new(AtomicBool::new(theme.is_dark())))
    }

    pub fn set(&self, theme: Theme) {
        self.0.store(theme.is_dark(), Ordering::Relaxed);
    }
}

impl ThemeSource for ThemeSwitch {
    fn is_dark(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
