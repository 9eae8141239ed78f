//! User configuration — layout constants, scroll feel, keybindings, and
//! persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/movie-carousel/config.toml` (default
//! `~/.config/movie-carousel/config.toml`).  Command-line flags override
//! whatever the file says.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::interpolate::InterpolationParams;
use crate::core::scroll::DEFAULT_THROTTLE;
use crate::core::window::ListGeometry;
use crate::ui::smooth_scroll::Deceleration;

// ───────────────────────────────────────── variant ───────────

/// Which incarnation of the carousel screen to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Variant {
    /// Posters only, no motion.
    Plain,
    /// Posters lift as they pass the centre.
    Parallax,
    /// Parallax posters over a sliding backdrop.
    #[default]
    Backdrop,
}

impl Variant {
    pub fn bounces(self) -> bool {
        !matches!(self, Variant::Plain)
    }

    pub fn shows_backdrop(self) -> bool {
        matches!(self, Variant::Backdrop)
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Plain => "plain",
            Variant::Parallax => "parallax",
            Variant::Backdrop => "backdrop",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(s.trim(), true).ok()
    }
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.  Everything except quitting moves the
/// scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollLeft,
    ScrollRight,
    JumpFirst,
    JumpLast,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::ScrollLeft,
        Action::ScrollRight,
        Action::JumpFirst,
        Action::JumpLast,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollLeft => "scroll_left",
            Action::ScrollRight => "scroll_right",
            Action::JumpFirst => "jump_first",
            Action::JumpLast => "jump_last",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "scroll_left" => Some(Action::ScrollLeft),
            "scroll_right" => Some(Action::ScrollRight),
            "jump_first" => Some(Action::JumpFirst),
            "jump_last" => Some(Action::JumpLast),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"←"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            other => Self::code_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Left"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&Self::code_name(self.code));
        s
    }

    fn code_name(code: KeyCode) -> String {
        match code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Left"`, `"q"`, `"Home"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── layout ────────────

/// Layout knobs.  Widths are derived from the terminal size at runtime
/// unless pinned here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Fixed poster slot width in cells; `None` = `item_ratio` of the viewport.
    pub item_width: Option<u16>,
    /// Poster slot width as a fraction of the viewport width.
    pub item_ratio: f64,
    /// Backdrop height as a fraction of the screen height.
    pub backdrop_ratio: f64,
    /// Poster bounce at the centred position, in rows (negative = up).
    pub lift: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            item_width: None,
            item_ratio: 0.72,
            backdrop_ratio: 0.65,
            lift: -3.0,
        }
    }
}

/// Smallest poster slot worth drawing.
const MIN_ITEM_WIDTH: f64 = 12.0;

/// Concrete layout for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstants {
    pub item_width: f64,
    pub spacer_width: f64,
    pub viewport_width: f64,
    pub backdrop_height: u16,
    pub lift: f64,
}

impl LayoutConstants {
    pub fn resolve(settings: &LayoutSettings, width: u16, height: u16) -> Self {
        let viewport_width = f64::from(width);
        let item_width = settings
            .item_width
            .map(f64::from)
            .unwrap_or_else(|| (viewport_width * settings.item_ratio).round())
            .max(MIN_ITEM_WIDTH);
        Self {
            item_width,
            spacer_width: ((viewport_width - item_width) / 2.0).max(0.0),
            viewport_width,
            backdrop_height: (f64::from(height) * settings.backdrop_ratio).round() as u16,
            lift: settings.lift,
        }
    }

    pub fn geometry(&self) -> ListGeometry {
        ListGeometry {
            item_width: self.item_width,
            spacer_width: self.spacer_width,
            viewport_width: self.viewport_width,
        }
    }

    pub fn interpolation(&self) -> InterpolationParams {
        InterpolationParams {
            item_width: self.item_width,
            viewport_width: self.viewport_width,
            lift: self.lift,
        }
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub variant: Variant,
    pub layout: LayoutSettings,
    pub deceleration: Deceleration,
    /// Minimum spacing between scroll notifications.
    pub scroll_throttle: Duration,
    /// Cells moved per mouse-wheel notch.
    pub wheel_step: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            variant: Variant::default(),
            layout: LayoutSettings::default(),
            deceleration: Deceleration::default(),
            scroll_throttle: DEFAULT_THROTTLE,
            wheel_step: 6.0,
        }
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(ScrollRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(JumpFirst, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(JumpLast, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), KeyModifiers::SHIFT)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: first/last | {}: quit",
            self.short_binding(Action::ScrollLeft),
            self.short_binding(Action::ScrollRight),
            self.short_binding(Action::JumpFirst),
            self.short_binding(Action::JumpLast),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::parse_config(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk, returning where it went.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "variant" => {
                    if let Some(v) = Variant::parse(value) {
                        config.variant = v;
                    }
                    continue;
                }
                "item_width" => {
                    config.layout.item_width = value.parse::<u16>().ok().filter(|w| *w > 0);
                    continue;
                }
                "item_ratio" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.layout.item_ratio = v.clamp(0.2, 1.0);
                    }
                    continue;
                }
                "backdrop_ratio" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.layout.backdrop_ratio = v.clamp(0.0, 1.0);
                    }
                    continue;
                }
                "lift" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.layout.lift = v;
                        }
                    }
                    continue;
                }
                "deceleration" => {
                    if let Some(d) = Deceleration::parse(value) {
                        config.deceleration = d;
                    }
                    continue;
                }
                "scroll_throttle_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        // Never notify faster than one frame.
                        config.scroll_throttle = Duration::from_millis(v.clamp(16, 500));
                    }
                    continue;
                }
                "wheel_step" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.wheel_step = v.clamp(1.0, 100.0);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# movie-carousel configuration".to_string(),
            String::new(),
            "# Screen: plain | parallax | backdrop".to_string(),
            format!("variant = {}", self.variant.label()),
            String::new(),
            "# Layout".to_string(),
        ];
        match self.layout.item_width {
            Some(w) => lines.push(format!("item_width = {w}")),
            None => lines.push("# item_width = 60".to_string()),
        }
        lines.extend([
            format!("item_ratio = {}", self.layout.item_ratio),
            format!("backdrop_ratio = {}", self.layout.backdrop_ratio),
            format!("lift = {}", self.layout.lift),
            String::new(),
            "# Scrolling".to_string(),
            format!("deceleration = {}", self.deceleration.label()),
            format!("scroll_throttle_ms = {}", self.scroll_throttle.as_millis()),
            format!("wheel_step = {}", self.wheel_step),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ]);

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/movie-carousel/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("movie-carousel").join("config.toml")
}
