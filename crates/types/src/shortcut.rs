//! Keyboard shortcut bindings.
//!
//! A [`KeyCombo`] is an ordered list of keys written as `+`-separated text
//! (`alt+ArrowUp`, `ctrl+shift+,`). [`ShortcutKeys`] binds one combo to each
//! [`ShortcutAction`] and can resolve terminal key events back to an action.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a combo string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyComboParseError {
    #[error("key combination is empty")]
    Empty,
    #[error("key combination '{combo}' contains an empty segment")]
    EmptySegment { combo: String },
    #[error("unknown key '{token}'")]
    UnknownKey { token: String },
}

/// A single key of a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Alt,
    Control,
    Meta,
    Shift,
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

impl Key {
    pub fn is_modifier(self) -> bool {
        matches!(self, Self::Alt | Self::Control | Self::Meta | Self::Shift)
    }

    fn modifier_flag(self) -> KeyModifiers {
        match self {
            Self::Alt => KeyModifiers::ALT,
            Self::Control => KeyModifiers::CONTROL,
            Self::Meta => KeyModifiers::SUPER,
            Self::Shift => KeyModifiers::SHIFT,
            _ => KeyModifiers::NONE,
        }
    }

    fn matches_code(self, code: KeyCode) -> bool {
        match (self, code) {
            (Self::Enter, KeyCode::Enter)
            | (Self::Escape, KeyCode::Esc)
            | (Self::Backspace, KeyCode::Backspace)
            | (Self::Tab, KeyCode::Tab)
            | (Self::Space, KeyCode::Char(' '))
            | (Self::ArrowUp, KeyCode::Up)
            | (Self::ArrowDown, KeyCode::Down)
            | (Self::ArrowLeft, KeyCode::Left)
            | (Self::ArrowRight, KeyCode::Right) => true,
            (Self::Char(expected), KeyCode::Char(actual)) => expected.eq_ignore_ascii_case(&actual),
            _ => false,
        }
    }
}

impl Key {
    fn key_code(self) -> Option<KeyCode> {
        let code = match self {
            Self::Enter => KeyCode::Enter,
            Self::Escape => KeyCode::Esc,
            Self::Backspace => KeyCode::Backspace,
            Self::Tab => KeyCode::Tab,
            Self::Space => KeyCode::Char(' '),
            Self::ArrowUp => KeyCode::Up,
            Self::ArrowDown => KeyCode::Down,
            Self::ArrowLeft => KeyCode::Left,
            Self::ArrowRight => KeyCode::Right,
            Self::Char(c) => KeyCode::Char(c),
            Self::Alt | Self::Control | Self::Meta | Self::Shift => return None,
        };
        Some(code)
    }
}

impl FromStr for Key {
    type Err = KeyComboParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        if let (Some(single), None) = (chars.next(), chars.next()) {
            return Ok(if single == ' ' { Self::Space } else { Self::Char(single) });
        }
        let key = match token.to_ascii_lowercase().as_str() {
            "alt" | "option" => Self::Alt,
            "ctrl" | "control" => Self::Control,
            "meta" | "cmd" | "super" => Self::Meta,
            "shift" => Self::Shift,
            "enter" | "return" => Self::Enter,
            "escape" | "esc" => Self::Escape,
            "backspace" => Self::Backspace,
            "tab" => Self::Tab,
            "space" => Self::Space,
            "arrowup" | "up" => Self::ArrowUp,
            "arrowdown" | "down" => Self::ArrowDown,
            "arrowleft" | "left" => Self::ArrowLeft,
            "arrowright" | "right" => Self::ArrowRight,
            _ => {
                return Err(KeyComboParseError::UnknownKey {
                    token: token.to_string(),
                });
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alt => f.write_str("alt"),
            Self::Control => f.write_str("ctrl"),
            Self::Meta => f.write_str("meta"),
            Self::Shift => f.write_str("shift"),
            Self::Enter => f.write_str("Enter"),
            Self::Escape => f.write_str("Escape"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Tab => f.write_str("Tab"),
            Self::Space => f.write_str("Space"),
            Self::ArrowUp => f.write_str("ArrowUp"),
            Self::ArrowDown => f.write_str("ArrowDown"),
            Self::ArrowLeft => f.write_str("ArrowLeft"),
            Self::ArrowRight => f.write_str("ArrowRight"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

/// An ordered key combination such as `alt+ArrowUp`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyCombo(Vec<Key>);

impl KeyCombo {
    pub fn new(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Returns true when `event` presses this combination.
    ///
    /// Modifiers must match exactly, except that SHIFT is ignored for
    /// character keys when the combo does not list it: terminals report
    /// uppercase letters with SHIFT set. A combo made only of modifiers never
    /// matches.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let mut expected = KeyModifiers::NONE;
        let mut main_key = None;
        for key in &self.0 {
            if key.is_modifier() {
                expected |= key.modifier_flag();
            } else if main_key.replace(*key).is_some() {
                return false;
            }
        }
        let Some(main_key) = main_key else {
            return false;
        };
        if !main_key.matches_code(event.code) {
            return false;
        }

        let mut actual = event.modifiers;
        if matches!(event.code, KeyCode::Char(_)) && !expected.contains(KeyModifiers::SHIFT) {
            actual.remove(KeyModifiers::SHIFT);
        }
        actual == expected
    }
}

impl KeyCombo {
    /// The terminal key event that presses this combination, if it has
    /// exactly one non-modifier key.
    pub fn to_key_event(&self) -> Option<KeyEvent> {
        let mut modifiers = KeyModifiers::NONE;
        let mut code = None;
        for key in &self.0 {
            match key.key_code() {
                Some(key_code) if code.replace(key_code).is_some() => return None,
                Some(_) => {}
                None => modifiers |= key.modifier_flag(),
            }
        }
        code.map(|code| KeyEvent::new(code, modifiers))
    }
}

impl FromStr for KeyCombo {
    type Err = KeyComboParseError;

    fn from_str(combo: &str) -> Result<Self, Self::Err> {
        if combo.is_empty() {
            return Err(KeyComboParseError::Empty);
        }
        // A trailing "+" after a separator is the plus key itself.
        if combo == "+" {
            return Ok(Self(vec![Key::Char('+')]));
        }
        if let Some(modifiers) = combo.strip_suffix("++") {
            let mut keys = modifiers.parse::<KeyCombo>()?.0;
            keys.push(Key::Char('+'));
            return Ok(Self(keys));
        }
        combo
            .split('+')
            .map(|token| {
                if token.is_empty() {
                    Err(KeyComboParseError::EmptySegment {
                        combo: combo.to_string(),
                    })
                } else {
                    token.parse()
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<String> for KeyCombo {
    type Error = KeyComboParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyCombo> for String {
    fn from(combo: KeyCombo) -> Self {
        combo.to_string()
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, key) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("+")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// Named actions that can be bound to a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    ToggleNav,
    TogglePanel,
    PanelPosition,
    FullScreen,
    Search,
    PrevComponent,
    NextComponent,
    PrevStory,
    NextStory,
    ShortcutsPage,
    AboutPage,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 11] = [
        Self::ToggleNav,
        Self::TogglePanel,
        Self::PanelPosition,
        Self::FullScreen,
        Self::Search,
        Self::PrevComponent,
        Self::NextComponent,
        Self::PrevStory,
        Self::NextStory,
        Self::ShortcutsPage,
        Self::AboutPage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToggleNav => "toggleNav",
            Self::TogglePanel => "togglePanel",
            Self::PanelPosition => "panelPosition",
            Self::FullScreen => "fullScreen",
            Self::Search => "search",
            Self::PrevComponent => "prevComponent",
            Self::NextComponent => "nextComponent",
            Self::PrevStory => "prevStory",
            Self::NextStory => "nextStory",
            Self::ShortcutsPage => "shortcutsPage",
            Self::AboutPage => "aboutPage",
        }
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an action name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shortcut action '{0}'")]
pub struct ParseShortcutActionError(pub String);

impl FromStr for ShortcutAction {
    type Err = ParseShortcutActionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == name)
            .ok_or_else(|| ParseShortcutActionError(name.to_string()))
    }
}

static DEFAULT_SHORTCUT_KEYS: Lazy<ShortcutKeys> = Lazy::new(|| ShortcutKeys {
    toggle_nav: KeyCombo::new(vec![Key::Char('S')]),
    toggle_panel: KeyCombo::new(vec![Key::Char('A')]),
    panel_position: KeyCombo::new(vec![Key::Char('D')]),
    full_screen: KeyCombo::new(vec![Key::Char('F')]),
    search: KeyCombo::new(vec![Key::Char('/')]),
    prev_component: KeyCombo::new(vec![Key::Alt, Key::ArrowUp]),
    next_component: KeyCombo::new(vec![Key::Alt, Key::ArrowDown]),
    prev_story: KeyCombo::new(vec![Key::Alt, Key::ArrowLeft]),
    next_story: KeyCombo::new(vec![Key::Alt, Key::ArrowRight]),
    shortcuts_page: KeyCombo::new(vec![Key::Control, Key::Shift, Key::Char(',')]),
    about_page: KeyCombo::new(vec![Key::Char(',')]),
});

/// One key combination per [`ShortcutAction`].
///
/// Missing entries deserialize to their default binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShortcutKeys {
    pub toggle_nav: KeyCombo,
    pub toggle_panel: KeyCombo,
    pub panel_position: KeyCombo,
    pub full_screen: KeyCombo,
    pub search: KeyCombo,
    pub prev_component: KeyCombo,
    pub next_component: KeyCombo,
    pub prev_story: KeyCombo,
    pub next_story: KeyCombo,
    pub shortcuts_page: KeyCombo,
    pub about_page: KeyCombo,
}

impl Default for ShortcutKeys {
    fn default() -> Self {
        DEFAULT_SHORTCUT_KEYS.clone()
    }
}

impl ShortcutKeys {
    pub fn get(&self, action: ShortcutAction) -> &KeyCombo {
        match action {
            ShortcutAction::ToggleNav => &self.toggle_nav,
            ShortcutAction::TogglePanel => &self.toggle_panel,
            ShortcutAction::PanelPosition => &self.panel_position,
            ShortcutAction::FullScreen => &self.full_screen,
            ShortcutAction::Search => &self.search,
            ShortcutAction::PrevComponent => &self.prev_component,
            ShortcutAction::NextComponent => &self.next_component,
            ShortcutAction::PrevStory => &self.prev_story,
            ShortcutAction::NextStory => &self.next_story,
            ShortcutAction::ShortcutsPage => &self.shortcuts_page,
            ShortcutAction::AboutPage => &self.about_page,
        }
    }

    pub fn set(&mut self, action: ShortcutAction, combo: KeyCombo) {
        let slot = match action {
            ShortcutAction::ToggleNav => &mut self.toggle_nav,
            ShortcutAction::TogglePanel => &mut self.toggle_panel,
            ShortcutAction::PanelPosition => &mut self.panel_position,
            ShortcutAction::FullScreen => &mut self.full_screen,
            ShortcutAction::Search => &mut self.search,
            ShortcutAction::PrevComponent => &mut self.prev_component,
            ShortcutAction::NextComponent => &mut self.next_component,
            ShortcutAction::PrevStory => &mut self.prev_story,
            ShortcutAction::NextStory => &mut self.next_story,
            ShortcutAction::ShortcutsPage => &mut self.shortcuts_page,
            ShortcutAction::AboutPage => &mut self.about_page,
        };
        *slot = combo;
    }

    /// Iterates every binding in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ShortcutAction, &KeyCombo)> {
        ShortcutAction::ALL.into_iter().map(move |action| (action, self.get(action)))
    }

    /// Resolves a terminal key event to the first action bound to it.
    pub fn action_for(&self, event: &KeyEvent) -> Option<ShortcutAction> {
        self.iter().find(|(_, combo)| combo.matches(event)).map(|(action, _)| action)
    }
}
