use crate::storage::PreferenceStore;
use crate::types::ThemeMode;

/// Preference key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

/// Media query probed when no preference has been stored.
pub const PREFERS_DARK_QUERY: &str =
    "return window.matchMedia('(prefers-color-scheme: dark)').matches;";

pub struct ThemeDefinition {
    pub css: &'static str,
    pub body_class: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            body_class: "dark-mode",
        },
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            body_class: "light-mode",
        },
    }
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Icon on the toggle button; shows the mode a click switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            ThemeMode::Dark => "☀",
            ThemeMode::Light => "☾",
        }
    }

    /// Accessible label and tooltip for the toggle button.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "Switch to light mode",
            ThemeMode::Light => "Switch to dark mode",
        }
    }
}

/// Stored preference first, then the OS preference, then light.
pub fn resolve_theme(stored: Option<ThemeMode>, os_prefers_dark: Option<bool>) -> ThemeMode {
    match (stored, os_prefers_dark) {
        (Some(mode), _) => mode,
        (None, Some(true)) => ThemeMode::Dark,
        (None, _) => ThemeMode::Light,
    }
}

pub fn stored_theme(store: &dyn PreferenceStore) -> Option<ThemeMode> {
    store.get(THEME_KEY).as_deref().and_then(ThemeMode::parse)
}

/// Theme to switch to once the OS color scheme is known. `None` when a
/// preference has been stored since startup, which takes precedence.
pub fn os_theme_update(
    store: &dyn PreferenceStore,
    os_prefers_dark: Option<bool>,
) -> Option<ThemeMode> {
    match stored_theme(store) {
        Some(_) => None,
        None => Some(resolve_theme(None, os_prefers_dark)),
    }
}

/// Flips `current` and persists the result. A failed write is logged; the
/// returned mode is flipped regardless.
pub fn toggle_theme(store: &dyn PreferenceStore, current: ThemeMode) -> ThemeMode {
    let next = current.toggled();
    if let Err(err) = store.set(THEME_KEY, next.as_str()) {
        tracing::warn!(%err, theme = next.as_str(), "failed to persist theme");
    }
    next
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #121417;
    --color-bg-secondary: #1b1e23;
    --color-bg-overlay: rgba(0, 0, 0, 0.6);
    --color-text-primary: #f2f4f7;
    --color-text-muted: #a3a9b3;
    --color-border: #2e333b;
    --color-input-bg: #1b1e23;
    --color-chat-user-bg: #2563eb;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #1f242b;
    --color-chat-assistant-text: #f2f4f7;
    --color-prediction-accent: #38bdf8;
    --color-suggestion-hover: #2a3039;
    --color-timestamp: #7c828c;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.composer input { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-border); }
.autocomplete-item:hover { background: var(--color-suggestion-hover); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #f7f8fa;
    --color-bg-secondary: #ffffff;
    --color-bg-overlay: rgba(255, 255, 255, 0.7);
    --color-text-primary: #111827;
    --color-text-muted: #4b5563;
    --color-border: #d1d5db;
    --color-input-bg: #ffffff;
    --color-chat-user-bg: #2563eb;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #ffffff;
    --color-chat-assistant-text: #111827;
    --color-prediction-accent: #0369a1;
    --color-suggestion-hover: #eef2f7;
    --color-timestamp: #6b7280;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.composer input { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-border); }
.autocomplete-item:hover { background: var(--color-suggestion-hover); }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_order() {
        assert_eq!(resolve_theme(Some(ThemeMode::Light), Some(true)), ThemeMode::Light);
        assert_eq!(resolve_theme(None, Some(true)), ThemeMode::Dark);
        assert_eq!(resolve_theme(None, Some(false)), ThemeMode::Light);
        assert_eq!(resolve_theme(None, None), ThemeMode::Light);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(ThemeMode::parse(" dark\n"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("octane"), None);
    }

    #[test]
    fn labels_swap() {
        assert_ne!(
            ThemeMode::Dark.toggle_label(),
            ThemeMode::Light.toggle_label()
        );
        assert_ne!(ThemeMode::Dark.toggle_icon(), ThemeMode::Light.toggle_icon());
    }
}
