use crate::api::HttpBackend;
use crate::config;
use crate::session::ChatSession;
use crate::storage::{PreferenceStore, default_store};
use crate::theme::{
    PREFERS_DARK_QUERY, os_theme_update, resolve_theme, stored_theme, theme_definition,
};
use crate::types::ThemeMode;
use crate::views::{ChatView, ThemeToggle, current_time};
use dioxus::prelude::*;
use std::rc::Rc;

const MEDICA_CSS: Asset = asset!("/assets/medica.css");

#[component]
pub fn App() -> Element {
    let store = use_hook(|| -> Rc<dyn PreferenceStore> {
        Rc::from(default_store(config::active().data_dir))
    });
    use_context_provider(|| store.clone());

    let backend = use_hook(|| match HttpBackend::new(config::active()) {
        Ok(backend) => Some(Rc::new(backend)),
        Err(err) => {
            tracing::error!(%err, "failed to build http client");
            None
        }
    });
    use_context_provider(|| backend.clone());

    let stored = use_hook(|| stored_theme(store.as_ref()));
    let theme = use_signal(|| resolve_theme(stored, None));
    use_os_theme_probe(store.clone(), stored, theme);

    let session = use_signal(|| ChatSession::new(current_time()));

    rsx! {
        ThemeStyles { theme }
        div { class: "app-container",
            AppHeader { theme, session }
            ChatView { session }
        }
    }
}

/// Asks the webview for `prefers-color-scheme` when nothing was stored. A
/// toggle that lands before the answer wins.
fn use_os_theme_probe(
    store: Rc<dyn PreferenceStore>,
    stored: Option<ThemeMode>,
    theme: Signal<ThemeMode>,
) {
    use_hook(|| {
        if stored.is_some() {
            return;
        }
        let mut theme = theme;
        spawn(async move {
            let prefers_dark = match document::eval(PREFERS_DARK_QUERY).await {
                Ok(serde_json::Value::Bool(dark)) => Some(dark),
                Ok(other) => {
                    tracing::debug!(%other, "unexpected color scheme probe result");
                    None
                }
                Err(err) => {
                    tracing::debug!(?err, "color scheme probe failed");
                    None
                }
            };
            if let Some(mode) = os_theme_update(store.as_ref(), prefers_dark) {
                theme.set(mode);
            }
        });
    });
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    use_effect(move || {
        let body_class = theme_definition(theme()).body_class;
        let script = format!("document.body.className = '{body_class}';");
        spawn(async move {
            let _ = document::eval(&script).await;
        });
    });
    let definition = theme_definition(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: MEDICA_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(theme: Signal<ThemeMode>, session: Signal<ChatSession>) -> Element {
    let mut session = session;
    rsx! {
        div { class: "chat-header",
            div { class: "header-title",
                h1 { "Medica" }
                span { class: "text-muted", "Symptom checker" }
            }
            div { class: "header-actions",
                ThemeToggle { theme }
                button {
                    id: "clearChat",
                    class: "btn btn-ghost",
                    r#type: "button",
                    title: "Clear chat",
                    onclick: move |_| session.with_mut(|s| s.clear()),
                    "Clear"
                }
            }
        }
    }
}
