use crate::storage::PreferenceStore;
use crate::theme::toggle_theme;
use crate::types::ThemeMode;
use dioxus::prelude::*;
use std::rc::Rc;

#[component]
pub fn ThemeToggle(theme: Signal<ThemeMode>) -> Element {
    let mut theme = theme;
    let store = use_context::<Rc<dyn PreferenceStore>>();
    let mode = theme();

    rsx! {
        button {
            id: "themeToggle",
            class: "btn btn-ghost theme-toggle",
            r#type: "button",
            title: mode.toggle_label(),
            aria_label: mode.toggle_label(),
            onclick: move |_| {
                let next = toggle_theme(store.as_ref(), theme());
                theme.set(next);
            },
            span { class: "theme-icon", aria_hidden: "true", "{mode.toggle_icon()}" }
        }
    }
}
