use crate::api::HttpBackend;
use crate::autocomplete::{AutocompleteState, SymptomCatalog};
use crate::render::RenderPlan;
use crate::session::{ChatSession, load_catalog, request_prediction};
use crate::views::messages::{MessageRow, current_time};
use dioxus::events::Key;
use dioxus::prelude::*;
use std::rc::Rc;

const SCROLL_TO_BOTTOM: &str = r#"
requestAnimationFrame(() => {
    const list = document.getElementById('chatMessages');
    if (list) { list.scrollTop = list.scrollHeight; }
});
"#;

const FOCUS_INPUT: &str = r#"
const input = document.getElementById('symptomInput');
if (input) { input.focus(); }
"#;

fn scroll_to_bottom() {
    spawn(async {
        let _ = document::eval(SCROLL_TO_BOTTOM).await;
    });
}

fn focus_input() {
    spawn(async {
        let _ = document::eval(FOCUS_INPUT).await;
    });
}

/// Inserts the plan's entries, delayed ones on their own timers. Entries whose
/// generation went stale in the meantime are dropped by the session.
fn reveal_plan(session: Signal<ChatSession>, generation: u64, plan: RenderPlan) {
    let mut session = session;
    for entry in plan.entries {
        if entry.delay.is_zero() {
            session.with_mut(|s| s.reveal(generation, entry.message));
            scroll_to_bottom();
            continue;
        }
        spawn(async move {
            tokio::time::sleep(entry.delay).await;
            if session.with_mut(|s| s.reveal(generation, entry.message)) {
                scroll_to_bottom();
            }
        });
    }
}

#[component]
pub fn ChatView(session: Signal<ChatSession>) -> Element {
    let catalog = use_signal(SymptomCatalog::default);
    let mut input = use_signal(String::new);
    let mut autocomplete = use_signal(AutocompleteState::default);

    use_hook(|| {
        let mut catalog = catalog;
        let Some(backend) = consume_context::<Option<Rc<HttpBackend>>>() else {
            tracing::warn!("no backend available; autocomplete disabled");
            return;
        };
        spawn(async move {
            catalog.set(load_catalog(backend.as_ref()).await);
        });
    });

    let mut send_message = {
        let mut session = session;
        move |text: String| {
            let Some(submission) = session.with_mut(|s| s.begin(&text, current_time())) else {
                return;
            };
            input.set(String::new());
            autocomplete.with_mut(|state| state.dismiss());
            scroll_to_bottom();

            let backend = consume_context::<Option<Rc<HttpBackend>>>();
            spawn(async move {
                let result = match backend {
                    Some(backend) => request_prediction(backend.as_ref(), &submission).await,
                    None => Err(crate::error::ApiError::Backend(
                        "http client unavailable".to_string(),
                    )),
                };
                let plan =
                    session.with_mut(|s| s.finish(submission.generation, result, current_time()));
                if let Some(plan) = plan {
                    reveal_plan(session, submission.generation, plan);
                }
            });
        }
    };

    let snapshot = session.read().clone();

    rsx! {
        div {
            class: "chat-container",
            onclick: move |_| autocomplete.with_mut(|state| state.dismiss()),
            div { id: "chatMessages", class: "chat-messages",
                for (i, msg) in snapshot.messages().iter().enumerate() {
                    MessageRow { key: "{i}", message: msg.clone() }
                }
            }

            if snapshot.is_busy() {
                div { id: "loadingOverlay", class: "loading-overlay",
                    div { class: "spinner" }
                    span { class: "shimmer-text", "Analyzing symptoms…" }
                }
            }

            form { class: "composer",
                onsubmit: move |ev| ev.prevent_default(),
                div { class: "input-wrapper",
                    input {
                        id: "symptomInput",
                        r#type: "text",
                        autocomplete: "off",
                        placeholder: "Enter symptoms separated by commas, e.g. fever, cough",
                        value: "{input}",
                        oninput: move |ev| {
                            let value = ev.value();
                            autocomplete.with_mut(|state| state.on_input(&catalog.read(), &value));
                            input.set(value);
                        },
                        onfocus: move |_| {
                            let value = input();
                            autocomplete.with_mut(|state| state.on_focus(&catalog.read(), &value));
                        },
                        onclick: move |ev| ev.stop_propagation(),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter {
                                ev.prevent_default();
                                send_message(input());
                            }
                            if ev.key() == Key::Escape {
                                autocomplete.with_mut(|state| state.dismiss());
                            }
                        },
                        autofocus: true,
                    }
                    if autocomplete.read().is_visible() {
                        div {
                            id: "autocompleteContainer",
                            class: "autocomplete-container",
                            onclick: move |ev| ev.stop_propagation(),
                            for name in autocomplete.read().suggestions().to_vec() {
                                SuggestionItem { key: "{name}", name: name.clone(), input, autocomplete }
                            }
                        }
                    }
                }
                button {
                    id: "sendButton",
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: snapshot.is_busy() || input().trim().is_empty(),
                    onclick: move |_| send_message(input()),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn SuggestionItem(
    name: String,
    input: Signal<String>,
    autocomplete: Signal<AutocompleteState>,
) -> Element {
    let mut input = input;
    let mut autocomplete = autocomplete;
    let label = name.clone();
    rsx! {
        div {
            class: "autocomplete-item",
            onclick: move |ev| {
                ev.stop_propagation();
                let next = autocomplete.with_mut(|state| state.select(&input(), &name));
                input.set(next);
                focus_input();
            },
            "{label}"
        }
    }
}
