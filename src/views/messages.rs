use crate::types::{ChatMessage, Section, UnifiedPrediction};
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute padding:zero] [period case:upper]");

pub fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub fn format_message_timestamp(timestamp: OffsetDateTime) -> String {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).unwrap_or_default()
}

#[component]
pub fn MessageRow(message: ChatMessage) -> Element {
    let role = if message.is_user() { "user" } else { "ai" };
    let time = format_message_timestamp(message.timestamp());

    rsx! {
        div { class: format_args!("message {}-message", role),
            if !message.is_user() {
                div { class: "avatar ai", "M" }
            }
            div { class: "message-content",
                match &message {
                    ChatMessage::User { text, .. } => rsx! { p { "{text}" } },
                    ChatMessage::Assistant { lines, .. } => rsx! {
                        for line in lines {
                            p { "{line}" }
                        }
                    },
                    ChatMessage::Bullets { items, .. } => rsx! {
                        ul {
                            for item in items {
                                li { "{item}" }
                            }
                        }
                    },
                    ChatMessage::Prediction { disease, probability_text, description, .. } => rsx! {
                        div { class: "prediction-card",
                            h3 { class: "disease-name", "{disease}" }
                            if !probability_text.is_empty() {
                                span { class: "probability", "{probability_text}" }
                            }
                            if !description.is_empty() {
                                p { class: "description", "{description}" }
                            }
                        }
                    },
                    ChatMessage::Unified { prediction, .. } => rsx! {
                        UnifiedPanel { prediction: prediction.clone() }
                    },
                }
                span { class: "message-time", "{time}" }
            }
        }
    }
}

#[component]
fn UnifiedPanel(prediction: UnifiedPrediction) -> Element {
    rsx! {
        div { class: "prediction-card unified",
            if let Some(disease) = prediction.disease.clone() {
                h3 { class: "disease-name", "{disease}" }
            }
            if let Some(probability) = prediction.probability.clone() {
                span { class: "probability", "{probability}" }
            }
            if let Some(summary) = prediction.summary.clone() {
                p { class: "description", "{summary}" }
            }
            SectionBlock { title: "Description", section: prediction.description.clone() }
            SectionBlock { title: "Symptoms", section: prediction.symptoms_list.clone() }
            SectionBlock { title: "Recommendations", section: prediction.recommendations.clone() }
            SectionBlock { title: "Precautions", section: prediction.precautions.clone() }
            SectionBlock { title: "Alternative possibilities", section: prediction.alternatives.clone() }
            SectionBlock { title: "Related symptoms", section: prediction.related_symptoms.clone() }
            for note in prediction.notes.clone() {
                p { class: "note", "{note}" }
            }
        }
    }
}

/// Renders nothing when `section` is absent.
#[component]
fn SectionBlock(title: &'static str, #[props(!optional)] section: Option<Section>) -> Element {
    let Some(section) = section else {
        return rsx! {};
    };
    rsx! {
        div { class: "result-section",
            h4 { class: "section-title", "{title}" }
            match section {
                Section::Paragraph(text) => rsx! { p { "{text}" } },
                Section::Bullets(items) => rsx! {
                    ul {
                        for item in items {
                            li { "{item}" }
                        }
                    }
                },
            }
        }
    }
}
