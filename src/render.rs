//! Turns backend responses into transcript entries.

use crate::api::PredictionOutcome;
use crate::error::ApiError;
use crate::types::{
    ChatMessage, ChatResponse, Probability, Section, Segment, SegmentContent,
    SimplePrediction, UnifiedPrediction,
};
use std::time::Duration;
use time::OffsetDateTime;

pub const REVEAL_STEP: Duration = Duration::from_millis(300);

pub const NO_RESULTS_TEXT: &str = "No results were returned. Please try different symptoms.";
pub const NO_CONTENT_TEXT: &str = "No content available";
pub const BACKEND_ERROR_FALLBACK: &str = "Something went wrong. Please try again.";
pub const REQUEST_FAILED_TEXT: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// One entry and how long after the response it should appear.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledEntry {
    pub delay: Duration,
    pub message: ChatMessage,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderPlan {
    pub entries: Vec<ScheduledEntry>,
}

impl RenderPlan {
    fn immediate(message: ChatMessage) -> Self {
        Self {
            entries: vec![ScheduledEntry {
                delay: Duration::ZERO,
                message,
            }],
        }
    }

    fn staggered(messages: Vec<ChatMessage>) -> Self {
        let entries = messages
            .into_iter()
            .enumerate()
            .map(|(index, message)| ScheduledEntry {
                delay: REVEAL_STEP * index as u32,
                message,
            })
            .collect();
        Self { entries }
    }
}

/// Formats a probability as `"87.3% Confidence"`.
///
/// Ratios in `[0, 1]` are scaled to percent; larger numbers are taken as
/// percentages already. Strings like `"87.3%"` are re-formatted; anything
/// unparseable is shown as sent.
pub fn format_probability(probability: &Probability) -> String {
    let percent = match probability {
        Probability::Ratio(value) if *value <= 1.0 => Some(value * 100.0),
        Probability::Ratio(value) => Some(*value),
        Probability::Text(text) => text.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
    };
    match (percent, probability) {
        (Some(percent), _) => format!("{percent:.1}% Confidence"),
        (None, Probability::Text(text)) => format!("{} Confidence", text.trim()),
        (None, Probability::Ratio(value)) => format!("{value} Confidence"),
    }
}

pub fn render_outcome(outcome: PredictionOutcome, now: OffsetDateTime) -> RenderPlan {
    match outcome {
        PredictionOutcome::Chat(response) => render_chat_response(response, now),
        PredictionOutcome::Simple(prediction) => render_simple(&prediction, now),
    }
}

pub fn render_failure(error: &ApiError, now: OffsetDateTime) -> RenderPlan {
    tracing::error!(%error, "prediction request failed");
    RenderPlan::immediate(assistant_text(REQUEST_FAILED_TEXT, now))
}

pub fn render_chat_response(response: ChatResponse, now: OffsetDateTime) -> RenderPlan {
    if !response.is_success() {
        let reason = response
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| BACKEND_ERROR_FALLBACK.to_string());
        tracing::warn!(%reason, "backend reported failure");
        return RenderPlan::immediate(assistant_text(&format!("Error: {reason}"), now));
    }

    let segments: Vec<Segment> = response
        .messages
        .unwrap_or_default()
        .into_iter()
        .map(Segment::from)
        .collect();
    if segments.is_empty() {
        return RenderPlan::immediate(assistant_text(NO_RESULTS_TEXT, now));
    }

    if response.is_unified_response {
        RenderPlan::immediate(ChatMessage::Unified {
            prediction: unify(segments),
            timestamp: now,
        })
    } else {
        RenderPlan::staggered(
            segments
                .into_iter()
                .map(|segment| render_flat_segment(segment, now))
                .collect(),
        )
    }
}

pub fn render_simple(prediction: &SimplePrediction, now: OffsetDateTime) -> RenderPlan {
    let mut lines = vec![format!("Disease: {}", prediction.disease)];
    if let Some(cure) = prediction.cure.as_deref().filter(|c| !c.trim().is_empty()) {
        lines.push(format!("Cure: {cure}"));
    }
    RenderPlan::immediate(ChatMessage::Assistant {
        lines,
        timestamp: now,
    })
}

/// Splits free text into display lines, dropping blank ones.
pub fn text_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

pub fn assistant_text(text: &str, now: OffsetDateTime) -> ChatMessage {
    ChatMessage::Assistant {
        lines: text_lines(text),
        timestamp: now,
    }
}

fn render_flat_segment(segment: Segment, now: OffsetDateTime) -> ChatMessage {
    match segment {
        Segment::Prediction {
            disease,
            probability,
            description,
        } => ChatMessage::Prediction {
            disease: disease.unwrap_or_default(),
            probability_text: probability
                .as_ref()
                .map(format_probability)
                .unwrap_or_default(),
            description: description.unwrap_or_default(),
            timestamp: now,
        },
        Segment::Description(content)
        | Segment::SymptomsList(content)
        | Segment::Recommendations(content)
        | Segment::Precautions(content)
        | Segment::Alternatives(content)
        | Segment::RelatedSymptoms(content)
        | Segment::Text(content)
        | Segment::Other { content, .. } => match to_section(content) {
            Some(Section::Bullets(items)) => ChatMessage::Bullets {
                items,
                timestamp: now,
            },
            Some(Section::Paragraph(text)) => assistant_text(&text, now),
            None => assistant_text(NO_CONTENT_TEXT, now),
        },
    }
}

fn to_section(content: Option<SegmentContent>) -> Option<Section> {
    match content? {
        SegmentContent::Text(text) if text.trim().is_empty() => None,
        SegmentContent::Text(text) => Some(Section::Paragraph(text.trim().to_string())),
        SegmentContent::List(items) => {
            let items: Vec<String> = items
                .into_iter()
                .filter(|item| !item.trim().is_empty())
                .collect();
            (!items.is_empty()).then_some(Section::Bullets(items))
        }
    }
}

fn note_lines(content: Option<SegmentContent>) -> Vec<String> {
    match to_section(content) {
        Some(Section::Paragraph(text)) => text_lines(&text),
        Some(Section::Bullets(items)) => items,
        None => vec![NO_CONTENT_TEXT.to_string()],
    }
}

/// Folds a unified segment set into one panel. Later segments of the same
/// kind replace earlier ones; text and unknown segments collect as notes.
fn unify(segments: Vec<Segment>) -> UnifiedPrediction {
    let mut unified = UnifiedPrediction::default();
    for segment in segments {
        match segment {
            Segment::Prediction {
                disease,
                probability,
                description,
            } => {
                unified.disease = disease.filter(|d| !d.trim().is_empty());
                unified.probability = probability.as_ref().map(format_probability);
                unified.summary = description
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty());
            }
            Segment::Description(content) => unified.description = to_section(content),
            Segment::SymptomsList(content) => unified.symptoms_list = to_section(content),
            Segment::Recommendations(content) => unified.recommendations = to_section(content),
            Segment::Precautions(content) => unified.precautions = to_section(content),
            Segment::Alternatives(content) => unified.alternatives = to_section(content),
            Segment::RelatedSymptoms(content) => unified.related_symptoms = to_section(content),
            Segment::Text(content) => unified.notes.extend(note_lines(content)),
            Segment::Other { kind, content } => {
                tracing::debug!(%kind, "unknown segment in unified response");
                unified.notes.extend(note_lines(content));
            }
        }
    }
    unified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH
    }

    #[test]
    fn probability_formats() {
        assert_eq!(format_probability(&Probability::Ratio(0.873)), "87.3% Confidence");
        assert_eq!(format_probability(&Probability::Ratio(1.0)), "100.0% Confidence");
        assert_eq!(format_probability(&Probability::Ratio(42.0)), "42.0% Confidence");
        assert_eq!(
            format_probability(&Probability::Text("87.3%".into())),
            "87.3% Confidence"
        );
        assert_eq!(
            format_probability(&Probability::Text("high".into())),
            "high Confidence"
        );
    }

    #[test]
    fn text_lines_drop_blanks() {
        assert_eq!(text_lines("a\n\n  \nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn flat_list_content_becomes_bullets() {
        let msg = render_flat_segment(
            Segment::Precautions(Some(SegmentContent::List(vec!["rest".into(), "".into()]))),
            now(),
        );
        assert_eq!(
            msg,
            ChatMessage::Bullets {
                items: vec!["rest".into()],
                timestamp: now()
            }
        );
    }

    #[test]
    fn flat_empty_list_uses_fallback() {
        let msg = render_flat_segment(Segment::Alternatives(Some(SegmentContent::List(vec![]))), now());
        assert_eq!(
            msg,
            ChatMessage::Assistant {
                lines: vec![NO_CONTENT_TEXT.into()],
                timestamp: now()
            }
        );
    }

    #[test]
    fn missing_text_uses_fallback() {
        let msg = render_flat_segment(Segment::Text(None), now());
        assert_eq!(
            msg,
            ChatMessage::Assistant {
                lines: vec![NO_CONTENT_TEXT.into()],
                timestamp: now()
            }
        );
    }

    #[test]
    fn prediction_description_stays_on_the_card() {
        let unified = unify(vec![
            Segment::Prediction {
                disease: Some("Flu".into()),
                probability: None,
                description: Some(" short ".into()),
            },
            Segment::Description(Some(SegmentContent::Text("long".into()))),
        ]);
        assert_eq!(unified.summary.as_deref(), Some("short"));
        assert_eq!(unified.description, Some(Section::Paragraph("long".into())));
    }

    #[test]
    fn unified_notes_keep_arrival_order() {
        let unified = unify(vec![
            Segment::Text(Some(SegmentContent::Text("first\nsecond".into()))),
            Segment::Other {
                kind: "triage".into(),
                content: None,
            },
        ]);
        assert_eq!(unified.notes, vec!["first", "second", NO_CONTENT_TEXT]);
    }
}
