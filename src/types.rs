use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

// ============================================
// Wire shapes
// ============================================

#[derive(Clone, Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub symptoms: &'a str,
}

/// Body of `GET /api/symptoms`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SymptomsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/predict`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<RawSegment>>,
    #[serde(default)]
    pub is_unified_response: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// Body of `POST /predict`. Older backends answer `{ prediction }` only.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SimplePrediction {
    #[serde(alias = "prediction")]
    pub disease: String,
    #[serde(default)]
    pub cure: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SegmentContent {
    Text(String),
    List(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Probability {
    Ratio(f64),
    Text(String),
}

/// A segment exactly as it arrives; converted into [`Segment`] before rendering.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawSegment {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Option<SegmentContent>,
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub probability: Option<Probability>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    Prediction {
        disease: Option<String>,
        probability: Option<Probability>,
        description: Option<String>,
    },
    Description(Option<SegmentContent>),
    SymptomsList(Option<SegmentContent>),
    Recommendations(Option<SegmentContent>),
    Precautions(Option<SegmentContent>),
    Alternatives(Option<SegmentContent>),
    RelatedSymptoms(Option<SegmentContent>),
    Text(Option<SegmentContent>),
    Other {
        kind: String,
        content: Option<SegmentContent>,
    },
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        let RawSegment {
            kind,
            content,
            disease,
            probability,
            description,
        } = raw;
        match kind.as_str() {
            "prediction" => Segment::Prediction {
                disease,
                probability,
                description,
            },
            "description" => Segment::Description(content.or(description.map(SegmentContent::Text))),
            "symptoms_list" | "symptoms" => Segment::SymptomsList(content),
            "recommendations" => Segment::Recommendations(content),
            "precautions" => Segment::Precautions(content),
            "alternatives" => Segment::Alternatives(content),
            "related_symptoms" => Segment::RelatedSymptoms(content),
            "text" => Segment::Text(content),
            _ => Segment::Other { kind, content },
        }
    }
}

// ============================================
// Transcript entries
// ============================================

#[derive(Clone, Debug, PartialEq)]
pub enum Section {
    Paragraph(String),
    Bullets(Vec<String>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnifiedPrediction {
    pub disease: Option<String>,
    pub probability: Option<String>,
    /// Short description carried on the prediction segment itself.
    pub summary: Option<String>,
    pub description: Option<Section>,
    pub symptoms_list: Option<Section>,
    pub recommendations: Option<Section>,
    pub precautions: Option<Section>,
    pub alternatives: Option<Section>,
    pub related_symptoms: Option<Section>,
    /// Free text and unrecognized segments, in arrival order.
    pub notes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChatMessage {
    User {
        text: String,
        timestamp: OffsetDateTime,
    },
    Assistant {
        lines: Vec<String>,
        timestamp: OffsetDateTime,
    },
    Bullets {
        items: Vec<String>,
        timestamp: OffsetDateTime,
    },
    Prediction {
        disease: String,
        probability_text: String,
        description: String,
        timestamp: OffsetDateTime,
    },
    Unified {
        prediction: UnifiedPrediction,
        timestamp: OffsetDateTime,
    },
}

impl ChatMessage {
    pub fn timestamp(&self) -> OffsetDateTime {
        match self {
            ChatMessage::User { timestamp, .. }
            | ChatMessage::Assistant { timestamp, .. }
            | ChatMessage::Bullets { timestamp, .. }
            | ChatMessage::Prediction { timestamp, .. }
            | ChatMessage::Unified { timestamp, .. } => *timestamp,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, ChatMessage::User { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_symptom_vocabularies_map_to_one_variant() {
        let legacy: RawSegment =
            serde_json::from_str(r#"{"type":"symptoms","content":"a"}"#).unwrap();
        let current: RawSegment =
            serde_json::from_str(r#"{"type":"symptoms_list","content":"a"}"#).unwrap();
        assert_eq!(Segment::from(legacy), Segment::from(current));
    }

    #[test]
    fn unknown_segment_keeps_its_content() {
        let raw: RawSegment =
            serde_json::from_str(r#"{"type":"triage","content":["x","y"]}"#).unwrap();
        assert_eq!(
            Segment::from(raw),
            Segment::Other {
                kind: "triage".into(),
                content: Some(SegmentContent::List(vec!["x".into(), "y".into()])),
            }
        );
    }

    #[test]
    fn probability_accepts_numbers_and_strings() {
        let raw: RawSegment =
            serde_json::from_str(r#"{"type":"prediction","disease":"Flu","probability":0.5}"#)
                .unwrap();
        assert_eq!(raw.probability, Some(Probability::Ratio(0.5)));
        let raw: RawSegment =
            serde_json::from_str(r#"{"type":"prediction","probability":"50.0%"}"#).unwrap();
        assert_eq!(raw.probability, Some(Probability::Text("50.0%".into())));
    }

    #[test]
    fn simple_prediction_accepts_legacy_field() {
        let parsed: SimplePrediction = serde_json::from_str(r#"{"prediction":"Malaria"}"#).unwrap();
        assert_eq!(parsed.disease, "Malaria");
        assert_eq!(parsed.cure, None);
    }
}
