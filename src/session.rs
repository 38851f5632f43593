//! Transcript state for one chat page.
//!
//! Only one prediction may be in flight. Each submission and each clear
//! starts a new generation; results and delayed reveals from an older
//! generation are dropped.

use crate::api::{PredictionBackend, PredictionOutcome};
use crate::autocomplete::SymptomCatalog;
use crate::error::ApiResult;
use crate::render::{RenderPlan, render_failure, render_outcome};
use crate::types::ChatMessage;
use time::OffsetDateTime;

pub const WELCOME_TEXT: &str = "Hello! I'm Medica, your health assistant.\n\
Describe your symptoms separated by commas (for example: fever, cough, headache) \
and I'll suggest possible conditions.\n\
This is not a medical diagnosis. Please consult a doctor for professional advice.";

/// A prediction request the caller should send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub symptoms: String,
    pub generation: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    busy: bool,
    generation: u64,
}

impl ChatSession {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            transcript: vec![crate::render::assistant_text(WELCOME_TEXT, now)],
            busy: false,
            generation: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Records the user's entry and marks the session busy. Blank input and
    /// submissions made while a request is pending are ignored.
    pub fn begin(&mut self, raw: &str, now: OffsetDateTime) -> Option<Submission> {
        let symptoms = raw.trim();
        if symptoms.is_empty() {
            return None;
        }
        if self.busy {
            tracing::debug!("ignoring submission while a prediction is pending");
            return None;
        }

        self.transcript.push(ChatMessage::User {
            text: symptoms.to_string(),
            timestamp: now,
        });
        self.busy = true;
        self.generation += 1;
        Some(Submission {
            symptoms: symptoms.to_string(),
            generation: self.generation,
        })
    }

    /// Clears the busy flag and turns the result into a render plan.
    /// Returns `None` when the chat was cleared after the request was sent.
    pub fn finish(
        &mut self,
        generation: u64,
        result: ApiResult<PredictionOutcome>,
        now: OffsetDateTime,
    ) -> Option<RenderPlan> {
        if !self.is_current(generation) {
            tracing::debug!(generation, "discarding stale prediction result");
            return None;
        }
        self.busy = false;
        Some(match result {
            Ok(outcome) => render_outcome(outcome, now),
            Err(err) => render_failure(&err, now),
        })
    }

    /// Appends `message` if `generation` is still current.
    pub fn reveal(&mut self, generation: u64, message: ChatMessage) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.transcript.push(message);
        true
    }

    /// Truncates the transcript to the welcome entry and abandons any
    /// pending request or reveal.
    pub fn clear(&mut self) {
        self.transcript.truncate(1);
        self.busy = false;
        self.generation += 1;
    }
}

/// Sends one submission to the backend.
pub async fn request_prediction<B>(
    backend: &B,
    submission: &Submission,
) -> ApiResult<PredictionOutcome>
where
    B: PredictionBackend + ?Sized,
{
    backend.predict(&submission.symptoms).await
}

/// Fetches the autocomplete catalog. Failures are logged and yield an empty
/// catalog, which keeps autocomplete off for the session.
pub async fn load_catalog<B>(backend: &B) -> SymptomCatalog
where
    B: PredictionBackend + ?Sized,
{
    match backend.symptoms().await {
        Ok(names) => {
            let catalog = SymptomCatalog::new(names);
            tracing::info!(count = catalog.len(), "loaded symptom catalog");
            catalog
        }
        Err(err) => {
            tracing::error!(%err, "error fetching symptoms");
            SymptomCatalog::default()
        }
    }
}
