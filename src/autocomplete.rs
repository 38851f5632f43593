//! Symptom autocomplete over a catalog fetched once at start-up.
//!
//! The input holds a comma-separated symptom list. Only the text after the
//! last comma (the *active term*) is searched and replaced.

pub const MAX_SUGGESTIONS: usize = 7;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymptomCatalog {
    names: Vec<String>,
}

impl SymptomCatalog {
    /// Builds a catalog, dropping blanks and repeated names but keeping order.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let trimmed = name.trim();
            if trimmed.is_empty() || unique.iter().any(|existing| existing == trimmed) {
                continue;
            }
            unique.push(trimmed.to_string());
        }
        Self { names: unique }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Catalog entries containing the active term of `input`, capped at
    /// [`MAX_SUGGESTIONS`]. An empty term yields nothing.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        let term = active_term(input);
        if term.is_empty() {
            return Vec::new();
        }
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&term))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}

/// Lowercased, trimmed text after the last comma (or the whole input).
pub fn active_term(input: &str) -> String {
    let tail = match input.rfind(',') {
        Some(idx) => &input[idx + 1..],
        None => input,
    };
    tail.trim().to_lowercase()
}

/// Replaces only the active term of `input` with `suggestion`.
///
/// Earlier terms are kept verbatim, up to and including the last comma,
/// followed by a single space.
pub fn apply_suggestion(input: &str, suggestion: &str) -> String {
    match input.rfind(',') {
        Some(idx) => format!("{} {}", &input[..=idx], suggestion),
        None => suggestion.to_string(),
    }
}

/// What the suggestion dropdown currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AutocompleteState {
    suggestions: Vec<String>,
    visible: bool,
}

impl AutocompleteState {
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_visible(&self) -> bool {
        self.visible && !self.suggestions.is_empty()
    }

    pub fn on_input(&mut self, catalog: &SymptomCatalog, input: &str) {
        if input.trim().is_empty() || catalog.is_empty() {
            self.dismiss();
            return;
        }
        self.suggestions = catalog.suggest(input);
        self.visible = !self.suggestions.is_empty();
    }

    /// Focusing a non-empty input re-opens the list.
    pub fn on_focus(&mut self, catalog: &SymptomCatalog, input: &str) {
        self.on_input(catalog, input);
    }

    /// Returns the new input value and closes the list.
    pub fn select(&mut self, input: &str, suggestion: &str) -> String {
        self.dismiss();
        apply_suggestion(input, suggestion)
    }

    pub fn dismiss(&mut self) {
        self.suggestions.clear();
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> SymptomCatalog {
        SymptomCatalog::new(names.iter().map(|s| s.to_string()))
    }

    #[test]
    fn active_term_uses_last_segment() {
        assert_eq!(active_term("fever, cough, Head"), "head");
        assert_eq!(active_term("  Itching "), "itching");
        assert_eq!(active_term("fever,"), "");
        assert_eq!(active_term(""), "");
    }

    #[test]
    fn catalog_dedupes_in_order() {
        let c = catalog(&["cough", "fever", "cough", " ", "chills"]);
        assert_eq!(c.names(), ["cough", "fever", "chills"]);
    }

    #[test]
    fn suggestions_are_capped() {
        let names: Vec<String> = (0..20).map(|i| format!("pain_{i}")).collect();
        let c = SymptomCatalog::new(names);
        let found = c.suggest("PAIN");
        assert_eq!(found.len(), MAX_SUGGESTIONS);
        assert_eq!(found[0], "pain_0");
        assert_eq!(found[6], "pain_6");
    }

    #[test]
    fn apply_without_comma_replaces_everything() {
        assert_eq!(apply_suggestion("hea", "headache"), "headache");
    }

    #[test]
    fn apply_with_comma_keeps_prefix() {
        assert_eq!(apply_suggestion("fever,cou", "cough"), "fever, cough");
        assert_eq!(
            apply_suggestion("fever, cough, head", "headache"),
            "fever, cough, headache"
        );
    }

    #[test]
    fn state_stays_hidden_without_catalog() {
        let mut state = AutocompleteState::default();
        state.on_input(&SymptomCatalog::default(), "head");
        assert!(!state.is_visible());
    }

    #[test]
    fn select_closes_list() {
        let c = catalog(&["headache"]);
        let mut state = AutocompleteState::default();
        state.on_input(&c, "hea");
        assert!(state.is_visible());
        let next = state.select("hea", "headache");
        assert_eq!(next, "headache");
        assert!(!state.is_visible());
    }
}
