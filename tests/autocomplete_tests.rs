//! Integration tests for symptom autocomplete
//!
//! Covers active-term extraction, filtering and suggestion insertion

use medica::autocomplete::{
    AutocompleteState, MAX_SUGGESTIONS, SymptomCatalog, active_term, apply_suggestion,
};

fn catalog(names: &[&str]) -> SymptomCatalog {
    SymptomCatalog::new(names.iter().map(|s| s.to_string()))
}

mod filtering {
    use super::*;

    #[test]
    fn test_trailing_term_drives_search() {
        let c = catalog(&["headache", "cough", "fatigue"]);
        assert_eq!(active_term("fever, cough, head"), "head");
        assert_eq!(c.suggest("fever, cough, head"), vec!["headache"]);
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let c = catalog(&["Skin Rash", "nodal_skin_eruptions", "itching"]);
        let found = c.suggest("SKIN");
        assert_eq!(found, vec!["Skin Rash", "nodal_skin_eruptions"]);
        for name in &found {
            assert!(name.to_lowercase().contains("skin"));
        }
    }

    #[test]
    fn test_never_more_than_seven() {
        let names: Vec<String> = (0..30).map(|i| format!("ache {i}")).collect();
        let c = SymptomCatalog::new(names);
        for input in ["a", "ache", "fever, ACHE", "e"] {
            assert!(c.suggest(input).len() <= MAX_SUGGESTIONS);
        }
    }

    #[test]
    fn test_empty_term_shows_nothing() {
        let c = catalog(&["headache"]);
        let mut state = AutocompleteState::default();
        for input in ["", "   ", "fever,", "fever,  "] {
            state.on_input(&c, input);
            assert!(!state.is_visible(), "visible for {input:?}");
            assert!(c.suggest(input).is_empty());
        }
    }

    #[test]
    fn test_no_match_hides_list() {
        let c = catalog(&["headache"]);
        let mut state = AutocompleteState::default();
        state.on_input(&c, "xyz");
        assert!(!state.is_visible());
    }
}

mod selection {
    use super::*;

    #[test]
    fn test_only_trailing_segment_is_replaced() {
        assert_eq!(
            apply_suggestion("fever, cough, head", "headache"),
            "fever, cough, headache"
        );
        assert_eq!(apply_suggestion("fever,chi", "chills"), "fever, chills");
        assert_eq!(apply_suggestion("fat", "fatigue"), "fatigue");
    }

    #[test]
    fn test_focus_reopens_for_non_empty_input() {
        let c = catalog(&["headache", "fatigue"]);
        let mut state = AutocompleteState::default();
        state.on_input(&c, "hea");
        state.dismiss();
        assert!(!state.is_visible());

        state.on_focus(&c, "hea");
        assert!(state.is_visible());
        assert_eq!(state.suggestions(), ["headache"]);
    }
}
