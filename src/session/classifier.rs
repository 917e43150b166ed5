//! Swappable three-state intention classifier.

/// Classifier outcome. `Block` rejects the intention; `Warn` is logged and generation continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Warn(String),
    Block(String),
}

pub trait IntentionClassifier {
    fn classify(&self, text: &str) -> Verdict;
}

/// Passes everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl IntentionClassifier for AllowAll {
    fn classify(&self, _text: &str) -> Verdict {
        Verdict::Pass
    }
}

/// Whole-word, case-insensitive lookup against hard (block) and soft (warn) word lists.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct KeywordClassifier {
    pub hard: Vec<String>,
    pub soft: Vec<String>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        let words = |ws: &[&str]| ws.iter().map(|w| (*w).to_string()).collect();
        Self {
            hard: words(&["hate", "kill", "destroy", "revenge"]),
            soft: words(&["never", "can't", "cannot", "hopeless", "worthless"]),
        }
    }
}

impl KeywordClassifier {
    pub fn new(hard: Vec<String>, soft: Vec<String>) -> Self {
        Self { hard, soft }
    }

    fn first_match<'a>(list: &'a [String], words: &[String]) -> Option<&'a str> {
        list.iter()
            .find(|w| words.iter().any(|t| t.eq_ignore_ascii_case(w)))
            .map(String::as_str)
    }
}

/// Lowercased words: runs of alphanumerics and apostrophes.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .filter(|w| !w.is_empty())
        .map(|w| w.replace('’', "'").to_lowercase())
        .collect()
}

impl IntentionClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Verdict {
        let words = tokenize(text);
        if let Some(w) = Self::first_match(&self.hard, &words) {
            return Verdict::Block(format!("contains \"{w}\""));
        }
        if let Some(w) = Self::first_match(&self.soft, &words) {
            return Verdict::Warn(format!("contains \"{w}\""));
        }
        Verdict::Pass
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/classifier.rs"]
mod tests;
