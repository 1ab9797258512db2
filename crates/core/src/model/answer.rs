use std::collections::BTreeSet;
use std::fmt;

/// Text with surrounding whitespace trimmed and case folded to lower-case.
///
/// All matching happens on this form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedAnswer(String);

impl NormalizedAnswer {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display form: first character upper-cased, the rest left as is.
    #[must_use]
    pub fn display(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Debug for NormalizedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NormalizedAnswer({:?})", self.0)
    }
}

impl fmt::Display for NormalizedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remaining acceptable answers of a session.
///
/// Case-insensitive duplicates collapse into one member and blank entries
/// are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    remaining: BTreeSet<NormalizedAnswer>,
}

impl AnswerSet {
    #[must_use]
    pub fn from_answers<S: AsRef<str>>(answers: &[S]) -> Self {
        let mut set = Self::default();
        set.reinitialize(answers);
        set
    }

    /// Replace the contents with the normalized form of `answers`.
    pub fn reinitialize<S: AsRef<str>>(&mut self, answers: &[S]) {
        self.remaining = answers
            .iter()
            .map(|raw| NormalizedAnswer::new(raw.as_ref()))
            .filter(|answer| !answer.is_empty())
            .collect();
    }

    #[must_use]
    pub fn contains(&self, answer: &NormalizedAnswer) -> bool {
        self.remaining.contains(answer)
    }

    /// Remove `answer`, returning whether it was present.
    pub fn remove(&mut self, answer: &NormalizedAnswer) -> bool {
        self.remaining.remove(answer)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remaining answers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &NormalizedAnswer> {
        self.remaining.iter()
    }
}
