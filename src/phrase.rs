//! Phrase generation: one adjective, one noun, one exclamation mark.

use std::fmt;

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Immutable, non-empty list of words to sample from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordList(&'static [&'static str]);

impl WordList {
    pub const ADJECTIVES: WordList = WordList(crate::ADJECTIVES);
    pub const NOUNS: WordList = WordList(crate::NOUNS);

    /// Returns `None` for an empty list; sampling needs at least one word.
    pub fn new(words: &'static [&'static str]) -> Option<Self> {
        if words.is_empty() { None } else { Some(Self(words)) }
    }

    /// Uniform draw with replacement.
    pub fn pick(&self, rng: &mut impl Rng) -> &'static str {
        self.0[rng.gen_range(0..self.0.len())]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn words(&self) -> &'static [&'static str] {
        self.0
    }
}

/// A generated roast, always shaped `"{adjective} {noun}!"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Phrase(String);

impl Phrase {
    fn compose(adjective: &str, noun: &str) -> Self {
        Self(format!("{adjective} {noun}!"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Splits `text` back into the adjective and noun it was built from.
    ///
    /// Adjectives never contain spaces, so the first space is the boundary;
    /// nouns may contain spaces of their own.
    pub fn parse(
        text: &str,
        adjectives: &WordList,
        nouns: &WordList,
    ) -> Option<(&'static str, &'static str)> {
        let body = text.strip_suffix('!')?;
        let (adjective, noun) = body.split_once(' ')?;
        let adjective = adjectives.words().iter().find(|w| **w == adjective).copied()?;
        let noun = nouns.words().iter().find(|w| **w == noun).copied()?;
        Some((adjective, noun))
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Phrase {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Draws phrases from two word lists with an injected rng.
#[derive(Clone, Debug)]
pub struct PhraseGenerator<R = StdRng> {
    adjectives: WordList,
    nouns: WordList,
    rng: R,
}

impl PhraseGenerator<StdRng> {
    /// Built-in word lists, entropy-seeded rng.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for PhraseGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PhraseGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_words(WordList::ADJECTIVES, WordList::NOUNS, rng)
    }

    pub fn with_words(adjectives: WordList, nouns: WordList, rng: R) -> Self {
        Self {
            adjectives,
            nouns,
            rng,
        }
    }

    pub fn generate_one(&mut self) -> Phrase {
        let adjective = self.adjectives.pick(&mut self.rng);
        let noun = self.nouns.pick(&mut self.rng);
        Phrase::compose(adjective, noun)
    }

    /// `n` independent draws; repeats inside a batch are expected.
    pub fn generate_batch(&mut self, n: usize) -> Vec<Phrase> {
        (0..n).map(|_| self.generate_one()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_word_list_is_rejected() {
        assert!(WordList::new(&[]).is_none());
        assert!(WordList::new(&["Rusty"]).is_some());
    }

    #[test]
    fn generated_phrases_follow_the_pattern() {
        let mut generator = PhraseGenerator::seeded(7);
        for _ in 0..200 {
            let phrase = generator.generate_one();
            let parsed = Phrase::parse(phrase.as_str(), &WordList::ADJECTIVES, &WordList::NOUNS);
            assert!(parsed.is_some(), "unexpected phrase {phrase}");
        }
    }

    #[test]
    fn batch_has_requested_length() {
        let mut generator = PhraseGenerator::seeded(42);
        assert_eq!(generator.generate_batch(10).len(), 10);
        assert!(generator.generate_batch(0).is_empty());
    }

    #[test]
    fn same_seed_same_phrases() {
        let a = PhraseGenerator::seeded(3).generate_batch(10);
        let b = PhraseGenerator::seeded(3).generate_batch(10);
        assert_eq!(a, b);
    }

    #[test]
    fn single_word_lists_are_deterministic() {
        let adjectives = WordList::new(&["Rusty"]).unwrap();
        let nouns = WordList::new(&["Tin can"]).unwrap();
        let mut generator = PhraseGenerator::with_words(adjectives, nouns, StdRng::seed_from_u64(0));
        assert_eq!(generator.generate_one().as_str(), "Rusty Tin can!");
    }

    #[test]
    fn every_word_eventually_appears() {
        let mut generator = PhraseGenerator::seeded(11);
        let mut seen_adjectives = std::collections::HashSet::new();
        let mut seen_nouns = std::collections::HashSet::new();
        for phrase in generator.generate_batch(2_000) {
            let (adjective, noun) =
                Phrase::parse(phrase.as_str(), &WordList::ADJECTIVES, &WordList::NOUNS).unwrap();
            seen_adjectives.insert(adjective);
            seen_nouns.insert(noun);
        }
        assert_eq!(seen_adjectives.len(), WordList::ADJECTIVES.len());
        assert_eq!(seen_nouns.len(), WordList::NOUNS.len());
    }

    #[test]
    fn parse_rejects_foreign_text() {
        let (adj, noun) = (&WordList::ADJECTIVES, &WordList::NOUNS);
        assert_eq!(Phrase::parse("Rusty Gear grinder!", adj, noun), Some(("Rusty", "Gear grinder")));
        assert!(Phrase::parse("Rusty Gear grinder", adj, noun).is_none());
        assert!(Phrase::parse("Shiny Gear grinder!", adj, noun).is_none());
        assert!(Phrase::parse(crate::PLACEHOLDER, adj, noun).is_none());
    }
}
