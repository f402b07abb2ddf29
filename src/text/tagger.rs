//! Part-of-speech tagging
//!
//! A [`Tagger`] turns text into a [`TextAnalysis`]: the ordered token
//! sequence plus the noun and verb phrases found in the same text.
//! [`tag_tokens`] then classifies every token by phrase membership.
//!
//! The built-in [`HeuristicTagger`] is a lexicon and suffix heuristic. It is
//! deliberately shallow; anything smarter can be plugged in behind the trait.

use std::collections::HashSet;
use std::ops::Range;

use serde::Serialize;

use super::tokenizer::{RawToken, SENTENCE_TERMINATORS, is_punctuation, tokenize};
use crate::Result;

/// Grammatical role assigned to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Member of the noun phrase list
    Noun,
    /// Member of the verb phrase list
    Verb,
    /// Everything else
    Unknown,
}

/// Tokenized text with the phrase lists a tagger extracted from it
#[derive(Debug, Clone, Default)]
pub struct TextAnalysis {
    /// Ordered tokens
    pub tokens: Vec<RawToken>,
    /// Noun phrases (single words and multi-word groups)
    pub noun_phrases: HashSet<String>,
    /// Verb phrases (single words and multi-word groups)
    pub verb_phrases: HashSet<String>,
}

/// A tagged token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text
    pub value: String,
    /// Assigned tag
    pub tag: Tag,
    /// Position in the token sequence
    pub index: usize,
    /// Byte range in the source text, when the tokenizer reported one
    pub span: Option<Range<usize>>,
}

impl Token {
    /// Nouns and verbs that are not punctuation can anchor an insertion
    #[must_use]
    pub fn is_candidate(&self) -> bool {
        matches!(self.tag, Tag::Noun | Tag::Verb) && !is_punctuation(&self.value)
    }
}

/// Source of tokens and phrase lists
pub trait Tagger: Send + Sync {
    /// Analyze `text`
    fn analyze(&self, text: &str) -> Result<TextAnalysis>;
}

/// Tag every token of `analysis` by exact membership in its phrase lists.
///
/// Nouns win over verbs when a word is in both lists. Multi-word phrases
/// never match a single token.
#[must_use]
pub fn tag_tokens(analysis: &TextAnalysis) -> Vec<Token> {
    analysis
        .tokens
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let tag = if analysis.noun_phrases.contains(&raw.value) {
                Tag::Noun
            } else if analysis.verb_phrases.contains(&raw.value) {
                Tag::Verb
            } else {
                Tag::Unknown
            };
            Token {
                value: raw.value.clone(),
                tag,
                index,
                span: raw.span.clone(),
            }
        })
        .collect()
}

/// Lexicon and suffix based tagger
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl Tagger for HeuristicTagger {
    fn analyze(&self, text: &str) -> Result<TextAnalysis> {
        let tokens = tokenize(text);
        let mut analysis = TextAnalysis::default();
        let mut phrase = PhraseBuilder::default();

        let mut prev: Option<WordClass> = None;
        let mut sentence_start = true;

        for token in &tokens {
            if is_punctuation(&token.value) {
                phrase.break_run();
                sentence_start = token
                    .value
                    .chars()
                    .next()
                    .is_some_and(|c| SENTENCE_TERMINATORS.contains(&c));
                prev = None;
                continue;
            }

            let class = classify(&token.value, prev, sentence_start);
            match class {
                WordClass::Noun => {
                    analysis.noun_phrases.insert(token.value.clone());
                    phrase.push_noun(&token.value);
                }
                WordClass::Verb => {
                    analysis.verb_phrases.insert(token.value.clone());
                    phrase.push_verb(&token.value);
                }
                WordClass::Determiner | WordClass::Adjective => {
                    phrase.push_modifier(&token.value);
                }
                WordClass::Auxiliary => {
                    phrase.push_auxiliary(&token.value);
                }
                _ => phrase.break_run(),
            }

            prev = Some(class);
            sentence_start = false;
        }
        phrase.finish(&mut analysis);

        analysis.tokens = tokens;
        Ok(analysis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Determiner,
    Subject,
    Pronoun,
    Auxiliary,
    Preposition,
    Conjunction,
    Adverb,
    Adjective,
    Noun,
    Verb,
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "each", "every", "no", "another", "either", "neither", "which",
    "what", "whose", "all", "both",
];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they", "who"];

const PRONOUNS: &[&str] = &[
    "me", "him", "us", "them", "whom", "myself", "yourself", "himself", "herself", "itself",
    "ourselves", "themselves", "mine", "yours", "hers", "ours", "theirs",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "to",
    "don't", "doesn't", "didn't", "won't", "can't", "isn't", "aren't", "wasn't",
];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "by", "down", "during",
    "except", "for", "from", "in", "inside", "into", "like", "near", "of", "off", "on", "onto",
    "out", "outside", "over", "past", "since", "through", "throughout", "toward", "towards",
    "under", "until", "up", "upon", "with", "within", "without",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while", "if",
    "unless", "whereas", "than", "then", "as", "when", "where",
];

const ADVERBS: &[&str] = &[
    "not", "very", "too", "also", "just", "only", "even", "still", "already", "always", "never",
    "often", "sometimes", "here", "there", "now", "soon", "really", "quite", "almost", "again",
];

const ADJECTIVES: &[&str] = &[
    "quick", "slow", "fast", "big", "small", "large", "little", "good", "bad", "great", "new",
    "old", "young", "high", "low", "long", "short", "best", "better", "worse", "worst", "first",
    "last", "next", "other", "same", "different", "important", "easy", "hard", "early", "late",
    "few", "many", "much", "more", "most", "own", "full", "free", "sure", "whole", "real",
    "clear", "simple", "strong", "lazy", "happy", "sad", "red", "blue", "green", "black",
    "white", "brown",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "less", "ish", "ical"];

/// Words with verb-looking endings that are usually nouns or adverbs
const MORPHOLOGY_EXCEPTIONS: &[&str] = &[
    "need", "speed", "seed", "feed", "breed", "hundred", "indeed", "thing", "nothing",
    "something", "anything", "everything", "morning", "evening", "spring", "string", "during",
    "ceiling", "wedding",
];

fn classify(word: &str, prev: Option<WordClass>, sentence_start: bool) -> WordClass {
    let lower = word.to_lowercase();
    let lower = lower.as_str();

    if let Some(class) = closed_class(lower) {
        return class;
    }

    let capitalized = word.chars().next().is_some_and(char::is_uppercase);
    if capitalized && !sentence_start {
        return WordClass::Noun;
    }

    if matches!(prev, Some(WordClass::Subject | WordClass::Auxiliary)) {
        return WordClass::Verb;
    }

    if is_adjective(lower) {
        return WordClass::Adjective;
    }

    if has_verb_morphology(lower) {
        return WordClass::Verb;
    }

    // "fox jumps": third person singular after a noun
    if prev == Some(WordClass::Noun)
        && lower.len() > 2
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("'s")
    {
        return WordClass::Verb;
    }

    if lower.len() > 4 && lower.ends_with("ly") {
        return WordClass::Adverb;
    }

    if lower.chars().all(|c| c.is_numeric()) {
        return WordClass::Determiner;
    }

    WordClass::Noun
}

fn closed_class(lower: &str) -> Option<WordClass> {
    let lists: [(&[&str], WordClass); 7] = [
        (DETERMINERS, WordClass::Determiner),
        (SUBJECT_PRONOUNS, WordClass::Subject),
        (PRONOUNS, WordClass::Pronoun),
        (AUXILIARIES, WordClass::Auxiliary),
        (PREPOSITIONS, WordClass::Preposition),
        (CONJUNCTIONS, WordClass::Conjunction),
        (ADVERBS, WordClass::Adverb),
    ];
    lists
        .into_iter()
        .find(|(list, _)| list.contains(&lower))
        .map(|(_, class)| class)
}

fn is_adjective(lower: &str) -> bool {
    ADJECTIVES.contains(&lower)
        || (lower.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)))
}

fn has_verb_morphology(lower: &str) -> bool {
    if MORPHOLOGY_EXCEPTIONS.contains(&lower) {
        return false;
    }
    (lower.len() > 3 && lower.ends_with("ed")) || (lower.len() > 4 && lower.ends_with("ing"))
}

/// Collects determiner/adjective/noun runs and auxiliary/verb runs into
/// multi-word phrases
#[derive(Debug, Default)]
struct PhraseBuilder {
    words: Vec<String>,
    has_noun: bool,
    has_verb: bool,
    noun_phrases: Vec<String>,
    verb_phrases: Vec<String>,
}

impl PhraseBuilder {
    fn push_modifier(&mut self, word: &str) {
        if self.has_noun || self.has_verb {
            self.break_run();
        }
        self.words.push(word.to_string());
    }

    fn push_noun(&mut self, word: &str) {
        if self.has_verb {
            self.break_run();
        }
        self.words.push(word.to_string());
        self.has_noun = true;
    }

    fn push_auxiliary(&mut self, word: &str) {
        self.break_run();
        self.words.push(word.to_string());
    }

    fn push_verb(&mut self, word: &str) {
        if self.has_noun {
            self.break_run();
        }
        self.words.push(word.to_string());
        self.has_verb = true;
    }

    /// Close the current run, keeping it if it formed a multi-word phrase
    fn break_run(&mut self) {
        if self.words.len() > 1 {
            let joined = self.words.join(" ");
            if self.has_noun {
                self.noun_phrases.push(joined);
            } else if self.has_verb {
                self.verb_phrases.push(joined);
            }
        }
        self.words.clear();
        self.has_noun = false;
        self.has_verb = false;
    }

    fn finish(mut self, analysis: &mut TextAnalysis) {
        self.break_run();
        analysis.noun_phrases.extend(self.noun_phrases);
        analysis.verb_phrases.extend(self.verb_phrases);
    }
}
