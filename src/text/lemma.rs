// Part-of-speech aware lemmatization — the first (optional) stage of the
// normalization pipeline.
//
// Text is split into sentences, each sentence is split on word/punctuation
// boundaries, every token gets a Penn Treebank style tag, and the tag picks
// the morphological rules used to reduce the token to its base form.
//
// Both the tagger and the lemmatizer here are rule-based: a closed-class
// dictionary plus suffix heuristics for tagging, and an irregular-form table
// plus suffix rules for lemmatization. They sit behind the PosTagger and
// Lemmatizer traits so a dictionary-backed implementation can replace them.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::traits::{Lemmatizer, PosTagger};

/// The four morphological categories a lemmatizer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PosTag {
    /// Map a Treebank tag to its category by its first letter.
    ///
    /// Anything unrecognized (determiners, punctuation, pronouns, ...) is
    /// treated as a noun, which leaves most closed-class words untouched.
    pub fn from_treebank(tag: &str) -> Self {
        match tag.chars().next() {
            Some('V') => PosTag::Verb,
            Some('J') => PosTag::Adjective,
            Some('R') => PosTag::Adverb,
            _ => PosTag::Noun,
        }
    }
}

/// Split text into trimmed, non-empty sentences (UAX #29 sentence bounds).
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a sentence into word and punctuation tokens, dropping whitespace.
pub fn word_tokens(sentence: &str) -> Vec<&str> {
    sentence
        .split_word_bounds()
        .filter(|t| !t.trim().is_empty())
        .collect()
}

/// Run the full morphological pass over `text`.
///
/// Returns one string per sentence, each holding the sentence's lemmatized
/// tokens joined by single spaces. Callers that don't need sentence
/// boundaries join the result with spaces.
pub fn lemmatize_text(
    text: &str,
    tagger: &dyn PosTagger,
    lemmatizer: &dyn Lemmatizer,
) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .map(|sentence| {
            let tokens = word_tokens(sentence);
            let tags = tagger.tag(&tokens);
            tokens
                .iter()
                .zip(tags.iter())
                .map(|(token, tag)| {
                    // Proper nouns are not in any dictionary; leave them be.
                    if tag.starts_with("NNP") {
                        token.to_string()
                    } else {
                        lemmatizer.lemmatize(token, PosTag::from_treebank(tag))
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

// ============================================================
// Tagging
// ============================================================

/// Suffix- and dictionary-based Treebank tagger.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleTagger;

/// Suffixes that mark a word as an adjective.
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ical", "ish", "ary", "ant", "ent",
];

impl PosTagger for RuleTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let tag = tag_token(token, i, tags.last().map(String::as_str));
            tags.push(tag.to_string());
        }
        tags
    }
}

fn tag_token(token: &str, index: usize, prev: Option<&str>) -> &'static str {
    if !token.chars().any(char::is_alphanumeric) {
        return ".";
    }
    if token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return "CD";
    }

    let lower = token.to_lowercase();
    if let Some(tag) = closed_class(&lower) {
        return tag;
    }
    if index > 0 && token.chars().next().is_some_and(char::is_uppercase) {
        return "NNP";
    }
    if irregular_verb(&lower).is_some_and(|lemma| lemma != lower) {
        return if prev.is_some_and(|p| p.starts_with("VB")) {
            "VBN"
        } else {
            "VBD"
        };
    }
    if matches!(prev, Some("TO") | Some("MD")) {
        return "VB";
    }

    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ing") {
        "VBG"
    } else if len > 3 && lower.ends_with("ed") {
        if prev.is_some_and(|p| p.starts_with("VB")) {
            "VBN"
        } else {
            "VBD"
        }
    } else if len > 4 && lower.ends_with("ly") {
        "RB"
    } else if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        "JJ"
    } else if len > 3
        && lower.ends_with('s')
        && !(lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is"))
    {
        if prev == Some("PRP") {
            "VBZ"
        } else {
            "NNS"
        }
    } else {
        "NN"
    }
}

fn closed_class(word: &str) -> Option<&'static str> {
    let tag = match word {
        "the" | "a" | "an" | "this" | "that" | "these" | "those" | "every" | "each" | "some"
        | "any" | "no" | "all" | "both" => "DT",
        "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them" => "PRP",
        "my" | "your" | "his" | "her" | "its" | "our" | "their" => "PRP$",
        "to" => "TO",
        "of" | "in" | "on" | "at" | "by" | "for" | "with" | "from" | "about" | "into" | "over"
        | "under" | "between" | "through" | "during" | "after" | "before" | "without"
        | "within" | "across" | "against" | "among" | "since" | "until" | "because" | "if"
        | "while" | "as" => "IN",
        "and" | "or" | "but" | "nor" => "CC",
        "can" | "could" | "will" | "would" | "shall" | "should" | "may" | "might" | "must" => {
            "MD"
        }
        "is" | "has" | "does" => "VBZ",
        "are" | "am" | "have" | "do" => "VBP",
        "was" | "were" | "had" | "did" => "VBD",
        "be" => "VB",
        "been" => "VBN",
        "being" => "VBG",
        "not" | "very" | "also" | "often" | "always" | "never" | "too" | "quite" | "already"
        | "still" | "just" | "soon" | "here" | "there" | "then" | "now" => "RB",
        "who" | "what" | "which" | "whom" => "WP",
        "when" | "where" | "why" | "how" => "WRB",
        _ => return None,
    };
    Some(tag)
}

// ============================================================
// Lemmatization
// ============================================================

/// Irregular-form table plus suffix rules, modeled on WordNet's morphy.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleLemmatizer;

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str, pos: PosTag) -> String {
        let lower = word.to_lowercase();
        if !lower.chars().all(char::is_alphabetic) || INVARIANT.contains(&lower.as_str()) {
            return lower;
        }
        match pos {
            PosTag::Noun => irregular_noun(&lower)
                .map(str::to_string)
                .unwrap_or_else(|| noun_base(&lower)),
            PosTag::Verb => irregular_verb(&lower)
                .map(str::to_string)
                .unwrap_or_else(|| verb_base(&lower)),
            PosTag::Adjective => irregular_adjective(&lower).unwrap_or(&lower).to_string(),
            PosTag::Adverb => irregular_adverb(&lower).unwrap_or(&lower).to_string(),
        }
    }
}

/// Words whose endings look inflected but aren't.
const INVARIANT: &[&str] = &[
    "analysis", "basis", "bed", "bring", "bus", "ceiling", "during", "embed", "evening", "feed",
    "gas", "hundred", "kubernetes", "king", "lens", "mathematics", "morning", "need", "news",
    "nothing", "physics", "red", "ring", "seed", "series", "shed", "species", "speed", "spring",
    "statistics", "string", "swing", "thing", "something", "anything", "everything", "wing",
];

fn irregular_noun(word: &str) -> Option<&'static str> {
    let lemma = match word {
        "children" => "child",
        "men" => "man",
        "women" => "woman",
        "people" => "person",
        "mice" => "mouse",
        "feet" => "foot",
        "teeth" => "tooth",
        "geese" => "goose",
        "analyses" => "analysis",
        "criteria" => "criterion",
        "indices" => "index",
        "matrices" => "matrix",
        "phenomena" => "phenomenon",
        "vertices" => "vertex",
        _ => return None,
    };
    Some(lemma)
}

pub(crate) fn irregular_verb(word: &str) -> Option<&'static str> {
    let lemma = match word {
        "is" | "are" | "am" | "was" | "were" | "been" | "being" | "be" => "be",
        "has" | "had" | "have" | "having" => "have",
        "does" | "did" | "done" | "doing" | "do" => "do",
        "goes" | "went" | "gone" => "go",
        "ran" => "run",
        "made" => "make",
        "built" => "build",
        "wrote" | "written" => "write",
        "took" | "taken" => "take",
        "gave" | "given" => "give",
        "got" | "gotten" => "get",
        "led" => "lead",
        "saw" | "seen" => "see",
        "began" | "begun" => "begin",
        "knew" | "known" => "know",
        "thought" => "think",
        "brought" => "bring",
        "bought" => "buy",
        "taught" => "teach",
        "found" => "find",
        "held" => "hold",
        "kept" => "keep",
        "left" => "leave",
        "met" => "meet",
        "paid" => "pay",
        "said" => "say",
        "sent" => "send",
        "spent" => "spend",
        "stood" => "stand",
        "told" => "tell",
        "understood" => "understand",
        "won" => "win",
        "drove" | "driven" => "drive",
        "grew" | "grown" => "grow",
        "chose" | "chosen" => "choose",
        "spoke" | "spoken" => "speak",
        "created" | "creates" | "creating" => "create",
        _ => return None,
    };
    Some(lemma)
}

fn irregular_adjective(word: &str) -> Option<&'static str> {
    match word {
        "better" | "best" => Some("good"),
        "worse" | "worst" => Some("bad"),
        "further" | "farther" | "furthest" | "farthest" => Some("far"),
        _ => None,
    }
}

fn irregular_adverb(word: &str) -> Option<&'static str> {
    match word {
        "better" | "best" => Some("well"),
        "worse" | "worst" => Some("badly"),
        _ => None,
    }
}

fn noun_base(word: &str) -> String {
    if word.chars().count() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.chars().count() >= 2 {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn verb_base(word: &str) -> String {
    if word.chars().count() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies").or_else(|| word.strip_suffix("ied")) {
        if stem.chars().count() >= 2 {
            return format!("{stem}y");
        }
    }
    if word.ends_with("eed") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ing").or_else(|| word.strip_suffix("ed")) {
        if stem.chars().count() >= 2 && stem.chars().any(is_vowel) {
            return restore_stem(stem);
        }
        return word.to_string();
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Endings after which a stripped "-ed"/"-ing" stem needs its silent "e"
/// back. Each must follow a consonant ("configur" → "configure", but
/// "pour" stays "pour").
const SILENT_E_ENDINGS: &[&str] = &[
    "at", "ut", "ot", "id", "ud", "od", "in", "ir", "ur", "ar", "ib", "ag", "eg", "ig", "og", "ug",
    "il",
];

/// Endings that always take a silent "e" when they end a stripped stem.
const SILENT_E_ALWAYS: &[&str] = &[
    "v", "iz", "yz", "ys", "bl", "pl", "tl", "dl", "gl", "kl", "fl", "cl", "uc", "rc", "nc",
    "ang", "rg", "dg", "quir", "eas", "rs",
];

/// Undo the spelling changes English makes before "-ed"/"-ing".
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();

    // running → runn → run, but calling → call
    if n >= 3 && chars[n - 1] == chars[n - 2] && !is_vowel(chars[n - 1]) {
        if !matches!(chars[n - 1], 'l' | 's' | 'z') {
            return chars[..n - 1].iter().collect();
        }
        return stem.to_string();
    }

    // Short consonant-vowel-consonant stems: making → mak → make, used → us → use
    let last = chars[n - 1];
    let short_cvc = n == 3 && !is_vowel(chars[0]) && is_vowel(chars[1]) && !is_vowel(last);
    let short_vc = n == 2 && is_vowel(chars[0]) && !is_vowel(last);
    if (short_cvc || short_vc) && !matches!(last, 'w' | 'x' | 'y') {
        return format!("{stem}e");
    }

    if SILENT_E_ALWAYS.iter().any(|e| stem.ends_with(e)) {
        return format!("{stem}e");
    }
    for ending in SILENT_E_ENDINGS {
        if let Some(head) = stem.strip_suffix(ending) {
            if head.chars().last().is_some_and(|c| !is_vowel(c)) {
                return format!("{stem}e");
            }
        }
    }
    stem.to_string()
}
