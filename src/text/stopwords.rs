// Stopword sets used by the normalization pipeline and RAKE.
//
// Two layers. `ENGLISH` is the classic 179-word NLTK English list: function
// words only, so RAKE can use it to find phrase boundaries without cutting
// content words out of phrases. The cleaning pipeline adds a broader list of
// filler and quantity words on top, plus a handful of words that are noise
// in résumés and job postings and the one- and two-letter fragments left
// behind when contractions are split on punctuation ("don't" → "don t").
//
// The broad list deliberately stays small. General-purpose lists with a
// thousand-plus entries also drop words like "research", "test" or "work"
// that carry the signal in a résumé.

use std::collections::HashSet;
use std::sync::LazyLock;

/// NLTK's English stopword list.
pub const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Filler, quantity and boilerplate words dropped on top of `ENGLISH` when
/// cleaning text for counting.
pub const EXTENDED: &[&str] = &[
    "all", "six", "just", "less", "being", "indeed", "over", "move", "anyway", "four", "not",
    "own", "through", "using", "fify", "where", "mill", "only", "find", "before", "one", "whose",
    "system", "how", "somewhere", "much", "thick", "show", "had", "enough", "should", "to",
    "must", "whom", "seeming", "yourselves", "under", "ours", "two", "has", "might",
    "thereafter", "latterly", "do", "them", "his", "around", "than", "get", "very", "de", "none",
    "cannot", "every", "un", "they", "front", "during", "thus", "now", "him", "nor", "name",
    "regarding", "several", "hereafter", "did", "always", "who", "didn", "whither", "this",
    "someone", "either", "each", "become", "thereupon", "sometime", "side", "towards", "therein",
    "twelve", "because", "often", "ten", "our", "doing", "km", "eg", "some", "back", "used", "up",
    "go", "namely", "computer", "are", "further", "beyond", "ourselves", "yet", "out", "even",
    "will", "what", "still", "for", "bottom", "mine", "since", "please", "forty", "per", "its",
    "everything", "behind", "does", "various", "above", "between", "it", "neither", "seemed",
    "ever", "across", "she", "somehow", "be", "we", "full", "never", "sixty", "however", "here",
    "otherwise", "were", "whereupon", "nowhere", "although", "found", "alone", "re", "along",
    "quite", "fifteen", "by", "both", "about", "last", "would", "anything", "via", "many",
    "could", "thence", "put", "against", "keep", "etc", "amount", "became", "ltd", "hence",
    "onto", "or", "con", "among", "already", "co", "afterwards", "formerly", "within", "seems",
    "into", "others", "while", "whatever", "except", "down", "hers", "everyone", "done", "least",
    "another", "whoever", "moreover", "couldnt", "throughout", "anyhow", "yourself", "three",
    "from", "her", "few", "together", "top", "there", "due", "been", "next", "anyone", "eleven",
    "cry", "call", "therefore", "interest", "then", "thru", "themselves", "hundred", "really",
    "sincere", "empty", "more", "himself", "elsewhere", "mostly", "on", "fire", "am", "becoming",
    "hereby", "amongst", "else", "part", "everywhere", "too", "kg", "herself", "former", "those",
    "he", "me", "myself", "made", "twenty", "these", "was", "bill", "cant", "us", "until",
    "besides", "nevertheless", "below", "anywhere", "nine", "can", "whether", "of", "your",
    "toward", "my", "say", "something", "and", "whereafter", "whenever", "give", "almost",
    "wherever", "is", "describe", "beforehand", "herein", "doesn", "an", "as", "itself", "at",
    "have", "in", "seem", "whence", "ie", "any", "fill", "again", "hasnt", "inc", "thereby",
    "thin", "no", "perhaps", "latter", "meanwhile", "when", "detail", "same", "wherein",
    "beside", "also", "that", "other", "take", "which", "becomes", "you", "if", "nobody",
    "unless", "whereas", "see", "though", "may", "after", "upon", "most", "hereupon", "eight",
    "but", "serious", "nothing", "such", "why", "off", "a", "don", "whereby", "third", "i",
    "whole", "noone", "sometimes", "well", "amoungst", "yours", "their", "rather", "without",
    "so", "five", "the", "first", "with", "make", "once",
];

/// Words that dominate every résumé and job posting without saying anything.
pub const DOMAIN_NOISE: &[&str] = &[
    "data",
    "development",
    "web",
    "applications",
    "developed",
    "experience",
    "summary",
    "description",
];

/// Grammatical fragments and contraction leftovers.
pub const GRAMMATICAL_FRAGMENTS: &[&str] = &[
    "a", "i", "s", "t", "d", "m", "o", "y", "ll", "re", "ve", "ma", "am", "an", "as", "at", "be",
    "by", "do", "he", "if", "in", "is", "it", "me", "my", "no", "of", "on", "or", "so", "to", "up",
    "us", "we", "don", "didn", "doesn", "isn", "wasn", "aren", "couldn", "hasn", "haven", "won",
    "wouldn", "shouldn", "ain",
];

static STOPWORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    ENGLISH
        .iter()
        .chain(EXTENDED)
        .chain(DOMAIN_NOISE)
        .chain(GRAMMATICAL_FRAGMENTS)
        .map(|w| w.to_string())
        .collect()
});

/// The full cleaning stopword set: every list above combined.
pub fn stopwords() -> &'static HashSet<String> {
    &STOPWORDS
}

/// Check a single lowercase token against the cleaning stopword set.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Just the function-word list, for phrase boundary detection.
pub fn english() -> impl Iterator<Item = String> {
    ENGLISH.iter().map(|w| w.to_string())
}
