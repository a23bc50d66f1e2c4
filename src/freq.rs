use std::collections::{HashMap, HashSet};

/// Words excluded from counting, matched case-insensitively.
///
/// Carried over verbatim from the original tooling, duplicates and typos
/// included. Note the merged `"youreill"` entry: the source list ran
/// `"youre"` and `"ill"` together, so neither word is ignored on its own.
/// Reproduced as-is pending a product decision on the intended split.
pub const DEFAULT_IGNORE: &[&str] = &[
    "to",
    "the", "a", "an",
    "was",
    "and",
    "is", "isnt", "was", "wasnt", "be", "wont", "were", "werent", "an",
    "out",
    "of",
    "has", "have", "had",
    "do", "did", "didnt", "done",
    "as",
    "i", "you", "he", "she", "it", "we", "they", "them",
    "my", "yours", "his", "her", "its", "our", "their",
    "me", "your", "him", "im", "us", "youreill", "youll", "well",
    "in", "at", "on", "with", "without", "from",
    "but", "this", "that", "what", "why", "where", "who", "whom",
    "can", "cant", "would", "woudlnt",
    "so", "if", "for", "not", "else",
    "then",
];

/// Static token replacement table applied before filtering. Empty by
/// default; kept as explicit configuration rather than hidden state.
pub const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[];

/// Immutable counting configuration: the ignore list (extendable at
/// startup from the CLI) and the replacement table.
#[derive(Debug, Clone)]
pub struct CountConfig {
    ignore: HashSet<String>,
    replacements: Vec<(String, String)>,
}

impl Default for CountConfig {
    fn default() -> Self {
        CountConfig {
            ignore: DEFAULT_IGNORE.iter().map(|w| w.to_lowercase()).collect(),
            replacements: DEFAULT_REPLACEMENTS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl CountConfig {
    /// Extend the ignore list with additional words.
    pub fn with_ignored<I>(mut self, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.ignore
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    fn is_ignored(&self, token: &str) -> bool {
        self.ignore.contains(&token.to_lowercase())
    }

    fn replacement<'a>(&'a self, token: &'a str) -> &'a str {
        for (from, to) in &self.replacements {
            if from == token {
                return to;
            }
        }
        token
    }
}

/// Single-word and adjacent-pair frequency tables.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Frequencies {
    pub single: HashMap<String, u64>,
    pub pairs: HashMap<String, u64>,
}

/// Count word and word-pair frequencies in a cleaned text blob.
///
/// The blob is split on single spaces. A token is skipped when it is empty
/// after removing hyphens and underscores, or when its case-folded form is
/// ignored; counted tokens keep their original case. Pair counting runs on
/// the filtered stream: the "previous" token is the last one that survived
/// the filters, skipped tokens leave it untouched.
///
/// # Example
/// ```
/// use fanfic_analysis::freq::{CountConfig, count_words};
/// let frequencies = count_words("The cat sat  The cat ran", &CountConfig::default());
/// assert_eq!(frequencies.single["cat"], 2);
/// assert_eq!(frequencies.pairs["cat sat"], 1);
/// assert_eq!(frequencies.pairs["sat cat"], 1);
/// assert_eq!(frequencies.pairs["cat ran"], 1);
/// ```
pub fn count_words<'a>(text: &'a str, config: &'a CountConfig) -> Frequencies {
    let mut single: HashMap<String, u64> = HashMap::new();
    let mut pairs: HashMap<String, u64> = HashMap::new();
    let mut prev: Option<&str> = None;

    for raw in text.split(' ') {
        let token = config.replacement(raw.trim());
        if token.replace(&['-', '_'][..], "").is_empty() {
            continue;
        }
        if config.is_ignored(token) {
            continue;
        }
        *single.entry(token.to_string()).or_insert(0) += 1;
        if let Some(prev) = prev {
            *pairs.entry(format!("{prev} {token}")).or_insert(0) += 1;
        }
        prev = Some(token);
    }

    Frequencies { single, pairs }
}
