use std::collections::{BTreeMap, HashMap};

use clap::ValueEnum;
use itertools::Itertools;
use serde::Serialize;

use crate::project::StoryMetadata;

/// Two character names, sorted, identifying a pairing regardless of the
/// order the archive listed them in.
pub type PairingKey = (String, String);

/// Which aggregated table feeds the chord diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MasterKey {
    /// Per-pairing statistics.
    Stats,
    /// Co-occurrence counts between pairings.
    Correlation,
}

/// Numeric field selectable for plotting. "reviews" is accumulated but was
/// never a plot choice in the original tooling, so it stays unselectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatKey {
    Occurences,
    Follows,
    Favorites,
    Words,
    Chapters,
}

impl StatKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Occurences => "occurences",
            StatKey::Follows => "follows",
            StatKey::Favorites => "favorites",
            StatKey::Words => "words",
            StatKey::Chapters => "chapters",
        }
    }
}

/// Accumulated counters for one pairing, summed field-wise over every
/// story the pairing appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairingStats {
    pub occurences: u64,
    pub reviews: i64,
    pub follows: i64,
    pub favorites: i64,
    pub words: i64,
    pub chapters: i64,
}

impl PairingStats {
    /// The fixed contribution of a single story.
    fn for_story(metadata: &StoryMetadata) -> Self {
        PairingStats {
            occurences: 1,
            reviews: metadata.reviews,
            follows: metadata.follows,
            favorites: metadata.favs,
            words: metadata.num_words,
            chapters: metadata.num_chapters,
        }
    }

    fn add(&mut self, other: &PairingStats) {
        self.occurences += other.occurences;
        self.reviews += other.reviews;
        self.follows += other.follows;
        self.favorites += other.favorites;
        self.words += other.words;
        self.chapters += other.chapters;
    }

    fn get(&self, key: StatKey) -> i64 {
        match key {
            StatKey::Occurences => self.occurences as i64,
            StatKey::Follows => self.follows,
            StatKey::Favorites => self.favorites,
            StatKey::Words => self.words,
            StatKey::Chapters => self.chapters,
        }
    }
}

/// Co-occurrence counter between two pairings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrelationStats {
    pub occurences: u64,
}

/// Aggregated pairing data of a whole project.
#[derive(Debug, Default, PartialEq)]
pub struct PairingData {
    /// Per-pairing statistics, keyed by sorted name pair.
    pub stats: HashMap<PairingKey, PairingStats>,
    /// Co-occurrence counts, keyed by the sorted pair of "/"-joined
    /// pairing names.
    pub correlation: HashMap<(String, String), CorrelationStats>,
}

/// Pairing inclusion policy: everything, unless `adult_only` restricts the
/// run to mature-rated stories.
pub fn include_in_pairings(metadata: &StoryMetadata, adult_only: bool) -> bool {
    if adult_only {
        metadata.rating.to_lowercase().trim().replace('+', "") == "m"
    } else {
        true
    }
}

/// Normalize a story's raw ship groups into canonical 2-element pairings.
///
/// Groups of one are dropped, groups of two kept, larger groups expanded
/// into every 2-element combination in input order. Every resulting pair
/// is name-sorted, so `["Bob", "Alice"]` and `["Alice", "Bob"]` yield the
/// same key. Duplicates in the input survive as duplicates.
pub fn extract_pairings(ships: &[Vec<String>]) -> Vec<PairingKey> {
    let mut pairings: Vec<PairingKey> = Vec::new();
    for group in ships {
        match group.len() {
            0 | 1 => continue,
            2 => pairings.push((group[0].clone(), group[1].clone())),
            _ => pairings.extend(group.iter().cloned().tuple_combinations::<(String, String)>()),
        }
    }
    pairings.into_iter().map(canonical).collect()
}

fn canonical((a, b): (String, String)) -> PairingKey {
    if a <= b { (a, b) } else { (b, a) }
}

/// `"A/B"` form of a pairing key.
pub fn joined(pairing: &PairingKey) -> String {
    format!("{}/{}", pairing.0, pairing.1)
}

fn correlation_key(a: &PairingKey, b: &PairingKey) -> (String, String) {
    let (sa, sb) = (joined(a), joined(b));
    if sa <= sb { (sa, sb) } else { (sb, sa) }
}

/// Aggregate pairing statistics and pairing co-occurrence over all
/// included stories.
///
/// Correlation deliberately links each pairing to the *first* other
/// pairing of the same story only, not to all of them. That single-partner
/// policy (and its bias towards early list entries) matches the original
/// tooling and is kept as-is. A story with a single pairing contributes no
/// correlation entry; neither does one whose extra entries are all
/// duplicates of each other.
pub fn collect_pairing_data(stories: &[StoryMetadata], adult_only: bool) -> PairingData {
    let mut data = PairingData::default();
    for metadata in stories {
        if !include_in_pairings(metadata, adult_only) {
            continue;
        }
        let pairings = extract_pairings(&metadata.ships);
        for pairing in &pairings {
            let contribution = PairingStats::for_story(metadata);
            data.stats
                .entry(pairing.clone())
                .and_modify(|stats| stats.add(&contribution))
                .or_insert(contribution);

            if pairings.len() == 1 {
                continue;
            }
            let Some(other) = pairings.iter().find(|p| *p != pairing) else {
                continue;
            };
            data.correlation
                .entry(correlation_key(pairing, other))
                .or_insert(CorrelationStats { occurences: 0 })
                .occurences += 1;
        }
    }
    data
}

impl PairingData {
    /// Reduce the chosen table to `pairing key -> value` for the matrix
    /// builder, failing on a key the table does not carry.
    pub fn select(
        &self,
        masterkey: MasterKey,
        key: StatKey,
    ) -> Result<HashMap<PairingKey, i64>, String> {
        match masterkey {
            MasterKey::Stats => Ok(self
                .stats
                .iter()
                .map(|(pairing, stats)| (pairing.clone(), stats.get(key)))
                .collect()),
            MasterKey::Correlation => {
                if key != StatKey::Occurences {
                    return Err(format!(
                        "Correlation entries only carry 'occurences', not '{}'",
                        key.as_str()
                    ));
                }
                Ok(self
                    .correlation
                    .iter()
                    .map(|(pairing, stats)| (pairing.clone(), stats.occurences as i64))
                    .collect())
            }
        }
    }

    /// JSON-friendly view of the gathered data, with joined string keys in
    /// sorted order. Used for the `-p` dump.
    pub fn printable(&self) -> serde_json::Value {
        let stats: BTreeMap<String, &PairingStats> = self
            .stats
            .iter()
            .map(|(pairing, stats)| (joined(pairing), stats))
            .collect();
        let correlation: BTreeMap<String, &CorrelationStats> = self
            .correlation
            .iter()
            .map(|((a, b), stats)| (format!("{a} | {b}"), stats))
            .collect();
        serde_json::json!({ "stats": stats, "correlation": correlation })
    }
}
