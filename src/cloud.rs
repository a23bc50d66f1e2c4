use std::collections::HashMap;
use std::path::Path;

use log::debug;
use wcloud::{Tokenizer, WordCloud, WordCloudSize};

/// Render a frequency table to a PNG at `outfile`.
///
/// Layout and drawing are delegated to the `wcloud` crate; the fixed
/// parameters are a 1600x900 canvas capped at the 200 most frequent words
/// with no repeated placement.
pub fn render_cloud(frequencies: &HashMap<String, u64>, outfile: &Path) -> Result<(), String> {
    if frequencies.is_empty() {
        return Err("Empty frequency table, nothing to render".to_string());
    }
    let text = weighted_text(frequencies);
    debug!(
        "rendering {} distinct tokens ({} bytes of weighted text)",
        frequencies.len(),
        text.len()
    );

    let tokenizer = Tokenizer::default().with_max_words(200).with_repeat(false);
    let cloud = WordCloud::default().with_tokenizer(tokenizer);
    let size = WordCloudSize::FromDimensions {
        width: 1600,
        height: 900,
    };

    let image = cloud.generate_from_text(&text, size, 1.0);
    image
        .save(outfile)
        .map_err(|e| format!("Write {} failed: {e}", outfile.display()))
}

/// Expand a frequency table back into a text blob, each token repeated
/// once per occurrence.
///
/// The renderer consumes raw text and word-splits it, so the inner space
/// of a pair token is turned into an underscore to keep the pair together
/// as one drawn word.
fn weighted_text(frequencies: &HashMap<String, u64>) -> String {
    let mut blob = String::new();
    for (token, count) in frequencies {
        let token = token.replace(' ', "_");
        for _ in 0..*count {
            blob.push_str(&token);
            blob.push(' ');
        }
    }
    blob
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_text_repeats_tokens_by_count() {
        let mut frequencies = HashMap::new();
        frequencies.insert("cat".to_string(), 3_u64);
        let blob = weighted_text(&frequencies);
        assert_eq!(blob, "cat cat cat ");
    }

    #[test]
    fn pair_tokens_stay_one_word() {
        let mut frequencies = HashMap::new();
        frequencies.insert("cat sat".to_string(), 2_u64);
        let blob = weighted_text(&frequencies);
        assert_eq!(blob, "cat_sat cat_sat ");
    }

    #[test]
    fn empty_table_is_a_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_cloud(&HashMap::new(), &dir.path().join("cloud.png")).unwrap_err();
        assert!(err.contains("Empty frequency table"));
    }
}
