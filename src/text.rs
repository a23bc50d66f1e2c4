use std::fs;
use std::sync::LazyLock;

use log::info;
use regex::Regex;

use crate::project::{Project, StoryMetadata};

/// Anything that is not whitespace, a word character, or a hyphen.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\s\w\-]").unwrap());
/// Sentence breaks collapsed into a single space.
static BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n.!?]").unwrap());

/// Render width handed to the HTML-to-text conversion. Wrapping only
/// introduces newlines, which the break collapse turns into spaces anyway.
const TEXT_WIDTH: usize = 400;

/// Word-cloud inclusion policy: English stories only, any casing.
pub fn include_in_cloud(metadata: &StoryMetadata) -> bool {
    metadata.language.to_lowercase() == "english"
}

/// Strip one downloaded story down to counting-ready plain text.
///
/// Order matters: entities are decoded first, the markup is converted to
/// plain text, then every non-word character is removed and the remaining
/// sentence breaks become single spaces.
pub fn clean_story_html(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    let plain = html2text::from_read(decoded.as_bytes(), TEXT_WIDTH);
    let stripped = NON_WORD.replace_all(&plain, "");
    BREAKS.replace_all(&stripped, " ").into_owned()
}

/// Read, clean, and join the content of all given stories into one blob,
/// with a single space between stories.
///
/// Any unreadable story file aborts the run.
pub fn combined_text(project: &Project, stories: &[StoryMetadata]) -> Result<String, String> {
    let mut texts = Vec::with_capacity(stories.len());
    for metadata in stories {
        let path = project.story_html_path(metadata);
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Read {} failed: {e}", path.display()))?;
        texts.push(clean_story_html(&raw));
    }
    info!("collected {} texts", texts.len());
    let joined = texts.join(" ");
    info!("total length: {}", joined.len());
    Ok(joined)
}
