use std::sync::LazyLock;

use euterpe_types::ChartEntry;
use regex::Regex;

static COLLAB_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+(?:featuring|feat\.?|ft\.?|with)\s+|\s+and\s+|\s+&\s+|\s+vs\.?\s+|\s+\+\s+|\s+/\s+|,\s+",
    )
    .expect("collaboration pattern is valid")
});

static ASIDES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\(\[].*?[\)\]]").expect("aside pattern is valid"));

/// Reduce a credit like `"Bad Bunny feat. Drake"` to its primary artist.
///
/// Everything after the first collaboration delimiter is dropped. If no
/// non-empty segment remains the cleaned credit is returned as is.
pub fn primary_artist(credit: &str) -> String {
    let credit = credit
        .trim()
        .replace('’', "'")
        .replace(['–', '—'], "-")
        .replace('×', " × ");
    let credit = ASIDES.replace_all(&credit, "");
    let credit = credit.trim();

    COLLAB_SPLIT
        .split(credit)
        .map(str::trim)
        .find(|part| !part.is_empty())
        .unwrap_or(credit)
        .to_string()
}

/// Overwrite every entry's artist with its primary artist
pub fn normalize_entries(entries: Vec<ChartEntry>) -> Vec<ChartEntry> {
    entries
        .into_iter()
        .map(|mut entry| {
            entry.artist = entry.artist.as_deref().map(primary_artist);
            entry
        })
        .collect()
}
