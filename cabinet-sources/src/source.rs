//! The contract every source scanner implements.

use std::collections::HashSet;

use cabinet_core::GameEntry;

/// One external game source.
///
/// Implementations must not panic or return errors from detection:
/// per-item parse failures are logged and skipped, and an absent source
/// is reported through [`is_available`](GameSource::is_available) rather
/// than an error.
pub trait GameSource {
    /// Short stable name used in logs and scan summaries.
    fn source_name(&self) -> &'static str;

    /// Whether the external source looks installed/configured on this
    /// machine.
    fn is_available(&self) -> bool;

    /// Scan the source and return every entry it currently has
    /// installed. Partial corruption of individual records never aborts
    /// the batch.
    fn detect_installed(&self) -> Vec<GameEntry>;
}

/// Per-source result counts, for scan-completion reporting.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub source: &'static str,
    pub available: bool,
    pub entries: usize,
}

/// Run every source in turn and collect the combined candidate list.
///
/// Sources are independent; the order of the combined list follows the
/// order of `sources`. Ids are already unique per source pass, and
/// cross-source ids cannot collide (distinct prefixes), so no further
/// deduplication happens here.
pub fn scan_all<'a>(
    sources: impl IntoIterator<Item = &'a dyn GameSource>,
) -> (Vec<GameEntry>, Vec<ScanSummary>) {
    let mut entries = Vec::new();
    let mut summaries = Vec::new();

    for source in sources {
        let available = source.is_available();
        let found = if available {
            source.detect_installed()
        } else {
            log::debug!("source {} not available, skipping", source.source_name());
            Vec::new()
        };
        summaries.push(ScanSummary {
            source: source.source_name(),
            available,
            entries: found.len(),
        });
        entries.extend(found);
    }

    (entries, summaries)
}

/// Collapse duplicate ids within one scanner pass, keeping the first
/// occurrence. Registry mirrors and overlapping library folders both
/// funnel through this.
pub fn dedup_first_wins(entries: Vec<GameEntry>) -> Vec<GameEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut a = GameEntry::new("gog_1", "First");
        a.platform = "GOG".to_string();
        let b = GameEntry::new("gog_1", "Second");
        let c = GameEntry::new("gog_2", "Third");

        let deduped = dedup_first_wins(vec![a, b, c]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "First");
        assert_eq!(deduped[1].id, "gog_2");
    }
}
