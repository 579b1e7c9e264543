use config_engine::HistoryConfig;
use parking_lot::RwLock;
use std::collections::VecDeque;
use triage_engine::EncounterSummary;
use uuid::Uuid;

/// Append-only log of assessed encounters.
///
/// Entries are never edited. Once `capacity` is reached the oldest entry is
/// dropped to make room.
#[derive(Debug)]
pub struct EncounterHistory {
    entries: RwLock<VecDeque<EncounterSummary>>,
    capacity: usize,
}

impl EncounterHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.capacity)
    }

    pub fn append(&self, summary: EncounterSummary) {
        let mut entries = self.entries.write();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(summary);
    }

    /// Up to `n` newest entries, newest first
    pub fn recent(&self, n: usize) -> Vec<EncounterSummary> {
        self.entries.read().iter().rev().take(n).cloned().collect()
    }

    pub fn latest(&self) -> Option<EncounterSummary> {
        self.entries.read().back().cloned()
    }

    /// Every assessment recorded for one encounter, oldest first
    pub fn for_encounter(&self, encounter_id: Uuid) -> Vec<EncounterSummary> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.encounter_id == encounter_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;
    use std::thread;
    use triage_engine::{Priority, Score};

    fn summary(name: &str) -> EncounterSummary {
        EncounterSummary {
            encounter_id: Uuid::new_v4(),
            name: name.to_string(),
            masked_health_id: "…0000".to_string(),
            priority: Priority::Green,
            score: Score::new(0),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_recent_is_newest_first() {
        let history = EncounterHistory::new(10);
        for name in ["a", "b", "c"] {
            history.append(summary(name));
        }
        let names: Vec<String> = history.recent(2).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["c", "b"]);
        assert_eq!(history.recent(10).len(), 3);
        assert_eq!(history.latest().map(|e| e.name), Some("c".to_string()));
        assert!(EncounterHistory::new(3).latest().is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let history = EncounterHistory::new(2);
        for name in ["a", "b", "c"] {
            history.append(summary(name));
        }
        assert_eq!(history.len(), 2);
        let names: Vec<String> = history.recent(5).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["c", "b"]);
    }

    #[test]
    fn test_lookup_by_encounter() {
        let history = EncounterHistory::new(10);
        let first = summary("a");
        let id = first.encounter_id;
        history.append(first.clone());
        history.append(summary("b"));
        history.append(EncounterSummary { priority: Priority::Red, ..first });

        let entries = history.for_encounter(id);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].priority, Priority::Red);
    }

    #[test]
    fn test_concurrent_appends_are_all_kept() {
        let history = Arc::new(EncounterHistory::new(1000));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let history = Arc::clone(&history);
                thread::spawn(move || {
                    for i in 0..50 {
                        history.append(summary(&format!("{t}-{i}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(history.len(), 400);
    }
}
