//! Spaced repetition scheduler.
//!
//! Holds every term's [`ReviewState`] in memory for the session and writes
//! the whole snapshot through to its [`ReviewStore`] after each recorded
//! outcome. The scheduler never reads the system clock; callers pass `today`.

use crate::algorithm::SchedulingAlgorithm;
use crate::error::{Result, SchedulerError};
use crate::experience::{Experience, ExperienceRules};
use crate::store::ReviewStore;
use crate::types::{ProgressSnapshot, ProgressSummary, ReviewMap, ReviewState, VocabularyItem};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Review scheduler bound to a store and an algorithm.
pub struct Scheduler {
    store: Box<dyn ReviewStore>,
    algorithm: Box<dyn SchedulingAlgorithm>,
    rules: ExperienceRules,
    snapshot: ProgressSnapshot,
    dirty: bool,
}

impl Scheduler {
    /// Load persisted progress and build a scheduler over it.
    pub fn open(
        store: Box<dyn ReviewStore>,
        algorithm: Box<dyn SchedulingAlgorithm>,
        rules: ExperienceRules,
    ) -> Self {
        let snapshot = store.load();
        Self {
            store,
            algorithm,
            rules,
            snapshot,
            dirty: false,
        }
    }

    pub fn algorithm(&self) -> &dyn SchedulingAlgorithm {
        self.algorithm.as_ref()
    }

    pub fn rules(&self) -> ExperienceRules {
        self.rules
    }

    pub fn state(&self, term: &str) -> Option<&ReviewState> {
        self.snapshot.items.get(term)
    }

    pub fn states(&self) -> &ReviewMap {
        &self.snapshot.items
    }

    /// True when an outcome is held in memory but not yet persisted.
    pub fn has_pending_write(&self) -> bool {
        self.dirty
    }

    /// Terms due on `today`. Mission items are never due.
    pub fn due_items<'a>(
        &self,
        items: impl IntoIterator<Item = &'a VocabularyItem>,
        today: NaiveDate,
    ) -> BTreeSet<String> {
        items
            .into_iter()
            .filter(|item| self.is_due(item, today))
            .map(|item| item.term.clone())
            .collect()
    }

    /// Due items ordered by due date, then term.
    pub fn due_queue<'a>(
        &self,
        items: impl IntoIterator<Item = &'a VocabularyItem>,
        today: NaiveDate,
    ) -> Vec<&'a VocabularyItem> {
        let mut due: Vec<(NaiveDate, &'a VocabularyItem)> = items
            .into_iter()
            .filter(|item| self.is_due(item, today))
            .map(|item| (self.due_date(&item.term), item))
            .collect();
        due.sort_by(|(a_date, a), (b_date, b)| a_date.cmp(b_date).then_with(|| a.term.cmp(&b.term)));
        due.into_iter().map(|(_, item)| item).collect()
    }

    /// Apply a review outcome and persist it.
    ///
    /// Returns the number of days until the term is due again. When the
    /// write fails the new state stays in memory, and [`Scheduler::flush`]
    /// can retry it.
    pub fn record_outcome(&mut self, term: &str, succeeded: bool, today: NaiveDate) -> Result<u32> {
        let result = self
            .algorithm
            .schedule(self.snapshot.items.get(term), succeeded, today);

        tracing::debug!(
            term,
            succeeded,
            rung = result.new_state.rung,
            next_due = %result.new_state.next_due_date,
            "recorded review outcome"
        );

        self.snapshot.items.insert(term.to_string(), result.new_state);
        self.snapshot.experience = self
            .snapshot
            .experience
            .saturating_add(self.rules.award(succeeded));
        self.dirty = true;

        self.flush()?;
        Ok(result.interval_days)
    }

    /// Write the current snapshot if an earlier write failed.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        match self.store.save(&self.snapshot) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to persist review progress");
                Err(SchedulerError::Persist(e))
            }
        }
    }

    pub fn is_mastered(&self, term: &str) -> bool {
        self.state(term)
            .is_some_and(|state| self.algorithm.is_mastered(state))
    }

    /// Started and mastered counts over a subset of items.
    pub fn progress<'a>(&self, items: impl IntoIterator<Item = &'a VocabularyItem>) -> ProgressSummary {
        let mut summary = ProgressSummary::default();
        for item in items.into_iter().filter(|item| !item.is_mission()) {
            self.tally(&mut summary, item);
        }
        summary
    }

    pub fn progress_by_category<'a>(
        &self,
        items: impl IntoIterator<Item = &'a VocabularyItem>,
    ) -> BTreeMap<String, ProgressSummary> {
        self.progress_grouped(items, |item| &item.category)
    }

    pub fn progress_by_level<'a>(
        &self,
        items: impl IntoIterator<Item = &'a VocabularyItem>,
    ) -> BTreeMap<String, ProgressSummary> {
        self.progress_grouped(items, |item| &item.level)
    }

    pub fn experience(&self) -> Experience {
        self.rules.experience(self.snapshot.experience)
    }

    fn progress_grouped<'a>(
        &self,
        items: impl IntoIterator<Item = &'a VocabularyItem>,
        key: impl Fn(&VocabularyItem) -> &String,
    ) -> BTreeMap<String, ProgressSummary> {
        let mut groups: BTreeMap<String, ProgressSummary> = BTreeMap::new();
        for item in items.into_iter().filter(|item| !item.is_mission()) {
            let summary = groups.entry(key(item).clone()).or_default();
            self.tally(summary, item);
        }
        groups
    }

    fn tally(&self, summary: &mut ProgressSummary, item: &VocabularyItem) {
        summary.total += 1;
        if let Some(state) = self.state(&item.term) {
            if state.rung > 0 {
                summary.started += 1;
            }
            if self.algorithm.is_mastered(state) {
                summary.mastered += 1;
            }
        }
    }

    fn is_due(&self, item: &VocabularyItem, today: NaiveDate) -> bool {
        !item.is_mission() && self.due_date(&item.term) <= today
    }

    fn due_date(&self, term: &str) -> NaiveDate {
        self.state(term)
            .map_or_else(ReviewState::never_reviewed_due_date, |s| s.next_due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{IntervalLadder, LadderScheduler};
    use crate::store::MemoryStore;
    use crate::types::FailurePolicy;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(n)
    }

    fn scheduler_with(store: Arc<MemoryStore>, ladder: &[u32]) -> Scheduler {
        let algorithm = LadderScheduler::new(IntervalLadder::new(ladder.to_vec()).unwrap(), FailurePolicy::Reset);
        Scheduler::open(Box::new(store), Box::new(algorithm), ExperienceRules::default())
    }

    fn item(term: &str) -> VocabularyItem {
        VocabularyItem::new(term, "-", "-")
    }

    fn state(rung: usize, due: NaiveDate) -> ReviewState {
        ReviewState {
            rung,
            next_due_date: due,
            last_reviewed_date: None,
        }
    }

    #[test]
    fn cat_scenario_climbs_then_resets() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = scheduler_with(store.clone(), &[1, 3, 7]);

        assert_eq!(scheduler.record_outcome("cat", true, day(0)).unwrap(), 3);
        assert_eq!(scheduler.state("cat").unwrap().rung, 1);
        assert_eq!(scheduler.state("cat").unwrap().next_due_date, day(3));

        assert_eq!(scheduler.record_outcome("cat", true, day(3)).unwrap(), 7);
        assert_eq!(scheduler.state("cat").unwrap().rung, 2);
        assert_eq!(scheduler.state("cat").unwrap().next_due_date, day(10));

        assert_eq!(scheduler.record_outcome("cat", false, day(10)).unwrap(), 0);
        assert_eq!(
            scheduler.state("cat").unwrap(),
            &ReviewState {
                rung: 0,
                next_due_date: day(10),
                last_reviewed_date: Some(day(10)),
            }
        );

        assert_eq!(store.saved().items, scheduler.states().clone());
    }

    #[test]
    fn due_set_uses_inclusive_date() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot.items.insert("dog".to_string(), state(1, day(5)));
        snapshot.items.insert("cat".to_string(), state(1, day(10)));
        let scheduler = scheduler_with(Arc::new(MemoryStore::with_snapshot(snapshot)), &[1, 3, 7]);
        let items = vec![item("dog"), item("cat")];

        let due = scheduler.due_items(&items, day(7));
        assert_eq!(due, BTreeSet::from(["dog".to_string()]));

        assert!(scheduler.due_items(&items, day(4)).is_empty());
        assert_eq!(scheduler.due_items(&items, day(10)).len(), 2);
    }

    #[test]
    fn unreviewed_items_are_always_due() {
        let scheduler = scheduler_with(Arc::new(MemoryStore::new()), &[1, 3, 7]);
        let items = vec![item("owl")];
        assert!(scheduler.due_items(&items, day(-10_000)).contains("owl"));
    }

    #[test]
    fn item_due_tomorrow_is_not_due() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot.items.insert("owl".to_string(), state(1, day(1)));
        let scheduler = scheduler_with(Arc::new(MemoryStore::with_snapshot(snapshot)), &[1, 3, 7]);
        assert!(scheduler.due_items(&[item("owl")], day(0)).is_empty());
        assert!(scheduler.due_items(&[item("owl")], day(1)).contains("owl"));
    }

    #[test]
    fn missions_are_never_due() {
        let scheduler = scheduler_with(Arc::new(MemoryStore::new()), &[1, 3, 7]);
        let items = vec![
            item("Order a coffee").with_category("Mission"),
            item("Ask for directions").with_category("quest"),
            item("cat"),
        ];
        assert_eq!(
            scheduler.due_items(&items, day(0)),
            BTreeSet::from(["cat".to_string()])
        );
    }

    #[test]
    fn empty_vocabulary_has_nothing_due() {
        let scheduler = scheduler_with(Arc::new(MemoryStore::new()), &[1, 3, 7]);
        let items: Vec<VocabularyItem> = Vec::new();
        assert!(scheduler.due_items(&items, day(0)).is_empty());
    }

    #[test]
    fn due_queue_orders_by_date_then_term() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot.items.insert("bee".to_string(), state(1, day(2)));
        snapshot.items.insert("ant".to_string(), state(1, day(3)));
        let scheduler = scheduler_with(Arc::new(MemoryStore::with_snapshot(snapshot)), &[1, 3, 7]);
        let items = vec![item("ant"), item("bee"), item("zebra"), item("cow")];

        let queue: Vec<_> = scheduler
            .due_queue(&items, day(5))
            .into_iter()
            .map(|i| i.term.as_str())
            .collect();
        assert_eq!(queue, vec!["cow", "zebra", "bee", "ant"]);
    }

    #[test]
    fn repeated_success_saturates() {
        let mut scheduler = scheduler_with(Arc::new(MemoryStore::new()), &[1, 3, 7]);
        for n in 0..6 {
            scheduler.record_outcome("cat", true, day(n * 10)).unwrap();
        }
        assert_eq!(scheduler.state("cat").unwrap().rung, 2);
        assert!(scheduler.is_mastered("cat"));
        assert_eq!(scheduler.record_outcome("cat", true, day(100)).unwrap(), 7);
        assert_eq!(scheduler.state("cat").unwrap().rung, 2);
    }

    #[test]
    fn failed_write_is_surfaced_and_retried() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = scheduler_with(store.clone(), &[1, 3, 7]);
        store.set_failing(true);

        let err = scheduler.record_outcome("cat", true, day(0)).unwrap_err();
        assert!(matches!(err, SchedulerError::Persist(_)));
        assert_eq!(scheduler.state("cat").unwrap().rung, 1);
        assert!(scheduler.has_pending_write());
        assert!(store.saved().items.is_empty());

        store.set_failing(false);
        scheduler.flush().unwrap();
        assert!(!scheduler.has_pending_write());
        assert_eq!(store.saved().items.get("cat").unwrap().rung, 1);
    }

    #[test]
    fn reopening_restores_state() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = scheduler_with(store.clone(), &[1, 3, 7]);
        scheduler.record_outcome("cat", true, day(0)).unwrap();
        scheduler.record_outcome("dog", false, day(0)).unwrap();

        let reopened = scheduler_with(store, &[1, 3, 7]);
        assert_eq!(reopened.states(), scheduler.states());
        assert_eq!(reopened.experience(), scheduler.experience());
    }

    #[test]
    fn experience_accumulates_per_outcome() {
        let mut scheduler = scheduler_with(Arc::new(MemoryStore::new()), &[1, 3, 7]);
        for n in 0..10 {
            scheduler.record_outcome(&format!("w{n}"), true, day(0)).unwrap();
        }
        scheduler.record_outcome("w0", false, day(1)).unwrap();
        let xp = scheduler.experience();
        assert_eq!(xp.total, 102);
        assert_eq!(xp.level, 2);
    }

    #[test]
    fn progress_counts_started_and_mastered() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot.items.insert("cat".to_string(), state(2, day(10)));
        snapshot.items.insert("dog".to_string(), state(1, day(10)));
        snapshot.items.insert("owl".to_string(), state(0, day(0)));
        let scheduler = scheduler_with(Arc::new(MemoryStore::with_snapshot(snapshot)), &[1, 3, 7]);
        let items = vec![
            item("cat").with_category("Animals"),
            item("dog").with_category("Animals"),
            item("owl").with_category("Birds"),
            item("bee"),
            item("Order a coffee").with_category("Mission"),
        ];

        assert_eq!(
            scheduler.progress(&items),
            ProgressSummary {
                total: 4,
                started: 2,
                mastered: 1,
            }
        );

        let by_category = scheduler.progress_by_category(&items);
        assert_eq!(
            by_category.get("Animals"),
            Some(&ProgressSummary {
                total: 2,
                started: 2,
                mastered: 1,
            })
        );
        assert_eq!(by_category.get("Birds").unwrap().started, 0);
        assert!(!by_category.contains_key("Mission"));
    }
}
