//! The progress store.
//!
//! Single source of truth for a learner's score, streak, completed lessons,
//! daily lesson and premium entitlement. The in-memory state is
//! authoritative; every mutation is re-persisted field by field on a
//! best-effort basis.
//!
//! Lock order is `state` then `persist_lock`. A mutation takes the persist
//! lock before releasing the state lock, so writes reach storage in
//! mutation order while readers only wait for the in-memory update.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, LessonRecord};
use crate::core::clock::Clock;
use crate::core::daily::daily_selection;
use crate::core::progress::{keys, level_for_score, ProgressState, DATE_FORMAT};
use crate::core::quiz::{grade, QuizResult};
use crate::core::streak::StreakTransition;
use crate::error::{FailOpen, MicroskillError, Result};
use crate::storage::KeyValueStore;

/// Catalog completion counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Completion {
    /// Catalog lessons marked completed.
    pub completed: usize,
    /// Lessons the learner may open.
    pub accessible: usize,
    pub total: usize,
}

/// Progress store backed by a key-value store.
///
/// The only constructor is [`ProgressStore::initialize`], so every other
/// operation runs against a fully loaded state.
pub struct ProgressStore<S: KeyValueStore, C: Clock> {
    kv: S,
    clock: C,
    catalog: Catalog,
    state: RwLock<ProgressState>,
    persist_lock: Mutex<()>,
    transition: StreakTransition,
}

impl<S: KeyValueStore, C: Clock> ProgressStore<S, C> {
    /// Load persisted progress, roll the streak and pick today's lesson.
    ///
    /// Never fails. A read or parse failure on any key resets the whole
    /// loaded state to defaults and is logged.
    pub fn initialize(kv: S, catalog: Catalog, clock: C) -> Self {
        let loaded = load_state(&kv).fail_open_default("loading progress");

        let today = clock.today();
        let daily_skill_id = daily_selection(&catalog, today).to_string();
        let transition = StreakTransition::between(loaded.last_access_date, today);
        let streak = transition.apply(loaded.streak);

        tracing::debug!(
            %today,
            ?transition,
            streak,
            daily_skill = %daily_skill_id,
            "progress initialized"
        );

        let state = ProgressState {
            streak,
            last_access_date: Some(today),
            daily_skill_id,
            ..loaded
        };

        let store = Self {
            kv,
            clock,
            catalog,
            state: RwLock::new(state),
            persist_lock: Mutex::new(()),
            transition,
        };

        {
            let state = store.read();
            store.persist(keys::LAST_ACCESS, &today.format(DATE_FORMAT).to_string());
            store.persist(keys::STREAK, &state.streak.to_string());
            store.persist(keys::DAILY_SKILL, &state.daily_skill_id);
        }

        store
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add earned points and optionally mark a lesson completed.
    ///
    /// Re-adding an already completed lesson only adds the points.
    /// Returns the state after the update.
    pub fn add_score(&self, points: u32, skill_id: Option<&str>) -> ProgressState {
        let mut state = self.write();
        let newly_completed = state.add_score(points, skill_id);

        tracing::debug!(
            points,
            score = state.score,
            level = state.level(),
            skill = skill_id.unwrap_or(""),
            newly_completed,
            "score added"
        );

        let updated = state.clone();
        let _persisting = self.lock_persist();
        drop(state);

        self.persist(keys::SCORE, &updated.score.to_string());
        self.persist(keys::LEVEL, &updated.level().to_string());
        self.persist_json(keys::COMPLETED, &updated.completed_skills);

        updated
    }

    /// Grant the premium entitlement.
    ///
    /// Idempotent. Returns true if the learner was not premium before.
    pub fn upgrade_to_premium(&self) -> bool {
        let mut state = self.write();
        let upgraded = !state.is_premium;
        state.is_premium = true;

        let _persisting = self.lock_persist();
        drop(state);

        if upgraded {
            tracing::info!("premium unlocked");
        }
        self.persist(keys::IS_PREMIUM, "true");

        upgraded
    }

    /// Grade a quiz for an accessible lesson and award its points.
    ///
    /// Taking the quiz marks the lesson completed regardless of the result.
    pub fn submit_quiz(
        &self,
        skill_id: &str,
        answers: &[usize],
        points_per_correct: u32,
    ) -> Result<QuizResult> {
        let lesson = self.open_lesson(skill_id)?;
        let result = grade(lesson, answers, points_per_correct);
        self.add_score(result.points, Some(&lesson.id));
        Ok(result)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether the learner may open `skill_id`.
    ///
    /// Unknown ids are denied.
    pub fn can_access_premium(&self, skill_id: &str) -> bool {
        match self.catalog.get(skill_id) {
            Some(lesson) => !lesson.is_premium || self.read().is_premium,
            None => false,
        }
    }

    /// Look up a lesson the learner is allowed to open.
    pub fn open_lesson(&self, skill_id: &str) -> Result<&LessonRecord> {
        let lesson = self
            .catalog
            .get(skill_id)
            .ok_or_else(|| MicroskillError::lesson_not_found(skill_id))?;
        if self.can_access_premium(skill_id) {
            Ok(lesson)
        } else {
            Err(MicroskillError::locked(skill_id))
        }
    }

    /// Today's lesson, or the catalog's first lesson if the stored id is unknown.
    pub fn todays_skill(&self) -> &LessonRecord {
        let id = self.read().daily_skill_id.clone();
        self.catalog.get(&id).unwrap_or_else(|| self.catalog.first())
    }

    pub fn score(&self) -> u64 {
        self.read().score
    }

    pub fn level(&self) -> u64 {
        self.read().level()
    }

    pub fn streak(&self) -> u32 {
        self.read().streak
    }

    pub fn completed_skills(&self) -> BTreeSet<String> {
        self.read().completed_skills.clone()
    }

    pub fn is_completed(&self, skill_id: &str) -> bool {
        self.read().is_completed(skill_id)
    }

    pub fn daily_skill_id(&self) -> String {
        self.read().daily_skill_id.clone()
    }

    pub fn last_access_date(&self) -> Option<NaiveDate> {
        self.read().last_access_date
    }

    pub fn is_premium(&self) -> bool {
        self.read().is_premium
    }

    pub fn points_to_next_level(&self) -> u64 {
        self.read().points_to_next_level()
    }

    /// How the streak moved when this store was initialized.
    pub fn streak_transition(&self) -> StreakTransition {
        self.transition
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> ProgressState {
        self.read().clone()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The date according to the store's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Completion counts over the catalog.
    pub fn completion(&self) -> Completion {
        let state = self.read();
        let lessons = self.catalog.lessons();
        Completion {
            completed: lessons.iter().filter(|l| state.is_completed(&l.id)).count(),
            accessible: lessons
                .iter()
                .filter(|l| !l.is_premium || state.is_premium)
                .count(),
            total: lessons.len(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn read(&self) -> RwLockReadGuard<'_, ProgressState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProgressState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_persist(&self) -> MutexGuard<'_, ()> {
        self.persist_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Best-effort write; failures are logged and never surface.
    fn persist(&self, key: &str, value: &str) {
        self.kv
            .set(key, value)
            .fail_open_default(&format!("persisting '{}'", key));
    }

    fn persist_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.persist(key, &json),
            Err(e) => tracing::warn!(key, error = %e, "failed to serialize value, not persisted"),
        }
    }
}

/// Read every persisted progress field.
///
/// Absent keys default individually; a malformed value is an error.
fn load_state<S: KeyValueStore>(kv: &S) -> Result<ProgressState> {
    let score = match kv.get(keys::SCORE)? {
        Some(raw) => parse_number::<u64>(keys::SCORE, &raw)?,
        None => 0,
    };

    let completed_skills = match kv.get(keys::COMPLETED)? {
        Some(raw) => serde_json::from_str::<Vec<String>>(&raw)
            .map_err(|e| MicroskillError::corrupt(keys::COMPLETED, e.to_string()))?
            .into_iter()
            .collect(),
        None => BTreeSet::new(),
    };

    let streak = match kv.get(keys::STREAK)? {
        Some(raw) => parse_number::<u32>(keys::STREAK, &raw)?,
        None => 0,
    };

    let last_access_date = match kv.get(keys::LAST_ACCESS)? {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map_err(|e| MicroskillError::corrupt(keys::LAST_ACCESS, e.to_string()))?,
        ),
        None => None,
    };

    let is_premium = kv.get(keys::IS_PREMIUM)?.as_deref() == Some("true");

    // Level is a cache of score; recompute rather than trust it.
    if let Some(raw) = kv.get(keys::LEVEL)? {
        let expected = level_for_score(score);
        if raw.trim().parse::<u64>().ok() != Some(expected) {
            tracing::debug!(stored = %raw, expected, "stored level out of date, recomputed");
        }
    }

    Ok(ProgressState {
        score,
        completed_skills,
        daily_skill_id: String::new(),
        streak,
        last_access_date,
        is_premium,
    })
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| MicroskillError::corrupt(key, format!("expected an integer, got '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            LessonRecord::new("free-a", "Free A"),
            LessonRecord::new("paid", "Paid").premium(),
            LessonRecord::new("free-b", "Free B"),
        ])
        .unwrap()
    }

    fn open(
        kv: &Arc<MemoryKeyValueStore>,
        today: NaiveDate,
    ) -> ProgressStore<Arc<MemoryKeyValueStore>, FixedClock> {
        ProgressStore::initialize(Arc::clone(kv), catalog(), FixedClock::new(today))
    }

    /// Store whose reads and/or writes always fail.
    struct FailingStore {
        fail_reads: bool,
        inner: MemoryKeyValueStore,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_reads {
                Err(MicroskillError::serde("disk on fire"))
            } else {
                self.inner.get(key)
            }
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(MicroskillError::storage(
                "/readonly",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    // =========================================================================
    // initialize
    // =========================================================================

    #[test]
    fn test_first_run_defaults() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));

        assert_eq!(store.score(), 0);
        assert_eq!(store.level(), 1);
        assert!(store.completed_skills().is_empty());
        assert_eq!(store.streak(), 1);
        assert!(!store.is_premium());
        assert_eq!(store.last_access_date(), Some(date(2024, 1, 1)));
        assert_eq!(store.streak_transition(), StreakTransition::Reset);

        // Free lessons: free-a, free-b; day 1 -> index 1
        assert_eq!(store.daily_skill_id(), "free-b");
    }

    #[test]
    fn test_initialize_persists_access_fields() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let _store = open(&kv, date(2024, 3, 5));

        assert_eq!(kv.get("last_access").unwrap().as_deref(), Some("2024-03-05"));
        assert_eq!(kv.get("streak").unwrap().as_deref(), Some("1"));
        assert!(kv.get("daily_skill").unwrap().is_some());
        // Untouched until a mutation
        assert!(kv.get("score").unwrap().is_none());
        assert!(kv.get("is_premium").unwrap().is_none());
    }

    #[test]
    fn test_streak_same_day_unchanged() {
        let kv = Arc::new(MemoryKeyValueStore::with_entries([
            ("streak", "4"),
            ("last_access", "2024-05-10"),
        ]));
        let store = open(&kv, date(2024, 5, 10));
        assert_eq!(store.streak(), 4);
        assert_eq!(store.streak_transition(), StreakTransition::SameDay);
    }

    #[test]
    fn test_streak_yesterday_increments() {
        let kv = Arc::new(MemoryKeyValueStore::with_entries([
            ("streak", "4"),
            ("last_access", "2024-05-09"),
        ]));
        let store = open(&kv, date(2024, 5, 10));
        assert_eq!(store.streak(), 5);
        assert_eq!(kv.get("streak").unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn test_streak_gap_resets() {
        let kv = Arc::new(MemoryKeyValueStore::with_entries([
            ("streak", "4"),
            ("last_access", "2024-05-07"),
        ]));
        let store = open(&kv, date(2024, 5, 10));
        assert_eq!(store.streak(), 1);
    }

    #[test]
    fn test_streak_over_consecutive_days() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let clock = Arc::new(FixedClock::new(date(2024, 12, 30)));

        for expected in 1..=4 {
            let store =
                ProgressStore::initialize(Arc::clone(&kv), catalog(), Arc::clone(&clock));
            assert_eq!(store.streak(), expected);
            // Restart within the same day
            let again =
                ProgressStore::initialize(Arc::clone(&kv), catalog(), Arc::clone(&clock));
            assert_eq!(again.streak(), expected);
            clock.advance_days(1);
        }
    }

    #[test]
    fn test_corrupt_completed_resets_everything() {
        let kv = Arc::new(MemoryKeyValueStore::with_entries([
            ("score", "55"),
            ("completed", "{not json"),
            ("streak", "9"),
            ("last_access", "2024-05-09"),
            ("is_premium", "true"),
        ]));
        let store = open(&kv, date(2024, 5, 10));

        assert_eq!(store.score(), 0);
        assert!(store.completed_skills().is_empty());
        assert!(!store.is_premium());
        assert_eq!(store.streak(), 1);
        assert!(!store.daily_skill_id().is_empty());
    }

    #[test]
    fn test_corrupt_score_resets_everything() {
        let kv = Arc::new(MemoryKeyValueStore::with_entries([
            ("score", "lots"),
            ("is_premium", "true"),
        ]));
        let store = open(&kv, date(2024, 5, 10));
        assert_eq!(store.score(), 0);
        assert!(!store.is_premium());
    }

    #[test]
    fn test_corrupt_date_resets_everything() {
        let kv = Arc::new(MemoryKeyValueStore::with_entries([
            ("score", "30"),
            ("last_access", "yesterday"),
        ]));
        let store = open(&kv, date(2024, 5, 10));
        assert_eq!(store.score(), 0);
        assert_eq!(store.streak(), 1);
    }

    #[test]
    fn test_stale_level_is_recomputed() {
        let kv = Arc::new(MemoryKeyValueStore::with_entries([
            ("score", "45"),
            ("level", "1"),
        ]));
        let store = open(&kv, date(2024, 5, 10));
        assert_eq!(store.level(), 3);
    }

    #[test]
    fn test_read_failure_falls_back_to_defaults() {
        let kv = FailingStore {
            fail_reads: true,
            inner: MemoryKeyValueStore::new(),
        };
        let store = ProgressStore::initialize(kv, catalog(), FixedClock::new(date(2024, 1, 2)));

        assert_eq!(store.score(), 0);
        assert_eq!(store.streak(), 1);
        assert_eq!(store.daily_skill_id(), "free-a"); // 2 % 2
    }

    // =========================================================================
    // add_score
    // =========================================================================

    #[test]
    fn test_add_score_same_skill_twice() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));

        store.add_score(10, Some("a"));
        let state = store.add_score(10, Some("a"));

        assert_eq!(state.score, 20);
        assert_eq!(store.score(), 20);
        assert_eq!(store.level(), 2);
        assert_eq!(store.completed_skills().len(), 1);
        assert!(store.is_completed("a"));
    }

    #[test]
    fn test_add_score_persists_fields() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));

        store.add_score(25, Some("free-b"));
        store.add_score(20, Some("free-a"));

        assert_eq!(kv.get("score").unwrap().as_deref(), Some("45"));
        assert_eq!(kv.get("level").unwrap().as_deref(), Some("3"));
        let completed: Vec<String> =
            serde_json::from_str(&kv.get("completed").unwrap().unwrap()).unwrap();
        assert_eq!(completed, vec!["free-a", "free-b"]);
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let kv = FailingStore {
            fail_reads: false,
            inner: MemoryKeyValueStore::new(),
        };
        let store = ProgressStore::initialize(kv, catalog(), FixedClock::new(date(2024, 1, 1)));

        store.add_score(30, Some("free-a"));
        store.upgrade_to_premium();

        assert_eq!(store.score(), 30);
        assert_eq!(store.level(), 2);
        assert!(store.is_premium());
        assert!(store.can_access_premium("paid"));
    }

    #[test]
    fn test_concurrent_add_score_no_lost_updates() {
        use std::thread;

        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = Arc::new(open(&kv, date(2024, 1, 1)));
        let mut handles = vec![];

        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..25 {
                    store.add_score(1, Some(&format!("skill-{}", i)));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.score(), 200);
        assert_eq!(store.completed_skills().len(), 8);
        assert_eq!(kv.get("score").unwrap().as_deref(), Some("200"));
    }

    /// Store whose writes stall once `delay_ms` is set.
    #[derive(Default)]
    struct SlowStore {
        inner: MemoryKeyValueStore,
        delay_ms: AtomicU64,
        writing: AtomicBool,
    }

    impl KeyValueStore for SlowStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            let delay = self.delay_ms.load(Ordering::SeqCst);
            if delay > 0 {
                self.writing.store(true, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(delay));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    fn wait_for_write(kv: &SlowStore) {
        while !kv.writing.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_readers_not_blocked_by_slow_writes() {
        let kv = Arc::new(SlowStore::default());
        let store = Arc::new(ProgressStore::initialize(
            Arc::clone(&kv),
            catalog(),
            FixedClock::new(date(2024, 1, 1)),
        ));
        kv.delay_ms.store(200, Ordering::SeqCst);

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.add_score(10, Some("free-a")))
        };
        wait_for_write(&kv);

        let started = Instant::now();
        let score = store.score();
        let waited = started.elapsed();

        assert_eq!(score, 10);
        assert!(store.is_completed("free-a"));
        assert!(waited < Duration::from_millis(50), "reader waited {:?}", waited);

        writer.join().unwrap();
        assert_eq!(kv.get("score").unwrap().as_deref(), Some("10"));
    }

    #[test]
    fn test_slow_writes_keep_mutation_order() {
        let kv = Arc::new(SlowStore::default());
        let store = Arc::new(ProgressStore::initialize(
            Arc::clone(&kv),
            catalog(),
            FixedClock::new(date(2024, 1, 1)),
        ));
        kv.delay_ms.store(20, Ordering::SeqCst);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.add_score(5, None))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.score(), 20);
        assert_eq!(kv.get("score").unwrap().as_deref(), Some("20"));
        assert_eq!(kv.get("level").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_premium_visible_during_slow_write() {
        let kv = Arc::new(SlowStore::default());
        let store = Arc::new(ProgressStore::initialize(
            Arc::clone(&kv),
            catalog(),
            FixedClock::new(date(2024, 1, 1)),
        ));
        kv.delay_ms.store(200, Ordering::SeqCst);

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.upgrade_to_premium())
        };
        wait_for_write(&kv);

        let started = Instant::now();
        assert!(store.can_access_premium("paid"));
        assert!(started.elapsed() < Duration::from_millis(50));

        assert!(writer.join().unwrap());
    }

    // =========================================================================
    // premium
    // =========================================================================

    #[test]
    fn test_upgrade_is_idempotent() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));

        assert!(store.upgrade_to_premium());
        assert!(!store.upgrade_to_premium());
        assert!(store.is_premium());
        assert_eq!(kv.get("is_premium").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_can_access_premium_table() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));

        assert!(store.can_access_premium("free-a"));
        assert!(!store.can_access_premium("paid"));
        assert!(!store.can_access_premium("missing"));

        store.upgrade_to_premium();

        assert!(store.can_access_premium("free-a"));
        assert!(store.can_access_premium("paid"));
        assert!(!store.can_access_premium("missing"));
    }

    #[test]
    fn test_open_lesson_errors() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));

        assert!(matches!(
            store.open_lesson("missing"),
            Err(MicroskillError::LessonNotFound { .. })
        ));
        assert!(matches!(
            store.open_lesson("paid"),
            Err(MicroskillError::Locked { .. })
        ));
        assert_eq!(store.open_lesson("free-a").unwrap().title, "Free A");
    }

    #[test]
    fn test_completion_counts() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));

        store.add_score(10, Some("free-a"));
        store.add_score(10, Some("retired-lesson"));

        assert_eq!(
            store.completion(),
            Completion {
                completed: 1,
                accessible: 2,
                total: 3
            }
        );

        store.upgrade_to_premium();
        assert_eq!(store.completion().accessible, 3);
    }

    // =========================================================================
    // today's skill
    // =========================================================================

    #[test]
    fn test_todays_skill_resolves_id() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));
        assert_eq!(store.todays_skill().id, store.daily_skill_id());
    }

    #[test]
    fn test_todays_skill_unknown_id_falls_back_to_first() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));
        store.write().daily_skill_id = "removed-in-update".to_string();
        assert_eq!(store.todays_skill().id, "free-a");
    }

    #[test]
    fn test_daily_skill_changes_with_date() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let day1 = open(&kv, date(2024, 1, 1)).daily_skill_id();
        let day1_again = open(&kv, date(2024, 1, 1)).daily_skill_id();
        let day2 = open(&kv, date(2024, 1, 2)).daily_skill_id();

        assert_eq!(day1, day1_again);
        assert_ne!(day1, day2);
    }

    // =========================================================================
    // quiz
    // =========================================================================

    #[test]
    fn test_submit_quiz_awards_points() {
        use crate::catalog::QuizQuestion;

        let catalog = Catalog::new(vec![LessonRecord::new("q", "Quiz")
            .with_question(QuizQuestion::new("1?", ["a", "b"], 1))
            .with_question(QuizQuestion::new("2?", ["a", "b"], 0))])
        .unwrap();
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store =
            ProgressStore::initialize(Arc::clone(&kv), catalog, FixedClock::new(date(2024, 1, 1)));

        let result = store.submit_quiz("q", &[1, 1], 10).unwrap();
        assert_eq!(result.correct, 1);
        assert_eq!(store.score(), 10);
        assert!(store.is_completed("q"));
    }

    #[test]
    fn test_submit_quiz_locked() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = open(&kv, date(2024, 1, 1));

        assert!(store.submit_quiz("paid", &[0], 10).is_err());
        assert_eq!(store.score(), 0);
        assert!(!store.is_completed("paid"));
    }

    // =========================================================================
    // persistence round trip
    // =========================================================================

    #[test]
    fn test_round_trip_same_day() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let today = date(2024, 7, 4);

        let before = {
            let store = open(&kv, today);
            store.add_score(35, Some("free-a"));
            store.add_score(10, Some("free-b"));
            store.upgrade_to_premium();
            store.snapshot()
        };

        let after = open(&kv, today).snapshot();
        assert_eq!(after, before);
        assert_eq!(after.level(), 3);
    }

    #[test]
    fn test_round_trip_through_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let today = date(2024, 7, 4);

        {
            let kv = FileKeyValueStore::with_dir(dir.path()).unwrap();
            let store = ProgressStore::initialize(kv, catalog(), FixedClock::new(today));
            store.add_score(20, Some("free-b"));
            store.upgrade_to_premium();
        }

        let kv = FileKeyValueStore::with_dir(dir.path()).unwrap();
        let clock = FixedClock::new(today);
        clock.advance_days(1);
        let store = ProgressStore::initialize(kv, catalog(), clock);

        assert_eq!(store.score(), 20);
        assert_eq!(store.level(), 2);
        assert!(store.is_completed("free-b"));
        assert!(store.is_premium());
        assert_eq!(store.streak(), 2);
    }
}
