//! The roast widget's state machine.
//!
//! One implicit state, four user actions. Every action that changes state
//! writes favorites and statistics back through [`Persistence`] and then
//! notifies the registered observers so the view can re-render.

use rand::{Rng, rngs::StdRng};
use tracing::{debug, instrument, trace, warn};

use crate::chart::{ChartSlice, to_chart_slices};
use crate::favorites::Favorites;
use crate::phrase::{Phrase, PhraseGenerator};
use crate::stats::Statistics;
use crate::storage::{KeyValueStore, Persistence};
use crate::{BATCH_READY, BATCH_SIZE, PLACEHOLDER};

/// User-triggered commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Generate,
    RapidFire,
    SaveFavorite,
    ResetStreak,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Generate,
        Action::RapidFire,
        Action::SaveFavorite,
        Action::ResetStreak,
    ];
}

/// What an action did. `Ignored` is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Ignored,
}

/// Read-only snapshot handed to observers.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    pub display_text: &'a str,
    pub batch: &'a [Phrase],
    pub favorites: &'a Favorites,
    pub stats: Statistics,
}

impl View<'_> {
    pub fn chart_slices(&self) -> [ChartSlice; 2] {
        to_chart_slices(&self.stats)
    }
}

type Observer = Box<dyn FnMut(&View<'_>)>;

pub struct Roaster<S, R = StdRng> {
    generator: PhraseGenerator<R>,
    persistence: Persistence<S>,
    display_text: String,
    batch: Vec<Phrase>,
    favorites: Favorites,
    stats: Statistics,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> Roaster<S, StdRng> {
    /// Hydrates from `persistence` with an entropy-seeded generator.
    pub fn mount(persistence: Persistence<S>) -> Self {
        Self::with_generator(persistence, PhraseGenerator::new())
    }
}

impl<S: KeyValueStore, R: Rng> Roaster<S, R> {
    pub fn with_generator(persistence: Persistence<S>, generator: PhraseGenerator<R>) -> Self {
        let (favorites, stats) = persistence.hydrate();
        debug!(favorites = favorites.len(), generated = stats.generated, "roaster mounted");
        Self {
            generator,
            persistence,
            display_text: PLACEHOLDER.to_owned(),
            batch: Vec::new(),
            favorites,
            stats,
            observers: Vec::new(),
        }
    }

    /// Registers a callback run after every state change.
    pub fn subscribe(&mut self, observer: impl FnMut(&View<'_>) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn batch(&self) -> &[Phrase] {
        &self.batch
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn stats(&self) -> Statistics {
        self.stats
    }

    pub fn chart_slices(&self) -> [ChartSlice; 2] {
        to_chart_slices(&self.stats)
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn view(&self) -> View<'_> {
        View {
            display_text: &self.display_text,
            batch: &self.batch,
            favorites: &self.favorites,
            stats: self.stats,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::Generate => self.generate(),
            Action::RapidFire => self.rapid_fire(),
            Action::SaveFavorite => self.save_favorite(),
            Action::ResetStreak => self.reset_streak(),
        }
    }

    #[instrument(skip(self))]
    pub fn generate(&mut self) -> Outcome {
        self.display_text = self.generator.generate_one().into_string();
        self.batch.clear();
        self.stats.record_generated(1);
        self.commit()
    }

    #[instrument(skip(self))]
    pub fn rapid_fire(&mut self) -> Outcome {
        self.batch = self.generator.generate_batch(BATCH_SIZE);
        self.display_text = BATCH_READY.to_owned();
        self.stats.record_generated(BATCH_SIZE as u64);
        self.commit()
    }

    #[instrument(skip(self))]
    pub fn save_favorite(&mut self) -> Outcome {
        if !self.favorites.insert(&self.display_text) {
            trace!(text = %self.display_text, "save ignored");
            return Outcome::Ignored;
        }
        self.stats.record_saved();
        self.commit()
    }

    #[instrument(skip(self))]
    pub fn reset_streak(&mut self) -> Outcome {
        self.stats.reset_streak();
        self.commit()
    }

    fn commit(&mut self) -> Outcome {
        debug!(stats = ?self.stats, favorites = self.favorites.len(), "state changed");
        if let Err(err) = self.persistence.persist(&self.favorites, &self.stats) {
            warn!(error = %err, "failed to persist roast state");
        }
        self.notify();
        Outcome::Changed
    }

    fn notify(&mut self) {
        let Self {
            observers,
            display_text,
            batch,
            favorites,
            stats,
            ..
        } = self;
        let view = View {
            display_text: display_text.as_str(),
            batch: batch.as_slice(),
            favorites: &*favorites,
            stats: *stats,
        };
        for observer in observers.iter_mut() {
            observer(&view);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use tracing_test::traced_test;

    use super::*;
    use crate::error::{Error, Result};
    use crate::phrase::WordList;
    use crate::storage::{FAVORITES_KEY, MemoryStore, STATS_KEY};

    fn roaster(seed: u64) -> Roaster<MemoryStore> {
        Roaster::with_generator(Persistence::new(MemoryStore::new()), PhraseGenerator::seeded(seed))
    }

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn load(&self, _key: &str) -> Option<String> {
            None
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Js("QuotaExceededError".to_owned()))
        }
    }

    #[test]
    fn fresh_start() {
        let roaster = roaster(1);
        assert_eq!(roaster.display_text(), PLACEHOLDER);
        assert!(roaster.batch().is_empty());
        assert!(roaster.favorites().is_empty());
        assert_eq!(roaster.stats(), Statistics::default());
    }

    #[test]
    fn generate_once() {
        let mut roaster = roaster(2);
        assert_eq!(roaster.generate(), Outcome::Changed);
        assert_eq!(
            roaster.stats(),
            Statistics {
                generated: 1,
                saved: 0,
                streak: 1,
                best_streak: 1
            }
        );
        assert!(roaster.batch().is_empty());
        assert!(
            Phrase::parse(roaster.display_text(), &WordList::ADJECTIVES, &WordList::NOUNS).is_some()
        );
    }

    #[test]
    fn rapid_fire_once() {
        let mut roaster = roaster(3);
        roaster.rapid_fire();
        assert_eq!(roaster.batch().len(), BATCH_SIZE);
        assert_eq!(roaster.stats().generated, 10);
        assert_eq!(roaster.stats().streak, 10);
        assert_eq!(roaster.display_text(), BATCH_READY);
    }

    #[test]
    fn generate_clears_batch() {
        let mut roaster = roaster(4);
        roaster.rapid_fire();
        roaster.generate();
        assert!(roaster.batch().is_empty());
        assert_eq!(roaster.stats().generated, 11);
    }

    #[test]
    fn save_is_idempotent() {
        let mut roaster = roaster(5);
        roaster.generate();
        assert_eq!(roaster.save_favorite(), Outcome::Changed);
        assert_eq!(roaster.save_favorite(), Outcome::Ignored);
        assert_eq!(roaster.favorites().len(), 1);
        assert_eq!(roaster.stats().saved, 1);
        assert_eq!(roaster.favorites().as_slice()[0], roaster.display_text());
    }

    #[test]
    fn placeholder_is_never_saved() {
        let mut roaster = roaster(6);
        assert_eq!(roaster.save_favorite(), Outcome::Ignored);
        assert!(roaster.favorites().is_empty());
        assert_eq!(roaster.stats().saved, 0);
    }

    #[test]
    fn batch_status_line_can_be_saved_once() {
        let mut roaster = roaster(7);
        roaster.rapid_fire();
        assert_eq!(roaster.save_favorite(), Outcome::Changed);
        roaster.rapid_fire();
        assert_eq!(roaster.save_favorite(), Outcome::Ignored);
        assert_eq!(roaster.favorites().as_slice(), [BATCH_READY]);
    }

    #[test]
    fn reset_streak_keeps_best() {
        let mut roaster = roaster(8);
        for _ in 0..3 {
            roaster.generate();
        }
        roaster.reset_streak();
        let stats = roaster.stats();
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.best_streak, 3);
        assert_eq!(stats.generated, 3);
    }

    #[test]
    fn observers_fire_on_changes_only() {
        let mut roaster = roaster(9);
        let seen: Rc<RefCell<Vec<(String, u64)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        roaster.subscribe(move |view| {
            sink.borrow_mut()
                .push((view.display_text.to_owned(), view.stats.generated));
        });

        roaster.save_favorite();
        assert!(seen.borrow().is_empty());

        roaster.generate();
        roaster.rapid_fire();
        roaster.reset_streak();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1], (BATCH_READY.to_owned(), 11));
        assert_eq!(seen[2].1, 11);
    }

    #[test]
    fn every_change_is_persisted() {
        let mut roaster = roaster(10);
        roaster.generate();
        roaster.save_favorite();
        let store = roaster.persistence().store();
        let favorites: Vec<String> = serde_json::from_str(store.get(FAVORITES_KEY).unwrap()).unwrap();
        let stats: Statistics = serde_json::from_str(store.get(STATS_KEY).unwrap()).unwrap();
        assert_eq!(favorites, [roaster.display_text()]);
        assert_eq!(stats, roaster.stats());
    }

    #[test]
    #[traced_test]
    fn storage_failures_are_logged_not_raised() {
        let mut roaster =
            Roaster::with_generator(Persistence::new(FullStore), PhraseGenerator::seeded(11));
        assert_eq!(roaster.generate(), Outcome::Changed);
        assert_eq!(roaster.stats().generated, 1);
        assert!(logs_contain("failed to persist roast state"));
    }

    #[test]
    fn random_action_sequences_keep_invariants() {
        let mut roaster = roaster(12);
        let mut picker = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let action = Action::ALL[picker.gen_range(0..Action::ALL.len())];
            roaster.dispatch(action);

            let stats = roaster.stats();
            assert!(stats.best_streak >= stats.streak);
            assert!(roaster.batch().is_empty() || roaster.batch().len() == BATCH_SIZE);

            let favorites = roaster.favorites().as_slice();
            assert!(!favorites.iter().any(|f| f == PLACEHOLDER));
            let unique: std::collections::HashSet<&String> = favorites.iter().collect();
            assert_eq!(unique.len(), favorites.len());
            assert_eq!(stats.saved as usize, favorites.len());
        }
    }
}
