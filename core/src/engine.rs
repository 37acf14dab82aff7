use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_HINTS: u8 = 3;
pub const DEFAULT_RESOLVE_DELAY_MS: Millis = 1000;
pub const DEFAULT_HINT_REVEAL_MS: Millis = 2000;
pub const DEFAULT_TICK_PERIOD_MS: Millis = 1000;
/// Shortest internal tick period, a zero period would refire forever at the same instant.
pub const MIN_TICK_PERIOD_MS: Millis = 1;

/// Tunables injected by the host when building an engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Hints granted at the start of each session.
    pub hints: u8,
    /// Delay between the second selection and its resolution.
    pub resolve_delay_ms: Millis,
    /// How long a hinted pair stays face up.
    pub hint_reveal_ms: Millis,
    /// Period of the internal timer, `None` leaves ticking to the host.
    pub tick_period_ms: Option<Millis>,
    pub scoring: ScoringPolicy,
}

impl EngineSettings {
    /// Settings the engine can run with, out of range values are clamped.
    pub fn validated(self) -> Self {
        let tick_period_ms = self
            .tick_period_ms
            .map(|period| period.max(MIN_TICK_PERIOD_MS));
        if tick_period_ms != self.tick_period_ms {
            log::warn!(
                "tick period {:?} ms raised to {:?} ms",
                self.tick_period_ms,
                tick_period_ms
            );
        }
        Self {
            tick_period_ms,
            ..self
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            hints: DEFAULT_HINTS,
            resolve_delay_ms: DEFAULT_RESOLVE_DELAY_MS,
            hint_reveal_ms: DEFAULT_HINT_REVEAL_MS,
            tick_period_ms: Some(DEFAULT_TICK_PERIOD_MS),
            scoring: ScoringPolicy::default(),
        }
    }
}

/// Receives a snapshot after every operation that changed the session.
pub trait SessionObserver {
    fn on_state_changed(&mut self, snapshot: &SessionSnapshot);
}

impl<F: FnMut(&SessionSnapshot)> SessionObserver for F {
    fn on_state_changed(&mut self, snapshot: &SessionSnapshot) {
        self(snapshot)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_state_changed(&mut self, _snapshot: &SessionSnapshot) {}
}

/// Owns the current session and every deferred action scheduled for it.
#[derive(Clone, Debug)]
pub struct GameEngine<G = RandomDeckGenerator, O = NoopObserver> {
    settings: EngineSettings,
    catalog: ThemeCatalog,
    generator: G,
    observer: O,
    scheduler: Scheduler,
    generation: Generation,
    session: Option<Session>,
}

impl GameEngine {
    /// Engine with the built-in themes dealing shuffled decks from `seed`.
    pub fn new(settings: EngineSettings, seed: u64) -> Self {
        Self::with_parts(
            settings,
            ThemeCatalog::builtin(),
            RandomDeckGenerator::new(seed),
            NoopObserver,
        )
    }
}

impl<G: DeckGenerator, O: SessionObserver> GameEngine<G, O> {
    pub fn with_parts(
        settings: EngineSettings,
        catalog: ThemeCatalog,
        generator: G,
        observer: O,
    ) -> Self {
        Self {
            settings: settings.validated(),
            catalog,
            generator,
            observer,
            scheduler: Scheduler::new(),
            generation: Generation::default(),
            session: None,
        }
    }

    pub fn with_observer<P: SessionObserver>(self, observer: P) -> GameEngine<G, P> {
        GameEngine {
            settings: self.settings,
            catalog: self.catalog,
            generator: self.generator,
            observer,
            scheduler: self.scheduler,
            generation: self.generation,
            session: self.session,
        }
    }

    pub fn with_generator<H: DeckGenerator>(self, generator: H) -> GameEngine<H, O> {
        GameEngine {
            settings: self.settings,
            catalog: self.catalog,
            generator,
            observer: self.observer,
            scheduler: self.scheduler,
            generation: self.generation,
            session: self.session,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut ThemeCatalog {
        &mut self.catalog
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(SessionSnapshot::from_session)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Current engine clock in milliseconds.
    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    /// Number of deferred actions still waiting to fire.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Starts a new session from host-provided names, a failure keeps the current session.
    pub fn start(&mut self, difficulty: &str, theme: &str) -> Result<&Session> {
        let difficulty = difficulty.parse()?;
        self.start_with(difficulty, theme)
    }

    pub fn start_with(&mut self, difficulty: Difficulty, theme: &str) -> Result<&Session> {
        let deal = resolve_config_for(difficulty, theme, &self.catalog)?;
        let deck = build_deck(&deal, &mut self.generator)?;

        let cancelled = self.scheduler.cancel_all();
        self.generation = self.generation.next();
        log::debug!(
            "starting session {} ({}/{}), cancelled {} pending tasks",
            self.generation,
            deal.difficulty,
            deal.theme,
            cancelled
        );

        let session = Session::new(
            self.generation,
            &deal,
            deck,
            self.settings.hints,
            self.settings.scoring,
        );
        if let Some(period) = self.settings.tick_period_ms {
            self.scheduler.schedule(period, self.generation, Task::Tick);
        }
        self.observer
            .on_state_changed(&SessionSnapshot::from_session(&session));
        Ok(self.session.insert(session))
    }

    /// Deals a new session with the current difficulty and theme, returns `false` without one.
    pub fn reset(&mut self) -> Result<bool> {
        let Some(session) = &self.session else {
            return Ok(false);
        };
        let difficulty = session.difficulty();
        let theme = String::from(session.theme());
        self.start_with(difficulty, &theme)?;
        Ok(true)
    }

    pub fn select_card(&mut self, id: CardId) -> Result<SelectOutcome> {
        let Some(session) = self.session.as_mut() else {
            return Ok(SelectOutcome::NoChange);
        };

        let outcome = session.select(id)?;
        if outcome == SelectOutcome::PairSelected {
            self.scheduler.schedule(
                self.settings.resolve_delay_ms,
                self.generation,
                Task::ResolveSelection,
            );
        }
        if outcome.has_update() {
            self.notify();
        }
        Ok(outcome)
    }

    /// Resolves the pending pair right away instead of waiting for the scheduled resolution.
    pub fn resolve_selection(&mut self) -> ResolveOutcome {
        let generation = self.generation;
        self.scheduler
            .cancel(|t| t.task == Task::ResolveSelection && t.generation == generation);
        self.resolve_now()
    }

    pub fn use_hint(&mut self) -> HintOutcome {
        let Some(session) = self.session.as_mut() else {
            return HintOutcome::NoChange;
        };

        let outcome = session.reveal_hint();
        if let HintOutcome::Revealed(pair) = outcome {
            self.scheduler.schedule(
                self.settings.hint_reveal_ms,
                self.generation,
                Task::HideHint(pair),
            );
            self.notify();
        }
        outcome
    }

    /// Counts one second, hosts driving their own clock call this instead of [`Self::advance`].
    pub fn tick(&mut self) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::NoChange;
        };

        let outcome = session.tick();
        if outcome.has_update() {
            self.notify();
        }
        outcome
    }

    /// Moves the engine clock forward, firing every deferred action that comes due.
    /// Returns how many actions ran against the current session.
    pub fn advance(&mut self, elapsed_ms: Millis) -> usize {
        let until = self.scheduler.now().saturating_add(elapsed_ms);
        let mut fired = 0;

        while let Some(scheduled) = self.scheduler.pop_due(until) {
            if scheduled.generation != self.generation {
                log::debug!(
                    "dropping stale {:?} from session {}",
                    scheduled.task,
                    scheduled.generation
                );
                continue;
            }
            self.run_task(scheduled.task);
            fired += 1;
        }

        self.scheduler.advance_to(until);
        fired
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::ResolveSelection => {
                self.resolve_now();
            }
            Task::HideHint(pair) => {
                let hidden = self
                    .session
                    .as_mut()
                    .is_some_and(|session| session.hide_hint(pair));
                if hidden {
                    self.notify();
                }
            }
            Task::Tick => {
                if self.tick().has_update() {
                    if let Some(period) = self.settings.tick_period_ms {
                        self.scheduler.schedule(period, self.generation, Task::Tick);
                    }
                }
            }
        }
    }

    fn resolve_now(&mut self) -> ResolveOutcome {
        let Some(session) = self.session.as_mut() else {
            return ResolveOutcome::NoChange;
        };

        let outcome = session.resolve();
        if outcome == ResolveOutcome::Won {
            let generation = self.generation;
            self.scheduler
                .cancel(|t| t.task == Task::Tick && t.generation == generation);
        }
        if outcome.has_update() {
            self.notify();
        }
        outcome
    }

    fn notify(&mut self) {
        if let Some(session) = &self.session {
            let snapshot = SessionSnapshot::from_session(session);
            self.observer.on_state_changed(&snapshot);
        }
    }
}
