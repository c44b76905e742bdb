use std::sync::Arc;

use sanctum_core::knowledge::{KnowledgeStore, RoomRecord};
use sanctum_core::model::coordinate::Coordinate;
use sanctum_core::model::floor::Floor;
use sanctum_core::model::room::ScreenPosition;
use sanctum_core::path::{Route, find_best_path};
use sanctum_core::profile::{ProfileSet, ScoringProfile};
use sanctum_core::weight::{BuildSignal, RoomScore, ScoredFloor, WeightEvaluator};

use crate::error::AdvisorError;
use crate::provider::FloorProvider;
use crate::settings::AdvisorSettings;
use crate::telemetry;

/// What a refresh tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new trial started; accumulated knowledge was dropped and nothing
    /// else happened this tick.
    ContextReset,
    /// The floor view is hidden; state is unchanged.
    Hidden,
    /// The store absorbed the floor and the route was recomputed.
    Refreshed,
}

impl TickOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            TickOutcome::ContextReset => "context_reset",
            TickOutcome::Hidden => "hidden",
            TickOutcome::Refreshed => "refreshed",
        }
    }
}

/// Per-room text for the debug overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugAnnotation {
    pub coordinate: Coordinate,
    pub score: f64,
    pub text: String,
    pub position: Option<ScreenPosition>,
}

/// Ties the knowledge store, the active scoring profile and the solver
/// together for one overlay.
///
/// Each tick folds what the provider shows into the store, rescores every
/// present room and picks the route to highlight. Profile switches only swap
/// the weight tables and rescore; nothing has to be observed again.
#[derive(Debug)]
pub struct Advisor {
    store: KnowledgeStore,
    profiles: ProfileSet,
    active: String,
    profile: Arc<ScoringProfile>,
    evaluator: WeightEvaluator,
    debug: bool,
    floor: Option<Floor>,
    current: Option<Coordinate>,
    signal: BuildSignal,
    scored: ScoredFloor,
    route: Route,
}

impl Advisor {
    pub fn new(settings: AdvisorSettings, profiles: ProfileSet) -> Result<Self, AdvisorError> {
        let profile = lookup(&profiles, &settings.profile)?;
        Ok(Self {
            store: KnowledgeStore::new(),
            profiles,
            active: settings.profile,
            profile,
            evaluator: WeightEvaluator::default(),
            debug: settings.debug,
            floor: None,
            current: None,
            signal: BuildSignal::default(),
            scored: ScoredFloor::default(),
            route: Route::empty(),
        })
    }

    pub fn with_builtin_profiles(settings: AdvisorSettings) -> Result<Self, AdvisorError> {
        Self::new(settings, ProfileSet::builtin())
    }

    pub fn with_evaluator(mut self, evaluator: WeightEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Switch the active profile and rescore what is already known. An
    /// unknown name leaves everything as it was.
    pub fn select_profile(&mut self, name: &str) -> Result<(), AdvisorError> {
        let profile = lookup(&self.profiles, name)?;
        telemetry::log_profile_switch(&self.active, name);
        self.active = name.to_string();
        self.profile = profile;
        if self.floor.is_some() {
            self.recompute();
        }
        Ok(())
    }

    pub fn active_profile(&self) -> &str {
        &self.active
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Fold one floor refresh into the store without rescoring. Returns the
    /// number of rooms merged.
    pub fn observe(
        &mut self,
        floor: Floor,
        current: Option<Coordinate>,
        signal: BuildSignal,
    ) -> usize {
        let seen = self.store.observe_floor(&floor);
        self.floor = Some(floor);
        self.current = current;
        self.signal = signal;
        seen
    }

    /// One refresh from the host.
    pub fn tick<P>(&mut self, provider: &P) -> TickOutcome
    where
        P: FloorProvider + ?Sized,
    {
        let context = provider.context_id();
        if !self.store.is_same_context(context) {
            let previous = self.store.context();
            let dropped = self.store.len();
            self.store.reset(context);
            if dropped > 0 {
                self.clear_floor();
                telemetry::log_context_reset(previous, context, dropped);
                return TickOutcome::ContextReset;
            }
        }

        let Some(floor) = provider.floor() else {
            return TickOutcome::Hidden;
        };
        self.observe(floor, provider.current_position(), provider.build_signal());
        self.recompute();
        TickOutcome::Refreshed
    }

    /// Rescore the last observed floor with the active profile and pick the
    /// route. Calling it again without new observations gives the same result.
    pub fn recompute(&mut self) -> &Route {
        let Some(floor) = self.floor.as_ref() else {
            self.scored = ScoredFloor::default();
            self.route = Route::empty();
            return &self.route;
        };

        self.scored = self
            .evaluator
            .score_floor(&self.store, floor, &self.profile, &self.signal);
        let preferred_end = self.current.filter(|current| floor.contains(*current));
        self.route = find_best_path(&self.scored.weights, floor.adjacency(), None, preferred_end);

        telemetry::log_recompute(
            &self.active,
            self.store.len(),
            self.scored.scores.len(),
            self.current,
            &self.route,
        );
        &self.route
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn best_path(&self) -> &[Coordinate] {
        self.route.coordinates()
    }

    /// Rooms to highlight: the route without the room the player stands in.
    pub fn highlight_path(&self) -> Vec<Coordinate> {
        self.route
            .coordinates()
            .iter()
            .copied()
            .filter(|coordinate| Some(*coordinate) != self.current)
            .collect()
    }

    /// Score and breakdown text for every scored room; empty unless debug
    /// output is enabled.
    pub fn debug_annotations(&self) -> Vec<DebugAnnotation> {
        if !self.debug {
            return Vec::new();
        }
        self.scored
            .scores
            .iter()
            .map(|(coordinate, score)| DebugAnnotation {
                coordinate: *coordinate,
                score: score.value,
                text: format!("Score: {}\n{}", score.value, score.breakdown),
                position: self
                    .floor
                    .as_ref()
                    .and_then(|floor| floor.room(*coordinate))
                    .and_then(|room| room.position),
            })
            .collect()
    }

    pub fn score(&self, coordinate: Coordinate) -> Option<&RoomScore> {
        self.scored.scores.get(&coordinate)
    }

    pub fn record(&self, coordinate: Coordinate) -> Option<&RoomRecord> {
        self.store.get(coordinate)
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn floor(&self) -> Option<&Floor> {
        self.floor.as_ref()
    }

    pub fn current_position(&self) -> Option<Coordinate> {
        self.current
    }

    fn clear_floor(&mut self) {
        self.floor = None;
        self.current = None;
        self.scored = ScoredFloor::default();
        self.route = Route::empty();
    }
}

fn lookup(profiles: &ProfileSet, name: &str) -> Result<Arc<ScoringProfile>, AdvisorError> {
    profiles
        .get(name)
        .ok_or_else(|| AdvisorError::UnknownProfile {
            name: name.to_string(),
            available: profiles.names().map(str::to_string).collect(),
        })
}
