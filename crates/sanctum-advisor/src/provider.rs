use sanctum_core::knowledge::ContextId;
use sanctum_core::model::coordinate::Coordinate;
use sanctum_core::model::floor::Floor;
use sanctum_core::snapshot::FloorSnapshot;
use sanctum_core::weight::BuildSignal;

/// Source of floor state, queried once per refresh tick.
pub trait FloorProvider {
    /// Identifier of the current trial run; changes when a new run starts.
    fn context_id(&self) -> ContextId;

    /// The floor as currently shown, or `None` while the map is hidden.
    fn floor(&self) -> Option<Floor>;

    fn current_position(&self) -> Option<Coordinate>;

    fn build_signal(&self) -> BuildSignal;
}

impl FloorProvider for FloorSnapshot {
    fn context_id(&self) -> ContextId {
        self.context_id
    }

    fn floor(&self) -> Option<Floor> {
        self.visible.then(|| FloorSnapshot::floor(self))
    }

    fn current_position(&self) -> Option<Coordinate> {
        self.current
    }

    fn build_signal(&self) -> BuildSignal {
        self.build
    }
}
