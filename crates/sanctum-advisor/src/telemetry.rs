use sanctum_core::knowledge::ContextId;
use sanctum_core::model::coordinate::Coordinate;
use sanctum_core::path::Route;
use tracing::{Level, event};

pub(crate) fn log_context_reset(previous: Option<ContextId>, next: ContextId, dropped_rooms: usize) {
    if !tracing::enabled!(target: "sanctum_advisor::context", Level::INFO) {
        return;
    }

    event!(
        target: "sanctum_advisor::context",
        Level::INFO,
        previous = ?previous,
        next,
        dropped_rooms,
        "trial context changed; knowledge cleared"
    );
}

pub(crate) fn log_profile_switch(from: &str, to: &str) {
    if !tracing::enabled!(target: "sanctum_advisor::context", Level::DEBUG) {
        return;
    }

    event!(
        target: "sanctum_advisor::context",
        Level::DEBUG,
        from = %from,
        to = %to,
        "scoring profile switched"
    );
}

pub(crate) fn log_recompute(
    profile: &str,
    known_rooms: usize,
    scored_rooms: usize,
    current: Option<Coordinate>,
    route: &Route,
) {
    if !tracing::enabled!(target: "sanctum_advisor::recompute", Level::DEBUG) {
        return;
    }

    let path = route
        .coordinates()
        .iter()
        .map(|coordinate| coordinate.to_string())
        .collect::<Vec<_>>()
        .join(" -> ");
    let current = current.map(|c| c.to_string()).unwrap_or_default();

    event!(
        target: "sanctum_advisor::recompute",
        Level::DEBUG,
        profile = %profile,
        known_rooms,
        scored_rooms,
        current = %current,
        route_len = route.len(),
        route_score = route.score(),
        route = %path,
    );
}
