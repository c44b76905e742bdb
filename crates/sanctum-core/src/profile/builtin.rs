use super::ScoringProfile;

pub const DEFAULT_PROFILE: &str = "Default";
pub const NO_HIT_PROFILE: &str = "No-Hit";

/// Every affliction the trial map can show, at neutral weight. Profiles
/// override the ones they care about.
const NEUTRAL_AFFLICTIONS: &[&str] = &[
    // Major
    "Corrosive Concoction",
    "Glass Shard",
    "Chiselled Stone",
    "Orb of Negation",
    "Unquenched Thirst",
    "Unassuming Brick",
    "Orbala's Leathers",
    "Ghastly Scythe",
    "Veiled Sight",
    "Branded Balbalakh",
    "Death Toll",
    "Deadly Snare",
    // Minor
    "Shattered Shield",
    "Sharpened Arrowhead",
    "Iron Manacles",
    "Tradition's Demand",
    "Worn Sandals",
    "Fiendish Wings",
    "Weakened Flesh",
    "Rusted Mallet",
    "Untouchable",
    "Chains of Binding",
    "Costly Aid",
    "Myriad Aspersions",
    "Season of Famine",
    "Forgotten Traditions",
    "Haemorrhage",
    "Deceptive Mirror",
    "Dishonoured Tattoo",
    "Tattered Blindfold",
    "Spiked Exit",
    "Purple Smoke",
    "Golden Smoke",
    "Red Smoke",
    "Winter Drought",
    "Trade Tariff",
    "Black Smoke",
    "Suspected Sympathiser",
    "Hungry Fangs",
    "Spiked Shell",
    "Exhausted Wells",
    "Gate Toll",
    "Leaking Waterskin",
    "Rapid Quicksand",
    "Blunt Sword",
    "Low Rivers",
    "Dark Pit",
    "Honed Claws",
];

const DEFAULT_ROOM_KINDS: &[(&str, f64)] = &[
    ("Gauntlet", 0.0),
    ("Chalice", 1000.0),
    ("Hourglass", 500.0),
    ("Escape", 750.0),
];

const DEFAULT_AFFLICTIONS: &[(&str, f64)] = &[("Death Toll", -500.0)];

const DEFAULT_REWARDS: &[(&str, f64)] = &[
    ("Gold Key", 3.0),
    ("Silver Key", 2.0),
    ("Bronze Key", 1.0),
    ("Large Fountain", 50_000.0),
    ("Fountain", 25_000.0),
    ("Pledge to Kochai", 45_000.0),
    ("Honour Halani", 40_000.0),
    ("Honour Ahkeli", 40_000.0),
    ("Honour Orbala", 40_000.0),
    ("Honour Galai", 40_000.0),
    ("Honour Tabana", 40_000.0),
    ("Gold Cache", 0.0),
    ("Silver Cache", 0.0),
    ("Bronze Cache", 0.0),
    ("Merchant", 30_000.0),
];

const NO_HIT_ROOM_KINDS: &[(&str, f64)] = &[
    ("Gauntlet", -1000.0),
    ("Chalice", 1000.0),
    ("Hourglass", -750.0),
    ("Escape", 750.0),
];

// Anything that deals damage regardless of play is effectively forbidden.
const NO_HIT_AFFLICTIONS: &[(&str, f64)] =
    &[("Death Toll", -1_000_000.0), ("Spiked Exit", -1_000_000.0)];

const NO_HIT_REWARDS: &[(&str, f64)] = &[
    ("Gold Key", 1_000_000.0),
    ("Silver Key", 500_000.0),
    ("Bronze Key", 200_000.0),
    ("Large Fountain", 50_000.0),
    ("Fountain", 25_000.0),
    ("Pledge to Kochai", 45_000.0),
    ("Honour Halani", 40_000.0),
    ("Honour Ahkeli", 40_000.0),
    ("Honour Orbala", 40_000.0),
    ("Honour Galai", 40_000.0),
    ("Honour Tabana", 40_000.0),
    ("Gold Cache", 35_000.0),
    ("Silver Cache", 20_000.0),
    ("Bronze Cache", 10_000.0),
    ("Merchant", 30_000.0),
];

pub fn default_profile() -> ScoringProfile {
    with_neutral_afflictions(ScoringProfile::from_tables(
        DEFAULT_ROOM_KINDS,
        DEFAULT_AFFLICTIONS,
        DEFAULT_REWARDS,
    ))
}

pub fn no_hit_profile() -> ScoringProfile {
    with_neutral_afflictions(ScoringProfile::from_tables(
        NO_HIT_ROOM_KINDS,
        NO_HIT_AFFLICTIONS,
        NO_HIT_REWARDS,
    ))
}

fn with_neutral_afflictions(mut profile: ScoringProfile) -> ScoringProfile {
    for name in NEUTRAL_AFFLICTIONS {
        profile
            .modifier_weights
            .entry((*name).to_string())
            .or_insert(0.0);
    }
    profile
}
