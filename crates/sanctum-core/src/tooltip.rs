//! Room attributes from trial-map tooltip text.
//!
//! Before the host exposes structured room data, the only source is the text
//! of each room's tooltip. Rewards and room types are matched against the
//! exact lines the game prints; afflictions are tagged lines carrying the
//! name between braces.

use crate::model::room::RoomObservation;

const CURSE_TAG: &str = "<sanctumcurse>";

const REWARD_LINES: &[(&str, &str)] = &[
    ("Awards a Large Sacred Water Fountain", "Large Fountain"),
    ("Awards a Sacred Water Fountain", "Fountain"),
    (
        "Awards a Pledge which can be accepted to change the Trial's Parameters",
        "Pledge to Kochai",
    ),
    (
        "Awards a Shrine to restore Honour and gain Sacred Water",
        "Honour Halani",
    ),
    (
        "Awards a Shrine that greatly restores Honour and burdens you with an Affliction",
        "Honour Ahkeli",
    ),
    (
        "Awards a Shrine that bestows the fickle Blessings of the Wind",
        "Honour Galai",
    ),
    ("Awards a Shrine to restore Honour", "Honour Tabana"),
    (
        "Awards a Shrine that restores Honour and grants you a Boon",
        "Honour Orbala",
    ),
    ("Contains Merchant", "Merchant"),
    ("Awards Bronze Key", "Bronze Key"),
    ("Awards Silver Key", "Silver Key"),
    ("Awards Gold Key", "Gold Key"),
    (
        "Awards a Bronze Cache. Requires a Bronze Key to Open",
        "Bronze Cache",
    ),
    (
        "Awards a Silver Cache. Requires a Silver Key to Open",
        "Silver Cache",
    ),
    ("Awards a Gold Cache. Requires a Gold Key to Open", "Gold Cache"),
];

const ROOM_KIND_LINES: &[(&str, &str)] = &[
    ("Chalice Trial", "Chalice"),
    ("Escape Trial", "Escape"),
    ("Ritual Trial", "Ritual"),
    ("Gauntlet Trial", "Gauntlet"),
    ("Hourglass Trial", "Hourglass"),
    ("Collapsing Cavern", "Boss"),
    ("Ceremonial Chamber", "Boss"),
    ("Sand Pit", "Boss"),
    ("Outside of Time", "Boss"),
];

pub fn reward_for(line: &str) -> Option<&'static str> {
    lookup(REWARD_LINES, line)
}

pub fn room_kind_for(line: &str) -> Option<&'static str> {
    lookup(ROOM_KIND_LINES, line)
}

/// Affliction name from a curse-tagged line such as
/// `<sanctumcurse>{Iron Manacles}`.
pub fn affliction_for(line: &str) -> Option<&str> {
    if !line.contains(CURSE_TAG) {
        return None;
    }
    let open = line.find('{')?;
    let close = line.find('}')?;
    (close > open).then(|| &line[open + 1..close])
}

/// Fold tooltip lines into an observation. Later matches of the same
/// attribute win; unrecognised lines are ignored.
pub fn parse_tooltip<'a, I>(lines: I) -> RoomObservation
where
    I: IntoIterator<Item = &'a str>,
{
    let mut observation = RoomObservation::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(reward) = reward_for(line) {
            observation.reward = Some(reward.to_string());
        } else if let Some(affliction) = affliction_for(line) {
            observation.modifier = Some(affliction.to_string());
        } else if let Some(kind) = room_kind_for(line) {
            observation.kind = Some(kind.to_string());
        }
    }
    observation
}

fn lookup(table: &[(&str, &'static str)], line: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(text, _)| *text == line)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{default_profile, no_hit_profile};

    #[test]
    fn parses_full_tooltip() {
        let observation = parse_tooltip([
            "Chalice Trial",
            "<sanctumcurse>{Iron Manacles}",
            "Awards Gold Key",
        ]);
        assert_eq!(observation.kind(), Some("Chalice"));
        assert_eq!(observation.modifier(), Some("Iron Manacles"));
        assert_eq!(observation.reward(), Some("Gold Key"));
    }

    #[test]
    fn boss_arenas_share_a_kind() {
        for arena in ["Collapsing Cavern", "Sand Pit", "Outside of Time"] {
            assert_eq!(room_kind_for(arena), Some("Boss"));
        }
    }

    #[test]
    fn similar_reward_lines_do_not_collide() {
        assert_eq!(reward_for("Awards a Shrine to restore Honour"), Some("Honour Tabana"));
        assert_eq!(
            reward_for("Awards a Shrine to restore Honour and gain Sacred Water"),
            Some("Honour Halani")
        );
        assert_eq!(reward_for("Awards a Shrine"), None);
    }

    #[test]
    fn malformed_curse_lines_are_ignored() {
        assert_eq!(affliction_for("<sanctumcurse>Iron Manacles"), None);
        assert_eq!(affliction_for("<sanctumcurse>}Iron{"), None);
        assert_eq!(affliction_for("{Iron Manacles}"), None);
        assert_eq!(
            affliction_for("Minor: <sanctumcurse>{Honed Claws} applies"),
            Some("Honed Claws")
        );
    }

    #[test]
    fn empty_tooltip_reveals_nothing() {
        assert!(parse_tooltip(std::iter::empty()).is_blank());
        assert!(parse_tooltip(["", "  ", "Some flavour text"]).is_blank());
    }

    #[test]
    fn every_parsed_reward_is_scored_by_builtin_profiles() {
        for (line, _) in REWARD_LINES {
            let observation = parse_tooltip([*line]);
            let reward = observation.reward().expect("reward line parses");
            for (name, profile) in [("Default", default_profile()), ("No-Hit", no_hit_profile())] {
                assert!(
                    profile.reward_weight(reward).is_some(),
                    "{name} has no weight for {reward}"
                );
            }
        }
    }
}
