use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sanctum_core::knowledge::KnowledgeStore;
use sanctum_core::model::coordinate::Coordinate;
use sanctum_core::model::floor::{Adjacency, Floor};
use sanctum_core::model::room::{Room, RoomObservation};
use sanctum_core::path::{Relaxation, find_best_path};
use sanctum_core::profile::{default_profile, no_hit_profile};
use sanctum_core::weight::{BuildSignal, WeightEvaluator, WeightGrid};

const KINDS: &[&str] = &["Chalice", "Escape", "Gauntlet", "Hourglass", "Boss"];
const MODIFIERS: &[&str] = &["Iron Manacles", "Death Toll", "Spiked Exit", "Honed Claws"];
const REWARDS: &[&str] = &["Gold Key", "Merchant", "Fountain", "Silver Cache"];

fn pick(rng: &mut StdRng, values: &[&str]) -> Option<String> {
    if rng.gen_bool(0.4) {
        None
    } else {
        Some(values[rng.gen_range(0..values.len())].to_string())
    }
}

fn random_observation(rng: &mut StdRng) -> RoomObservation {
    RoomObservation {
        kind: pick(rng, KINDS),
        modifier: pick(rng, MODIFIERS),
        reward: pick(rng, REWARDS),
    }
}

/// A floor shaped like a trial map: one entrance on the outermost layer,
/// a few rooms per inner layer, every room linked to one to three inner rooms.
fn random_floor(rng: &mut StdRng) -> Floor {
    let layer_count = rng.gen_range(3..=8);
    let mut widths: Vec<usize> = (0..layer_count).map(|_| rng.gen_range(1..=4)).collect();
    widths[layer_count - 1] = 1;

    let mut adjacency = Adjacency::new();
    for layer in 1..layer_count {
        for index in 0..widths[layer] {
            let links = rng.gen_range(1..=3);
            for _ in 0..links {
                let target = rng.gen_range(0..widths[layer - 1]);
                adjacency.connect(Coordinate::new(layer, index), target);
            }
        }
    }

    let layers: Vec<Vec<Option<Room>>> = widths
        .iter()
        .enumerate()
        .map(|(layer, &width)| {
            (0..width)
                .map(|index| {
                    if layer + 1 != layer_count && rng.gen_bool(0.1) {
                        return None;
                    }
                    let connections = adjacency.out_degree(Coordinate::new(layer, index));
                    Some(Room::new(random_observation(rng), connections))
                })
                .collect()
        })
        .collect();
    Floor::new(layers, adjacency)
}

fn weights_for(floor: &Floor, store: &KnowledgeStore, evasion: u32) -> WeightGrid {
    WeightEvaluator::default()
        .score_floor(
            store,
            floor,
            &default_profile(),
            &BuildSignal::with_evasion(evasion),
        )
        .weights
}

#[test]
fn routes_follow_edges_between_present_rooms() {
    let mut rng = StdRng::seed_from_u64(20251017);
    for _ in 0..200 {
        let floor = random_floor(&mut rng);
        let mut store = KnowledgeStore::new();
        store.observe_floor(&floor);
        let weights = weights_for(&floor, &store, rng.gen_range(0..10_000));

        let route = find_best_path(&weights, floor.adjacency(), None, None);
        assert_eq!(route.first(), floor.entrance());

        let coords = route.coordinates();
        for pair in coords.windows(2) {
            assert_eq!(pair[1].layer + 1, pair[0].layer);
            assert!(floor.adjacency().neighbors(pair[0]).any(|next| next == pair[1]));
        }
        for coordinate in coords {
            assert!(floor.contains(*coordinate));
        }
        let total: f64 = coords.iter().filter_map(|c| weights.get(*c)).sum();
        assert_eq!(total, route.score());
    }
}

#[test]
fn no_reachable_room_is_deeper_than_the_route() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let floor = random_floor(&mut rng);
        let mut store = KnowledgeStore::new();
        store.observe_floor(&floor);
        let weights = weights_for(&floor, &store, 0);
        let Some(entrance) = floor.entrance() else {
            continue;
        };

        let relaxation = Relaxation::run(&weights, floor.adjacency(), entrance);
        let route = find_best_path(&weights, floor.adjacency(), None, None);
        let end = route.last().expect("entrance is always present");
        let shallowest_layer = relaxation
            .settled()
            .map(|(coordinate, _)| coordinate.layer)
            .min()
            .expect("entrance settles");
        assert_eq!(end.layer, shallowest_layer);

        let best_at_depth = relaxation
            .settled()
            .filter(|(coordinate, _)| coordinate.layer == shallowest_layer)
            .map(|(_, score)| score)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(route.score(), best_at_depth);
    }
}

#[test]
fn recomputing_is_bit_identical() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let floor = random_floor(&mut rng);
        let mut store = KnowledgeStore::new();
        store.observe_floor(&floor);

        let first = weights_for(&floor, &store, 7_000);
        let second = weights_for(&floor, &store, 7_000);
        for ((a_coord, a), (b_coord, b)) in first.iter().zip(second.iter()) {
            assert_eq!(a_coord, b_coord);
            assert_eq!(a.to_bits(), b.to_bits());
        }
        assert_eq!(
            find_best_path(&first, floor.adjacency(), None, None),
            find_best_path(&second, floor.adjacency(), None, None)
        );
    }
}

#[test]
fn repeated_partial_observations_only_add_knowledge() {
    let mut rng = StdRng::seed_from_u64(4242);
    let mut store = KnowledgeStore::new();
    let mut learned: Vec<(Coordinate, RoomObservation)> = Vec::new();

    for _ in 0..500 {
        let coordinate = Coordinate::new(rng.gen_range(0..4), rng.gen_range(0..3));
        let observation = random_observation(&mut rng);
        store.update(coordinate, &observation, 1);
        learned.push((coordinate, observation));

        let record = store.get(coordinate).expect("observed coordinate");
        let history: Vec<_> = learned.iter().filter(|(c, _)| *c == coordinate).collect();
        let last_kind = history.iter().rev().find_map(|(_, o)| o.kind());
        let last_modifier = history.iter().rev().find_map(|(_, o)| o.modifier());
        let last_reward = history.iter().rev().find_map(|(_, o)| o.reward());
        assert_eq!(record.kind(), last_kind);
        assert_eq!(record.modifier(), last_modifier);
        assert_eq!(record.reward(), last_reward);
    }
}

#[test]
fn switching_profiles_needs_no_new_observations() {
    let mut rng = StdRng::seed_from_u64(31337);
    let floor = random_floor(&mut rng);
    let mut store = KnowledgeStore::new();
    store.observe_floor(&floor);
    let evaluator = WeightEvaluator::default();
    let signal = BuildSignal::default();

    let default_weights = evaluator
        .score_floor(&store, &floor, &default_profile(), &signal)
        .weights;
    let no_hit_weights = evaluator
        .score_floor(&store, &floor, &no_hit_profile(), &signal)
        .weights;
    let default_again = evaluator
        .score_floor(&store, &floor, &default_profile(), &signal)
        .weights;

    assert_eq!(default_weights, default_again);
    for (coordinate, _) in floor.rooms() {
        let record = store.get(coordinate);
        let expected = evaluator.score(record, &no_hit_profile(), &signal).value;
        assert_eq!(no_hit_weights.get(coordinate), Some(expected));
    }
}
