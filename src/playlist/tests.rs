use super::shuffle::fisher_yates;
use super::*;
use crate::library::Track;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| Track::new(format!("/music/{i:02}.mp3"), format!("Song {i:02}"), None))
        .collect()
}

fn sorted(mut v: Vec<Track>) -> Vec<Track> {
    v.sort();
    v
}

#[test]
fn fisher_yates_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [0usize, 1, 2, 5, 40] {
        let mut items: Vec<usize> = (0..n).collect();
        fisher_yates(&mut items, &mut rng);
        let mut check = items.clone();
        check.sort_unstable();
        assert_eq!(check, (0..n).collect::<Vec<_>>());
    }
}

#[test]
fn fisher_yates_reaches_every_ordering_of_three() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..600 {
        let mut items = [0u8, 1, 2];
        fisher_yates(&mut items, &mut rng);
        seen.insert(items);
    }
    assert_eq!(seen.len(), 6);
}

#[test]
fn load_produces_a_permutation_of_the_input() {
    for seed in 0..20 {
        let mut manager = PlaylistManager::seeded(seed);
        let input = tracks(9);
        let playlist = manager.load(input.clone()).unwrap();
        assert_eq!(sorted(playlist.to_vec()), sorted(input));
        assert_eq!(manager.len(), 9);
    }
}

#[test]
fn load_rejects_empty_input_and_keeps_previous_order() {
    let mut manager = PlaylistManager::seeded(3);
    assert_eq!(manager.load(Vec::new()).unwrap_err(), PlaylistError::EmptySource);
    assert!(manager.is_empty());

    manager.load(tracks(2)).unwrap();
    assert_eq!(manager.load(Vec::new()).unwrap_err(), PlaylistError::EmptySource);
    assert_eq!(manager.len(), 2);
}

#[test]
fn index_after_wraps_in_both_directions() {
    let mut manager = PlaylistManager::seeded(0);
    manager.load(tracks(3)).unwrap();

    assert_eq!(manager.index_after(0, Direction::Next), 1);
    assert_eq!(manager.index_after(2, Direction::Next), 0);
    assert_eq!(manager.index_after(0, Direction::Previous), 2);
    assert_eq!(manager.index_after(1, Direction::Previous), 0);
}

#[test]
fn index_after_next_then_previous_round_trips() {
    for len in 1..=6 {
        let mut manager = PlaylistManager::seeded(len as u64);
        manager.load(tracks(len)).unwrap();
        for i in 0..len {
            let forward = manager.index_after(i, Direction::Next);
            assert_eq!(manager.index_after(forward, Direction::Previous), i);
        }
    }
}

#[test]
fn track_at_rejects_out_of_range() {
    let mut manager = PlaylistManager::seeded(0);
    manager.load(tracks(2)).unwrap();
    assert!(manager.track_at(1).is_ok());
    assert_eq!(
        manager.track_at(2).unwrap_err(),
        PlaylistError::IndexOutOfRange { index: 2, len: 2 }
    );
}

#[test]
fn reshuffle_replaces_the_snapshot_and_keeps_the_track_set() {
    let mut manager = PlaylistManager::seeded(11);
    let before = manager.load(tracks(12)).unwrap();

    let after = manager.reshuffle();
    assert!(!before.same_list(&after));
    assert!(after.same_list(&manager.playlist()));
    assert_eq!(sorted(before.to_vec()), sorted(after.to_vec()));
    assert_eq!(manager.reshuffle_count(), 1);

    // The old snapshot is a stable view of the previous order.
    let held = before.to_vec();
    manager.reshuffle();
    assert_eq!(before.to_vec(), held);
    assert_eq!(manager.reshuffle_count(), 2);
}

#[test]
fn load_resets_reshuffle_count() {
    let mut manager = PlaylistManager::seeded(5);
    manager.load(tracks(3)).unwrap();
    manager.reshuffle();
    manager.load(tracks(3)).unwrap();
    assert_eq!(manager.reshuffle_count(), 0);
}

#[test]
fn same_seed_gives_same_order() {
    let a = PlaylistManager::seeded(99).load(tracks(10)).unwrap();
    let b = PlaylistManager::seeded(99).load(tracks(10)).unwrap();
    assert_eq!(a.to_vec(), b.to_vec());
}
