use std::time::{Duration, Instant};

use super::output::AudioEvent;
use super::player::current_only;
use super::thread::{clamp_seek, effective_volume, elapsed};
use super::types::TaggedEvent;

#[test]
fn elapsed_adds_running_time_to_accumulated() {
    let start = Instant::now();
    let now = start + Duration::from_secs(3);
    assert_eq!(
        elapsed(Duration::from_secs(10), Some(start), now),
        Duration::from_secs(13)
    );
    assert_eq!(
        elapsed(Duration::from_secs(10), None, now),
        Duration::from_secs(10)
    );
}

#[test]
fn elapsed_never_goes_backwards() {
    let now = Instant::now();
    let later = now + Duration::from_secs(1);
    assert_eq!(elapsed(Duration::from_secs(2), Some(later), now), Duration::from_secs(2));
}

#[test]
fn muting_silences_without_touching_volume() {
    assert_eq!(effective_volume(0.7, true), 0.0);
    assert!((effective_volume(0.7, false) - 0.7).abs() < f32::EPSILON);
    assert_eq!(effective_volume(1.8, false), 1.0);
}

#[test]
fn clamp_seek_stays_within_known_duration() {
    let total = Some(Duration::from_secs(200));
    assert_eq!(clamp_seek(Duration::from_secs(250), total), Duration::from_secs(200));
    assert_eq!(clamp_seek(Duration::from_secs(20), total), Duration::from_secs(20));
    assert_eq!(clamp_seek(Duration::from_secs(250), None), Duration::from_secs(250));
}

#[test]
fn events_from_an_earlier_load_are_dropped() {
    let tagged = [
        TaggedEvent {
            load: 1,
            event: AudioEvent::TimeUpdate {
                current: 170.0,
                duration: 180.0,
            },
        },
        TaggedEvent {
            load: 1,
            event: AudioEvent::Ended,
        },
        TaggedEvent {
            load: 2,
            event: AudioEvent::TimeUpdate {
                current: 0.5,
                duration: 240.0,
            },
        },
    ];

    let kept: Vec<AudioEvent> = current_only(tagged.into_iter(), 2).collect();
    assert_eq!(
        kept,
        vec![AudioEvent::TimeUpdate {
            current: 0.5,
            duration: 240.0
        }]
    );
}
