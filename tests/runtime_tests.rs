//! Motion Runtime Tests
//!
//! Tests for:
//! - MotionRuntime instance creation, removal and stale-handle behavior
//! - Event dispatch (Started, Looped, Ended, Stopped) to attached handlers
//! - Several loop boundaries in one update reported as a single event
//! - Self-deletion after fading to zero weight
//! - Live parameter setters through the MotionSystem trait

mod common;

use std::sync::Arc;

use multi_motion::runtime::{
    LoopCount, MotionEvent, MotionRuntime, MotionSystem, PlayMode, PlaybackParams,
};
use multi_motion::{ActorInstance, MotionData};

use common::{Recorder, init_logger};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn clip(duration: f32) -> Arc<MotionData> {
    Arc::new(MotionData::new("clip", duration))
}

// ============================================================================
// Arena
// ============================================================================

#[test]
fn create_and_remove() {
    let mut runtime = MotionRuntime::new();
    let h = runtime
        .create_instance(clip(1.0), &PlaybackParams::default())
        .expect("created");

    assert!(runtime.contains(h));
    assert_eq!(runtime.len(), 1);
    assert!(runtime.remove_instance(h));
    assert!(!runtime.remove_instance(h));
    assert!(runtime.is_empty());
    assert_eq!(runtime.created_total(), 1);
}

#[test]
fn stale_handle_is_inert() {
    let mut runtime = MotionRuntime::new();
    let stale = runtime
        .create_instance(clip(1.0), &PlaybackParams::default())
        .expect("created");
    runtime.remove_instance(stale);

    // Reuses the slot with a new generation.
    let fresh = runtime
        .create_instance(clip(2.0), &PlaybackParams::default())
        .expect("created");
    assert_ne!(stale, fresh);

    runtime.set_play_speed(stale, 9.0);
    runtime.stop(stale, 0.0);
    assert!(runtime.current_time(stale).is_none());
    assert!(runtime.duration(stale).is_none());
    assert!(!runtime.is_blending(stale));

    assert_eq!(runtime.duration(fresh), Some(2.0));
    let inst = runtime.instance(fresh).expect("fresh alive");
    assert!(approx(inst.play_speed, 1.0));
    assert!(approx(inst.weight, 1.0));
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn handlers_receive_playback_events() {
    init_logger();
    let mut runtime = MotionRuntime::new();
    let (recorder, handler) = Recorder::shared();
    let params = PlaybackParams {
        max_loops: LoopCount::Times(2),
        ..PlaybackParams::default()
    };
    let h = runtime.create_instance(clip(1.0), &params).expect("created");
    assert!(runtime.add_event_handler(h, handler.clone()));
    assert!(!runtime.add_event_handler(h, handler.clone()));

    runtime.update(0.5);
    runtime.update(0.75);
    runtime.update(1.0);

    assert_eq!(
        recorder.seen(),
        vec![
            (h, MotionEvent::Started),
            (h, MotionEvent::Looped { count: 1 }),
            (h, MotionEvent::Ended),
        ]
    );
    // Frozen at the last frame, so still resident.
    assert!(runtime.contains(h));
    assert_eq!(runtime.current_time_normalized(h), Some(1.0));
}

#[test]
fn short_clip_reports_one_loop_event_per_update() {
    let mut runtime = MotionRuntime::new();
    let (recorder, handler) = Recorder::shared();
    let params = PlaybackParams {
        max_loops: LoopCount::Forever,
        ..PlaybackParams::default()
    };
    let h = runtime.create_instance(clip(0.0001), &params).expect("created");
    runtime.add_event_handler(h, handler);

    runtime.update(0.5);
    runtime.update(0.5);

    let seen = recorder.seen();
    assert_eq!(seen.len(), 3, "events: {seen:?}");
    assert_eq!(seen[0], (h, MotionEvent::Started));
    let counts: Vec<u32> = seen[1..]
        .iter()
        .filter_map(|(_, e)| match e {
            MotionEvent::Looped { count } => Some(*count),
            _ => None,
        })
        .collect();
    assert_eq!(counts.len(), 2);
    assert!(counts[0] > 1000 && counts[1] > counts[0], "counts: {counts:?}");
    assert_eq!(
        runtime.instance(h).map(|i| i.loops_completed()),
        Some(counts[1])
    );
}

#[test]
fn removed_handlers_stop_receiving() {
    let mut runtime = MotionRuntime::new();
    let (recorder, handler) = Recorder::shared();
    let h = runtime
        .create_instance(clip(1.0), &PlaybackParams::default())
        .expect("created");
    runtime.add_event_handler(h, handler.clone());
    runtime.update(0.1);
    assert!(runtime.remove_event_handler(h, &handler));
    runtime.update(5.0);
    assert_eq!(recorder.seen().len(), 1);

    runtime.add_event_handler(h, handler);
    runtime.remove_all_event_handlers(h);
    assert_eq!(runtime.instance(h).map(|i| i.handler_count()), Some(0));
}

// ============================================================================
// Fading
// ============================================================================

#[test]
fn stopped_instance_self_deletes() {
    let mut runtime = MotionRuntime::new();
    let (recorder, handler) = Recorder::shared();
    let params = PlaybackParams {
        max_loops: LoopCount::Forever,
        ..PlaybackParams::default()
    };
    let h = runtime.create_instance(clip(1.0), &params).expect("created");
    runtime.add_event_handler(h, handler);
    runtime.update(0.1);

    runtime.stop(h, 0.4);
    assert!(runtime.is_blending(h));
    runtime.update(0.2);
    assert!(runtime.contains(h));
    runtime.update(0.25);

    assert!(!runtime.contains(h));
    assert_eq!(recorder.count(MotionEvent::Stopped), 1);
}

#[test]
fn zero_weight_without_delete_stays_resident() {
    let mut runtime = MotionRuntime::new();
    let params = PlaybackParams {
        delete_on_zero_weight: false,
        ..PlaybackParams::default()
    };
    let h = runtime.create_instance(clip(1.0), &params).expect("created");
    runtime.stop(h, 0.0);
    runtime.update(0.1);
    assert!(runtime.contains(h));

    runtime.set_delete_on_zero_weight(h, true);
    runtime.update(0.1);
    assert!(!runtime.contains(h));
}

#[test]
fn blend_in_reports_blending_until_full_weight() {
    let mut runtime = MotionRuntime::new();
    let params = PlaybackParams {
        blend_in_time: 0.5,
        max_loops: LoopCount::Forever,
        ..PlaybackParams::default()
    };
    let h = runtime.create_instance(clip(2.0), &params).expect("created");
    runtime.update(0.0);
    // A fresh blend-in at zero weight must not be reaped.
    assert!(runtime.contains(h));
    assert!(runtime.is_blending(h));
    runtime.update(0.6);
    assert!(!runtime.is_blending(h));
}

// ============================================================================
// Live Parameters
// ============================================================================

#[test]
fn live_setters_apply() {
    let mut runtime = MotionRuntime::new();
    let h = runtime
        .create_instance(clip(4.0), &PlaybackParams::default())
        .expect("created");

    runtime.set_play_speed(h, 2.0);
    runtime.set_mirror(h, true);
    runtime.set_retargeting(h, true);
    runtime.set_max_loops(h, LoopCount::Forever);
    runtime.update(1.0);
    assert_eq!(runtime.current_time(h), Some(2.0));

    runtime.set_current_time(h, 3.0);
    runtime.set_play_mode(h, PlayMode::Backward);
    runtime.update(0.5);
    assert!(approx(runtime.current_time(h).unwrap_or_default(), 2.0));

    runtime.set_current_time(h, 10.0);
    assert_eq!(runtime.current_time(h), Some(4.0));

    let inst = runtime.instance(h).expect("alive");
    assert!(inst.mirror);
    assert!(inst.retarget);
    assert_eq!(inst.max_loops, LoopCount::Forever);
}

#[test]
fn actor_exposes_optional_motion_system() {
    let actor = ActorInstance::<MotionRuntime>::without_motion_system("prop").into_shared();
    assert!(actor.lock().motion_system().is_none());

    actor.lock().motion_system = Some(MotionRuntime::new());
    assert!(actor.lock().motion_system().is_some_and(MotionRuntime::is_empty));
}
