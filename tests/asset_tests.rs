//! Asset Loading Tests
//!
//! Tests for:
//! - MotionAssetServer inline and background loading
//! - Request deduplication, reload, release
//! - Failure reporting (source failures, invalid data)
//! - Blocking loads and the duration tooling query
//! - AssetSubscriptions connect/disconnect filtering
//! - MultiMotionConfig JSON round trip and rejection of unknown fields

mod common;

use std::sync::Arc;
use std::time::Duration;

use multi_motion::assets::{
    AssetEvent, AssetId, AssetLoader, AssetSubscriptions, LoadPolicy, LoadStatus, MemorySource,
    MotionAssetServer, MotionData,
};
use multi_motion::errors::MotionError;
use multi_motion::tools::{FALLBACK_DURATION, asset_duration};
use multi_motion::{BlendMode, MultiMotionConfig};

use common::{init_logger, inline_server};

fn listen(server: &MotionAssetServer) -> flume::Receiver<AssetEvent> {
    let (tx, rx) = flume::unbounded();
    server.add_listener(tx);
    rx
}

// ============================================================================
// Inline Loading
// ============================================================================

#[test]
fn inline_load_completes_and_notifies() {
    init_logger();
    let (source, server) = inline_server();
    let id = source.register("walk", 1.5);
    let rx = listen(&server);

    server.request_load(id);

    assert_eq!(server.status(id), LoadStatus::Ready);
    let data = server.get(id).expect("loaded");
    assert_eq!(data.name, "walk");
    assert!((data.duration - 1.5).abs() < f32::EPSILON);
    assert_eq!(rx.try_recv().ok(), Some(AssetEvent::Ready(id)));
    assert!(rx.try_recv().is_err());
}

#[test]
fn duplicate_requests_are_deduplicated() {
    let (source, server) = inline_server();
    let id = source.register("idle", 2.0);
    let rx = listen(&server);

    server.request_load(id);
    server.request_load(id);
    server.request_load(id);

    assert_eq!(server.requests_issued(), 1);
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn invalid_id_is_never_requested() {
    let (_source, server) = inline_server();
    server.request_load(AssetId::INVALID);
    assert_eq!(server.requests_issued(), 0);
    assert_eq!(server.status(AssetId::INVALID), LoadStatus::Unbound);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn source_failure_reports_hint() {
    init_logger();
    let (source, server) = inline_server();
    let id = AssetId::from_name("broken");
    source.insert_failure(id, "corrupt header");
    let rx = listen(&server);

    server.request_load(id);

    assert_eq!(server.status(id), LoadStatus::Error);
    assert!(server.get(id).is_none());
    let hint = server.error_hint(id).expect("hint");
    assert!(hint.contains("corrupt header"), "unexpected hint: {hint}");

    match rx.try_recv() {
        Ok(AssetEvent::Failed { id: failed, hint }) => {
            assert_eq!(failed, id);
            assert!(hint.contains("corrupt header"));
        }
        other => panic!("expected Failed event, got {other:?}"),
    }
}

#[test]
fn missing_asset_fails() {
    let (_source, server) = inline_server();
    let id = AssetId::from_name("nowhere");
    server.request_load(id);
    assert_eq!(server.status(id), LoadStatus::Error);
}

#[test]
fn negative_duration_is_rejected() {
    let (source, server) = inline_server();
    let id = AssetId::from_name("bad");
    source.insert(id, MotionData::new("bad", -1.0));

    server.request_load(id);

    assert_eq!(server.status(id), LoadStatus::Error);
    let hint = server.error_hint(id).unwrap_or_default();
    assert!(hint.contains("duration"), "unexpected hint: {hint}");
}

// ============================================================================
// Reload & Release
// ============================================================================

#[test]
fn reload_broadcasts_reloaded_with_fresh_data() {
    let (source, server) = inline_server();
    let id = source.register("run", 1.0);
    server.request_load(id);
    let rx = listen(&server);

    source.insert(id, MotionData::new("run", 3.0));
    server.reload(id);

    assert_eq!(rx.try_recv().ok(), Some(AssetEvent::Reloaded(id)));
    assert_eq!(server.requests_issued(), 2);
    let data = server.get(id).expect("reloaded");
    assert!((data.duration - 3.0).abs() < f32::EPSILON);
}

#[test]
fn release_forgets_asset_but_holders_keep_data() {
    let (source, server) = inline_server();
    let id = source.register("jump", 0.8);
    server.request_load(id);
    let held = server.get(id).expect("loaded");
    assert_eq!(server.loaded_count(), 1);

    assert!(server.release(id));
    assert!(!server.release(id));
    assert_eq!(server.loaded_count(), 0);
    assert_eq!(server.status(id), LoadStatus::Unbound);
    assert_eq!(held.name, "jump");

    // A released asset can be requested again.
    server.request_load(id);
    assert_eq!(server.status(id), LoadStatus::Ready);
    assert_eq!(server.requests_issued(), 2);
}

// ============================================================================
// Background Loading
// ============================================================================

#[test]
fn background_load_completes_off_thread() {
    init_logger();
    let source = MemorySource::new().with_latency(Duration::from_millis(20));
    let id = source.register("swim", 4.0);
    let server = MotionAssetServer::new(source);
    assert_eq!(server.policy(), LoadPolicy::Background);
    let rx = listen(&server);

    server.request_load(id);
    // The request returns before the source has produced anything.
    assert_eq!(server.status(id), LoadStatus::Loading);

    let event = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("background load timed out");
    assert_eq!(event, AssetEvent::Ready(id));
    assert_eq!(server.status(id), LoadStatus::Ready);
}

#[test]
fn released_while_loading_is_silent() {
    let source = MemorySource::new().with_latency(Duration::from_millis(50));
    let id = source.register("climb", 1.0);
    let server = MotionAssetServer::new(source);
    let rx = listen(&server);

    server.request_load(id);
    assert!(server.release(id));

    assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    assert_eq!(server.status(id), LoadStatus::Unbound);
}

// ============================================================================
// Blocking Loads & Tooling
// ============================================================================

#[test]
fn blocking_load_does_not_populate_storage() -> anyhow::Result<()> {
    let (source, server) = inline_server();
    let id = source.register("wave", 2.5);

    let data = server.blocking_load(id)?;
    assert!((data.duration - 2.5).abs() < f32::EPSILON);
    assert_eq!(server.status(id), LoadStatus::Unbound);
    Ok(())
}

#[test]
fn blocking_load_of_unknown_asset_errors() {
    let (_source, server) = inline_server();
    let err = server
        .blocking_load(AssetId::from_name("ghost"))
        .expect_err("unknown asset");
    assert!(matches!(err, MotionError::AssetNotFound(_)));

    let err = server.blocking_load(AssetId::INVALID).expect_err("invalid id");
    assert!(matches!(err, MotionError::AssetNotFound(_)));
}

#[test]
fn asset_duration_falls_back_on_failure() {
    init_logger();
    let (source, server) = inline_server();
    let id = source.register("dance", 3.25);

    assert!((asset_duration(&*server, id) - 3.25).abs() < f32::EPSILON);
    let missing = asset_duration(&*server, AssetId::from_name("missing"));
    assert!((missing - FALLBACK_DURATION).abs() < f32::EPSILON);
}

// ============================================================================
// Subscriptions
// ============================================================================

#[test]
fn connecting_to_loaded_asset_queues_ready() {
    let (source, server) = inline_server();
    let id = source.register("bow", 1.0);
    server.request_load(id);

    let unloaded = source.register("curtsy", 1.0);

    let mut subs = AssetSubscriptions::new();
    subs.connect(id, &*server);
    subs.connect(unloaded, &*server);

    let mut events = Vec::new();
    subs.drain_into(&mut events);
    assert_eq!(events, vec![AssetEvent::Ready(id)]);

    server.request_load(unloaded);
    subs.drain_into(&mut events);
    assert_eq!(events, vec![AssetEvent::Ready(id), AssetEvent::Ready(unloaded)]);
}

#[test]
fn disconnected_ids_are_filtered() {
    let (source, server) = inline_server();
    let a = source.register("a", 1.0);
    let b = source.register("b", 1.0);

    let mut subs = AssetSubscriptions::new();
    subs.connect(a, &*server);
    subs.connect(b, &*server);
    server.request_load(a);
    server.request_load(b);
    subs.disconnect(a);

    let mut events = Vec::new();
    subs.drain_into(&mut events);
    assert_eq!(events, vec![AssetEvent::Ready(b)]);
    assert!(!subs.is_connected(a));
    assert_eq!(subs.connected_count(), 1);

    subs.disconnect_all();
    assert_eq!(subs.connected_count(), 0);
}

#[test]
fn disconnected_subscriptions_stop_queueing() {
    let (source, server) = inline_server();
    let walk = source.register("walk", 1.0);
    let mut subs = AssetSubscriptions::new();
    subs.connect(walk, &*server);
    subs.disconnect_all();

    for i in 0..50 {
        server.request_load(source.register(&format!("clip_{i}"), 1.0));
    }
    assert_eq!(subs.queued_count(), 0);

    // Reconnecting registers a fresh listener that sees new events.
    let run = source.register("run", 1.0);
    subs.connect(run, &*server);
    server.request_load(run);
    let mut events = Vec::new();
    subs.drain_into(&mut events);
    assert_eq!(events, vec![AssetEvent::Ready(run)]);
}

#[test]
fn server_clones_share_state() {
    let (source, server) = inline_server();
    let id = source.register("sit", 1.0);
    let clone: MotionAssetServer = (*server).clone();
    clone.request_load(id);
    assert_eq!(server.status(id), LoadStatus::Ready);
    assert_eq!(server.requests_issued(), 1);

    let shared: Arc<dyn AssetLoader> = server;
    assert!(shared.get(id).is_some());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn config_json_round_trip() -> anyhow::Result<()> {
    let json = r#"{
        "channels": [
            { "motion": "8c1c6ab8-3c3a-4e54-9c8e-6f0f5d7f1a11", "loop": true, "play_speed": 2.0 },
            { "blend_mode": "Overwrite", "play_on_activation": false }
        ]
    }"#;
    let config = MultiMotionConfig::from_json_str(json)?;
    assert_eq!(config.channels.len(), 2);

    let first = &config.channels[0];
    assert!(first.looping);
    assert!(first.motion.id().is_valid());
    assert!((first.play_speed - 2.0).abs() < f32::EPSILON);
    assert_eq!(first.blend_mode, BlendMode::Additive);
    assert!(first.freeze_at_last_frame);

    let second = &config.channels[1];
    assert_eq!(second.blend_mode, BlendMode::Overwrite);
    assert!(!second.play_on_activation);
    assert!(!second.motion.id().is_valid());

    let text = config.to_json_string()?;
    let back = MultiMotionConfig::from_reader(text.as_bytes())?;
    assert_eq!(back.channels[0].motion.id(), first.motion.id());
    assert!(back.channels[0].looping);
    Ok(())
}

#[test]
fn config_rejects_unknown_fields() {
    let err = MultiMotionConfig::from_json_str(r#"{ "channels": [ { "speed": 2.0 } ] }"#)
        .expect_err("unknown field");
    assert!(matches!(err, MotionError::JsonError(_)));
}
