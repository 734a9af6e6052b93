//! Arrangement Tests
//!
//! Tests for:
//! - Transformer effects (Rotate, Move, custom kinds) at tween 0, 1 and between
//! - Tween curves (Linear, ease family, CubicBezier, Custom)
//! - Arrange: fold order, emission, idempotence, no mutation of stored state
//! - Squash: in-order commit, blocking by active transforms, equivalence
//!   with plain evaluation
//! - Install, retire and cancel of single transforms

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Affine2, UVec2, Vec2};
use slotmap::SlotMap;
use sprite_arrange::animation::{Arrangement, Move, Rotate, Transform, Transformer, Tween};
use sprite_arrange::engine::{SpriteEngine, SubTexture, TextureKey};
use sprite_arrange::scene::NodeHandle;
use sprite_arrange::utils::Time;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec2_approx(a: Vec2, b: Vec2) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y)
}

#[derive(Default)]
struct RecordingEngine {
    textures: Vec<(NodeHandle, Time, Option<SubTexture>)>,
    transforms: Vec<(NodeHandle, Time, Affine2)>,
}

impl SpriteEngine for RecordingEngine {
    fn set_texture(&mut self, node: NodeHandle, t: Time, texture: Option<SubTexture>) {
        self.textures.push((node, t, texture));
    }

    fn set_transform(&mut self, node: NodeHandle, t: Time, affine: Affine2) {
        self.transforms.push((node, t, affine));
    }
}

fn node_handle() -> NodeHandle {
    let mut nodes: SlotMap<NodeHandle, ()> = SlotMap::with_key();
    nodes.insert(())
}

fn texture() -> SubTexture {
    let mut textures: SlotMap<TextureKey, ()> = SlotMap::with_key();
    SubTexture::new(textures.insert(()), UVec2::ZERO, UVec2::new(24, 31))
}

// ============================================================================
// Transformers
// ============================================================================

#[test]
fn move_full_tween_shifts_offset_exactly() {
    let mut ar = Arrangement::new().with_offset(3.0, -7.0);
    Move::new(10.0, 20.0).transform(&mut ar, 1.0);
    assert_eq!(ar.offset, Vec2::new(13.0, 13.0));
}

#[test]
fn move_zero_tween_is_noop() {
    let mut ar = Arrangement::new().with_offset(3.0, -7.0);
    Move::new(10.0, 20.0).transform(&mut ar, 0.0);
    assert_eq!(ar.offset, Vec2::new(3.0, -7.0));
}

#[test]
fn move_over_full_window_changes_offset_by_delta() {
    let ar = Arrangement::new()
        .with_offset(1.0, 1.0)
        .with_transform(Transform::new(0, 60, Move::new(5.0, -2.0)));

    assert_eq!(ar.evaluate(0).offset, Vec2::new(1.0, 1.0));
    assert!(vec2_approx(ar.evaluate(30).offset, Vec2::new(3.5, 0.0)));
    assert_eq!(ar.evaluate(60).offset, Vec2::new(6.0, -1.0));
    assert_eq!(ar.evaluate(1000).offset, Vec2::new(6.0, -1.0));
}

#[test]
fn rotate_interpolates_linearly() {
    let mut ar = Arrangement::new();
    Rotate(FRAC_PI_2).transform(&mut ar, 0.5);
    assert!(approx(ar.rotation, FRAC_PI_4));
    Rotate(FRAC_PI_2).transform(&mut ar, 0.0);
    assert!(approx(ar.rotation, FRAC_PI_4));
}

#[test]
fn move_display() {
    assert_eq!(Move::new(1.5, -2.0).to_string(), "Move(1.5,-2)");
}

#[derive(Debug)]
struct Grow(f32);

impl Transformer for Grow {
    fn transform(&self, ar: &mut Arrangement, tween: f32) {
        if let Some(size) = ar.size.as_mut() {
            *size += Vec2::splat(self.0 * tween);
        }
    }
}

#[test]
fn custom_transformer_plugs_in() {
    let ar = Arrangement::new()
        .with_size(10.0, 10.0)
        .with_transform(Transform::new(0, 10, Grow(4.0)));
    assert_eq!(ar.evaluate(5).size, Some(Vec2::splat(12.0)));
    assert_eq!(ar.evaluate(10).size, Some(Vec2::splat(14.0)));
}

// ============================================================================
// Transform & Tween
// ============================================================================

#[test]
fn transform_reversed_window_is_ordered() {
    let tr = Transform::new(10, 2, Rotate(1.0));
    assert_eq!((tr.t0(), tr.t1()), (2, 10));
}

#[test]
fn tween_linear_clamps() {
    let tween = Tween::Linear;
    assert_eq!(tween.sample(10, 20, 0), 0.0);
    assert_eq!(tween.sample(10, 20, 10), 0.0);
    assert!(approx(tween.sample(10, 20, 15), 0.5));
    assert_eq!(tween.sample(10, 20, 20), 1.0);
    assert_eq!(tween.sample(10, 20, 99), 1.0);
}

#[test]
fn tween_zero_length_window_is_a_step() {
    for tween in [Tween::Linear, Tween::EaseIn, Tween::EaseOut, Tween::EaseInOut] {
        assert_eq!(tween.sample(5, 5, 4), 0.0);
        assert_eq!(tween.sample(5, 5, 5), 1.0);
    }
}

#[test]
fn tween_ease_curves_stay_in_range_and_are_monotonic() {
    for tween in [Tween::EaseIn, Tween::EaseOut, Tween::EaseInOut] {
        let mut last = 0.0;
        for t in 0..=100 {
            let v = tween.sample(0, 100, t);
            assert!((0.0..=1.0).contains(&v), "{tween:?} at {t}: {v}");
            assert!(v + 1e-4 >= last, "{tween:?} not monotonic at {t}");
            last = v;
        }
        assert_eq!(tween.sample(0, 100, 0), 0.0);
        assert_eq!(tween.sample(0, 100, 100), 1.0);
    }
}

#[test]
fn tween_ease_shapes() {
    // ease-in starts slow, ease-out starts fast, ease-in-out is symmetric.
    assert!(Tween::EaseIn.sample(0, 100, 25) < 0.25);
    assert!(Tween::EaseOut.sample(0, 100, 25) > 0.25);
    assert!((Tween::EaseInOut.sample(0, 100, 50) - 0.5).abs() < 1e-3);
}

#[test]
fn tween_cubic_bezier_diagonal_is_linear() {
    let tween = Tween::CubicBezier {
        x0: 0.25,
        y0: 0.25,
        x1: 0.75,
        y1: 0.75,
    };
    for t in 0..=20 {
        let v = tween.sample(0, 20, t);
        assert!((v - t as f32 / 20.0).abs() < 1e-3, "t={t} v={v}");
    }
}

#[test]
fn tween_custom_function() {
    fn half(_t0: Time, _t1: Time, _t: Time) -> f32 {
        0.5
    }
    let ar = Arrangement::new().with_transform(Transform::new(0, 10, Move::new(8.0, 0.0)).with_tween(Tween::Custom(half)));
    assert_eq!(ar.evaluate(100).offset, Vec2::new(4.0, 0.0));
}

// ============================================================================
// Arrange
// ============================================================================

#[test]
fn arrange_emits_texture_and_affine() {
    let node = node_handle();
    let tex = texture();
    let ar = Arrangement::new().with_offset(5.0, 6.0).with_texture(tex);

    let mut engine = RecordingEngine::default();
    ar.arrange(&mut engine, node, 42);

    assert_eq!(engine.textures, vec![(node, 42, Some(tex))]);
    assert_eq!(engine.transforms.len(), 1);
    assert_eq!(engine.transforms[0].0, node);
    assert_eq!(engine.transforms[0].1, 42);
    assert_eq!(engine.transforms[0].2, Affine2::from_translation(Vec2::new(5.0, 6.0)));
}

#[test]
fn arrange_folds_transforms_in_order() {
    // Move then Rotate: both accumulate onto the same scratch pose.
    let ar = Arrangement::new()
        .with_pivot(1.0, 1.0)
        .with_transform(Transform::new(0, 10, Move::new(10.0, 0.0)))
        .with_transform(Transform::new(0, 10, Rotate(FRAC_PI_2)))
        .with_transform(Transform::new(0, 10, Move::new(0.0, 4.0)));

    let pose = ar.evaluate(5);
    assert!(vec2_approx(pose.offset, Vec2::new(5.0, 2.0)));
    assert!(approx(pose.rotation, FRAC_PI_4));

    let mut engine = RecordingEngine::default();
    ar.arrange(&mut engine, node_handle(), 5);
    assert_eq!(engine.transforms[0].2, pose.affine());
}

#[test]
fn arrange_does_not_mutate_stored_state() {
    let ar = Arrangement::new()
        .with_offset(1.0, 2.0)
        .with_transform(Transform::new(0, 10, Move::new(10.0, 0.0)))
        .with_transform(Transform::new(0, 10, Rotate(1.0)));

    let mut engine = RecordingEngine::default();
    ar.arrange(&mut engine, node_handle(), 10);

    assert_eq!(ar.offset, Vec2::new(1.0, 2.0));
    assert_eq!(ar.rotation, 0.0);
    assert_eq!(ar.transforms.len(), 2);
}

#[test]
fn arrange_twice_is_bit_identical() {
    let node = node_handle();
    let ar = Arrangement::new()
        .with_offset(3.3, 1.7)
        .with_pivot(0.5, 0.5)
        .with_size(36.0, 36.0)
        .with_rotation(0.1)
        .with_transform(Transform::new(0, 37, Rotate(2.9)).with_tween(Tween::EaseInOut))
        .with_transform(Transform::new(3, 91, Move::new(-17.3, 9.1)).with_tween(Tween::EaseOut));

    let mut engine = RecordingEngine::default();
    ar.arrange(&mut engine, node, 29);
    ar.arrange(&mut engine, node, 29);

    let a = engine.transforms[0].2;
    let b = engine.transforms[1].2;
    assert_eq!(a.to_cols_array(), b.to_cols_array());
}

#[test]
fn arrange_out_of_order_times_are_independent() {
    let ar = Arrangement::new().with_transform(Transform::new(0, 100, Move::new(100.0, 0.0)));
    let late = ar.evaluate(80);
    let early = ar.evaluate(20);
    assert!(approx(late.offset.x, 80.0));
    assert!(approx(early.offset.x, 20.0));
}

// ============================================================================
// Squash
// ============================================================================

#[test]
fn squash_commits_expired_prefix_in_order() {
    let mut ar = Arrangement::new()
        .with_transform(Transform::new(0, 3, Move::new(1.0, 0.0)))
        .with_transform(Transform::new(0, 10, Move::new(0.0, 1.0)));

    assert_eq!(ar.squash(15), 2);
    assert!(ar.transforms.is_empty());
    assert_eq!(ar.offset, Vec2::new(1.0, 1.0));
}

#[test]
fn squash_stops_at_first_active_transform() {
    // B has already expired but sits behind the still-running A.
    let mut ar = Arrangement::new()
        .with_transform(Transform::new(0, 10, Move::new(1.0, 0.0)))
        .with_transform(Transform::new(0, 3, Rotate(1.0)));

    assert_eq!(ar.squash(5), 0);
    assert_eq!(ar.transforms.len(), 2);
    assert_eq!(ar.rotation, 0.0);
    assert_eq!(ar.offset, Vec2::ZERO);

    // Once A expires, both go, A first.
    assert_eq!(ar.squash(15), 2);
    assert_eq!(ar.offset, Vec2::new(1.0, 0.0));
    assert_eq!(ar.rotation, 1.0);
}

#[test]
fn squash_keeps_remaining_order() {
    let mut ar = Arrangement::new()
        .with_transform(Transform::new(0, 2, Move::new(1.0, 0.0)))
        .with_transform(Transform::new(0, 50, Move::new(2.0, 0.0)))
        .with_transform(Transform::new(0, 1, Move::new(3.0, 0.0)))
        .with_transform(Transform::new(0, 60, Move::new(4.0, 0.0)));

    assert_eq!(ar.squash(10), 1);
    let remaining: Vec<Time> = ar.transforms.iter().map(Transform::t1).collect();
    assert_eq!(remaining, vec![50, 1, 60]);
}

#[test]
fn squash_window_end_is_inclusive() {
    let mut ar = Arrangement::new().with_transform(Transform::new(0, 10, Move::new(1.0, 0.0)));
    assert_eq!(ar.squash(9), 0);
    assert_eq!(ar.squash(10), 1);
}

#[test]
fn squash_then_arrange_matches_arrange_alone() {
    let build = || {
        Arrangement::new()
            .with_offset(0.3, 0.7)
            .with_pivot(12.0, 12.0)
            .with_size(24.0, 24.0)
            .with_transform(Transform::new(0, 7, Move::new(1.1, 2.2)).with_tween(Tween::EaseIn))
            .with_transform(Transform::new(2, 9, Rotate(0.37)))
            .with_transform(Transform::new(4, 40, Move::new(-9.0, 3.3)).with_tween(Tween::EaseInOut))
            .with_transform(Transform::new(5, 6, Rotate(-1.2)))
    };

    let node = node_handle();
    for now in [0, 3, 7, 8, 9, 20, 40, 41] {
        let reference = build();
        let mut squashed = build();
        squashed.squash(now);

        let mut engine = RecordingEngine::default();
        reference.arrange(&mut engine, node, now);
        squashed.arrange(&mut engine, node, now);
        assert_eq!(engine.transforms[0].2, engine.transforms[1].2, "now={now}");
    }
}

#[test]
fn install_commits_expired_predecessor() {
    let fall = Transform::new(0, 60, Move::new(0.0, 100.0));
    let mut ar = Arrangement::new().with_transform(fall.clone());
    ar.install(Transform::new(60, 60, Move::new(0.0, -100.0)), Some(&fall), 60);

    assert_eq!(ar.transforms.len(), 1);
    assert_eq!(ar.offset, Vec2::new(0.0, 100.0));
    assert_eq!(ar.evaluate(60).offset, Vec2::ZERO);
}

#[test]
fn install_leaves_unrelated_expired_transforms_queued() {
    let spin = Transform::new(0, 10, Rotate(1.0));
    let mut ar = Arrangement::new()
        .with_transform(Transform::new(0, 5, Move::new(2.0, 0.0)))
        .with_transform(spin.clone());

    ar.install(Transform::new(10, 20, Rotate(1.0)), Some(&spin), 10);

    assert_eq!(ar.transforms.len(), 2);
    assert_eq!(ar.offset, Vec2::ZERO);
    assert!(approx(ar.rotation, 1.0));
    assert_eq!(ar.evaluate(10).offset, Vec2::new(2.0, 0.0));
}

#[test]
fn retire_commits_running_transform_at_current_tween() {
    let long = Transform::new(0, 500, Rotate(1.0));
    let mut ar = Arrangement::new().with_transform(long.clone());

    assert!(ar.retire(&long, 100));
    assert!(ar.transforms.is_empty());
    assert!(approx(ar.rotation, 0.2));
    assert!(!ar.retire(&long, 200));
}

#[test]
fn retire_matches_the_scheduled_instance() {
    // Same transformer rescheduled: only the matching window is retired.
    let template = Transform::template(Move::new(4.0, 0.0));
    let first = template.rescheduled(0, 10);
    let second = template.rescheduled(10, 20);
    let mut ar = Arrangement::new()
        .with_transform(first.clone())
        .with_transform(second.clone());

    assert!(ar.retire(&second, 15));
    assert_eq!(ar.transforms.len(), 1);
    assert!(ar.transforms[0].same_as(&first));
    assert_eq!(ar.offset, Vec2::new(2.0, 0.0));
}

#[test]
fn cancel_removes_without_effect() {
    let fall = Transform::new(0, 100, Move::new(0.0, 50.0));
    let mut ar = Arrangement::new().with_offset(1.0, 1.0).with_transform(fall.clone());

    assert!(ar.cancel(&fall));
    assert!(ar.transforms.is_empty());
    assert_eq!(ar.evaluate(50).offset, Vec2::new(1.0, 1.0));
    assert!(!ar.cancel(&fall));
}

#[test]
fn is_animating_tracks_windows() {
    let ar = Arrangement::new().with_transform(Transform::new(0, 10, Rotate(1.0)));
    assert!(ar.is_animating(5));
    assert!(!ar.is_animating(10));
}
