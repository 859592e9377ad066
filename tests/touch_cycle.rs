//! Touch -> cue playback cycle across the crate boundaries: scene
//! probing feeds the cue player, which drives an animation backend.

use glam::Vec3;
use handcast_anim::{AnimationBackend, CuePlayer, CueSet, TouchOutcome};
use handcast_core::scoped_rng;
use handcast_interact::{TouchProbe, TouchResult};
use handcast_physics::{Ray, Sphere};
use handcast_scene::{ColliderShape, EntityId, LayerMask, Scene};

/// Backend with one tick of transition latency and linear progress.
#[derive(Default)]
struct StubAnimator {
    pending: Option<String>,
    active: Option<String>,
    elapsed: u32,
    duration: u32,
}

impl StubAnimator {
    fn new(duration: u32) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }

    fn tick(&mut self) {
        if let Some(cue) = self.pending.take() {
            self.active = Some(cue);
            self.elapsed = 0;
        } else if self.active.is_some() {
            self.elapsed += 1;
        }
    }
}

impl AnimationBackend for StubAnimator {
    fn play(&mut self, cue: &str) {
        self.pending = Some(cue.to_owned());
    }

    fn active_cue(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn progress(&self) -> f32 {
        self.elapsed as f32 / self.duration as f32
    }
}

fn pet_scene() -> (Scene, EntityId) {
    let mut scene = Scene::new();
    let pet = scene.spawn(Vec3::new(0.0, 0.0, 4.0));
    let body = scene.spawn_child(pet, Vec3::new(0.0, 0.1, 4.0));
    scene.set_collider(
        body,
        ColliderShape::Sphere(Sphere::new(Vec3::new(0.0, 0.1, 4.0), 0.35)),
        LayerMask::TOUCHABLE,
    );
    (scene, pet)
}

fn cues() -> Option<CueSet> {
    CueSet::new(vec!["wag_tail".into(), "bark".into(), "spin".into()])
}

#[test]
fn touched_pet_plays_one_cue_then_accepts_the_next_touch() {
    let (scene, pet) = pet_scene();
    let probe = TouchProbe::new(pet).with_proximity_fallback(0.5);
    let mut player = CuePlayer::new(cues(), scoped_rng(11, pet.0));
    let mut animator = StubAnimator::new(30);

    let ray = Ray::new(Vec3::ZERO, Vec3::Z, 5.0).expect("valid touch ray");
    let hits = scene.cast(&ray, LayerMask::TOUCHABLE);
    assert!(matches!(
        probe.probe(&scene, &hits, &ray),
        TouchResult::DirectHit { .. }
    ));

    let TouchOutcome::Started { cue: first } = player.touch(Some(&mut animator)) else {
        panic!("first touch should start a cue");
    };

    // A second touch mid-playback is dropped, not queued
    animator.tick();
    assert_eq!(player.touch(Some(&mut animator)), TouchOutcome::Busy);

    let mut polls = 0;
    while player.is_playing() {
        animator.tick();
        player.poll(&animator);
        polls += 1;
        assert!(polls < 200, "cue player must return to idle");
    }

    // Idle again: the next touch starts a different cue
    let TouchOutcome::Started { cue: second } = player.touch(Some(&mut animator)) else {
        panic!("second touch should start a cue");
    };
    assert_ne!(first, second, "immediate repeat should be avoided");
}

#[test]
fn collider_less_pet_is_reachable_through_the_fallback() {
    let mut scene = Scene::new();
    let pet = scene.spawn(Vec3::new(0.3, 0.0, 5.0));

    let probe = TouchProbe::new(pet).with_proximity_fallback(0.5);
    let mut player = CuePlayer::new(cues(), scoped_rng(11, pet.0));
    let mut animator = StubAnimator::new(30);

    let ray = Ray::new(Vec3::ZERO, Vec3::Z, 10.0).expect("valid touch ray");
    let hits = scene.cast(&ray, LayerMask::TOUCHABLE);
    assert!(hits.is_empty());

    // The ray passes 0.3 from the reference point, inside the threshold
    match probe.probe(&scene, &hits, &ray) {
        TouchResult::ProximityFallback { distance } => {
            assert!((distance - 0.3).abs() < 0.001);
        }
        other => panic!("expected fallback touch, got {other:?}"),
    }

    assert!(matches!(
        player.touch(Some(&mut animator)),
        TouchOutcome::Started { .. }
    ));
}
