//! Headless demo session: a 3x3 clickable board and a touchable pet,
//! both driven by a gesture-controlled hand cursor.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use tracing::{debug, info, warn};

use handcast_anim::{AnimationBackend, CuePlayer, CueSet, TouchOutcome};
use handcast_board::{BoardGame, BoardTiming, SelectResult, TickEvent};
use handcast_camera::Camera;
use handcast_core::{scoped_rng, ticks_for_seconds, FrameTick, TICKS_PER_SECOND};
use handcast_input::{CursorFilter, GestureDetector, HandTracker};
use handcast_interact::{
    Capability, ClickDispatcher, ControlRegistry, InteractionMap, TouchProbe,
};
use handcast_physics::{Aabb, Ray, Sphere};
use handcast_scene::{ColliderShape, EntityId, LayerMask, Scene};
use handcast_testkit::{EventRecord, HandStep, JsonlSink, ScriptedHand};

use crate::config::HandcastConfig;

/// Distance from the camera to the board plane.
const BOARD_DEPTH: f32 = 3.0;
/// Center-to-center spacing of board cells.
const CELL_SPACING: f32 = 0.7;
/// Edge length of a cell's clickable face.
const CELL_SIZE: f32 = 0.6;
/// Pet reference point in world space.
const PET_POSITION: Vec3 = Vec3::new(3.5, -1.2, 0.0);
/// Ticks a demo animation cue takes to complete.
const CUE_DURATION_TICKS: u64 = 45;

/// Minimal animation backend for the headless demo: one tick of
/// transition latency, then linear progress over a fixed duration.
#[derive(Debug, Default)]
pub struct DemoAnimator {
    pending: Option<String>,
    active: Option<String>,
    elapsed: u64,
}

impl DemoAnimator {
    /// Advance playback by one tick.
    pub fn tick(&mut self) {
        if let Some(cue) = self.pending.take() {
            self.active = Some(cue);
            self.elapsed = 0;
        } else if self.active.is_some() {
            self.elapsed += 1;
        }
    }
}

impl AnimationBackend for DemoAnimator {
    fn play(&mut self, cue: &str) {
        self.pending = Some(cue.to_owned());
    }

    fn active_cue(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn progress(&self) -> f32 {
        if self.active.is_some() {
            self.elapsed as f32 / CUE_DURATION_TICKS as f32
        } else {
            0.0
        }
    }
}

/// World position of a board cell (row-major from the top-left).
fn cell_position(index: usize) -> Vec3 {
    let row = (index / 3) as f32;
    let col = (index % 3) as f32;
    Vec3::new(
        BOARD_DEPTH,
        CELL_SPACING * (1.0 - row),
        CELL_SPACING * (col - 1.0),
    )
}

/// Session statistics reported at the end of a run.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionStats {
    /// Clicks that reached a UI control.
    pub clicks_handled: u32,
    /// Clicks that struck nothing interactive.
    pub clicks_missed: u32,
    /// Touches that reached the pet.
    pub touches: u32,
    /// Animation cues that ran to completion.
    pub cues_completed: u32,
}

pub struct DemoSession {
    config: HandcastConfig,
    camera: Camera,
    scene: Scene,
    map: InteractionMap,
    controls: ControlRegistry,
    dispatcher: ClickDispatcher,
    board: Rc<RefCell<BoardGame>>,
    selections: Rc<RefCell<Vec<(usize, SelectResult)>>>,
    pet: EntityId,
    probe: TouchProbe,
    cue_player: CuePlayer,
    animator: DemoAnimator,
    detector: GestureDetector,
    cursor: CursorFilter,
    last_hand: Option<Vec3>,
    tick: FrameTick,
    stats: SessionStats,
}

impl DemoSession {
    /// Build the demo world from `config`, seeding cue selection with `seed`.
    pub fn new(config: HandcastConfig, seed: u64) -> Self {
        let camera = Camera::default();
        let mut scene = Scene::new();
        let mut map = InteractionMap::new();
        let mut controls = ControlRegistry::new();

        let board = Rc::new(RefCell::new(BoardGame::new(BoardTiming {
            turn_switch_ticks: ticks_for_seconds(config.turn_delay_seconds),
            reset_ticks: ticks_for_seconds(config.reset_delay_seconds),
        })));
        let selections: Rc<RefCell<Vec<(usize, SelectResult)>>> =
            Rc::new(RefCell::new(Vec::new()));

        // Nine clickable cells facing the camera
        for index in 0..9 {
            let position = cell_position(index);
            let cell = scene.spawn(position);
            scene.set_collider(
                cell,
                ColliderShape::Aabb(Aabb::from_center_size(
                    position,
                    Vec3::new(0.1, CELL_SIZE, CELL_SIZE),
                )),
                LayerMask::UI,
            );
            let control = index as u32;
            map.register(cell, Capability::UiControl { control });

            let board_ref = Rc::clone(&board);
            let selections_ref = Rc::clone(&selections);
            controls.register(
                control,
                Box::new(move |_event| {
                    let result = board_ref.borrow_mut().select_cell(index);
                    selections_ref.borrow_mut().push((index, result));
                }),
            );
        }

        // The pet: reference point on the parent, collider on a child
        let pet = scene.spawn(PET_POSITION);
        let body = scene.spawn_child(pet, PET_POSITION + Vec3::new(0.0, 0.1, 0.0));
        scene.set_collider(
            body,
            ColliderShape::Sphere(Sphere::new(
                PET_POSITION + Vec3::new(0.0, 0.1, 0.0),
                0.35,
            )),
            LayerMask::TOUCHABLE,
        );

        let probe = if config.proximity_fallback {
            TouchProbe::new(pet).with_proximity_fallback(config.fallback_distance)
        } else {
            TouchProbe::new(pet)
        };

        let cue_player = CuePlayer::new(
            CueSet::new(config.pet_cues.clone()),
            scoped_rng(seed, pet.0),
        );

        let cursor_start = camera.position + camera.forward() * config.cursor_depth;
        let cursor = CursorFilter::new(cursor_start, config.cursor_smoothing, config.cursor_depth);

        Self {
            config,
            camera,
            scene,
            map,
            controls,
            dispatcher: ClickDispatcher::new(),
            board,
            selections,
            pet,
            probe,
            cue_player,
            animator: DemoAnimator::default(),
            detector: GestureDetector::new(),
            cursor,
            last_hand: None,
            tick: FrameTick::ZERO,
            stats: SessionStats::default(),
        }
    }

    /// Current board status text.
    pub fn status(&self) -> String {
        self.board.borrow().status_line()
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Run the session for `ticks` frames.
    pub fn run(
        &mut self,
        tracker: &mut dyn HandTracker,
        ticks: u64,
        sink: &mut Option<JsonlSink>,
    ) -> Result<()> {
        for _ in 0..ticks {
            self.step(tracker, sink);
        }
        let stats = self.stats();
        info!(
            clicks = stats.clicks_handled,
            misses = stats.clicks_missed,
            touches = stats.touches,
            cues = stats.cues_completed,
            "session finished: {}",
            self.status().replace('\n', "  ")
        );
        Ok(())
    }

    /// Advance the session by one frame.
    pub fn step(&mut self, tracker: &mut dyn HandTracker, sink: &mut Option<JsonlSink>) {
        self.tick = self.tick.advance(1);
        let dt = 1.0 / TICKS_PER_SECOND as f32;

        match tracker.sample() {
            Some(frame) => {
                self.cursor.update(
                    &self.camera,
                    self.config.screen_size(),
                    frame.position,
                    dt,
                );
                self.last_hand = Some(frame.position);
                if self.detector.hand_just_closed(frame.grip) {
                    self.perform_click(sink);
                    self.touch_pet(sink);
                }
            }
            None => {
                // Tracking lost; a later close must re-arm from scratch
                self.detector.clear();
            }
        }

        self.animator.tick();
        if self.cue_player.is_playing() && self.cue_player.poll(&self.animator) {
            self.stats.cues_completed += 1;
            self.record(sink, "CueFinished", "");
        }

        let events = self.board.borrow_mut().tick();
        for event in events {
            match event {
                TickEvent::TurnSwitched(player) => {
                    self.record(sink, "TurnSwitched", &player.to_string());
                }
                TickEvent::BoardCleared => {
                    self.record(sink, "BoardCleared", "");
                }
            }
            info!("{}", self.status().replace('\n', "  "));
        }

        let selections: Vec<(usize, SelectResult)> =
            self.selections.borrow_mut().drain(..).collect();
        for (index, result) in selections {
            self.record(sink, "CellSelected", &format!("{index}:{result:?}"));
        }
    }

    /// Cast the click ray from the cursor away from the camera and
    /// dispatch the nearest interactive hit.
    fn perform_click(&mut self, sink: &mut Option<JsonlSink>) {
        let cursor = self.cursor.position();
        let away = match (cursor - self.camera.position).try_normalize() {
            Some(direction) => direction,
            None => {
                debug!("cursor sits on the camera; click skipped");
                return;
            }
        };
        let ray = match Ray::new(cursor, away, self.config.click_ray_distance) {
            Ok(ray) => ray,
            Err(err) => {
                warn!("click ray rejected: {err}");
                return;
            }
        };

        let hits = self.scene.cast(&ray, LayerMask::UI);
        match self.dispatcher.dispatch(
            &hits,
            &self.map,
            &self.camera,
            self.config.screen_size(),
        ) {
            Some(outcome) => {
                self.stats.clicks_handled += 1;
                if self.config.log_interactions {
                    info!(entity = outcome.entity.0, control = outcome.control, "click handled");
                }
                self.controls.invoke(&outcome);
            }
            None => {
                self.stats.clicks_missed += 1;
                if self.config.log_interactions {
                    info!(hits = hits.len(), "click hit nothing interactive");
                }
                self.record(sink, "ClickMissed", "");
            }
        }
    }

    /// Cast the touch ray from the hand along the view direction and
    /// probe the pet.
    fn touch_pet(&mut self, sink: &mut Option<JsonlSink>) {
        let Some(hand) = self.last_hand else {
            return;
        };
        let ray = match Ray::new(hand, self.camera.forward(), self.config.touch_ray_distance) {
            Ok(ray) => ray,
            Err(err) => {
                warn!("touch ray rejected: {err}");
                return;
            }
        };

        let hits = self.scene.cast(&ray, LayerMask::TOUCHABLE);
        let result = self.probe.probe(&self.scene, &hits, &ray);
        if !result.touched() {
            return;
        }

        self.stats.touches += 1;
        if self.config.log_interactions {
            info!(pet = self.pet.0, ?result, "pet touched");
        }
        match self.cue_player.touch(Some(&mut self.animator)) {
            TouchOutcome::Started { cue } => {
                self.record(sink, "CueStarted", &cue);
            }
            TouchOutcome::Busy => {
                self.record(sink, "TouchDropped", "busy");
            }
            TouchOutcome::NothingToAnimate => {
                self.record(sink, "TouchNoop", "");
            }
        }
    }

    fn record(&self, sink: &mut Option<JsonlSink>, kind: &str, payload: &str) {
        if let Some(sink) = sink {
            if let Err(err) = sink.write(&EventRecord {
                tick: self.tick,
                kind,
                payload,
            }) {
                warn!("event log write failed: {err}");
            }
        }
    }
}

/// Built-in script: X takes the top row across the turn pauses, then
/// the hand drops down and pets the dog.
pub fn default_script(config: &HandcastConfig) -> ScriptedHand {
    let mut steps = Vec::new();
    let settle = ticks_for_seconds(config.turn_delay_seconds) + 40;

    // Cursor targets sit on the camera-to-cell line at the cursor depth
    let scale = config.cursor_depth / BOARD_DEPTH;
    for (i, &cell) in [0usize, 4, 1, 5, 2].iter().enumerate() {
        let target = cell_position(cell) * scale;
        steps.push(HandStep {
            duration_ticks: if i == 0 { 60 } else { settle },
            x: target.x,
            y: target.y,
            z: target.z,
            closed: false,
            tracked: true,
        });
        steps.push(HandStep {
            duration_ticks: 2,
            x: target.x,
            y: target.y,
            z: target.z,
            closed: true,
            tracked: true,
        });
    }

    // Reach toward the pet and close the hand once
    let reach = Vec3::new(1.0, PET_POSITION.y, PET_POSITION.z);
    steps.push(HandStep {
        duration_ticks: settle,
        x: reach.x,
        y: reach.y,
        z: reach.z,
        closed: false,
        tracked: true,
    });
    steps.push(HandStep {
        duration_ticks: 2,
        x: reach.x,
        y: reach.y,
        z: reach.z,
        closed: true,
        tracked: true,
    });
    steps.push(HandStep {
        duration_ticks: CUE_DURATION_TICKS + 20,
        x: reach.x,
        y: reach.y,
        z: reach.z,
        closed: false,
        tracked: true,
    });

    ScriptedHand::from_steps(steps)
}
