//! End-to-end round: gesture clicks resolved through the scene and
//! dispatcher drive the board to a win, and scores survive the reset.

use glam::Vec3;
use handcast_board::{
    BoardGame, BoardTiming, Cell, IgnoreReason, Outcome, Phase, Player, SelectResult,
};
use handcast_camera::Camera;
use handcast_interact::{Capability, ClickDispatcher, InteractionMap};
use handcast_physics::{Aabb, Ray};
use handcast_scene::{ColliderShape, LayerMask, Scene};

const SCREEN: (u32, u32) = (1280, 720);

/// World position of a board cell (row-major from the top-left),
/// 3 units in front of a default camera looking down +X.
fn cell_position(index: usize) -> Vec3 {
    let row = (index / 3) as f32;
    let col = (index % 3) as f32;
    Vec3::new(3.0, 0.7 * (1.0 - row), 0.7 * (col - 1.0))
}

fn build_board_scene() -> (Scene, InteractionMap) {
    let mut scene = Scene::new();
    let mut map = InteractionMap::new();
    for index in 0..9 {
        let position = cell_position(index);
        let cell = scene.spawn(position);
        scene.set_collider(
            cell,
            ColliderShape::Aabb(Aabb::from_center_size(position, Vec3::new(0.1, 0.6, 0.6))),
            LayerMask::UI,
        );
        map.register(
            cell,
            Capability::UiControl {
                control: index as u32,
            },
        );
    }
    (scene, map)
}

/// Click toward a cell center; returns the control id that handled it.
fn click(
    scene: &Scene,
    map: &InteractionMap,
    dispatcher: &mut ClickDispatcher,
    camera: &Camera,
    cell: usize,
) -> Option<u32> {
    let direction = (cell_position(cell) - camera.position).normalize();
    let ray = Ray::new(camera.position, direction, 10.0).expect("valid click ray");
    let hits = scene.cast(&ray, LayerMask::UI);
    dispatcher
        .dispatch(&hits, map, camera, SCREEN)
        .map(|outcome| outcome.control)
}

#[test]
fn x_wins_top_row_and_scores_survive_the_reset() {
    let (scene, map) = build_board_scene();
    let camera = Camera::default();
    let mut dispatcher = ClickDispatcher::new();
    let mut game = BoardGame::new(BoardTiming::default());
    let pause = BoardTiming::default().turn_switch_ticks;

    assert_eq!(game.scores().wins_x, 0);

    // X:0, O:4, X:1, O:5, X:2 -> top row for X
    for (ply, &cell) in [0usize, 4, 1, 5, 2].iter().enumerate() {
        let control = click(&scene, &map, &mut dispatcher, &camera, cell)
            .expect("click resolves to a cell control");
        assert_eq!(control as usize, cell);

        let result = game.select_cell(control as usize);
        let SelectResult::Placed(placement) = result else {
            panic!("move {ply} rejected: {result:?}");
        };

        if ply < 4 {
            assert_eq!(placement.outcome, None);
            assert_eq!(game.phase(), Phase::AwaitingTurnSwitch);
            for _ in 0..pause {
                game.tick();
            }
            assert_eq!(game.phase(), Phase::Playing);
        } else {
            assert_eq!(placement.outcome, Some(Outcome::Won(Player::X)));
        }
    }

    assert_eq!(game.phase(), Phase::Over(Outcome::Won(Player::X)));
    assert_eq!(game.scores().wins_x, 1);
    assert_eq!(game.scores().wins_o, 0);

    // Input stays dead until the scheduled reset clears the board
    assert_eq!(
        game.select_cell(8),
        SelectResult::Ignored(IgnoreReason::RoundOver)
    );
    for _ in 0..BoardTiming::default().reset_ticks {
        game.tick();
    }
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.current_player(), Player::X);
    assert!(game.cells().iter().all(|c| *c == Cell::Empty));
    assert_eq!(game.scores().wins_x, 1);
    assert_eq!(game.scores().wins_o, 0);
}

#[test]
fn click_during_turn_pause_resolves_but_is_rejected_by_the_board() {
    let (scene, map) = build_board_scene();
    let camera = Camera::default();
    let mut dispatcher = ClickDispatcher::new();
    let mut game = BoardGame::new(BoardTiming::default());

    let first = click(&scene, &map, &mut dispatcher, &camera, 0).expect("first click");
    assert!(matches!(
        game.select_cell(first as usize),
        SelectResult::Placed(_)
    ));

    // The dispatcher still resolves the hit; the board ignores it
    let second = click(&scene, &map, &mut dispatcher, &camera, 1).expect("second click");
    assert_eq!(
        game.select_cell(second as usize),
        SelectResult::Ignored(IgnoreReason::TurnSwitchPending)
    );
    assert_eq!(game.cell(1), Cell::Empty);
}

#[test]
fn click_between_cells_hits_nothing() {
    let (scene, map) = build_board_scene();
    let camera = Camera::default();
    let mut dispatcher = ClickDispatcher::new();

    // Aim well below the grid
    let direction = (Vec3::new(3.0, -3.0, 0.0) - camera.position).normalize();
    let ray = Ray::new(camera.position, direction, 10.0).expect("valid ray");
    let hits = scene.cast(&ray, LayerMask::UI);

    assert!(dispatcher.dispatch(&hits, &map, &camera, SCREEN).is_none());
}
