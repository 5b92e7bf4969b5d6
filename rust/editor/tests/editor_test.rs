// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editing flows against a single facade wall: ghost placement, insert,
//! selection, dragging, swapping and deletion with wall restore.

use planwerk_assembly::{BuildingAssembler, LevelContext, WallKey};
use planwerk_editor::{
    EditorState, FixtureHit, HitTester, InteractiveEditor, WallHit, SURFACE_OFFSET_M,
};
use planwerk_geometry::{Point3, Vector3};
use planwerk_model::ModelAccessor;

const MODEL: &str = r#"{
    "Site": { "Building": {
        "Storeys": [
            { "Id": "s1", "Number": 1, "Elevation": 0.0 }
        ],
        "Elements": {
            "Walls": [
                {
                    "Id": "w1", "StoreyId": "s1", "Height": 2800.0,
                    "ElementTypeId": "et1", "WallPositionType": "Facade",
                    "LocationBinding": "Center",
                    "Location": {
                        "Start": { "X": 0.0, "Y": 0.0, "Z": 0.0 },
                        "End": { "X": 5000.0, "Y": 0.0, "Z": 0.0 }
                    }
                }
            ]
        }
    }},
    "Library": {
        "ElementTypes": [
            { "Id": "et1", "Layers": [ { "Thickness": 200.0 } ] }
        ],
        "Windows": [
            {
                "Id": "win1", "Name": "Fixed glazing",
                "Frames": [
                    {
                        "Geometry": {
                            "Profile": [
                                { "X": 0.0, "Y": 0.0, "Z": 0.0 },
                                { "X": 1200.0, "Y": 0.0, "Z": 0.0 },
                                { "X": 1200.0, "Y": 0.0, "Z": 1200.0 },
                                { "X": 0.0, "Y": 0.0, "Z": 1200.0 }
                            ],
                            "Thickness": 80.0,
                            "Direction": { "X": 0.0, "Y": 1.0, "Z": 0.0 },
                            "InnerProfiles": []
                        }
                    }
                ]
            },
            {
                "Id": "win2", "Name": "Narrow glazing",
                "Frames": [
                    {
                        "Geometry": {
                            "Profile": [
                                { "X": 0.0, "Y": 0.0, "Z": 0.0 },
                                { "X": 800.0, "Y": 0.0, "Z": 0.0 },
                                { "X": 800.0, "Y": 0.0, "Z": 1200.0 },
                                { "X": 0.0, "Y": 0.0, "Z": 1200.0 }
                            ],
                            "Thickness": 80.0,
                            "Direction": { "X": 0.0, "Y": 1.0, "Z": 0.0 },
                            "InnerProfiles": []
                        }
                    }
                ]
            }
        ]
    }
}"#;

#[derive(Default, Clone)]
struct Mock {
    walls: Vec<WallHit>,
    fixtures: Vec<FixtureHit>,
    plane: Option<Point3<f64>>,
}

impl HitTester for Mock {
    fn cast_walls(&self, _ctx: &LevelContext) -> Vec<WallHit> {
        self.walls.clone()
    }

    fn cast_fixtures(&self, _ctx: &LevelContext) -> Vec<FixtureHit> {
        self.fixtures.clone()
    }

    fn cast_plane(&self, _origin: Point3<f64>, _normal: Vector3<f64>) -> Option<Point3<f64>> {
        self.plane
    }
}

fn setup() -> (BuildingAssembler, LevelContext) {
    let model = ModelAccessor::from_json(MODEL).unwrap();
    let assembler = BuildingAssembler::new(&model);
    let ctx = assembler.assemble_level(&model, 0).unwrap();
    (assembler, ctx)
}

fn wall_hit(ctx: &LevelContext, point: Point3<f64>) -> WallHit {
    WallHit {
        wall: ctx.wall_by_id("w1").unwrap(),
        point,
        normal: Vector3::z(),
        distance: 10.0,
    }
}

fn front_face_point() -> Point3<f64> {
    Point3::new(2.5, 1.5, 0.1)
}

/// Ghost → wall hover → click: full insert flow.
fn insert_fixture(
    editor: &mut InteractiveEditor<'_>,
    ctx: &mut LevelContext,
) -> planwerk_assembly::FixtureKey {
    editor.request_pattern(ctx, "win1").unwrap();

    let hover = Mock {
        walls: vec![wall_hit(ctx, front_face_point())],
        ..Default::default()
    };
    editor.pointer_move(ctx, &hover);
    editor.pointer_down(ctx, &hover).unwrap();

    let (key, _) = ctx.fixtures.iter().next().expect("fixture registered");
    key
}

fn select_fixture(
    editor: &mut InteractiveEditor<'_>,
    ctx: &mut LevelContext,
    fixture: planwerk_assembly::FixtureKey,
) {
    let click = Mock {
        fixtures: vec![FixtureHit {
            fixture,
            point: front_face_point(),
            distance: 10.0,
        }],
        ..Default::default()
    };
    editor.pointer_up(ctx, &click).unwrap();
    assert_eq!(editor.selection(), Some(fixture));
}

#[test]
fn ghost_becomes_visible_on_wall_hover() {
    let (assembler, mut ctx) = setup();
    let mut editor = InteractiveEditor::new(&assembler);

    editor.request_pattern(&mut ctx, "win1").unwrap();
    let fixture = match *editor.state() {
        EditorState::AddPending { fixture } => fixture,
        _ => panic!("expected AddPending"),
    };
    assert!(!ctx.fixtures[fixture].visible);

    // Miss: ghost stays invisible.
    editor.pointer_move(&mut ctx, &Mock::default());
    assert!(!ctx.fixtures[fixture].visible);

    let hover = Mock {
        walls: vec![wall_hit(&ctx, front_face_point())],
        ..Default::default()
    };
    editor.pointer_move(&mut ctx, &hover);

    let f = &ctx.fixtures[fixture];
    assert!(f.visible);

    // Seated behind the hit point along the wall normal.
    let expected_z = front_face_point().z - SURFACE_OFFSET_M - f.local_center.z;
    assert!((f.position.z - expected_z).abs() < 1e-9);
}

#[test]
fn repeated_catalog_requests_replace_the_ghost() {
    let (assembler, mut ctx) = setup();
    let mut editor = InteractiveEditor::new(&assembler);

    editor.request_pattern(&mut ctx, "win1").unwrap();
    let first = match *editor.state() {
        EditorState::AddPending { fixture } => fixture,
        _ => panic!("expected AddPending"),
    };

    // Picking another pattern before placing despawns the first ghost.
    editor.request_pattern(&mut ctx, "win2").unwrap();

    assert_eq!(ctx.fixtures.len(), 1);
    assert!(ctx.fixtures.get(first).is_none());

    let ghost = match *editor.state() {
        EditorState::AddPending { fixture } => fixture,
        _ => panic!("expected AddPending"),
    };
    assert_eq!(ctx.fixtures[ghost].pattern_id, "win2");

    // A failed lookup leaves the current ghost alone.
    assert!(editor.request_pattern(&mut ctx, "win9").is_err());
    assert_eq!(ctx.fixtures.len(), 1);
    assert!(ctx.fixtures.get(ghost).is_some());
}

#[test]
fn unknown_pattern_is_an_error() {
    let (assembler, mut ctx) = setup();
    let mut editor = InteractiveEditor::new(&assembler);
    assert!(editor.request_pattern(&mut ctx, "win9").is_err());
}

#[test]
fn insert_cuts_the_wall_and_clears_pending() {
    let (assembler, mut ctx) = setup();
    let wall = ctx.wall_by_id("w1").unwrap();
    let pristine = ctx.wall_solid(wall).unwrap().triangle_count();

    let mut editor = InteractiveEditor::new(&assembler);
    let fixture = insert_fixture(&mut editor, &mut ctx);

    assert!(editor.state().is_idle());
    assert_eq!(editor.selection(), None);
    assert_eq!(ctx.fixtures[fixture].cuts.len(), 1);
    assert_eq!(ctx.walls[wall].cuts.len(), 1);
    assert!(ctx.wall_solid(wall).unwrap().triangle_count() > pristine);
}

#[test]
fn insert_misses_stay_pending() {
    let (assembler, mut ctx) = setup();
    let mut editor = InteractiveEditor::new(&assembler);

    editor.request_pattern(&mut ctx, "win1").unwrap();
    editor.pointer_down(&mut ctx, &Mock::default()).unwrap();

    assert!(matches!(editor.state(), EditorState::AddPending { .. }));
}

#[test]
fn delete_restores_the_host_wall() {
    let (assembler, mut ctx) = setup();
    let wall = ctx.wall_by_id("w1").unwrap();
    let pristine = ctx.wall_solid(wall).unwrap().triangle_count();

    let mut editor = InteractiveEditor::new(&assembler);
    let fixture = insert_fixture(&mut editor, &mut ctx);
    select_fixture(&mut editor, &mut ctx, fixture);

    editor.delete_selection(&mut ctx).unwrap();

    assert_eq!(editor.selection(), None);
    assert!(ctx.fixtures.is_empty());
    assert!(ctx.cuts.is_empty());
    assert_eq!(ctx.wall_solid(wall).unwrap().triangle_count(), pristine);
}

#[test]
fn drag_moves_and_recommits_against_tracked_wall() {
    let (assembler, mut ctx) = setup();
    let wall = ctx.wall_by_id("w1").unwrap();
    let pristine = ctx.wall_solid(wall).unwrap().triangle_count();

    let mut editor = InteractiveEditor::new(&assembler);
    let fixture = insert_fixture(&mut editor, &mut ctx);
    select_fixture(&mut editor, &mut ctx, fixture);

    // Press on the selected fixture: respawned as a fresh clone, wall
    // restored while the drag is in flight.
    let press = Mock {
        fixtures: vec![FixtureHit {
            fixture,
            point: front_face_point(),
            distance: 10.0,
        }],
        ..Default::default()
    };
    editor.pointer_down(&mut ctx, &press).unwrap();

    let dragged = match *editor.state() {
        EditorState::Moving { fixture, .. } => fixture,
        _ => panic!("expected Moving"),
    };
    assert_ne!(dragged, fixture);
    assert!(ctx.fixtures.get(fixture).is_none());
    assert_eq!(ctx.wall_solid(wall).unwrap().triangle_count(), pristine);

    let before = ctx.fixtures[dragged].position;

    // Drag 0.5m along the wall.
    let drag = Mock {
        walls: vec![wall_hit(&ctx, front_face_point() + Vector3::new(0.5, 0.0, 0.0))],
        plane: Some(front_face_point() + Vector3::new(0.5, 0.0, 0.0)),
        ..Default::default()
    };
    editor.pointer_move(&mut ctx, &drag);

    let after = ctx.fixtures[dragged].position;
    assert!((after.x - before.x - 0.5).abs() < 1e-9);

    // Release: committed against the tracked wall, selection retained.
    editor.pointer_up(&mut ctx, &Mock::default()).unwrap();

    assert!(editor.state().is_idle());
    assert_eq!(editor.selection(), Some(dragged));
    assert_eq!(ctx.fixtures[dragged].cuts.len(), 1);
    assert!(ctx.wall_solid(wall).unwrap().triangle_count() > pristine);
}

#[test]
fn swap_replaces_pattern_and_recuts_hosts() {
    let (assembler, mut ctx) = setup();
    let wall = ctx.wall_by_id("w1").unwrap();

    let mut editor = InteractiveEditor::new(&assembler);
    let fixture = insert_fixture(&mut editor, &mut ctx);
    select_fixture(&mut editor, &mut ctx, fixture);

    let position = ctx.fixtures[fixture].position;

    editor.swap_selection(&mut ctx, "win2").unwrap();

    let swapped = editor.selection().expect("new fixture selected");
    assert_ne!(swapped, fixture);
    assert!(ctx.fixtures.get(fixture).is_none());

    let f = &ctx.fixtures[swapped];
    assert_eq!(f.pattern_id, "win2");
    assert_eq!(f.position, position);
    assert_eq!(f.cuts.len(), 1);
    assert_eq!(ctx.walls[wall].cuts.len(), 1);
}

#[test]
fn selection_callback_fires_on_changes() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let (assembler, mut ctx) = setup();
    let mut editor = InteractiveEditor::new(&assembler);
    let fixture = insert_fixture(&mut editor, &mut ctx);

    let events: Rc<RefCell<Vec<Option<planwerk_assembly::FixtureKey>>>> =
        Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    editor.set_selection_callback(Box::new(move |sel| sink.borrow_mut().push(sel)));

    select_fixture(&mut editor, &mut ctx, fixture);
    editor.pointer_up(&mut ctx, &Mock::default()).unwrap(); // click empty space

    assert_eq!(events.borrow().as_slice(), &[Some(fixture), None]);
}
