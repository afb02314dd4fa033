use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::actor::Actor;
use crate::render::{CommandRecorder, DrawCommand};

fn actor_at(name: &str, x: f64, z: i32) -> Actor {
    let mut a = Actor::new(name, x, 0.0, 4.0, 4.0);
    a.set_z_order(z);
    a
}

fn first_translate_x(cmds: &[DrawCommand]) -> Vec<f64> {
    cmds.iter()
        .filter_map(|c| match c {
            DrawCommand::TranslateAndRotate { x, .. } => Some(*x),
            _ => None,
        })
        .collect()
}

// =============================================================
// SceneContext
// =============================================================

#[test]
fn context_starts_without_requests() {
    let stage = Stage::default();
    let ctx = SceneContext::new(&stage);
    assert_eq!(ctx.requests(), &SceneRequests::default());
}

#[test]
fn context_last_switch_request_wins() {
    let stage = Stage::default();
    let mut ctx = SceneContext::new(&stage);
    ctx.switch_to_scene(Some("menu"));
    ctx.switch_to_scene(Some("play"));
    assert_eq!(ctx.requests().switch_to, Some(Some("play".to_string())));
    ctx.switch_to_scene(None);
    assert_eq!(ctx.into_requests().switch_to, Some(None));
}

// =============================================================
// ActorList
// =============================================================

#[test]
fn actor_list_keeps_insertion_order() {
    let mut list = ActorList::new();
    list.push(actor_at("b", 20.0, 1));
    list.push(actor_at("a", 10.0, 0));
    let mut r = CommandRecorder::new();
    list.render(&mut r);
    assert_eq!(first_translate_x(r.commands()), vec![20.0, 10.0]);
}

#[test]
fn actor_list_accepts_boxed_objects() {
    let mut list = ActorList::new();
    let boxed: Box<dyn SceneObject> = Box::new(actor_at("boxed", 40.0, 3));
    list.push_boxed(boxed);
    list.push(actor_at("plain", 10.0, 0));
    assert_eq!(list.len(), 2);
    let mut r = CommandRecorder::new();
    list.render(&mut r);
    assert_eq!(first_translate_x(r.commands()), vec![40.0, 10.0]);
}

#[test]
fn actor_list_sort_by_z_order() {
    let mut list = ActorList::new();
    list.push(actor_at("top", 30.0, 5));
    list.push(actor_at("bottom", 10.0, -1));
    list.push(actor_at("middle", 20.0, 2));
    list.sort_by_z_order();
    let z: Vec<i32> = list.iter().map(|o| o.z_order()).collect();
    assert_eq!(z, vec![-1, 2, 5]);
}

#[test]
fn actor_list_holds_shared_handles() {
    let stage = Stage::default();
    let shared = Rc::new(RefCell::new(actor_at("s", 0.0, 0)));
    let mut list = ActorList::new();
    list.push(Rc::clone(&shared));
    shared.borrow_mut().set_stage_position_xy(64.0, 0.0);
    list.update(&stage, 1);
    assert_eq!(list.iter().next().map(|o| o.position()), Some(Point::new(64.0, 0.0)));
    assert_eq!(list.len(), 1);
    list.clear();
    assert!(list.is_empty());
}

// =============================================================
// Scene defaults
// =============================================================

#[test]
fn basic_scene_renders_actors_at_their_position() {
    let stage = Stage::default();
    let mut scene = BasicScene::new("play");
    scene.actors_mut().push(actor_at("a", 12.0, 0));
    let mut r = CommandRecorder::new();
    scene.render(&stage, &mut r);
    assert_eq!(first_translate_x(r.commands()), vec![12.0]);
}

#[test]
fn sort_actors_is_explicit() {
    let mut scene = BasicScene::new("play");
    scene.actors_mut().push(actor_at("hi", 0.0, 9));
    scene.actors_mut().push(actor_at("lo", 0.0, 1));
    let before: Vec<i32> = scene.actors().iter().map(|o| o.z_order()).collect();
    assert_eq!(before, vec![9, 1]);
    scene.sort_actors();
    let after: Vec<i32> = scene.actors().iter().map(|o| o.z_order()).collect();
    assert_eq!(after, vec![1, 9]);
}

#[test]
fn screenshot_key_is_handled_by_default() {
    let stage = Stage::default();
    let mut scene = BasicScene::new("play");
    let mut ctx = SceneContext::new(&stage);
    assert!(scene.key_down(&mut ctx, &Key::new(stage.screenshot_key()), Modifiers::default()));
    assert!(ctx.requests().screenshot);
}

#[test]
fn other_input_is_not_handled() {
    let stage = Stage::default();
    let mut scene = BasicScene::new("play");
    let mut ctx = SceneContext::new(&stage);
    let m = Modifiers::default();
    let at = Point::new(1.0, 1.0);
    assert!(!scene.key_down(&mut ctx, &Key::new("a"), m));
    assert!(!scene.key_up(&mut ctx, &Key::new(stage.screenshot_key()), m));
    assert!(!scene.mouse_down(&mut ctx, at, Button::Primary, m));
    assert!(!scene.mouse_up(&mut ctx, at, Button::Primary, m));
    assert!(!scene.mouse_move(&mut ctx, at, m));
    assert!(!scene.wheel(&mut ctx, at, WheelDelta { dx: 0.0, dy: 3.0 }, m));
    assert_eq!(ctx.into_requests(), SceneRequests::default());
}
