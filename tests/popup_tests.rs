use rstoryline::core::geometry::{Point, Rect, Size};
use rstoryline::core::popup::{
    HoverController, HoverState, PointerTarget, PopupConfig, PopupSide, compute_popup_placement,
};

fn bubble(x: f64, y: f64) -> Rect {
    Rect::around(Point::new(x, y), 40.0)
}

fn viewport() -> Size {
    Size::new(1280.0, 800.0)
}

#[test]
fn test_popup_goes_below_when_it_fits() {
    let cfg = PopupConfig::default();
    let p = compute_popup_placement(bubble(640.0, 200.0), viewport(), &cfg);

    assert_eq!(p.side, PopupSide::Below);
    assert_eq!(p.frame, Rect::new(480.0, 252.0, 320.0, 240.0));
    assert_eq!(p.anchor, Point::new(640.0, 252.0));
}

#[test]
fn test_popup_flips_above_near_the_bottom() {
    let cfg = PopupConfig::default();
    let p = compute_popup_placement(bubble(640.0, 700.0), viewport(), &cfg);

    assert_eq!(p.side, PopupSide::Above);
    assert_eq!(p.frame.y, 660.0 - 12.0 - 240.0);
    assert!(p.frame.bottom() <= 660.0);
}

#[test]
fn test_popup_centres_when_neither_side_fits() {
    let cfg = PopupConfig::default();
    let p = compute_popup_placement(bubble(640.0, 150.0), Size::new(1280.0, 300.0), &cfg);

    assert_eq!(p.side, PopupSide::Centered);
    assert_eq!(p.frame.y, 30.0);
}

#[test]
fn test_popup_is_clamped_horizontally() {
    let cfg = PopupConfig::default();

    let left = compute_popup_placement(bubble(10.0, 200.0), viewport(), &cfg);
    assert_eq!(left.frame.x, 20.0);

    let right = compute_popup_placement(bubble(1275.0, 200.0), viewport(), &cfg);
    assert_eq!(right.frame.x, 1280.0 - 20.0 - 320.0);
}

#[test]
fn test_popup_stays_inside_viewport_margins() {
    let cfg = PopupConfig::default();
    let vp = viewport();

    for x in (0..=1280).step_by(40) {
        for y in (0..=800).step_by(40) {
            let p = compute_popup_placement(bubble(x as f64, y as f64), vp, &cfg);
            assert!(p.frame.x >= 20.0);
            assert!(p.frame.x + p.frame.width <= vp.width - 20.0);
            assert!(p.frame.y >= 20.0);
            assert!(p.frame.bottom() <= vp.height - 20.0);
        }
    }
}

#[test]
fn test_narrow_viewport_sticks_to_left_margin() {
    let cfg = PopupConfig::default();
    let p = compute_popup_placement(bubble(100.0, 100.0), Size::new(200.0, 800.0), &cfg);
    assert_eq!(p.frame.x, 20.0);
}

#[test]
fn test_hover_opens_and_closes_after_delay() {
    let mut hover = HoverController::new(PopupConfig::default(), viewport());
    assert_eq!(hover.state(), HoverState::Idle);

    hover.pointer_enter(0, bubble(300.0, 200.0));
    assert_eq!(hover.active_group(), Some(0));

    hover.pointer_leave(0, 1_000);
    assert!(!hover.tick(1_050));
    assert_eq!(hover.active_group(), Some(0));

    assert!(hover.tick(1_100));
    assert_eq!(hover.state(), HoverState::Idle);
    assert!(hover.placement().is_none());
}

#[test]
fn test_entering_popup_cancels_pending_close() {
    let mut hover = HoverController::new(PopupConfig::default(), viewport());
    hover.pointer_enter(2, bubble(300.0, 200.0));

    hover.pointer_leave(2, 1_000);
    hover.popup_enter();

    assert!(!hover.tick(5_000));
    assert_eq!(hover.active_group(), Some(2));

    hover.popup_leave(6_000);
    assert!(hover.tick(6_100));
    assert_eq!(hover.active_group(), None);
}

#[test]
fn test_click_outside_closes_immediately() {
    let mut hover = HoverController::new(PopupConfig::default(), viewport());
    hover.pointer_enter(1, bubble(300.0, 200.0));

    hover.pointer_down(PointerTarget::Popup);
    assert_eq!(hover.active_group(), Some(1));
    hover.pointer_down(PointerTarget::Node(1));
    assert_eq!(hover.active_group(), Some(1));

    hover.pointer_down(PointerTarget::Outside);
    assert_eq!(hover.state(), HoverState::Idle);
}

#[test]
fn test_entering_another_node_preempts() {
    let mut hover = HoverController::new(PopupConfig::default(), viewport());
    hover.pointer_enter(0, bubble(300.0, 200.0));
    hover.pointer_leave(0, 1_000);

    hover.pointer_enter(1, bubble(600.0, 200.0));
    assert_eq!(hover.active_group(), Some(1));

    // The pending close belonged to node 0 and is gone.
    assert!(!hover.tick(1_200));
    assert_eq!(hover.active_group(), Some(1));

    // A late leave from node 0 does not close node 1.
    hover.pointer_leave(0, 1_300);
    assert!(!hover.tick(2_000));
    assert_eq!(hover.active_group(), Some(1));
}

#[test]
fn test_viewport_change_replaces_open_popup() {
    let mut hover = HoverController::new(PopupConfig::default(), viewport());
    let b = bubble(640.0, 400.0);
    let before = hover.pointer_enter(0, b);
    assert_eq!(before.side, PopupSide::Below);

    hover.set_viewport(Size::new(1280.0, 600.0), Some(b));
    let after = hover.placement().unwrap();
    assert_eq!(after.side, PopupSide::Above);
}

#[test]
fn test_target_at_prefers_popup_over_nodes() {
    let mut hover = HoverController::new(PopupConfig::default(), viewport());
    let nodes = [bubble(300.0, 200.0), bubble(600.0, 300.0)];

    assert_eq!(hover.target_at(Point::new(300.0, 200.0), &nodes), PointerTarget::Node(0));
    assert_eq!(hover.target_at(Point::new(50.0, 50.0), &nodes), PointerTarget::Outside);

    // Popup of node 0 sits below it: x 140..460, y 252..492.
    hover.pointer_enter(0, nodes[0]);
    assert_eq!(hover.target_at(Point::new(300.0, 400.0), &nodes), PointerTarget::Popup);
    assert_eq!(hover.target_at(Point::new(580.0, 300.0), &nodes), PointerTarget::Node(1));

    let target = hover.target_at(Point::new(1000.0, 700.0), &nodes);
    hover.pointer_down(target);
    assert_eq!(hover.state(), HoverState::Idle);
}
