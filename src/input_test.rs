use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::event::EventKind;

fn setup() -> (PointerInput, Rc<RefCell<Vec<DiagramEvent>>>) {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let log = Rc::clone(&log);
        bus.subscribe(kind, move |e| log.borrow_mut().push(e.clone()));
    }
    (PointerInput::new(bus), log)
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Modifiers::default() }
}

#[test]
fn hover_move_publishes_move_then_over_move() {
    let (input, log) = setup();
    input.pointer_move(Point::new(3.0, 4.0), Modifiers::default());
    let p = ScreenPosition::new(3.0, 4.0);
    assert_eq!(*log.borrow(), vec![DiagramEvent::ScreenMouseMove(p), DiagramEvent::ScreenMouseOverMove(p)]);
}

#[test]
fn press_move_release_is_a_drag() {
    let (input, log) = setup();
    input.pointer_down(Point::new(1.0, 1.0), Button::Primary, shift());
    input.pointer_move(Point::new(2.0, 1.0), shift());
    input.pointer_up(Point::new(2.0, 1.0), Button::Primary, Modifiers::default());
    input.pointer_move(Point::new(3.0, 1.0), Modifiers::default());

    let down = ScreenPosition::new(1.0, 1.0).with_shift(true);
    let moved = ScreenPosition::new(2.0, 1.0).with_shift(true);
    let after = ScreenPosition::new(3.0, 1.0);
    assert_eq!(
        *log.borrow(),
        vec![
            DiagramEvent::ScreenLeftMouseClick(down),
            DiagramEvent::ScreenMouseMove(moved),
            DiagramEvent::ScreenMouseDrag(moved),
            DiagramEvent::ScreenLeftMouseUp(ScreenPosition::new(2.0, 1.0)),
            DiagramEvent::ScreenMouseMove(after),
            DiagramEvent::ScreenMouseOverMove(after),
        ]
    );
}

#[test]
fn non_primary_buttons_are_ignored() {
    let (input, log) = setup();
    input.pointer_down(Point::new(1.0, 1.0), Button::Secondary, Modifiers::default());
    input.pointer_up(Point::new(1.0, 1.0), Button::Middle, Modifiers::default());
    assert!(log.borrow().is_empty());

    input.pointer_move(Point::new(2.0, 2.0), Modifiers::default());
    let p = ScreenPosition::new(2.0, 2.0);
    assert_eq!(*log.borrow(), vec![DiagramEvent::ScreenMouseMove(p), DiagramEvent::ScreenMouseOverMove(p)]);
}

#[test]
fn wheel_uses_vertical_delta() {
    let (input, log) = setup();
    input.wheel(Point::new(100.0, 50.0), WheelDelta { dx: 30.0, dy: -120.0 });
    assert_eq!(*log.borrow(), vec![DiagramEvent::ScreenMouseWheel { delta: -120.0, x: 100.0, y: 50.0 }]);
}

#[test]
fn button_names_are_lowercase() {
    assert_eq!(serde_json::to_string(&Button::Primary).unwrap(), r#""primary""#);
    let b: Button = serde_json::from_str(r#""secondary""#).unwrap();
    assert_eq!(b, Button::Secondary);
}
