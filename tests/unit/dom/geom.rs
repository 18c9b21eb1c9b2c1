use super::*;

#[test]
fn rect_contains_is_half_open() {
    let r = Rect::new(2, 3, 4, 2);
    assert!(r.contains(Pos::new(2, 3)));
    assert!(r.contains(Pos::new(5, 4)));
    assert!(!r.contains(Pos::new(6, 4)));
    assert!(!r.contains(Pos::new(5, 5)));
}

#[test]
fn empty_rect_contains_nothing() {
    assert!(!Rect::new(0, 0, 0, 3).contains(Pos::new(0, 0)));
    assert!(!Rect::new(0, 0, 3, -1).contains(Pos::new(0, 0)));
}

#[test]
fn offset_step_subtracts_scroll_and_adds_border() {
    let g = Geometry {
        offset_left: 10,
        offset_top: 20,
        scroll_left: 3,
        scroll_top: 5,
        client_left: 1,
        client_top: 2,
        width: 0,
        height: 0,
    };
    assert_eq!(g.offset_step(), Pos::new(8, 17));
}

#[test]
fn cumulative_offset_sums_the_chain() {
    let inner = Geometry::at(40, 20, 80, 24);
    let outer = Geometry {
        scroll_top: 3,
        client_left: 1,
        client_top: 1,
        ..Geometry::at(10, 5, 400, 300)
    };
    assert_eq!(cumulative_offset([&inner, &outer]), Pos::new(51, 23));
    assert_eq!(cumulative_offset(std::iter::empty()), Pos::default());
}
