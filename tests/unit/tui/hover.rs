use super::*;
use crate::dom::Document;

#[test]
fn moves_within_the_same_element_are_quiet() {
    let mut doc = Document::new();
    let a = doc.create_element("button");
    let mut hover = HoverTracker::new();

    assert_eq!(
        hover.update(Some(a)),
        Some(HoverChange {
            from: None,
            to: Some(a)
        })
    );
    assert_eq!(hover.update(Some(a)), None);
    assert_eq!(hover.hovered(), Some(a));
}

#[test]
fn crossing_elements_reports_both_ends() {
    let mut doc = Document::new();
    let a = doc.create_element("button");
    let b = doc.create_element("li");
    let mut hover = HoverTracker::new();
    hover.update(Some(a));

    assert_eq!(
        hover.update(Some(b)),
        Some(HoverChange {
            from: Some(a),
            to: Some(b)
        })
    );
    assert_eq!(
        hover.reset(),
        Some(HoverChange {
            from: Some(b),
            to: None
        })
    );
    assert_eq!(hover.reset(), None);
}
