// Tests for deriving a procedural object from an object-mode prompt.

use ripple_core::prompt::{derive_object, ObjectSpec};
use ripple_core::Shape;

#[test]
fn color_and_shape_keywords_are_found() {
    assert_eq!(
        derive_object("a shiny blue torus"),
        ObjectSpec {
            shape: Shape::Torus,
            color: "blue"
        }
    );
}

#[test]
fn no_keywords_gives_gray_box() {
    let spec = derive_object("hello");
    assert_eq!(spec.shape, Shape::Box);
    assert_eq!(spec.color, "gray");
}

#[test]
fn matching_ignores_case() {
    let spec = derive_object("RED Sphere");
    assert_eq!(spec.shape, Shape::Sphere);
    assert_eq!(spec.color, "red");
}

#[test]
fn substrings_count() {
    let spec = derive_object("a reddish scone");
    assert_eq!(spec.color, "red");
    assert_eq!(spec.shape, Shape::Cone);
}

#[test]
fn first_keyword_in_list_order_wins() {
    // Colors are checked red, blue, green regardless of prompt order.
    assert_eq!(derive_object("blue then red").color, "red");
    assert_eq!(derive_object("green and blue").color, "blue");
    // Shapes are checked sphere, cone, cylinder, torus.
    assert_eq!(derive_object("torus on a cylinder").shape, Shape::Cylinder);
    assert_eq!(derive_object("cone or sphere").shape, Shape::Sphere);
}

#[test]
fn empty_prompt_is_still_total() {
    let spec = derive_object("");
    assert_eq!(spec.shape, Shape::Box);
    assert_eq!(spec.color, "gray");
}
