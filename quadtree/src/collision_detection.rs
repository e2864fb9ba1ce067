use common::shapes::{Circle, Rectangle, ShapeEnum};

pub fn rectangle_rectangle(a: &Rectangle, b: &Rectangle) -> bool {
    a.intersects(b)
}

// Closed test, so a circle grazing the rectangle collides.
pub fn circle_rectangle(circle: &Circle, rectangle: &Rectangle) -> bool {
    let circle_distance_x = (circle.x - rectangle.center_x()).abs();
    let circle_distance_y = (circle.y - rectangle.center_y()).abs();
    let half_width = rectangle.width / 2.0;
    let half_height = rectangle.height / 2.0;

    if circle_distance_x > half_width + circle.radius {
        return false;
    }
    if circle_distance_y > half_height + circle.radius {
        return false;
    }

    if circle_distance_x <= half_width || circle_distance_y <= half_height {
        return true;
    }

    let corner_dx = circle_distance_x - half_width;
    let corner_dy = circle_distance_y - half_height;
    let corner_distance_sq = corner_dx * corner_dx + corner_dy * corner_dy;

    corner_distance_sq <= circle.radius * circle.radius
}

/// Exact test of an indexed shape against a query rectangle.
///
/// Shaped as a collision predicate for [`QuadTree::get_objects_with`] when the
/// indexed values carry their shape:
///
/// ```
/// use quadtree::collision_detection::shape_rectangle;
/// use quadtree::shapes::{Circle, Rectangle, ShapeEnum};
/// use quadtree::QuadTree;
///
/// let mut qt = QuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0));
/// let light = ShapeEnum::Circle(Circle::new(50.0, 50.0, 10.0));
/// qt.insert_shape(1u32, &light);
///
/// // The query touches the bounding box corner but not the circle.
/// let query = Rectangle::new(58.0, 58.0, 5.0, 5.0);
/// assert!(qt.get_objects(query).contains(&1));
/// assert!(qt.get_objects_with(query, |_, q| shape_rectangle(&light, q)).is_empty());
/// ```
///
/// [`QuadTree::get_objects_with`]: crate::QuadTree::get_objects_with
pub fn shape_rectangle(shape: &ShapeEnum, rectangle: &Rectangle) -> bool {
    match shape {
        ShapeEnum::Circle(circle) => circle_rectangle(circle, rectangle),
        ShapeEnum::Rectangle(other) => rectangle_rectangle(other, rectangle),
    }
}
