use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Relative slack used when comparing shared edges of subdivided rectangles.
const EDGE_EPSILON: f32 = 1e-5;

pub trait Shape: Debug {
    fn bounding_box(&self) -> Rectangle;
}

/// Axis-aligned rectangle anchored at its top-left corner, with `y` growing downward.
///
/// Width and height are never negative: constructors normalize a negative extent by
/// shifting the origin, and replace non-finite components with `0.0`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
        .normalized()
    }

    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Returns a copy with finite components and non-negative extents.
    ///
    /// Needed when the public fields were written directly.
    pub fn normalized(self) -> Self {
        fn finite(v: f32) -> f32 {
            if v.is_finite() {
                v
            } else {
                0.0
            }
        }

        let mut x = finite(self.x);
        let mut y = finite(self.y);
        let mut width = finite(self.width);
        let mut height = finite(self.height);
        if width < 0.0 {
            x += width;
            width = -width;
        }
        if height < 0.0 {
            y += height;
            height = -height;
        }
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// One of the four equal quadrants, indexed top-left, top-right, bottom-left,
    /// bottom-right. Indices above 3 wrap around.
    pub fn quadrant(&self, index: usize) -> Rectangle {
        let mid_x = self.center_x();
        let mid_y = self.center_y();
        match index % 4 {
            0 => Rectangle::from_edges(self.left(), self.top(), mid_x, mid_y),
            1 => Rectangle::from_edges(mid_x, self.top(), self.right(), mid_y),
            2 => Rectangle::from_edges(self.left(), mid_y, mid_x, self.bottom()),
            _ => Rectangle::from_edges(mid_x, mid_y, self.right(), self.bottom()),
        }
    }

    /// Closed-interval overlap: rectangles whose edges touch intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn contains_rectangle(&self, inner: &Rectangle) -> bool {
        self.left() <= inner.left()
            && self.right() >= inner.right()
            && self.top() <= inner.top()
            && self.bottom() >= inner.bottom()
    }

    /// True when the rectangles share an edge segment of positive length without
    /// overlapping in area. Meeting at a single corner does not count.
    pub fn touches(&self, other: &Rectangle) -> bool {
        let scale = self
            .width
            .max(self.height)
            .max(other.width)
            .max(other.height);
        let epsilon = scale * EDGE_EPSILON;

        // Positive when separated along the axis, negative when overlapping.
        let gap_x = self.left().max(other.left()) - self.right().min(other.right());
        let gap_y = self.top().max(other.top()) - self.bottom().min(other.bottom());

        (gap_x.abs() <= epsilon && gap_y < -epsilon) || (gap_y.abs() <= epsilon && gap_x < -epsilon)
    }

    /// Grows the rectangle on every side by `amount`.
    pub fn inflate(&self, amount: f32) -> Rectangle {
        Rectangle::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    pub fn expand_to_include(&mut self, other: &Rectangle) {
        let left = f32::min(self.left(), other.left());
        let right = f32::max(self.right(), other.right());
        let top = f32::min(self.top(), other.top());
        let bottom = f32::max(self.bottom(), other.bottom());
        *self = Rectangle::from_edges(left, top, right, bottom);
    }
}

impl Shape for Rectangle {
    fn bounding_box(&self) -> Rectangle {
        *self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            radius: radius.abs(),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Shape for Circle {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            self.x - self.radius,
            self.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeEnum {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Shape for ShapeEnum {
    fn bounding_box(&self) -> Rectangle {
        match self {
            ShapeEnum::Circle(circle) => circle.bounding_box(),
            ShapeEnum::Rectangle(rectangle) => rectangle.bounding_box(),
        }
    }
}

impl From<Circle> for ShapeEnum {
    fn from(circle: Circle) -> Self {
        ShapeEnum::Circle(circle)
    }
}

impl From<Rectangle> for ShapeEnum {
    fn from(rectangle: Rectangle) -> Self {
        ShapeEnum::Rectangle(rectangle)
    }
}
