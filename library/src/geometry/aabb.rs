use crate::geometry::alias::Point;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    min: Point,
    max: Point,
}

impl Aabb {
    #[must_use]
    pub const fn make_null() -> Self {
        Aabb {
            min: Point::new(f32::MAX, f32::MAX, f32::MAX),
            max: Point::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        Aabb {
            min: a.component_wise_min(b),
            max: a.component_wise_max(b),
        }
    }

    /// Bounds of a point cloud; the null box for an empty one.
    #[must_use]
    pub fn enclosing(points: &[Point]) -> Self {
        points.iter().fold(Self::make_null(), |bounds, point| bounds.include(*point))
    }

    #[must_use]
    pub fn include(&self, point: Point) -> Self {
        Aabb {
            min: self.min.component_wise_min(point),
            max: self.max.component_wise_max(point),
        }
    }

    #[must_use]
    pub const fn min(&self) -> Point {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Point {
        self.max
    }
}

pub trait MinMax {
    fn component_wise_min(self, other: Point) -> Self;
    fn component_wise_max(self, other: Point) -> Self;
}

impl MinMax for Point {
    #[must_use]
    fn component_wise_min(self, other: Point) -> Self {
        Point::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    #[must_use]
    fn component_wise_max(self, other: Point) -> Self {
        Point::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}
