//! Coordinate types for the two spaces a frame passes through.
//!
//! [`WorldPoint`] lives in simulation units, [`DevicePoint`] in device pixels.
//! They share arithmetic but are distinct types: the only way from one to the
//! other is [`Transform`](crate::transform::Transform).

use core::ops::{Add, Div, Mul, Sub};

use crate::float::Float;
use crate::vec::Vec2;

macro_rules! point_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq)]
        pub struct $name {
            pub x: f64,
            pub y: f64,
        }

        impl $name {
            pub const ZERO: $name = $name { x: 0.0, y: 0.0 };

            pub const fn new(x: f64, y: f64) -> Self {
                $name { x, y }
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self { $name::new(self.x + rhs.x, self.y + rhs.y) }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self { $name::new(self.x - rhs.x, self.y - rhs.y) }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self { $name::new(self.x * rhs, self.y * rhs) }
        }

        impl Div<f64> for $name {
            type Output = Self;
            fn div(self, rhs: f64) -> Self { $name::new(self.x / rhs, self.y / rhs) }
        }
    };
}

point_type!(
    /// A point in simulation ("world") units, before the pan/zoom transform.
    WorldPoint
);

point_type!(
    /// A point in device pixels, after the pan/zoom transform.
    DevicePoint
);

impl<F: Float> From<Vec2<F>> for WorldPoint {
    fn from(v: Vec2<F>) -> Self {
        WorldPoint::new(v.x.to_f64(), v.y.to_f64())
    }
}

/// Width/height of a surface in device pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    pub const ZERO: Dimension = Dimension { width: 0.0, height: 0.0 };

    pub const fn new(width: f64, height: f64) -> Self {
        Dimension { width, height }
    }
}

impl Mul<f64> for Dimension {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self { Dimension::new(self.width * rhs, self.height * rhs) }
}
