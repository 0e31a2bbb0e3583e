//! Core geometric types: plane positions and the 8-way compass.
//!
//! Positions double as displacement vectors; no bounds are enforced on
//! either.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// Squared lengths below this are treated as the zero vector.
const ZERO_NORM_EPS: f64 = 1e-12;

/// A point (or displacement) in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin position (0, 0).
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (*self - *other).length()
    }

    /// Length of this position read as a vector.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn normalized(&self) -> Option<Position> {
        let len = self.length();
        if !len.is_finite() || len * len < ZERO_NORM_EPS {
            None
        } else {
            Some(Position::new(self.x / len, self.y / len))
        }
    }

    /// Returns the unit direction vector from `self` toward `target`.
    ///
    /// Returns `None` if positions are coincident.
    pub fn direction_to(&self, target: &Position) -> Option<Position> {
        (*target - *self).normalized()
    }

    /// Compass heading from `self` toward `target`.
    pub fn heading_to(&self, target: &Position) -> Direction {
        let d = *target - *self;
        Direction::from_vector(d.x, d.y)
    }

    /// Arithmetic mean of a set of points, or `None` when empty.
    pub fn centroid(points: &[Position]) -> Option<Position> {
        if points.is_empty() {
            return None;
        }
        let sum = points
            .iter()
            .fold(Position::origin(), |acc, p| acc + *p);
        Some(sum * (1.0 / points.len() as f64))
    }

    /// The point in `candidates` closest to `self` (first one wins ties).
    pub fn nearest<'a>(&self, candidates: &'a [Position]) -> Option<&'a Position> {
        candidates.iter().min_by(|a, b| {
            self.distance_to(a)
                .partial_cmp(&self.distance_to(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Position {
    type Output = Position;

    fn mul(self, k: f64) -> Position {
        Position::new(self.x * k, self.y * k)
    }
}

impl From<[f64; 2]> for Position {
    fn from(p: [f64; 2]) -> Self {
        Position::new(p[0], p[1])
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Position::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// One of the eight compass headings a unit can be ordered along.
///
/// East is +x and north is +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Direction {
    East,
    Northeast,
    North,
    Northwest,
    West,
    Southwest,
    South,
    Southeast,
}

impl Direction {
    /// All headings, counter-clockwise starting from east.
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::Northeast,
        Direction::North,
        Direction::Northwest,
        Direction::West,
        Direction::Southwest,
        Direction::South,
        Direction::Southeast,
    ];

    /// Quantizes a displacement into the compass sector containing it.
    ///
    /// Sectors are 45° wide and centred on each heading, so boundaries sit
    /// at odd multiples of 22.5°; a vector exactly on a boundary belongs to
    /// the sector counter-clockwise of it. The zero vector and non-finite
    /// input fall into the east sector.
    pub fn from_vector(dx: f64, dy: f64) -> Direction {
        Self::from_degrees(dy.atan2(dx).to_degrees())
    }

    /// Sector containing `deg`, measured counter-clockwise from east.
    ///
    /// Each sector is 45 degrees wide and includes its lower bound.
    pub fn from_degrees(deg: f64) -> Direction {
        let shifted = (deg + 22.5).rem_euclid(360.0);
        // rem_euclid of a tiny negative rounds up to 360.0, which still
        // belongs to the last sector. NaN saturates to 0 in the cast.
        let sector = ((shifted / 45.0).floor() as usize).min(7);
        Self::ALL[sector]
    }

    /// Position in [`Direction::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Centre angle of the sector, in degrees counter-clockwise from east.
    pub fn angle_degrees(&self) -> f64 {
        self.index() as f64 * 45.0
    }

    /// Unit vector pointing along this heading.
    pub fn unit_vector(&self) -> Position {
        let rad = self.angle_degrees().to_radians();
        Position::new(rad.cos(), rad.sin())
    }

    /// Lower-case label, e.g. `"northeast"`.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::East => "east",
            Direction::Northeast => "northeast",
            Direction::North => "north",
            Direction::Northwest => "northwest",
            Direction::West => "west",
            Direction::Southwest => "southwest",
            Direction::South => "south",
            Direction::Southeast => "southeast",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown direction '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn position_direction_to() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(2.0, 0.0);
        let d = a.direction_to(&b).unwrap();
        assert!((d.x - 1.0).abs() < 1e-10);
        assert!(d.y.abs() < 1e-10);
    }

    #[test]
    fn coincident_positions_have_no_direction() {
        let a = Position::new(7.0, -3.0);
        assert!(a.direction_to(&a).is_none());
        assert!(Position::origin().normalized().is_none());
    }

    #[test]
    fn centroid_of_square() {
        let pts = [
            Position::new(0.0, 0.0),
            Position::new(10.0, 0.0),
            Position::new(0.0, 10.0),
            Position::new(10.0, 10.0),
        ];
        assert_eq!(Position::centroid(&pts), Some(Position::new(5.0, 5.0)));
        assert_eq!(Position::centroid(&[]), None);
    }

    #[test]
    fn nearest_picks_closest() {
        let me = Position::new(0.0, 0.0);
        let pts = [Position::new(5.0, 5.0), Position::new(1.0, 1.0)];
        assert_eq!(me.nearest(&pts), Some(&Position::new(1.0, 1.0)));
        assert_eq!(me.nearest(&[]), None);
    }

    #[test]
    fn quantizer_cardinal_and_diagonal() {
        assert_eq!(Direction::from_vector(1.0, 0.0), Direction::East);
        assert_eq!(Direction::from_vector(1.0, 1.0), Direction::Northeast);
        assert_eq!(Direction::from_vector(0.0, 1.0), Direction::North);
        assert_eq!(Direction::from_vector(-1.0, 1.0), Direction::Northwest);
        assert_eq!(Direction::from_vector(-1.0, 0.0), Direction::West);
        assert_eq!(Direction::from_vector(-1.0, -1.0), Direction::Southwest);
        assert_eq!(Direction::from_vector(0.0, -1.0), Direction::South);
        assert_eq!(Direction::from_vector(1.0, -1.0), Direction::Southeast);
    }

    #[test]
    fn quantizer_boundaries_are_lower_inclusive() {
        let at = |deg: f64| {
            let r = deg.to_radians();
            Direction::from_vector(r.cos(), r.sin())
        };
        assert_eq!(at(22.5 + 1e-9), Direction::Northeast);
        assert_eq!(at(22.5 - 1e-9), Direction::East);
        assert_eq!(at(-22.5 + 1e-9), Direction::East);
        assert_eq!(at(157.5 + 1e-9), Direction::West);
        assert_eq!(at(-157.5 + 1e-9), Direction::Southwest);
        assert_eq!(Direction::from_vector(-1.0, -0.0), Direction::West);
    }

    #[test]
    fn quantizer_one_ulp_below_negative_boundary_is_southeast() {
        // Bit increments on a negative float move away from zero.
        let below = f64::from_bits((-22.5f64).to_bits() + 1);
        assert!(below < -22.5);
        assert_eq!(Direction::from_degrees(below), Direction::Southeast);
        assert_eq!(Direction::from_degrees(-22.5), Direction::East);

        let mut reached_band = false;
        let mut bits = (-22.5f64).to_bits();
        for _ in 0..64 {
            bits += 1;
            let r = f64::from_bits(bits).to_radians();
            let (dx, dy) = (r.cos(), r.sin());
            let deg = dy.atan2(dx).to_degrees();
            let expected = if deg < -22.5 {
                reached_band = true;
                Direction::Southeast
            } else {
                Direction::East
            };
            assert_eq!(Direction::from_vector(dx, dy), expected, "deg={:e}", deg);
        }
        assert!(reached_band);
    }

    #[test]
    fn quantizer_from_degrees_wraps() {
        assert_eq!(Direction::from_degrees(360.0), Direction::East);
        assert_eq!(Direction::from_degrees(450.0), Direction::North);
        assert_eq!(Direction::from_degrees(-90.0), Direction::South);
        assert_eq!(Direction::from_degrees(f64::NAN), Direction::East);
    }

    #[test]
    fn quantizer_degenerate_inputs() {
        assert_eq!(Direction::from_vector(0.0, 0.0), Direction::East);
        assert_eq!(Direction::from_vector(f64::NAN, 1.0), Direction::East);
        assert_eq!(
            Direction::from_vector(f64::INFINITY, f64::INFINITY),
            Direction::Northeast
        );
    }

    #[test]
    fn unit_vector_round_trips_through_quantizer() {
        for d in Direction::ALL {
            let v = d.unit_vector();
            assert_eq!(Direction::from_vector(v.x, v.y), d);
            assert!((v.length() - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn direction_parse_and_display() {
        assert_eq!("southwest".parse::<Direction>(), Ok(Direction::Southwest));
        assert_eq!(" North ".parse::<Direction>(), Ok(Direction::North));
        assert!("up".parse::<Direction>().is_err());
        assert_eq!(Direction::Southeast.to_string(), "southeast");
    }

    proptest! {
        #[test]
        fn quantizer_is_scale_invariant(
            dx in -1.0e3f64..1.0e3,
            dy in -1.0e3f64..1.0e3,
            k in 1.0e-3f64..1.0e3,
        ) {
            prop_assert_eq!(
                Direction::from_vector(dx, dy),
                Direction::from_vector(dx * k, dy * k)
            );
        }

        #[test]
        fn quantizer_always_yields_a_label(dx in any::<f64>(), dy in any::<f64>()) {
            let d = Direction::from_vector(dx, dy);
            prop_assert!(Direction::ALL.contains(&d));
        }
    }
}
