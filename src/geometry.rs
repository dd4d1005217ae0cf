//! # Polyomino Geometry
//!
//! Pure functions over piece coordinate sets: normalization, quarter-turn
//! rotation, and horizontal/vertical mirroring. Every transform returns a
//! normalized set (minimum x and minimum y are both 0) so that two sets can
//! be compared directly once sorted.
//!
//! Coordinates are `(x, y)` pairs with `x` growing to the right and `y`
//! growing downwards, matching the board layout.

use std::fmt;

/// A single cell offset or board position, as `(x, y)`.
pub type Coord = (i32, i32);

/// Raised when a rotation is not a whole number of quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// Rotation was not a multiple of 90 degrees
    InvalidRotation { degrees: i32 },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::InvalidRotation { degrees } => {
                write!(f, "rotation of {} degrees is not a multiple of 90", degrees)
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Translates a coordinate set so that its minimum x and minimum y are 0.
///
/// An empty set normalizes to an empty set.
pub fn normalize(coords: &[Coord]) -> Vec<Coord> {
    let min_x = coords.iter().map(|c| c.0).min().unwrap_or(0);
    let min_y = coords.iter().map(|c| c.1).min().unwrap_or(0);
    coords.iter().map(|&(x, y)| (x - min_x, y - min_y)).collect()
}

/// Rotates a coordinate set clockwise (on a y-down board) by `degrees`.
///
/// Any multiple of 90 is accepted, including negative values and values
/// beyond a full turn; they are reduced mod 360 first. Each quarter turn maps
/// `(x, y)` to `(-y, x)`.
pub fn rotate(coords: &[Coord], degrees: i32) -> Result<Vec<Coord>, TransformError> {
    if degrees % 90 != 0 {
        return Err(TransformError::InvalidRotation { degrees });
    }
    let steps = degrees.rem_euclid(360) / 90;
    let mut rotated = coords.to_vec();
    for _ in 0..steps {
        rotated = rotated.iter().map(|&(x, y)| (-y, x)).collect();
    }
    Ok(normalize(&rotated))
}

/// Mirrors a coordinate set left-to-right.
pub fn flip_horizontal(coords: &[Coord]) -> Vec<Coord> {
    let flipped: Vec<Coord> = coords.iter().map(|&(x, y)| (-x, y)).collect();
    normalize(&flipped)
}

/// Mirrors a coordinate set top-to-bottom.
pub fn flip_vertical(coords: &[Coord]) -> Vec<Coord> {
    let flipped: Vec<Coord> = coords.iter().map(|&(x, y)| (x, -y)).collect();
    normalize(&flipped)
}

/// Sorted, normalized form of a coordinate set, usable as an identity key
/// for a shape regardless of the order its cells were listed in.
pub fn canonical(coords: &[Coord]) -> Vec<Coord> {
    let mut key = normalize(coords);
    key.sort_unstable();
    key
}

/// Offsets every cell of a shape by `origin`.
pub fn translate(coords: &[Coord], origin: Coord) -> Vec<Coord> {
    coords
        .iter()
        .map(|&(x, y)| (x + origin.0, y + origin.1))
        .collect()
}

/// An orientation applied to a piece: flips first, then the rotation.
///
/// The order matters for asymmetric pieces; `flip_h` then `flip_v` then
/// `rotation` is the only order `apply` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Transform {
    /// Rotation in degrees; any multiple of 90, reduced mod 360 on apply
    pub rotation: i32,
    /// Mirror left-to-right
    pub flip_h: bool,
    /// Mirror top-to-bottom
    pub flip_v: bool,
}

impl Transform {
    /// The transform that leaves a shape as it is.
    pub const IDENTITY: Transform = Transform {
        rotation: 0,
        flip_h: false,
        flip_v: false,
    };

    pub fn new(rotation: i32, flip_h: bool, flip_v: bool) -> Self {
        Self {
            rotation,
            flip_h,
            flip_v,
        }
    }

    /// Quarter turn counter-clockwise.
    pub fn rotate_left(self) -> Self {
        Self {
            rotation: self.rotation - 90,
            ..self
        }
    }

    /// Quarter turn clockwise.
    pub fn rotate_right(self) -> Self {
        Self {
            rotation: self.rotation + 90,
            ..self
        }
    }

    pub fn toggle_flip_h(self) -> Self {
        Self {
            flip_h: !self.flip_h,
            ..self
        }
    }

    pub fn toggle_flip_v(self) -> Self {
        Self {
            flip_v: !self.flip_v,
            ..self
        }
    }

    /// Applies the transform to a coordinate set, returning a normalized set.
    pub fn apply(&self, coords: &[Coord]) -> Result<Vec<Coord>, TransformError> {
        let mut shape = normalize(coords);
        if self.flip_h {
            shape = flip_horizontal(&shape);
        }
        if self.flip_v {
            shape = flip_vertical(&shape);
        }
        rotate(&shape, self.rotation)
    }
}

const ROTATIONS: [i32; 4] = [0, 90, 180, 270];
const FLIPS: [(bool, bool); 4] = [(false, false), (true, false), (false, true), (true, true)];

/// Every raw transform in enumeration order: each rotation, then each flip
/// combination within it.
pub fn all_transforms() -> impl Iterator<Item = Transform> {
    ROTATIONS.iter().flat_map(|&rotation| {
        FLIPS
            .iter()
            .map(move |&(flip_h, flip_v)| Transform::new(rotation, flip_h, flip_v))
    })
}

/// The distinct orientations of a shape.
///
/// Walks all 16 raw transforms and keeps the first occurrence of each
/// distinct cell set, so a symmetric piece yields fewer than 16 entries
/// (the monomino yields exactly one).
pub fn orientations(coords: &[Coord]) -> Vec<Vec<Coord>> {
    let mut seen: Vec<Vec<Coord>> = Vec::new();
    let mut shapes = Vec::new();
    for transform in all_transforms() {
        // Rotations from ROTATIONS are always quarter turns.
        let Ok(shape) = transform.apply(coords) else {
            continue;
        };
        let key = canonical(&shape);
        if !seen.contains(&key) {
            seen.push(key);
            shapes.push(shape);
        }
    }
    shapes
}

/// Whether two coordinate sets describe the same cells, ignoring order and
/// position.
pub fn same_shape(a: &[Coord], b: &[Coord]) -> bool {
    a.len() == b.len() && canonical(a) == canonical(b)
}
