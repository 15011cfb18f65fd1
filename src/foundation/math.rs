use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// 2D vector of `f32` components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

/// 3D vector of `f32` components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

/// 4D vector of `f32` components, used for homogeneous positions and RGBA colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector4 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component.
    pub w: f32,
}

macro_rules! impl_vector {
    ($ty:ident { $($f:ident),+ }) => {
        impl $ty {
            /// All components zero.
            pub const ZERO: Self = Self { $($f: 0.0),+ };
            /// All components one.
            pub const ONE: Self = Self { $($f: 1.0),+ };

            /// Vector with every component set to `v`.
            pub const fn splat(v: f32) -> Self {
                Self { $($f: v),+ }
            }

            /// Dot product.
            pub fn dot(self, rhs: Self) -> f32 {
                0.0 $(+ self.$f * rhs.$f)+
            }

            /// Euclidean length.
            pub fn length(self) -> f32 {
                self.length_squared().sqrt()
            }

            /// Squared Euclidean length.
            pub fn length_squared(self) -> f32 {
                self.dot(self)
            }

            /// Unit-length copy of this vector.
            ///
            /// A zero-length vector normalizes to [`Self::ZERO`] rather than NaN.
            pub fn normalize(self) -> Self {
                let len = self.length();
                if len == 0.0 || !len.is_finite() {
                    return Self::ZERO;
                }
                self * (1.0 / len)
            }

            /// Linear interpolation: `self` at `t = 0`, `rhs` at `t = 1`.
            pub fn lerp(self, rhs: Self, t: f32) -> Self {
                self + (rhs - self) * t
            }

            /// Clamp every component into `[lo, hi]`.
            pub fn clamp(self, lo: f32, hi: f32) -> Self {
                Self { $($f: self.$f.clamp(lo, hi)),+ }
            }

            /// Return `true` when no component is NaN or infinite.
            pub fn is_finite(self) -> bool {
                true $(&& self.$f.is_finite())+
            }
        }

        impl Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($f: self.$f + rhs.$f),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                $(self.$f += rhs.$f;)+
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($f: self.$f - rhs.$f),+ }
            }
        }

        impl Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($f: -self.$f),+ }
            }
        }

        impl Mul<f32> for $ty {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self {
                Self { $($f: self.$f * rhs),+ }
            }
        }

        impl Mul<$ty> for f32 {
            type Output = $ty;
            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        // Component-wise (Hadamard) product, used to modulate colors.
        impl Mul for $ty {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                Self { $($f: self.$f * rhs.$f),+ }
            }
        }
    };
}

impl_vector!(Vector2 { x, y });
impl_vector!(Vector3 { x, y, z });
impl_vector!(Vector4 { x, y, z, w });

impl Vector2 {
    /// Construct from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Vector3 {
    /// Unit X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit Z axis.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Construct from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Right-handed cross product.
    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Extend with a `w` component.
    pub const fn extend(self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }
}

impl Vector4 {
    /// Construct from components.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Drop the `w` component.
    pub const fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// The `(x, y)` components.
    pub const fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

/// Row-major 4x4 matrix.
///
/// Vectors are columns and are multiplied on the right: `result = M * v`. Chained transforms
/// therefore apply right-to-left, e.g. `projection * view * model * point`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix4x4 {
    /// Matrix rows, `rows[row][col]`.
    pub rows: [[f32; 4]; 4],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4x4 {
    /// Multiplicative identity.
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Construct from rows.
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Translation by `t`.
    pub fn translation(t: Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.rows[0][3] = t.x;
        m.rows[1][3] = t.y;
        m.rows[2][3] = t.z;
        m
    }

    /// Non-uniform scale along the three axes.
    pub fn scale(s: Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.rows[0][0] = s.x;
        m.rows[1][1] = s.y;
        m.rows[2][2] = s.z;
        m
    }

    /// Rotation of `radians` around the Y axis.
    pub fn rotation_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Translation component (last column).
    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(self.rows[0][3], self.rows[1][3], self.rows[2][3])
    }

    /// Transform a point (`w = 1`) and drop the resulting `w`.
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        (*self * p.extend(1.0)).xyz()
    }

    /// Transform a direction (`w = 0`), ignoring translation.
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        (*self * v.extend(0.0)).xyz()
    }

    /// Transform a surface normal by the inverse-transpose of the upper 3x3 block.
    ///
    /// The result is not normalized. Its length is scaled by `|det|`, and orientation is
    /// preserved for mirroring transforms.
    pub fn transform_normal(&self, n: Vector3) -> Vector3 {
        let column = |j: usize| Vector3::new(self.rows[0][j], self.rows[1][j], self.rows[2][j]);
        let (a, b, c) = (column(0), column(1), column(2));
        let det = a.dot(b.cross(c));
        (b.cross(c) * n.x + c.cross(a) * n.y + a.cross(b) * n.z) * det.signum()
    }
}

impl Index<(usize, usize)> for Matrix4x4 {
    type Output = f32;
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.rows[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix4x4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.rows[row][col]
    }
}

impl Add for Matrix4x4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for (r, row) in out.rows.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v += rhs.rows[r][c];
            }
        }
        out
    }
}

impl Sub for Matrix4x4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        for (r, row) in out.rows.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v -= rhs.rows[r][c];
            }
        }
        out
    }
}

impl Mul<f32> for Matrix4x4 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        let mut out = self;
        for v in out.rows.iter_mut().flatten() {
            *v *= rhs;
        }
        out
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.rows[r][k] * rhs.rows[k][c]).sum();
            }
        }
        Self { rows: out }
    }
}

impl Mul<Vector4> for Matrix4x4 {
    type Output = Vector4;
    fn mul(self, v: Vector4) -> Vector4 {
        let row = |r: [f32; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w;
        Vector4::new(
            row(self.rows[0]),
            row(self.rows[1]),
            row(self.rows[2]),
            row(self.rows[3]),
        )
    }
}

pub(crate) fn min3(a: f32, b: f32, c: f32) -> f32 {
    a.min(b).min(c)
}

pub(crate) fn max3(a: f32, b: f32, c: f32) -> f32 {
    a.max(b).max(c)
}

/// Barycentric weights `(i, j, k)` of screen point `(x, y)` against triangle `(p1, p2, p3)`.
///
/// `i` weighs `p1`, `j` weighs `p2` and `k = 1 - i - j` weighs `p3`. Returns `None` when the
/// point lies outside the triangle, when `k` is not strictly positive (so points on the
/// `p1`-`p2` edge are excluded), or when the triangle has zero area.
pub fn compute_barycentric(
    p1: Vector2,
    p2: Vector2,
    p3: Vector2,
    x: f32,
    y: f32,
) -> Option<Vector3> {
    let a = p1.y - p3.y;
    let b = p1.x - p3.x;
    let c = (p2.y - p3.y) * b - (p2.x - p3.x) * a;
    if c == 0.0 || !c.is_finite() {
        return None;
    }
    let j = ((y - p3.y) * b - (x - p3.x) * a) / c;
    if j.is_nan() || j < 0.0 {
        return None;
    }

    let a1 = p3.y - p2.y;
    let b1 = p3.x - p2.x;
    let c1 = (p1.y - p2.y) * b1 - (p1.x - p2.x) * a1;
    if c1 == 0.0 || !c1.is_finite() {
        return None;
    }
    let i = ((y - p2.y) * b1 - (x - p2.x) * a1) / c1;
    if i.is_nan() || i < 0.0 {
        return None;
    }

    let k = 1.0 - i - j;
    (k > 0.0).then_some(Vector3::new(i, j, k))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
