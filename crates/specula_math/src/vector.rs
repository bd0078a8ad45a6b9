//! Vector helpers that glam does not provide under the names the renderer uses.

use crate::Vec3;

/// Reflect a vector about a normal.
///
/// `n` is expected to be unit length; the result has the same length as `v`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Vector pointing from `from` to `to`.
#[inline]
pub fn from_points(from: Vec3, to: Vec3) -> Vec3 {
    to - from
}
