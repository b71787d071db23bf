use crate::error::{OperationError, Result};

use super::{Point3, Vector3, TOLERANCE};

/// Linear interpolation between two points: `a + t * (b - a)`.
#[must_use]
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// Arithmetic mean of a set of points.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn centroid(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum * inv_n))
}

/// Moves every point toward the polygon centroid by `fraction`.
///
/// `fraction = 0` leaves the points untouched (bit-for-bit).
#[must_use]
pub fn inset_toward_centroid(points: &[Point3], fraction: f64) -> Vec<Point3> {
    if fraction == 0.0 {
        return points.to_vec();
    }
    let Some(center) = centroid(points) else {
        return Vec::new();
    };
    points.iter().map(|p| lerp(p, &center, fraction)).collect()
}

/// Unnormalized Newell normal of a closed polygon.
///
/// Its length equals twice the polygon area.
#[must_use]
pub fn newell_vector(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

/// Computes the unit normal of a polygon using Newell's method.
///
/// # Errors
///
/// Returns an error if the polygon is degenerate (collinear or too few points).
pub fn newell_normal(points: &[Point3]) -> Result<Vector3> {
    let normal = newell_vector(points);
    let len = normal.norm();
    if points.len() < 3 || len < TOLERANCE {
        return Err(
            OperationError::Failed("degenerate polygon: cannot compute normal".into()).into(),
        );
    }
    Ok(normal / len)
}

/// Area of a planar polygon.
#[must_use]
pub fn polygon_area(points: &[Point3]) -> f64 {
    newell_vector(points).norm() * 0.5
}

/// Largest distance of any vertex from the polygon's best-fit plane.
///
/// # Errors
///
/// Returns an error if the polygon is degenerate.
pub fn max_plane_deviation(points: &[Point3]) -> Result<f64> {
    let normal = newell_normal(points)?;
    let Some(center) = centroid(points) else {
        return Err(OperationError::Failed("empty polygon".into()).into());
    };
    Ok(points
        .iter()
        .map(|p| (p - center).dot(&normal).abs())
        .fold(0.0, f64::max))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_square() -> Vec<Point3> {
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)]
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&unit_square()).unwrap();
        assert!((c - p(0.5, 0.5, 0.0)).norm() < TOLERANCE);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn zero_inset_is_identity() {
        let square = unit_square();
        assert_eq!(inset_toward_centroid(&square, 0.0), square);
    }

    #[test]
    fn inset_moves_toward_center() {
        let inset = inset_toward_centroid(&unit_square(), 0.5);
        assert!((inset[0] - p(0.25, 0.25, 0.0)).norm() < TOLERANCE);
        assert!((inset[2] - p(0.75, 0.75, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn square_area_and_normal() {
        assert!((polygon_area(&unit_square()) - 1.0).abs() < TOLERANCE);
        let n = newell_normal(&unit_square()).unwrap();
        assert!((n - Vector3::z()).norm() < TOLERANCE);
    }

    #[test]
    fn collinear_polygon_has_no_normal() {
        let line = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        assert!(newell_normal(&line).is_err());
    }

    #[test]
    fn twisted_quad_deviates_from_plane() {
        let twisted = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.5), p(0.0, 1.0, 0.0)];
        assert!(max_plane_deviation(&twisted).unwrap() > 0.1);
        assert!(max_plane_deviation(&unit_square()).unwrap() < TOLERANCE);
    }
}
