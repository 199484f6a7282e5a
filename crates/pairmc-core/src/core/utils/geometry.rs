use nalgebra::{Point3, Vector3};

/// Distance metric of the simulation container.
///
/// Boundary handling (e.g. minimum image in a periodic box) lives entirely
/// behind this trait; energy and overlap routines never compute distances
/// themselves.
pub trait Geometry: Sync {
    /// Vector pointing from `b` to `a`.
    fn vdist(&self, a: &Point3<f64>, b: &Point3<f64>) -> Vector3<f64>;

    #[inline]
    fn sqdist(&self, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
        self.vdist(a, b).norm_squared()
    }

    #[inline]
    fn dist(&self, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
        self.sqdist(a, b).sqrt()
    }
}

/// Plain Cartesian distances with no boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Euclidean;

impl Geometry for Euclidean {
    #[inline]
    fn vdist(&self, a: &Point3<f64>, b: &Point3<f64>) -> Vector3<f64> {
        a - b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_distance_matches_pythagoras() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert_eq!(Euclidean.sqdist(&a, &b), 25.0);
        assert_eq!(Euclidean.dist(&a, &b), 5.0);
    }

    #[test]
    fn euclidean_vdist_points_from_second_to_first() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 2.0, 0.0);
        assert_eq!(Euclidean.vdist(&a, &b), Vector3::new(1.0, -2.0, 0.0));
    }

    #[test]
    fn euclidean_distance_is_symmetric() {
        let a = Point3::new(1.5, -2.0, 3.25);
        let b = Point3::new(-0.5, 4.0, 1.0);
        assert_eq!(Euclidean.sqdist(&a, &b), Euclidean.sqdist(&b, &a));
    }
}
