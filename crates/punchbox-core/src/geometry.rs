//! Planar geometry helpers for punch analysis.

use nalgebra::Vector2;

/// Heading of a vector in radians, measured from the +x axis
pub fn heading(v: &Vector2<f64>) -> f64 {
    v.y.atan2(v.x)
}

/// Wrap an angle into (-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    let pi = std::f64::consts::PI;
    let mut a = angle;
    while a > pi {
        a -= 2.0 * pi;
    }
    while a <= -pi {
        a += 2.0 * pi;
    }
    a
}

/// Signed angle of `v` relative to the `reference` axis, in (-pi, pi]
pub fn relative_angle(v: &Vector2<f64>, reference: &Vector2<f64>) -> f64 {
    normalize_angle(heading(v) - heading(reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_heading() {
        assert!((heading(&Vector2::new(1.0, 0.0))).abs() < 1e-10);
        assert!((heading(&Vector2::new(0.0, 1.0)) - PI / 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-10);
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-10);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_relative_angle() {
        let v = Vector2::new(0.0, 1.0);
        let reference = Vector2::new(1.0, 0.0);
        assert!((relative_angle(&v, &reference) - PI / 2.0).abs() < 1e-10);

        // Wrap-around: headings at 170 and -170 degrees differ by -20,
        // not 340
        let a = 170.0_f64.to_radians();
        let b = (-170.0_f64).to_radians();
        let v = Vector2::new(a.cos(), a.sin());
        let reference = Vector2::new(b.cos(), b.sin());
        let rel = relative_angle(&v, &reference);
        assert!((rel + 20.0_f64.to_radians()).abs() < 1e-9);
    }
}
