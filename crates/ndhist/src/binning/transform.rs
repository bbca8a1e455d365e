//! Monotonic transforms for equispaced binning.
//!
//! An equispaced axis places its edges uniformly in `imap(x)` space and maps
//! them back with `map`. Looking a value up is then a single `imap` plus a
//! floor, independent of the number of bins.

use serde::{Deserialize, Serialize};

/// Forward/inverse function pair with `imap(map(x)) == x` on the axis range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Linear spacing.
    #[default]
    Identity,
    /// Edges linear in `log10(x)`: `map = 10^v`, `imap = log10(x)`.
    Log10,
    /// Edges linear in `cos(theta)`: `map = acos(v)`, `imap = cos(theta)`.
    Cosine,
    /// Edges linear in the n-th root of `x`: `map = v^n`, `imap = x^(1/n)`.
    Power(i32),
}

impl Transform {
    /// Map transformed-space `v` back to value space.
    #[inline]
    pub fn map(self, v: f64) -> f64 {
        match self {
            Self::Identity => v,
            Self::Log10 => 10f64.powf(v),
            Self::Cosine => v.acos(),
            Self::Power(2) => v * v,
            Self::Power(n) => v.powi(n),
        }
    }

    /// Map value `x` into transformed space.
    #[inline]
    pub fn imap(self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Log10 => x.log10(),
            Self::Cosine => x.cos(),
            Self::Power(2) => x.sqrt(),
            Self::Power(n) => x.powf(1.0 / f64::from(n)),
        }
    }

    /// Short human-readable name, used in log messages and error text.
    pub fn label(self) -> String {
        match self {
            Self::Identity => "identity".into(),
            Self::Log10 => "log10".into(),
            Self::Cosine => "cosine".into(),
            Self::Power(n) => format!("power({n})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn check_roundtrip(t: Transform, xs: &[f64]) {
        for &x in xs {
            let back = t.map(t.imap(x));
            assert_relative_eq!(back, x, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_identity_roundtrip() {
        check_roundtrip(Transform::Identity, &[-3.0, 0.0, 0.5, 1e6]);
    }

    #[test]
    fn test_log10_roundtrip() {
        check_roundtrip(Transform::Log10, &[1e-6, 0.1, 1.0, 42.0, 1e9]);
        assert_relative_eq!(Transform::Log10.imap(1000.0), 3.0);
    }

    #[test]
    fn test_cosine_roundtrip() {
        check_roundtrip(Transform::Cosine, &[0.1, 0.5, 1.0, 2.0, 3.0]);
        assert_relative_eq!(Transform::Cosine.map(-1.0), std::f64::consts::PI);
    }

    #[test]
    fn test_power_roundtrip() {
        check_roundtrip(Transform::Power(2), &[0.0, 0.25, 4.0, 1e4]);
        check_roundtrip(Transform::Power(3), &[0.001, 1.0, 8.0, 27.0]);
        check_roundtrip(Transform::Power(-1), &[0.5, 1.0, 10.0]);
    }

    #[test]
    fn test_square_fast_path_matches_general_power() {
        for v in [0.0, 0.3, 1.7, 12.5] {
            assert_relative_eq!(Transform::Power(2).map(v), v.powi(2));
            assert_relative_eq!(Transform::Power(2).imap(v), v.powf(0.5), max_relative = 1e-15);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Transform::Log10).unwrap();
        assert_eq!(json, "\"log10\"");
        let t: Transform = serde_json::from_str(r#"{"power": 3}"#).unwrap();
        assert_eq!(t, Transform::Power(3));
        assert_eq!(t.label(), "power(3)");
    }
}
