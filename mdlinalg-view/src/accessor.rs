//! Lazy element transformations applied on view reads.
//!
//! An accessor describes how a stored element is transformed when read
//! through a view: scaled by a constant factor, complex-conjugated, or both
//! in either order. Transposition is deliberately absent: it is a property
//! of [`crate::Layout`], not of element access.
//!
//! # Closed composition
//!
//! The five variants are the only recognized shapes, and the composition
//! helpers [`Accessor::scaled`] and [`Accessor::conjugated`] fold every
//! composition back into one of them: scaling a scaled accessor multiplies
//! the factors, conjugating a conjugated accessor cancels. An unrecognized
//! nesting therefore cannot be constructed in the first place, and
//! [`Accessor::decode`] is total.

use mdlinalg_traits::Conjugate;
use num_traits::One;

/// Element transformation applied when reading through a view.
///
/// `ScaledConjugated(a)` reads `a * conj(x)`; `ConjugatedScaled(a)` reads
/// `conj(a * x)`. The two agree exactly when the factor is real; for complex
/// factors `conj(a * x) = conj(a) * conj(x)`, which [`Accessor::decode`]
/// reports faithfully by conjugating the factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accessor<T> {
    /// Stored value unchanged.
    #[default]
    Identity,
    /// `a * x`
    Scaled(T),
    /// `conj(x)`
    Conjugated,
    /// `a * conj(x)`
    ScaledConjugated(T),
    /// `conj(a * x)`
    ConjugatedScaled(T),
}

impl<T> Accessor<T>
where
    T: Copy + Conjugate + One + std::ops::Mul<Output = T>,
{
    /// Compose with a scaling by `factor` (applied after `self`).
    #[must_use]
    pub fn scaled(self, factor: T) -> Self {
        match self {
            Accessor::Identity => Accessor::Scaled(factor),
            Accessor::Scaled(a) => Accessor::Scaled(factor * a),
            Accessor::Conjugated => Accessor::ScaledConjugated(factor),
            Accessor::ScaledConjugated(a) => Accessor::ScaledConjugated(factor * a),
            // factor * conj(a * x) = (factor * conj(a)) * conj(x)
            Accessor::ConjugatedScaled(a) => Accessor::ScaledConjugated(factor * a.conj()),
        }
    }

    /// Compose with a conjugation (applied after `self`).
    #[must_use]
    pub fn conjugated(self) -> Self {
        match self {
            Accessor::Identity => Accessor::Conjugated,
            Accessor::Scaled(a) => Accessor::ConjugatedScaled(a),
            Accessor::Conjugated => Accessor::Identity,
            // conj(a * conj(x)) = conj(a) * x
            Accessor::ScaledConjugated(a) => Accessor::Scaled(a.conj()),
            // conj(conj(a * x)) = a * x
            Accessor::ConjugatedScaled(a) => Accessor::Scaled(a),
        }
    }

    /// Apply the transformation to a stored value.
    #[inline]
    pub fn apply(self, value: T) -> T {
        match self {
            Accessor::Identity => value,
            Accessor::Scaled(a) => a * value,
            Accessor::Conjugated => value.conj(),
            Accessor::ScaledConjugated(a) => a * value.conj(),
            Accessor::ConjugatedScaled(a) => (a * value).conj(),
        }
    }

    /// Recover `(scale, conjugated)` without touching storage.
    ///
    /// The returned pair satisfies `apply(x) == scale * maybe_conj(x)` for
    /// every variant, so BLAS dispatch and element-wise reads agree.
    pub fn decode(self) -> (T, bool) {
        match self {
            Accessor::Identity => (T::one(), false),
            Accessor::Scaled(a) => (a, false),
            Accessor::Conjugated => (T::one(), true),
            Accessor::ScaledConjugated(a) => (a, true),
            Accessor::ConjugatedScaled(a) => (a.conj(), true),
        }
    }

    /// Whether this accessor reads stored values unchanged.
    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, Accessor::Identity)
    }

    /// Whether reads are conjugated.
    #[inline]
    pub fn is_conjugated(&self) -> bool {
        self.decode().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_identity() {
        let acc: Accessor<f64> = Accessor::Identity;
        assert_eq!(acc.apply(3.0), 3.0);
        assert_eq!(acc.decode(), (1.0, false));
        assert!(acc.is_identity());
    }

    #[test]
    fn test_scale_folding() {
        let acc = Accessor::Identity.scaled(2.0).scaled(3.0);
        assert_eq!(acc, Accessor::Scaled(6.0));
        assert_eq!(acc.apply(5.0), 30.0);
    }

    #[test]
    fn test_conj_involution() {
        let acc: Accessor<Complex64> = Accessor::Identity.conjugated().conjugated();
        assert!(acc.is_identity());
    }

    #[test]
    fn test_scale_then_conj() {
        // conj(a * x) with complex a
        let a = c(0.0, 1.0);
        let x = c(2.0, 3.0);
        let acc = Accessor::Identity.scaled(a).conjugated();
        assert_eq!(acc, Accessor::ConjugatedScaled(a));
        assert_eq!(acc.apply(x), (a * x).conj());
        // decode must report the conjugated factor so both read paths agree
        let (scale, conj) = acc.decode();
        assert!(conj);
        assert_eq!(scale * x.conj(), acc.apply(x));
    }

    #[test]
    fn test_conj_then_scale() {
        // a * conj(x)
        let a = c(0.0, 1.0);
        let x = c(2.0, 3.0);
        let acc = Accessor::Identity.conjugated().scaled(a);
        assert_eq!(acc, Accessor::ScaledConjugated(a));
        assert_eq!(acc.apply(x), a * x.conj());
        let (scale, conj) = acc.decode();
        assert!(conj);
        assert_eq!(scale * x.conj(), acc.apply(x));
    }

    #[test]
    fn test_double_conj_around_scale() {
        // conj then scale then conj: conj(a * conj(x)) = conj(a) * x
        let a = c(1.0, 2.0);
        let x = c(3.0, -4.0);
        let acc = Accessor::Identity.conjugated().scaled(a).conjugated();
        assert_eq!(acc, Accessor::Scaled(a.conj()));
        assert_eq!(acc.apply(x), (a * x.conj()).conj());
    }

    #[test]
    fn test_decode_matches_apply_for_all_shapes() {
        let a = c(1.0, -2.0);
        let x = c(0.5, 4.0);
        let shapes = [
            Accessor::Identity,
            Accessor::Scaled(a),
            Accessor::Conjugated,
            Accessor::ScaledConjugated(a),
            Accessor::ConjugatedScaled(a),
        ];
        for acc in shapes {
            let (scale, conj) = acc.decode();
            let expected = if conj { scale * x.conj() } else { scale * x };
            assert_eq!(expected, acc.apply(x));
        }
    }

    #[test]
    fn test_real_scale_commutes() {
        // For real factors the two orders collapse to the same read
        let acc1 = Accessor::Identity.scaled(2.0f64).conjugated();
        let acc2 = Accessor::Identity.conjugated().scaled(2.0f64);
        assert_eq!(acc1.apply(7.0), acc2.apply(7.0));
    }
}
