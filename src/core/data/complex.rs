use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A point in the complex plane. Passed by value everywhere.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const ZERO: Self = Self {
        real: 0.0,
        imag: 0.0,
    };

    #[must_use]
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.real.hypot(self.imag)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }

    /// Principal square root.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        let modulus = self.magnitude();
        let real = ((modulus + self.real) / 2.0).sqrt();
        let imag = ((modulus - self.real) / 2.0).sqrt();

        Self {
            real,
            imag: if self.imag < 0.0 { -imag } else { imag },
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.imag < 0.0 {
            write!(f, "{} - {}i", self.real, -self.imag)
        } else {
            write!(f, "{} + {}i", self.real, self.imag)
        }
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            real: self.real + other.real,
            imag: self.imag + other.imag,
        }
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            real: self.real - other.real,
            imag: self.imag - other.imag,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            real: self.real * other.real - self.imag * other.imag,
            imag: self.real * other.imag + self.imag * other.real,
        }
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            real: -self.real,
            imag: -self.imag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_squared() {
        assert_eq!(Complex::new(3.0, 4.0).magnitude_squared(), 25.0); // 3² + 4² = 25
        assert_eq!(Complex::new(-3.0, -4.0).magnitude_squared(), 25.0);
        assert_eq!(Complex::ZERO.magnitude_squared(), 0.0);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(Complex::new(3.0, -4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_sub() {
        let result = Complex::new(1.0, 2.0) - Complex::new(3.0, -7.0);

        assert_eq!(result, Complex::new(-2.0, 9.0));
    }

    #[test]
    fn test_mul() {
        // (1 + 2i) * (3 + 4i) = 3 + 4i + 6i + 8i² = -5 + 10i
        let result = Complex::new(1.0, 2.0) * Complex::new(3.0, 4.0);

        assert_eq!(result, Complex::new(-5.0, 10.0));
    }

    #[test]
    fn test_square() {
        // (2 + 3i)² = 4 + 12i - 9 = -5 + 12i
        let c = Complex::new(2.0, 3.0);

        assert_eq!(c * c, Complex::new(-5.0, 12.0));
    }

    #[test]
    fn test_is_finite_rejects_nan_and_infinity() {
        assert!(Complex::new(1.0, -1.0).is_finite());
        assert!(!Complex::new(f64::NAN, 0.0).is_finite());
        assert!(!Complex::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_sqrt_squares_back() {
        for z in [
            Complex::new(-5.0, 12.0),
            Complex::new(-1.0, 0.0),
            Complex::new(0.3, -0.7),
            Complex::new(4.0, 0.0),
        ] {
            let root = z.sqrt();
            let back = root * root;

            assert!((back.real - z.real).abs() < 1e-12, "{} vs {}", back, z);
            assert!((back.imag - z.imag).abs() < 1e-12, "{} vs {}", back, z);
        }
    }

    #[test]
    fn test_sqrt_of_negative_real_is_imaginary() {
        assert_eq!(Complex::new(-4.0, 0.0).sqrt(), Complex::new(0.0, 2.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Complex::new(1.5, -2.0)), "1.5 - 2i");
        assert_eq!(format!("{}", Complex::new(0.0, 0.25)), "0 + 0.25i");
    }
}
