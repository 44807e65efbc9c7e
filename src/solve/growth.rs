//! Growth orders: the asymptotic equivalence classes the solver works in.
//!
//! Polynomial-logarithmic classes are represented uniformly as
//! `n^exp * log^log n`, which makes products (nested loops) and comparisons
//! (dominant-term selection) a matter of arithmetic on the exponents.
//! Exponential classes carry their numeric growth ratio so bounded unrolling
//! can compare against known bases, and a display base (`2`, `φ`, ...).

use std::fmt;

const EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
pub enum Growth {
    /// `n^exp * log^log n`. `exp_label` overrides the rendered exponent for
    /// irrational master-theorem exponents such as `log_2(3)`.
    Term {
        exp: f64,
        log: u32,
        exp_label: Option<String>,
    },
    /// `base^n` with the numeric per-step ratio.
    Exponential { base: String, ratio: f64 },
    /// No closed form could be determined.
    Unknown,
}

impl Growth {
    pub fn constant() -> Self {
        Growth::Term {
            exp: 0.0,
            log: 0,
            exp_label: None,
        }
    }

    pub fn log() -> Self {
        Growth::Term {
            exp: 0.0,
            log: 1,
            exp_label: None,
        }
    }

    pub fn sqrt() -> Self {
        Growth::Term {
            exp: 0.5,
            log: 0,
            exp_label: None,
        }
    }

    pub fn linear() -> Self {
        Growth::poly(1.0)
    }

    pub fn linearithmic() -> Self {
        Growth::Term {
            exp: 1.0,
            log: 1,
            exp_label: None,
        }
    }

    pub fn poly(exp: f64) -> Self {
        Growth::Term {
            exp,
            log: 0,
            exp_label: None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Growth::Term { exp, log, .. } if exp.abs() < EPS && *log == 0)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Growth::Unknown)
    }

    /// Comparison key: exponentials dominate every polynomial class; among
    /// polynomial classes the exponent decides, then the log power.
    fn rank(&self) -> (u8, f64, f64) {
        match self {
            Growth::Term { exp, log, .. } => (0, *exp, f64::from(*log)),
            Growth::Exponential { ratio, .. } => (1, *ratio, 0.0),
            Growth::Unknown => (2, 0.0, 0.0),
        }
    }

    pub fn dominates(&self, other: &Growth) -> bool {
        let (a, b) = (self.rank(), other.rank());
        if a.0 != b.0 {
            return a.0 > b.0;
        }
        if (a.1 - b.1).abs() > EPS {
            return a.1 > b.1;
        }
        a.2 > b.2
    }

    pub fn same_order(&self, other: &Growth) -> bool {
        !self.dominates(other) && !other.dominates(self) && !self.is_unknown()
            && !other.is_unknown()
    }

    /// Dominant term of a sum.
    pub fn max(self, other: Growth) -> Growth {
        if self.is_unknown() || other.is_unknown() {
            return Growth::Unknown;
        }
        if other.dominates(&self) {
            other
        } else {
            self
        }
    }

    /// Smaller term, for best-case branch selection.
    pub fn min(self, other: Growth) -> Growth {
        if self.is_unknown() || other.is_unknown() {
            return Growth::Unknown;
        }
        if other.dominates(&self) {
            self
        } else {
            other
        }
    }

    /// Product of growth orders (loop bound times body, nested loops).
    /// Polynomial factors of an exponential are absorbed: the classifier
    /// reports the exponential class alone.
    pub fn mul(self, other: Growth) -> Growth {
        match (self, other) {
            (Growth::Unknown, _) | (_, Growth::Unknown) => Growth::Unknown,
            (g @ Growth::Exponential { .. }, _) | (_, g @ Growth::Exponential { .. }) => g,
            (
                Growth::Term {
                    exp: e1,
                    log: l1,
                    exp_label: lab1,
                },
                Growth::Term {
                    exp: e2,
                    log: l2,
                    exp_label: lab2,
                },
            ) => {
                let exp_label = match (lab1, lab2) {
                    (Some(l), None) if e2.abs() < EPS => Some(l),
                    (None, Some(l)) if e1.abs() < EPS => Some(l),
                    _ => None,
                };
                Growth::Term {
                    exp: e1 + e2,
                    log: l1 + l2,
                    exp_label,
                }
            }
        }
    }
}

impl PartialEq for Growth {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Growth::Unknown, Growth::Unknown) => true,
            _ => self.same_order(other),
        }
    }
}

/// Renders the class body in canonical form: `1`, `log n`, `sqrt(n)`, `n`,
/// `n log n`, `n^2`, `n^2 log n`, `n^log_2(3)`, `φ^n`, `?`.
impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Growth::Unknown => write!(f, "?"),
            Growth::Exponential { base, .. } => write!(f, "{}^n", base),
            Growth::Term {
                exp,
                log,
                exp_label,
            } => {
                let poly = if let Some(label) = exp_label {
                    format!("n^{}", label)
                } else if exp.abs() < EPS {
                    String::new()
                } else if (exp - 0.5).abs() < EPS {
                    "sqrt(n)".to_string()
                } else if (exp - 1.0).abs() < EPS {
                    "n".to_string()
                } else if (exp - exp.round()).abs() < EPS {
                    format!("n^{}", exp.round() as i64)
                } else {
                    format!("n^{:.3}", exp)
                };
                let logs = match log {
                    0 => String::new(),
                    1 => "log n".to_string(),
                    k => format!("log^{} n", k),
                };
                match (poly.is_empty(), logs.is_empty()) {
                    (true, true) => write!(f, "1"),
                    (true, false) => write!(f, "{}", logs),
                    (false, true) => write!(f, "{}", poly),
                    (false, false) => write!(f, "{} {}", poly, logs),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_compose_exponents() {
        let quadratic = Growth::linear().mul(Growth::linear());
        assert_eq!(quadratic.to_string(), "n^2");
        let nlogn = Growth::linear().mul(Growth::log());
        assert_eq!(nlogn.to_string(), "n log n");
    }

    #[test]
    fn domination_order() {
        assert!(Growth::linear().dominates(&Growth::log()));
        assert!(Growth::linearithmic().dominates(&Growth::linear()));
        assert!(Growth::poly(2.0).dominates(&Growth::linearithmic()));
        let exp = Growth::Exponential {
            base: "2".into(),
            ratio: 2.0,
        };
        assert!(exp.dominates(&Growth::poly(9.0)));
        assert!(Growth::linear().dominates(&Growth::sqrt()));
    }

    #[test]
    fn equal_orders_render_identically() {
        let a = Growth::linear().mul(Growth::linear());
        let b = Growth::poly(2.0);
        assert!(a.same_order(&b));
        assert_eq!(a.to_string(), b.to_string());
    }
}
