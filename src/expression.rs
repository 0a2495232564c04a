use std::fmt::{Debug, Display, Formatter};

use fnv::FnvHashMap as HashMap;

/// A linear expression over named variables, such as `x1 + 2 x2`.
///
/// Each variable appears at most once: adding a term for a variable that is
/// already present adds up the coefficients. Terms keep their insertion order.
#[derive(Clone, Default)]
pub struct LinearExpr {
    terms: Vec<(String, f64)>,
    /// position of each variable in `terms`
    index: HashMap<String, usize>,
}

impl LinearExpr {
    /// An expression without any term, equal to 0
    pub fn new() -> Self {
        LinearExpr::default()
    }

    /// Add `coefficient * name` to the expression
    pub fn add_term<N: Into<String>>(&mut self, name: N, coefficient: f64) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => self.terms[position].1 += coefficient,
            None => {
                self.index.insert(name.clone(), self.terms.len());
                self.terms.push((name, coefficient));
            }
        }
    }

    /// The coefficient of a variable, 0 if it does not appear in the expression
    pub fn coefficient(&self, name: &str) -> f64 {
        self.index.get(name).map_or(0., |&position| self.terms[position].1)
    }

    /// Iterates over the `(variable name, coefficient)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.terms.iter().map(|(n, c)| (n.as_str(), *c))
    }

    /// The names of the variables referenced by the expression
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(n, _)| n.as_str())
    }

    /// The number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true when the expression has no term
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate the expression, reading the value of each variable from `value`
    pub fn eval_with<F: Fn(&str) -> f64>(&self, value: F) -> f64 {
        self.terms.iter().map(|(n, c)| c * value(n)).sum()
    }
}

impl PartialEq for LinearExpr {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl<N: Into<String>> FromIterator<(N, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        let mut expr = LinearExpr::new();
        for (name, coefficient) in iter {
            expr.add_term(name, coefficient);
        }
        expr
    }
}

impl<N: Into<String>> Extend<(N, f64)> for LinearExpr {
    fn extend<I: IntoIterator<Item = (N, f64)>>(&mut self, iter: I) {
        for (name, coefficient) in iter {
            self.add_term(name, coefficient);
        }
    }
}

impl Display for LinearExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, coeff) in self.iter() {
            if coeff != 0f64 {
                if first {
                    first = false;
                } else {
                    write!(f, " + ")?;
                }
                if (coeff - 1.).abs() > f64::EPSILON {
                    write!(f, "{} ", coeff)?;
                }
                write!(f, "{}", name)?;
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

impl Debug for LinearExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
