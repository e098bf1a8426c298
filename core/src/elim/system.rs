//! Tolerance-pivoted Gaussian elimination
//!
//! Maintains a row-reduced basis of linear equations over registered
//! variables. Inserting an equation either extends the basis, reduces to
//! nothing (redundant), or reduces to `0 = c` with `c` nonzero, which is a
//! contradiction. Queries reduce a candidate equation against the basis and
//! report whether it vanishes.
//!
//! An optional modulus folds equation constants into `[0, modulus)`; the
//! angle space runs the system mod pi.

use thiserror::Error;

/// Coefficient magnitudes below this are treated as exact zeros during
/// pivoting. Distinct from the geometric epsilon: this guards float drift
/// inside row reduction, not coordinate measurement.
const PIVOT_TOLERANCE: f64 = 1e-9;

/// A linear equation reduced to `0 = c` with `c` nonzero
#[derive(Debug, Clone, Error, PartialEq)]
#[error("linear system contradiction: 0 = {residual}")]
pub struct Contradiction {
    /// The nonzero constant the equation reduced to
    pub residual: f64,
}

/// Outcome of inserting an equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The equation extended the basis with a new pivot row
    Added,
    /// The equation was already implied by the basis
    Redundant,
}

/// Sparse linear equation: sum of coeff * var = constant
#[derive(Debug, Clone, Default)]
pub struct Equation {
    pub terms: Vec<(usize, f64)>,
    pub constant: f64,
}

impl Equation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate a coefficient onto a variable
    pub fn add_term(&mut self, var: usize, coeff: f64) -> &mut Self {
        self.terms.push((var, coeff));
        self
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }
}

#[derive(Debug, Clone)]
struct Row {
    coeffs: Vec<f64>,
    constant: f64,
    pivot: usize,
}

/// Row-reduced system of linear equations over `usize` variables
#[derive(Debug, Clone)]
pub struct LinearSystem {
    rows: Vec<Row>,
    num_vars: usize,
    modulus: Option<f64>,
}

impl LinearSystem {
    /// Create a system over the reals
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            num_vars: 0,
            modulus: None,
        }
    }

    /// Create a system whose constants live in `[0, modulus)`
    pub fn with_modulus(modulus: f64) -> Self {
        Self {
            rows: Vec::new(),
            num_vars: 0,
            modulus: Some(modulus),
        }
    }

    /// Register a fresh variable, returning its index
    pub fn new_var(&mut self) -> usize {
        let idx = self.num_vars;
        self.num_vars += 1;
        idx
    }

    /// Number of registered variables
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of independent rows in the basis
    pub fn rank(&self) -> usize {
        self.rows.len()
    }

    fn fold_constant(&self, c: f64) -> f64 {
        match self.modulus {
            Some(m) => {
                let r = c.rem_euclid(m);
                // values within tolerance of the modulus wrap to zero
                if (m - r).abs() < PIVOT_TOLERANCE {
                    0.0
                } else {
                    r
                }
            }
            None => c,
        }
    }

    fn constant_is_zero(&self, c: f64) -> bool {
        let c = self.fold_constant(c);
        match self.modulus {
            Some(m) => c.abs() < PIVOT_TOLERANCE || (m - c).abs() < PIVOT_TOLERANCE,
            None => c.abs() < PIVOT_TOLERANCE,
        }
    }

    fn densify(&self, eq: &Equation) -> (Vec<f64>, f64) {
        let mut coeffs = vec![0.0; self.num_vars];
        for &(var, coeff) in &eq.terms {
            coeffs[var] += coeff;
        }
        (coeffs, eq.constant)
    }

    /// Reduce a dense equation against the basis in place
    fn reduce(&self, coeffs: &mut [f64], constant: &mut f64) {
        for row in &self.rows {
            let factor = coeffs[row.pivot];
            if factor.abs() < PIVOT_TOLERANCE {
                continue;
            }
            for (c, r) in coeffs.iter_mut().zip(row.coeffs.iter()) {
                *c -= factor * r;
            }
            *constant -= factor * row.constant;
            *constant = self.fold_constant(*constant);
        }
    }

    /// Insert an equation into the system
    pub fn insert(&mut self, eq: &Equation) -> Result<InsertOutcome, Contradiction> {
        let (mut coeffs, mut constant) = self.densify(eq);
        constant = self.fold_constant(constant);
        self.reduce(&mut coeffs, &mut constant);

        // tolerance pivoting: take the largest surviving coefficient
        let pivot = coeffs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .map(|(i, _)| i);

        let pivot = match pivot {
            Some(i) if coeffs[i].abs() > PIVOT_TOLERANCE => i,
            _ => {
                return if self.constant_is_zero(constant) {
                    Ok(InsertOutcome::Redundant)
                } else {
                    Err(Contradiction {
                        residual: self.fold_constant(constant),
                    })
                };
            }
        };

        let scale = coeffs[pivot];
        for c in coeffs.iter_mut() {
            *c /= scale;
        }
        constant = self.fold_constant(constant / scale);
        coeffs[pivot] = 1.0;

        // back-substitute to keep the basis fully reduced
        let modulus = self.modulus;
        for row in self.rows.iter_mut() {
            let factor = row.coeffs.get(pivot).copied().unwrap_or(0.0);
            if factor.abs() < PIVOT_TOLERANCE {
                continue;
            }
            if row.coeffs.len() < coeffs.len() {
                row.coeffs.resize(coeffs.len(), 0.0);
            }
            for (r, c) in row.coeffs.iter_mut().zip(coeffs.iter()) {
                *r -= factor * c;
            }
            row.constant -= factor * constant;
            if let Some(m) = modulus {
                let r = row.constant.rem_euclid(m);
                row.constant = if (m - r).abs() < PIVOT_TOLERANCE { 0.0 } else { r };
            }
        }

        self.rows.push(Row {
            coeffs,
            constant,
            pivot,
        });
        Ok(InsertOutcome::Added)
    }

    /// Check whether the basis implies the equation
    pub fn implies(&self, eq: &Equation) -> bool {
        let (mut coeffs, mut constant) = self.densify(eq);
        constant = self.fold_constant(constant);
        self.reduce(&mut coeffs, &mut constant);

        coeffs.iter().all(|c| c.abs() < PIVOT_TOLERANCE) && self.constant_is_zero(constant)
    }
}

impl Default for LinearSystem {
    fn default() -> Self {
        Self::new()
    }
}
