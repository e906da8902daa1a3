//! Weighted one- and two-dimensional samples
//!
//! A sample is validated once, when it is built: coordinates must be finite,
//! weights finite and non-negative, and every column the same length. After
//! that it is read-only; partition engines copy what they need out of it.

use crate::error::{Error, Result};
use crate::numeric::{widen, Numeric};
use crate::utils::total_weight;

fn check_finite(values: &[f64], context: &str) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite(context));
    }
    Ok(())
}

fn check_weights(weights: &[f64], len: usize) -> Result<()> {
    if weights.len() != len {
        return Err(Error::size_mismatch(len, weights.len(), "weight vector"));
    }
    check_finite(weights, "weights")?;
    if let Some((index, &weight)) = weights.iter().enumerate().find(|(_, w)| **w < 0.0) {
        return Err(Error::negative_weight(index, weight));
    }
    Ok(())
}

fn range_of(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// A one-dimensional sample with optional per-observation weights
#[derive(Debug, Clone, PartialEq)]
pub struct Sample1D {
    values: Vec<f64>,
    weights: Option<Vec<f64>>,
}

impl Sample1D {
    /// Create an unweighted sample (every observation has weight 1)
    pub fn new(values: Vec<f64>) -> Result<Self> {
        check_finite(&values, "coordinates")?;
        Ok(Self {
            values,
            weights: None,
        })
    }

    /// Create a weighted sample
    pub fn weighted(values: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
        check_finite(&values, "coordinates")?;
        check_weights(&weights, values.len())?;
        Ok(Self {
            values,
            weights: Some(weights),
        })
    }

    /// Create an unweighted sample from any numeric column
    pub fn from_numeric<T: Numeric>(values: &[T]) -> Result<Self> {
        Self::new(widen(values))
    }

    /// Create a weighted sample from numeric columns
    pub fn from_numeric_weighted<T: Numeric, W: Numeric>(values: &[T], weights: &[W]) -> Result<Self> {
        Self::weighted(widen(values), widen(weights))
    }

    /// Materialise a sample from a fallible stream of `(x, weight)` tuples
    ///
    /// The first error reported by the source aborts collection and is
    /// returned as [`Error::Other`].
    pub fn try_from_observations<I, E>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = std::result::Result<(f64, f64), E>>,
        E: Into<anyhow::Error>,
    {
        let mut values = Vec::new();
        let mut weights = Vec::new();
        for observation in observations {
            let (x, w) = observation.map_err(|e| Error::Other(e.into()))?;
            values.push(x);
            weights.push(w);
        }
        Self::weighted(values, weights)
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the sample has no observations
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if explicit weights were supplied
    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Coordinates in input order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Explicit weights, if any
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Coordinate of observation `i`
    pub fn value(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// Weight of observation `i`
    pub fn weight(&self, i: usize) -> f64 {
        self.weights.as_ref().map_or(1.0, |w| w[i])
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        total_weight(self.weights(), self.len())
    }

    /// Smallest and largest coordinate
    pub fn range(&self) -> Option<(f64, f64)> {
        range_of(&self.values)
    }

    /// Iterate over `(x, weight)` pairs in input order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        (0..self.len()).map(move |i| (self.values[i], self.weight(i)))
    }
}

/// A two-dimensional sample with optional per-observation weights
#[derive(Debug, Clone, PartialEq)]
pub struct Sample2D {
    x: Vec<f64>,
    y: Vec<f64>,
    weights: Option<Vec<f64>>,
}

impl Sample2D {
    /// Create an unweighted sample from two equal-length coordinate columns
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::size_mismatch(x.len(), y.len(), "y coordinates"));
        }
        check_finite(&x, "x coordinates")?;
        check_finite(&y, "y coordinates")?;
        Ok(Self { x, y, weights: None })
    }

    /// Create a weighted sample
    pub fn weighted(x: Vec<f64>, y: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
        let mut sample = Self::new(x, y)?;
        check_weights(&weights, sample.len())?;
        sample.weights = Some(weights);
        Ok(sample)
    }

    /// Create an unweighted sample from numeric columns
    pub fn from_numeric<X: Numeric, Y: Numeric>(x: &[X], y: &[Y]) -> Result<Self> {
        Self::new(widen(x), widen(y))
    }

    /// Create a weighted sample from numeric columns
    pub fn from_numeric_weighted<X: Numeric, Y: Numeric, W: Numeric>(
        x: &[X],
        y: &[Y],
        weights: &[W],
    ) -> Result<Self> {
        Self::weighted(widen(x), widen(y), widen(weights))
    }

    /// Materialise a sample from a fallible stream of `(x, y, weight)` tuples
    pub fn try_from_observations<I, E>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = std::result::Result<(f64, f64, f64), E>>,
        E: Into<anyhow::Error>,
    {
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut weights = Vec::new();
        for observation in observations {
            let (xi, yi, wi) = observation.map_err(|e| Error::Other(e.into()))?;
            x.push(xi);
            y.push(yi);
            weights.push(wi);
        }
        Self::weighted(x, y, weights)
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the sample has no observations
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Check if explicit weights were supplied
    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// X coordinates in input order
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y coordinates in input order
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Explicit weights, if any
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Coordinates of observation `i`
    pub fn point(&self, i: usize) -> (f64, f64) {
        (self.x[i], self.y[i])
    }

    /// Weight of observation `i`
    pub fn weight(&self, i: usize) -> f64 {
        self.weights.as_ref().map_or(1.0, |w| w[i])
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        total_weight(self.weights(), self.len())
    }

    /// Smallest and largest x coordinate
    pub fn x_range(&self) -> Option<(f64, f64)> {
        range_of(&self.x)
    }

    /// Smallest and largest y coordinate
    pub fn y_range(&self) -> Option<(f64, f64)> {
        range_of(&self.y)
    }

    /// Iterate over `(x, y, weight)` triples in input order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + Clone + '_ {
        (0..self.len()).map(move |i| (self.x[i], self.y[i], self.weight(i)))
    }
}
