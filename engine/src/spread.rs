//! Spread series built from the closing prices of the two legs.

use crate::error::DomainError;

/// Trailing window of S1/S2 price ratios, oldest first.
///
/// Every value is finite and strictly positive, and the series holds at least
/// two observations.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadSeries {
    values: Vec<f64>,
}

impl SpreadSeries {
    /// Builds the series from two close-price sequences (oldest first).
    ///
    /// The sequences are aligned on their most recent observations: when one
    /// leg has more history than the other, its oldest closes are dropped. At
    /// most `window` ratios are kept.
    pub fn from_closes(s1: &[f64], s2: &[f64], window: usize) -> Result<Self, DomainError> {
        let len = s1.len().min(s2.len()).min(window);
        if len < 2 {
            return Err(DomainError::TooShort { len });
        }

        let s1 = &s1[s1.len() - len..];
        let s2 = &s2[s2.len() - len..];

        for (index, &value) in s1.iter().chain(s2.iter()).enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::InvalidPrice {
                    index: index % len,
                    value,
                });
            }
        }

        let values = s1.iter().zip(s2).map(|(a, b)| a / b).collect();
        Self::from_ratios(values)
    }

    /// Wraps already computed ratios.
    pub fn from_ratios(values: Vec<f64>) -> Result<Self, DomainError> {
        if values.len() < 2 {
            return Err(DomainError::TooShort { len: values.len() });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        {
            return Err(DomainError::InvalidPrice { index, value });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent ratio.
    pub fn latest(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}

impl AsRef<[f64]> for SpreadSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
