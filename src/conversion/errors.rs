// ============================================================================
// Conversion Errors
// ============================================================================

use crate::dimension::Dimension;
use crate::numeric::NumericError;
use std::fmt;

/// Errors raised when building or applying a unit conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Source and target dimensions are not convertible
    DimensionMismatch { from: Dimension, to: Dimension },
    /// The implicit path would truncate or round; use an explicit cast
    PrecisionLoss,
    /// Arithmetic failure while computing or applying the factor
    Numeric(NumericError),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::DimensionMismatch { from, to } => {
                write!(f, "dimension mismatch: {} is not convertible to {}", from, to)
            },
            ConversionError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would truncate, use an explicit cast"
            ),
            ConversionError::Numeric(err) => write!(f, "numeric error: {}", err),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConversionError::Numeric(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for ConversionError {
    fn from(err: NumericError) -> Self {
        ConversionError::Numeric(err)
    }
}

/// Result type alias for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
