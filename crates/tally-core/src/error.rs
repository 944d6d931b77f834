//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── ReportError      - Anything that aborts a report run              │
//! │  │   ├── ValidationError - Dataset/options rejected up front           │
//! │  │   ├── ReferenceError  - Record points at an unknown seller/sku      │
//! │  │   └── Overflow        - A total left the decimal range              │
//! │                                                                         │
//! │  tally-report errors (app crate)                                       │
//! │  └── AppError         - Config, I/O, JSON, wrapped ReportError         │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │                         ├──► ReportError ──► AppError ──► exit code    │
//! │        ReferenceError ──┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, seller ID, record index)
//! 3. Errors are enum variants, never String
//! 4. A run either produces the full report or exactly one error

use thiserror::Error;

// =============================================================================
// Report Error
// =============================================================================

/// Errors that abort a report run.
///
/// There is no partial output: once one of these is returned, every
/// intermediate statistic built so far has already been dropped.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Dataset or options rejected before any accumulation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A purchase record referenced an entity missing from the dataset.
    #[error("Reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// A monetary total or quantity left the representable range.
    ///
    /// `context` names what was being computed, e.g. `profit of seller 'S1'`.
    #[error("Amount out of range: {context}")]
    Overflow { context: String },
}

impl ReportError {
    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        ReportError::Overflow {
            context: context.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Checked in a fixed order; the first failing condition is the one reported.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No dataset was supplied at all (e.g. JSON `null`).
    #[error("dataset is required")]
    MissingDataset,

    /// One of the four required collections is absent.
    #[error("{field} is required")]
    MissingCollection { field: String },

    /// One of the four required collections is present but empty.
    #[error("{field} must not be empty")]
    EmptyCollection { field: String },

    /// No options object was supplied.
    #[error("options are required")]
    MissingOptions,

    /// A policy (revenue or bonus function) was not provided.
    #[error("{name} policy is required")]
    MissingPolicy { name: String },

    /// Input could not be decoded into the dataset shape.
    ///
    /// ## When This Occurs
    /// - A collection is a JSON object/string instead of an array
    /// - A numeric field holds text
    /// - The document is not valid JSON
    #[error("dataset is malformed: {reason}")]
    Malformed { reason: String },
}

// =============================================================================
// Reference Error
// =============================================================================

/// A purchase record points at a seller or product the dataset doesn't know.
///
/// `record` is the zero-based index of the offending purchase record.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("purchase record {record} references unknown seller '{seller_id}'")]
    UnknownSeller { seller_id: String, record: usize },

    #[error("purchase record {record} references unknown sku '{sku}'")]
    UnknownProduct { sku: String, record: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ReportError.
pub type ReportResult<T> = Result<T, ReportError>;

// =============================================================================
// Unit Tests
// =============================================================================
