//! # Validation Module
//!
//! Up-front checks on the dataset and options of a report run.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. dataset present                          → MissingDataset           │
//! │  2. sellers, products, purchase_records,                                │
//! │     customers: each present, then non-empty  → MissingCollection /     │
//! │                                                EmptyCollection          │
//! │  3. options present                          → MissingOptions           │
//! │  4. revenue policy, then bonus policy        → MissingPolicy            │
//! │                                                                         │
//! │  First failure wins. Nothing is accumulated before all checks pass.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `customers` is never read by the engine; it is checked so datasets keep
//! the same shape everywhere they are produced.

use crate::error::ValidationError;
use crate::policy::{BonusPolicy, ReportOptions, RevenuePolicy};
use crate::types::{Customer, Dataset, Product, PurchaseRecord, Seller};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A dataset whose four collections are known to be present and non-empty.
#[derive(Debug, Clone, Copy)]
pub struct DatasetView<'a> {
    pub sellers: &'a [Seller],
    pub products: &'a [Product],
    pub purchase_records: &'a [PurchaseRecord],
    pub customers: &'a [Customer],
}

/// Both policies, unwrapped from their option slots.
#[derive(Clone, Copy)]
pub struct Policies<'a> {
    pub revenue: &'a dyn RevenuePolicy,
    pub bonus: &'a dyn BonusPolicy,
}

impl std::fmt::Debug for Policies<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Policies").finish_non_exhaustive()
    }
}

/// Everything the later stages need, already checked.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedInput<'a> {
    pub dataset: DatasetView<'a>,
    pub policies: Policies<'a>,
}

fn require_collection<'a, T>(field: &str, collection: Option<&'a Vec<T>>) -> ValidationResult<&'a [T]> {
    match collection {
        None => Err(ValidationError::MissingCollection {
            field: field.to_string(),
        }),
        Some(items) if items.is_empty() => Err(ValidationError::EmptyCollection {
            field: field.to_string(),
        }),
        Some(items) => Ok(items.as_slice()),
    }
}

/// Checks dataset presence and its four collections.
///
/// ## Example
/// ```rust
/// use tally_core::types::Dataset;
/// use tally_core::validation::validate_dataset;
///
/// assert!(validate_dataset(None).is_err());
/// assert!(validate_dataset(Some(&Dataset::default())).is_err());
/// ```
pub fn validate_dataset(dataset: Option<&Dataset>) -> ValidationResult<DatasetView<'_>> {
    let dataset = dataset.ok_or(ValidationError::MissingDataset)?;

    Ok(DatasetView {
        sellers: require_collection("sellers", dataset.sellers.as_ref())?,
        products: require_collection("products", dataset.products.as_ref())?,
        purchase_records: require_collection("purchase_records", dataset.purchase_records.as_ref())?,
        customers: require_collection("customers", dataset.customers.as_ref())?,
    })
}

/// Checks options presence and both policy slots.
pub fn validate_options(options: Option<&ReportOptions>) -> ValidationResult<Policies<'_>> {
    let options = options.ok_or(ValidationError::MissingOptions)?;

    let revenue = options
        .revenue_policy()
        .ok_or_else(|| ValidationError::MissingPolicy {
            name: "revenue".to_string(),
        })?;
    let bonus = options
        .bonus_policy()
        .ok_or_else(|| ValidationError::MissingPolicy {
            name: "bonus".to_string(),
        })?;

    Ok(Policies { revenue, bonus })
}

/// Runs every check, dataset first.
pub fn validate<'a>(
    dataset: Option<&'a Dataset>,
    options: Option<&'a ReportOptions>,
) -> ValidationResult<ValidatedInput<'a>> {
    let dataset = validate_dataset(dataset)?;
    let policies = validate_options(options)?;
    Ok(ValidatedInput { dataset, policies })
}

// =============================================================================
// Unit Tests
// =============================================================================
