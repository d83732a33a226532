//! Input validation for allocation runs.
//!
//! Checks allocation requests before any equipment is drawn. Detects:
//! - Non-positive day counts and daily caps (including per-date overrides)
//! - Empty technician rosters facing a non-empty inventory
//! - Duplicate location names, equipment identifiers and technicians
//!
//! All problems are collected; validation does not stop at the first one.

use std::collections::HashSet;

use thiserror::Error;
use tracing::warn;

use crate::allocator::{CapacityRequest, FixedDaysRequest};
use crate::models::Location;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Number of days is zero or negative.
    InvalidDayCount,
    /// Daily cap or a per-date override is zero or negative.
    InvalidCapacity,
    /// Equipment to allocate but nobody to allocate it to.
    MissingTechnicians,
    /// Two locations share a name.
    DuplicateLocation,
    /// An equipment identifier appears more than once.
    DuplicateEquipment,
    /// A technician appears more than once on the roster.
    DuplicateTechnician,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a fixed-days request.
///
/// Checks:
/// 1. `number_of_days >= 1`
/// 2. Inventory and roster integrity (see [`validate_inventory`])
pub fn validate_fixed_days(request: &FixedDaysRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if request.number_of_days <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDayCount,
            format!(
                "Number of days must be positive, got {}",
                request.number_of_days
            ),
        ));
    }

    errors.extend(inventory_errors(&request.locations, &request.technicians));
    finish(errors)
}

/// Validates a capacity-per-day request.
///
/// Checks:
/// 1. `max_per_day >= 1`
/// 2. Every per-date override `>= 1` (a zero cap would never drain the inventory)
/// 3. Inventory and roster integrity (see [`validate_inventory`])
pub fn validate_capacity(request: &CapacityRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if request.max_per_day <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidCapacity,
            format!(
                "Maximum equipment per day must be positive, got {}",
                request.max_per_day
            ),
        ));
    }

    for (date, cap) in &request.per_date_overrides {
        if *cap <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Override for {date} must be positive, got {cap}"),
            ));
        }
    }

    errors.extend(inventory_errors(&request.locations, &request.technicians));
    finish(errors)
}

/// Validates the inventory and technician roster shared by both modes.
///
/// Checks:
/// 1. No duplicate location names
/// 2. No equipment identifier appears twice (within or across locations)
/// 3. No duplicate technicians
/// 4. At least one technician when there is equipment to allocate
pub fn validate_inventory(locations: &[Location], technicians: &[String]) -> ValidationResult {
    finish(inventory_errors(locations, technicians))
}

fn inventory_errors(locations: &[Location], technicians: &[String]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    let mut equipment = HashSet::new();
    for location in locations {
        if !names.insert(location.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateLocation,
                format!("Duplicate location name: {}", location.name),
            ));
        }
        for id in location.equipment_ids() {
            if !equipment.insert(id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateEquipment,
                    format!("Duplicate equipment ID '{}' in location '{}'", id, location.name),
                ));
            }
        }
    }

    let mut roster = HashSet::new();
    for technician in technicians {
        if !roster.insert(technician.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTechnician,
                format!("Duplicate technician: {technician}"),
            ));
        }
    }

    if technicians.is_empty() && !equipment.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingTechnicians,
            format!(
                "{} equipment unit(s) to allocate but no technicians",
                equipment.len()
            ),
        ));
    }

    errors
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        for e in &errors {
            warn!(kind = ?e.kind, "{}", e.message);
        }
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    fn sample_locations() -> Vec<Location> {
        vec![
            Location::new("Loc-1")
                .with_on_site("E1")
                .with_off_site("Sub1", "E2"),
            Location::new("Loc-2").with_on_site("E3"),
        ]
    }

    fn technicians(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_fixed_days() {
        let request = FixedDaysRequest::new(3, start(), sample_locations(), technicians(&["T1"]));
        assert!(validate_fixed_days(&request).is_ok());
    }

    #[test]
    fn test_zero_days_rejected() {
        let request = FixedDaysRequest::new(0, start(), sample_locations(), technicians(&["T1"]));
        let errors = validate_fixed_days(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidDayCount));
    }

    #[test]
    fn test_negative_cap_rejected() {
        let request = CapacityRequest::new(-1, start(), sample_locations(), technicians(&["T1"]));
        let errors = validate_capacity(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidCapacity));
    }

    #[test]
    fn test_zero_override_rejected() {
        let request = CapacityRequest::new(5, start(), sample_locations(), technicians(&["T1"]))
            .with_override(start(), 0);
        let errors = validate_capacity(&request).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidCapacity);
        assert!(errors[0].message.contains("2024-01-08"));
    }

    #[test]
    fn test_missing_technicians() {
        let errors = validate_inventory(&sample_locations(), &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingTechnicians));
    }

    #[test]
    fn test_no_technicians_empty_inventory_ok() {
        assert!(validate_inventory(&[Location::new("empty")], &[]).is_ok());
        assert!(validate_inventory(&[], &[]).is_ok());
    }

    #[test]
    fn test_duplicate_location() {
        let locations = vec![Location::new("L").with_on_site("a"), Location::new("L").with_on_site("b")];
        let errors = validate_inventory(&locations, &technicians(&["T1"])).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateLocation));
    }

    #[test]
    fn test_duplicate_equipment_across_lists() {
        let locations = vec![
            Location::new("L1").with_on_site("X"),
            Location::new("L2").with_off_site("S", "X"),
        ];
        let errors = validate_inventory(&locations, &technicians(&["T1"])).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateEquipment && e.message.contains("'X'")));
    }

    #[test]
    fn test_duplicate_technician() {
        let errors = validate_inventory(&sample_locations(), &technicians(&["T1", "T1"])).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateTechnician));
    }

    #[test]
    fn test_multiple_errors() {
        // Zero cap + negative override + no technicians
        let request = CapacityRequest::new(0, start(), sample_locations(), Vec::new())
            .with_override(start(), -3);
        let errors = validate_capacity(&request).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
