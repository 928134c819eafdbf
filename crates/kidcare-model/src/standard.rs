//! Standard immunization schedule
//!
//! Embedded national schedule used to seed a fresh deployment.

use crate::catalog::{CatalogError, ScheduleCatalog};
use once_cell::sync::Lazy;

/// Standard schedule JSON (embedded at compile time)
pub const STANDARD_SCHEDULE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/standard-schedule.json"));

/// Lazily parsed standard schedule
pub static STANDARD_CATALOG: Lazy<Result<ScheduleCatalog, CatalogError>> =
    Lazy::new(|| ScheduleCatalog::from_json(STANDARD_SCHEDULE_JSON));

/// Get the standard schedule catalog
pub fn standard_catalog() -> Result<ScheduleCatalog, CatalogError> {
    STANDARD_CATALOG.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScheduledAge;

    #[test]
    fn test_standard_catalog_loads() {
        let catalog = standard_catalog().unwrap();
        assert_eq!(catalog.len(), 30);
        assert_eq!(catalog.entries()[0].vaccine_code, "BCG");
        assert_eq!(catalog.entries()[0].scheduled_age(), ScheduledAge::AtBirth);
    }

    #[test]
    fn test_standard_catalog_has_optional_entries() {
        let catalog = standard_catalog().unwrap();
        let optional: Vec<_> = catalog
            .entries()
            .iter()
            .filter(|e| e.is_optional)
            .map(|e| e.vaccine_code.as_str())
            .collect();
        assert_eq!(optional, vec!["HEPA", "VAR", "TCV"]);
    }
}
