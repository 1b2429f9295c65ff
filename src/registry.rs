//! # Test registry
//!
//! Descriptors live in a [`Registry`] in registration order. A process-wide
//! instance sits behind [`global`]: it is constructed on first registration
//! or lookup, lives until process exit, and is never reset. Every module of
//! the program reaches the same instance through that accessor.
//!
//! Tests that need isolation build their own `Registry` instead.
//!
//! ## Example
//! ```
//! use xstest::case::from_fn;
//! use xstest::registry::Registry;
//!
//! let registry = Registry::new();
//! registry.register("Sum", "Pass", from_fn(|| Ok(())), file!(), line!());
//! assert_eq!(registry.len(), 1);
//! assert_eq!(registry.suite_names(), vec!["Sum".to_string()]);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;

use crate::case::CaseFactory;
use crate::descriptor::{DescriptorHandle, TestDescriptor};

#[derive(Debug, Default)]
pub struct Registry {
    descriptors: Mutex<Vec<DescriptorHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor and returns its shared handle.
    ///
    /// Duplicate `Suite.Case` names are accepted; both entries run.
    pub fn register(
        &self,
        suite_name: &str,
        case_name: &str,
        factory: CaseFactory,
        file: &str,
        line: u32,
    ) -> DescriptorHandle {
        let descriptor = Arc::new(TestDescriptor::new(
            suite_name, case_name, factory, file, line,
        ));
        self.entries().push(Arc::clone(&descriptor));
        descriptor
    }

    /// Snapshot of the registered handles in registration order.
    pub fn descriptors(&self) -> Vec<DescriptorHandle> {
        self.entries().clone()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Distinct suite names, in order of first registration.
    pub fn suite_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for descriptor in self.entries().iter() {
            if !names.iter().any(|name| name == descriptor.suite_name()) {
                names.push(descriptor.suite_name().to_string());
            }
        }
        names
    }

    fn entries(&self) -> MutexGuard<'_, Vec<DescriptorHandle>> {
        self.descriptors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: Registry = Registry::new();
}

/// The process-wide registry.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}

/// Registers a test in the process-wide registry.
pub fn register(
    suite_name: &str,
    case_name: &str,
    factory: CaseFactory,
    file: &str,
    line: u32,
) -> DescriptorHandle {
    global().register(suite_name, case_name, factory, file, line)
}

/// Snapshot of every descriptor in the process-wide registry.
pub fn all_descriptors() -> Vec<DescriptorHandle> {
    global().descriptors()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::from_fn;

    #[test]
    fn test_registration_order_is_kept() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        registry.register("B", "One", from_fn(|| Ok(())), "r.rs", 1);
        registry.register("A", "Two", from_fn(|| Ok(())), "r.rs", 2);
        registry.register("B", "Three", from_fn(|| Ok(())), "r.rs", 3);

        let names: Vec<String> = registry.descriptors().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["B.One", "A.Two", "B.Three"]);
        assert_eq!(registry.suite_names(), vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_duplicates_are_accepted() {
        let registry = Registry::new();
        registry.register("S", "C", from_fn(|| Ok(())), "r.rs", 1);
        registry.register("S", "C", from_fn(|| Ok(())), "r.rs", 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_handles_share_state_with_registry() {
        let registry = Registry::new();
        let handle = registry.register("S", "C", from_fn(|| Ok(())), "r.rs", 1);
        let snapshot = registry.descriptors();
        assert!(Arc::ptr_eq(&handle, &snapshot[0]));
    }

    #[test]
    fn test_global_is_a_single_instance() {
        assert!(std::ptr::eq(global(), global()));
        let handle = register("GlobalRegistry", "Visible", from_fn(|| Ok(())), file!(), line!());
        assert!(all_descriptors().iter().any(|d| Arc::ptr_eq(d, &handle)));
    }
}
