//! The admin registry: one validated registration per entity kind.
//!
//! The registry is an explicit value constructed once at startup and passed
//! to whatever serves the admin screens. There is no process-global site to
//! mutate; a second registration of the same kind is a configuration error
//! at build time.

use std::collections::BTreeMap;

use shopadmin_core::EntityKind;

use crate::error::ConfigError;
use crate::options::AdminOptions;

/// Immutable, fully-validated admin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRegistry {
    entries: BTreeMap<EntityKind, AdminOptions>,
}

impl AdminRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn options(&self, kind: EntityKind) -> &AdminOptions {
        // Construction guarantees every kind is present.
        &self.entries[&kind]
    }

    pub fn is_registered(&self, kind: EntityKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &AdminOptions)> {
        self.entries.iter().map(|(kind, options)| (*kind, options))
    }
}

/// Accumulates registrations; duplicates fail immediately, completeness is
/// checked by [`RegistryBuilder::finish`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<EntityKind, AdminOptions>,
}

impl RegistryBuilder {
    /// Register a kind with framework defaults.
    pub fn register(self, kind: EntityKind) -> Result<Self, ConfigError> {
        self.register_with(AdminOptions::defaults(kind))
    }

    /// Register a kind with a customization.
    pub fn register_with(mut self, options: AdminOptions) -> Result<Self, ConfigError> {
        let kind = options.kind();
        if self.entries.contains_key(&kind) {
            return Err(ConfigError::DuplicateRegistration(kind));
        }
        tracing::debug!(%kind, "admin registration");
        self.entries.insert(kind, options);
        Ok(self)
    }

    /// Close the registry. Every catalog entity kind must be registered
    /// exactly once.
    pub fn finish(self) -> Result<AdminRegistry, ConfigError> {
        for kind in EntityKind::ALL {
            if !self.entries.contains_key(&kind) {
                return Err(ConfigError::Unregistered(kind));
            }
        }
        Ok(AdminRegistry {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_all(mut builder: RegistryBuilder) -> Result<RegistryBuilder, ConfigError> {
        for kind in EntityKind::ALL {
            builder = builder.register(kind)?;
        }
        Ok(builder)
    }

    #[test]
    fn a_full_registry_builds() {
        let registry = register_all(AdminRegistry::builder())
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(registry.len(), EntityKind::ALL.len());
        for kind in EntityKind::ALL {
            assert!(registry.is_registered(kind));
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let err = AdminRegistry::builder()
            .register(EntityKind::Product)
            .unwrap()
            .register(EntityKind::Product)
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateRegistration(EntityKind::Product));
    }

    #[test]
    fn a_customized_registration_also_conflicts_with_a_plain_one() {
        // The "registered plain in one revision, customized in another"
        // contradiction: the registry refuses to hold both.
        let customized = AdminOptions::builder(EntityKind::Product)
            .list_per_page(5)
            .build()
            .unwrap();
        let err = AdminRegistry::builder()
            .register(EntityKind::Product)
            .unwrap()
            .register_with(customized)
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateRegistration(EntityKind::Product));
    }

    #[test]
    fn missing_registration_fails_finish() {
        let err = AdminRegistry::builder()
            .register(EntityKind::Product)
            .unwrap()
            .finish()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Unregistered(_)));
    }
}
