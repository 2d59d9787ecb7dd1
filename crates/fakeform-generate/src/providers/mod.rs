//! Static registry of data providers.
//!
//! Providers are registered at construction time; there is no runtime
//! discovery. Each provider exposes named operations producing one
//! string value per call from a caller-supplied RNG.

mod care;
mod icd;
mod person;
mod svnr;

use std::collections::BTreeMap;

use rand::RngCore;
use serde::Serialize;

use crate::errors::GenerateError;
use crate::params::Params;

/// One operation of a provider: its name and the parameter keys it
/// accepts. Operations with a non-empty parameter list are skipped by
/// whole-provider sampling.
#[derive(Debug, Clone, Copy)]
pub struct OperationSpec {
    pub name: &'static str,
    pub params: &'static [&'static str],
}

impl OperationSpec {
    pub const fn new(name: &'static str) -> Self {
        Self { name, params: &[] }
    }

    pub const fn with_params(name: &'static str, params: &'static [&'static str]) -> Self {
        Self { name, params }
    }
}

/// A named family of fake-value operations.
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    fn operations(&self) -> &'static [OperationSpec];

    fn generate(
        &self,
        operation: &str,
        params: &Params,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerateError>;
}

/// Catalog row for listings, one per (provider, operation) pair.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub provider: String,
    pub operation: String,
    pub params: Vec<String>,
}

/// Lookup table over all built-in providers.
pub struct ProviderRegistry {
    providers: BTreeMap<&'static str, Box<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            providers: BTreeMap::new(),
        };
        registry.register(Box::new(svnr::SvnrProvider));
        registry.register(Box::new(care::CareNumberProvider));
        registry.register(Box::new(icd::IcdProvider));
        registry.register(Box::new(person::PersonProvider));
        registry
    }

    fn register(&mut self, provider: Box<dyn Provider>) {
        self.providers.insert(provider.name(), provider);
    }

    pub fn provider(&self, name: &str) -> Option<&dyn Provider> {
        self.providers.get(name).map(Box::as_ref)
    }

    pub fn provider_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.keys().copied()
    }

    /// All (provider, operation) pairs in stable name order.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        let mut entries = Vec::new();
        for provider in self.providers.values() {
            for operation in provider.operations() {
                entries.push(CatalogEntry {
                    provider: provider.name().to_string(),
                    operation: operation.name.to_string(),
                    params: operation.params.iter().map(|key| key.to_string()).collect(),
                });
            }
        }
        entries
    }

    /// Resolve and run one operation.
    pub fn generate(
        &self,
        provider: &str,
        operation: &str,
        params: &Params,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerateError> {
        let Some(found) = self.provider(provider) else {
            return Err(GenerateError::UnknownProvider(provider.to_string()));
        };
        let Some(spec) = found
            .operations()
            .iter()
            .find(|spec| spec.name == operation)
        else {
            return Err(GenerateError::UnknownOperation(format!(
                "{provider}.{operation}"
            )));
        };
        params.ensure_known(spec.name, spec.params)?;
        found.generate(operation, params, rng)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace every `#` in the pattern with a random decimal digit.
pub(crate) fn numerify(pattern: &str, rng: &mut dyn RngCore) -> String {
    use rand::Rng;

    pattern
        .chars()
        .map(|ch| {
            if ch == '#' {
                char::from(b'0' + rng.random_range(0..=9_u8))
            } else {
                ch
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn numerify_replaces_only_hashes() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let value = numerify("##-ab-##", &mut rng);
        assert_eq!(value.len(), 8);
        assert_eq!(&value[2..6], "-ab-");
        assert!(value[0..2].bytes().all(|byte| byte.is_ascii_digit()));
        assert!(value[6..8].bytes().all(|byte| byte.is_ascii_digit()));
    }

    #[test]
    fn registry_rejects_unknown_lookups() {
        let registry = ProviderRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(matches!(
            registry.generate("nope", "anything", &Params::empty(), &mut rng),
            Err(GenerateError::UnknownProvider(_))
        ));
        assert!(matches!(
            registry.generate("svnr", "frobnicate", &Params::empty(), &mut rng),
            Err(GenerateError::UnknownOperation(_))
        ));
    }

    #[test]
    fn registry_rejects_unknown_operation_params() {
        let registry = ProviderRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let params = Params::parse("color=red");
        assert!(matches!(
            registry.generate("svnr", "svnr", &params, &mut rng),
            Err(GenerateError::InvalidParams(_))
        ));
    }
}
