//! Canned expression sets: the default name-and-address sample and
//! whole-provider sampling.

use crate::errors::GenerateError;
use crate::expression::Expression;
use crate::providers::ProviderRegistry;

/// The default sample: a full name and a full address.
pub fn sample_expressions() -> Vec<Expression> {
    vec![
        Expression::new("person", "full_name"),
        Expression::new("person", "full_address"),
    ]
}

/// One expression per parameterless operation of the named providers,
/// or of every registered provider when `names` is empty.
pub fn provider_expressions(
    registry: &ProviderRegistry,
    names: &[String],
) -> Result<Vec<Expression>, GenerateError> {
    let selected: Vec<&str> = if names.is_empty() {
        registry.provider_names().collect()
    } else {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            if registry.provider(name).is_none() {
                return Err(GenerateError::UnknownProvider(name.clone()));
            }
            selected.push(name.as_str());
        }
        selected
    };

    let mut expressions = Vec::new();
    for name in selected {
        let Some(provider) = registry.provider(name) else {
            continue;
        };
        for operation in provider.operations() {
            // Parameterized operations need caller-supplied input and
            // cannot be sampled blind.
            if operation.params.is_empty() {
                expressions.push(Expression::new(provider.name(), operation.name));
            }
        }
    }
    Ok(expressions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sample_is_name_and_address() {
        let expressions = sample_expressions();
        assert_eq!(expressions.len(), 2);
        assert_eq!(expressions[0].field_name(), "full_name");
        assert_eq!(expressions[1].field_name(), "full_address");
    }

    #[test]
    fn provider_sampling_skips_parameterized_operations() {
        let registry = ProviderRegistry::new();
        let expressions =
            provider_expressions(&registry, &["svnr".to_string()]).expect("known provider");
        assert_eq!(expressions.len(), 1);
        assert_eq!(expressions[0].operation(), "svnr");
    }

    #[test]
    fn empty_selection_covers_every_provider() {
        let registry = ProviderRegistry::new();
        let expressions = provider_expressions(&registry, &[]).expect("no selection");
        let providers: std::collections::BTreeSet<&str> = expressions
            .iter()
            .map(|expression| expression.provider())
            .collect();
        assert!(providers.contains("svnr"));
        assert!(providers.contains("care"));
        assert!(providers.contains("icd"));
        assert!(providers.contains("person"));
    }

    #[test]
    fn unknown_provider_names_are_rejected() {
        let registry = ProviderRegistry::new();
        let result = provider_expressions(&registry, &["nope".to_string()]);
        assert!(matches!(result, Err(GenerateError::UnknownProvider(_))));
    }
}
