use rand::RngCore;

use fakeform_core::{RandomSources, SvnrEngine};

use crate::errors::GenerateError;
use crate::params::Params;
use crate::providers::{OperationSpec, Provider};

const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new("svnr"),
    OperationSpec::with_params("svnr_for", &["birth_date"]),
];

/// Austrian social-insurance numbers backed by the core engine.
pub struct SvnrProvider;

impl Provider for SvnrProvider {
    fn name(&self) -> &'static str {
        "svnr"
    }

    fn operations(&self) -> &'static [OperationSpec] {
        OPERATIONS
    }

    fn generate(
        &self,
        operation: &str,
        params: &Params,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerateError> {
        let mut engine = SvnrEngine::with_sources(RandomSources::new(rng));
        match operation {
            "svnr" => Ok(engine.generate_random()?.to_string()),
            "svnr_for" => {
                let birth_date = params.get("birth_date").ok_or_else(|| {
                    GenerateError::InvalidParams(
                        "svnr_for: missing required parameter 'birth_date'".to_string(),
                    )
                })?;
                Ok(engine.generate_for_birth_date(birth_date)?.to_string())
            }
            other => Err(GenerateError::UnknownOperation(format!("svnr.{other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn svnr_for_embeds_the_birth_date() {
        let provider = SvnrProvider;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let params = Params::parse("birth_date=220422");
        let value = provider
            .generate("svnr_for", &params, &mut rng)
            .expect("generation succeeds");
        assert_eq!(value.len(), 10);
        assert!(value.ends_with("220422"));
    }

    #[test]
    fn svnr_for_requires_a_birth_date() {
        let provider = SvnrProvider;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let result = provider.generate("svnr_for", &Params::empty(), &mut rng);
        assert!(matches!(result, Err(GenerateError::InvalidParams(_))));
    }

    #[test]
    fn malformed_birth_date_surfaces_the_core_error() {
        let provider = SvnrProvider;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let params = Params::parse("birth_date=1A0180");
        let result = provider.generate("svnr_for", &params, &mut rng);
        assert!(matches!(result, Err(GenerateError::Svnr(_))));
    }
}
