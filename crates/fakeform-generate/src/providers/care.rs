use rand::RngCore;

use crate::errors::GenerateError;
use crate::params::Params;
use crate::providers::{numerify, OperationSpec, Provider};

const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new("vpnr"),
    OperationSpec::new("lenr"),
];

/// Health-care provider numbers: the six-digit contract-partner number
/// (VPNR) and the eight-digit service-provider number (LENR). Plain
/// digit strings; neither carries a check digit.
pub struct CareNumberProvider;

impl Provider for CareNumberProvider {
    fn name(&self) -> &'static str {
        "care"
    }

    fn operations(&self) -> &'static [OperationSpec] {
        OPERATIONS
    }

    fn generate(
        &self,
        operation: &str,
        _params: &Params,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerateError> {
        match operation {
            "vpnr" => Ok(numerify("######", rng)),
            "lenr" => Ok(numerify("########", rng)),
            other => Err(GenerateError::UnknownOperation(format!("care.{other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn vpnr_is_six_digits() {
        let provider = CareNumberProvider;
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let value = provider
            .generate("vpnr", &Params::empty(), &mut rng)
            .expect("generation succeeds");
        assert_eq!(value.len(), 6);
        assert!(value.bytes().all(|byte| byte.is_ascii_digit()));
    }

    #[test]
    fn lenr_is_eight_digits() {
        let provider = CareNumberProvider;
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let value = provider
            .generate("lenr", &Params::empty(), &mut rng)
            .expect("generation succeeds");
        assert_eq!(value.len(), 8);
        assert!(value.bytes().all(|byte| byte.is_ascii_digit()));
    }
}
