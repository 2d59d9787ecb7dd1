use fake::faker::address::en::{BuildingNumber, CityName, StreetName, ZipCode};
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::Fake;
use rand::RngCore;

use crate::errors::GenerateError;
use crate::params::Params;
use crate::providers::{OperationSpec, Provider};

const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new("full_name"),
    OperationSpec::new("first_name"),
    OperationSpec::new("last_name"),
    OperationSpec::new("full_address"),
    OperationSpec::new("street_address"),
    OperationSpec::new("city"),
    OperationSpec::new("zip_code"),
    OperationSpec::new("email"),
];

/// Names, addresses, and e-mail addresses via the faker library.
pub struct PersonProvider;

impl Provider for PersonProvider {
    fn name(&self) -> &'static str {
        "person"
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
            "full_name" => Ok(Name().fake_with_rng(rng)),
            "first_name" => Ok(FirstName().fake_with_rng(rng)),
            "last_name" => Ok(LastName().fake_with_rng(rng)),
            "full_address" => {
                let street = street_address(rng);
                let zip: String = ZipCode().fake_with_rng(rng);
                let city: String = CityName().fake_with_rng(rng);
                Ok(format!("{street}, {zip} {city}"))
            }
            "street_address" => Ok(street_address(rng)),
            "city" => Ok(CityName().fake_with_rng(rng)),
            "zip_code" => Ok(ZipCode().fake_with_rng(rng)),
            "email" => Ok(FreeEmail().fake_with_rng(rng)),
            other => Err(GenerateError::UnknownOperation(format!("person.{other}"))),
        }
    }
}

fn street_address(rng: &mut dyn RngCore) -> String {
    let street: String = StreetName().fake_with_rng(rng);
    let number: String = BuildingNumber().fake_with_rng(rng);
    format!("{street} {number}")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn every_operation_produces_a_value() {
        let provider = PersonProvider;
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for spec in OPERATIONS {
            let value = provider
                .generate(spec.name, &Params::empty(), &mut rng)
                .expect("generation succeeds");
            assert!(!value.is_empty(), "empty value for {}", spec.name);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let provider = PersonProvider;
        let mut first = ChaCha8Rng::seed_from_u64(5);
        let mut second = ChaCha8Rng::seed_from_u64(5);
        let a = provider
            .generate("full_name", &Params::empty(), &mut first)
            .expect("generation succeeds");
        let b = provider
            .generate("full_name", &Params::empty(), &mut second)
            .expect("generation succeeds");
        assert_eq!(a, b);
    }
}
