use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use rand::{Rng, RngCore};

use crate::errors::GenerateError;
use crate::params::Params;
use crate::providers::{OperationSpec, Provider};

const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new("code"),
    OperationSpec::new("diagnosis"),
];

const ASSET_FILE: &str = "icd10_diagnoses.txt";
const FIELD_SEPARATOR: &str = "@@";

/// ICD-10 diagnosis sampling from the bundled `CODE@@text` asset.
///
/// A missing or partly malformed asset degrades to the built-in list so
/// the provider keeps working from any working directory.
pub struct IcdProvider;

impl Provider for IcdProvider {
    fn name(&self) -> &'static str {
        "icd"
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
        let entries = diagnoses();
        let entry = &entries[rng.random_range(0..entries.len())];
        match operation {
            "code" => Ok(entry.0.clone()),
            "diagnosis" => Ok(entry.1.clone()),
            other => Err(GenerateError::UnknownOperation(format!("icd.{other}"))),
        }
    }
}

fn diagnoses() -> &'static [(String, String)] {
    static ENTRIES: OnceLock<Vec<(String, String)>> = OnceLock::new();
    ENTRIES.get_or_init(|| {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join(ASSET_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let entries = parse_entries(&contents);
                if entries.is_empty() {
                    tracing::warn!(
                        event = "asset_empty",
                        path = %path.display(),
                        "falling back to built-in diagnoses"
                    );
                    default_entries()
                } else {
                    entries
                }
            }
            Err(err) => {
                tracing::warn!(
                    event = "asset_unreadable",
                    path = %path.display(),
                    error = %err,
                    "falling back to built-in diagnoses"
                );
                default_entries()
            }
        }
    })
}

fn parse_entries(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            line.split_once(FIELD_SEPARATOR)
                .map(|(code, text)| (code.trim().to_string(), text.trim().to_string()))
        })
        .filter(|(code, text)| !code.is_empty() && !text.is_empty())
        .collect()
}

fn default_entries() -> Vec<(String, String)> {
    DEFAULT_DIAGNOSES
        .iter()
        .map(|(code, text)| (code.to_string(), text.to_string()))
        .collect()
}

const DEFAULT_DIAGNOSES: &[(&str, &str)] = &[
    ("A09", "Sonstige Gastroenteritis und Kolitis"),
    ("E11", "Diabetes mellitus, Typ 2"),
    ("I10", "Essentielle Hypertonie"),
    ("J06", "Akute Infektion der oberen Atemwege"),
    ("K29", "Gastritis und Duodenitis"),
    ("M54", "Rueckenschmerzen"),
];
