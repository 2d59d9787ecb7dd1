//! Parameter strings of the form `name=value,name2=value2`.
//!
//! Names end at `=` or `:`; values end at `,`. A backslash inside a
//! value escapes the following character, so separators can appear in
//! values (`separator=\,`).

use std::collections::BTreeMap;

use crate::errors::GenerateError;

const EQUALS: [char; 2] = ['=', ':'];
const SEPARATOR: char = ',';
const ESCAPE: char = '\\';

/// Parsed parameter map with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    map: BTreeMap<String, String>,
}

impl Params {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a parameter string. Entries with a blank name are dropped,
    /// as are trailing separators; parsing itself never fails.
    pub fn parse(input: &str) -> Self {
        let mut map = BTreeMap::new();
        let mut chars = input.chars().peekable();

        while chars.peek().is_some() {
            let mut name = String::new();
            for ch in chars.by_ref() {
                if EQUALS.contains(&ch) {
                    break;
                }
                name.push(ch);
            }

            let mut value = String::new();
            while let Some(ch) = chars.next() {
                if ch == SEPARATOR {
                    break;
                }
                if ch == ESCAPE {
                    if let Some(escaped) = chars.next() {
                        value.push(escaped);
                    }
                } else {
                    value.push(ch);
                }
            }

            let name = name.trim();
            if !name.is_empty() {
                map.insert(name.to_string(), value);
            }
        }

        Self { map }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, GenerateError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| {
                GenerateError::InvalidParams(format!("{key}: expected true or false, got '{value}'"))
            }),
        }
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, GenerateError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| {
                GenerateError::InvalidParams(format!("{key}: expected an integer, got '{value}'"))
            }),
        }
    }

    pub fn get_char(&self, key: &str) -> Result<Option<char>, GenerateError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(Some(ch)),
                    _ => Err(GenerateError::InvalidParams(format!(
                        "{key}: expected a single character, got '{value}'"
                    ))),
                }
            }
        }
    }

    /// Reject keys outside the accepted set, naming the context the way
    /// plan validation errors do.
    pub fn ensure_known(&self, ctx: &str, known: &[&str]) -> Result<(), GenerateError> {
        for key in self.map.keys() {
            if !known.contains(&key.as_str()) {
                return Err(GenerateError::InvalidParams(format!(
                    "{ctx}: unknown parameter '{key}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_pairs() {
        let params = Params::parse("header=false,separator=;");
        assert_eq!(params.get("header"), Some("false"));
        assert_eq!(params.get("separator"), Some(";"));
    }

    #[test]
    fn accepts_colon_as_equals() {
        let params = Params::parse("table_name:people");
        assert_eq!(params.get("table_name"), Some("people"));
    }

    #[test]
    fn backslash_escapes_the_separator() {
        let params = Params::parse(r"separator=\,,quote='");
        assert_eq!(params.get("separator"), Some(","));
        assert_eq!(params.get("quote"), Some("'"));
    }

    #[test]
    fn blank_names_are_dropped() {
        let params = Params::parse("=orphan,,header=true");
        assert_eq!(params.get("header"), Some("true"));
        assert!(params.get("").is_none());
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(Params::parse("").is_empty());
    }

    #[test]
    fn typed_accessors_validate_values() {
        let params = Params::parse("batch=abc,quote=xy");
        assert!(matches!(
            params.get_i64("batch"),
            Err(GenerateError::InvalidParams(_))
        ));
        assert!(matches!(
            params.get_char("quote"),
            Err(GenerateError::InvalidParams(_))
        ));
        assert_eq!(params.get_i64("missing").expect("absent key"), None);
    }

    #[test]
    fn unknown_keys_are_rejected_in_context() {
        let params = Params::parse("header=true,color=red");
        let result = params.ensure_known("format csv", &["header", "separator", "quote"]);
        assert!(matches!(result, Err(GenerateError::InvalidParams(_))));
    }
}
