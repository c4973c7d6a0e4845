//! Raw configuration records as they appear in a YAML source
//!
//! Every field is optional here so that missing keys can be reported with
//! category and command context during validation instead of as a bare
//! deserialization error.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// One configuration document: category name to command records, in file order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawSource {
    pub categories: IndexMap<String, Option<Vec<RawCommand>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCommand {
    pub name: Option<String>,
    pub cmd: Option<String>,
    pub desc: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub args: Option<Vec<RawArgument>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawArgument {
    pub name: Option<String>,
    pub default: Option<RawScalar>,
    pub choices: Option<Vec<RawScalar>>,
}

/// YAML scalar accepted where the model wants a string (`default: 3`).
///
/// Numbers keep their YAML spelling (`1.0` stays `1.0`); booleans render
/// capitalized (`True`, `False`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Bool(bool),
    Number(serde_yaml_ng::Number),
    Str(String),
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl RawSource {
    /// Parse a YAML document. An empty or `null` document is an empty source.
    pub fn parse(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: Option<Self> = serde_yaml_ng::from_str(content)?;
        Ok(parsed.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_yaml_when_parsing_then_keeps_category_order() {
        let src = RawSource::parse(
            r#"
Zeta:
  - name: z
    cmd: echo z
Alpha:
  - name: a
    cmd: echo a
"#,
        )
        .unwrap();
        let names: Vec<&String> = src.categories.keys().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn given_numeric_default_when_parsing_then_displays_as_string() {
        let src = RawSource::parse(
            r#"
Net:
  - name: ping_host
    cmd: ping -c $1 $2
    args:
      - name: Count
        default: 3
      - name: Mode
        choices: [fast, 2, true]
"#,
        )
        .unwrap();
        let cmds = src.categories["Net"].as_ref().unwrap();
        let args = cmds[0].args.as_ref().unwrap();
        assert_eq!(args[0].default.as_ref().unwrap().to_string(), "3");
        let choices: Vec<String> = args[1]
            .choices
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(choices, vec!["fast", "2", "True"]);
    }

    fn scalars(yaml: &str) -> (Option<String>, Vec<String>) {
        let src = RawSource::parse(yaml).unwrap();
        let cmds = src.categories["Py"].as_ref().unwrap();
        let arg = &cmds[0].args.as_ref().unwrap()[0];
        (
            arg.default.as_ref().map(|d| d.to_string()),
            arg.choices
                .iter()
                .flatten()
                .map(|c| c.to_string())
                .collect(),
        )
    }

    #[test]
    fn given_float_scalars_when_parsing_then_keep_fraction_digits() {
        let (default, choices) = scalars(
            r#"
Py:
  - name: venv
    cmd: uv venv --python $1
    args:
      - name: Version
        default: 2.0
        choices: [3.9, 3.10, 2.0]
"#,
        );

        assert_eq!(default.as_deref(), Some("2.0"));
        assert_eq!(choices, vec!["3.9", "3.1", "2.0"]);
    }

    #[test]
    fn given_float_default_without_choices_when_parsing_then_not_truncated() {
        let (default, choices) = scalars(
            "Py:\n  - name: scale\n    cmd: scale $1\n    args:\n      - {name: Factor, default: 1.0}\n",
        );

        assert_eq!(default.as_deref(), Some("1.0"));
        assert!(choices.is_empty());
    }

    #[test]
    fn given_boolean_and_negative_scalars_when_parsing_then_rendered_as_written() {
        let (default, choices) = scalars(
            "Py:\n  - name: flag\n    cmd: run $1\n    args:\n      - {name: Enabled, default: false, choices: [true, false, -1]}\n",
        );

        assert_eq!(default.as_deref(), Some("False"));
        assert_eq!(choices, vec!["True", "False", "-1"]);
    }

    #[test]
    fn given_empty_document_when_parsing_then_returns_empty_source() {
        assert!(RawSource::parse("").unwrap().categories.is_empty());
        assert!(RawSource::parse("~\n").unwrap().categories.is_empty());
    }

    #[test]
    fn given_null_category_when_parsing_then_category_has_no_commands() {
        let src = RawSource::parse("Personal:\n").unwrap();
        assert_eq!(src.categories.get("Personal"), Some(&None));
    }

    #[test]
    fn given_list_document_when_parsing_then_fails() {
        assert!(RawSource::parse("- a\n- b\n").is_err());
    }
}
