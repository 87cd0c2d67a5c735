//! Parameter parsing for highlighter constructors
//!
//! Parameters come straight from user-typed commands or config files:
//! `-switch` or `-switch <value>` options first, then positional
//! parameters. A `--` ends the switches.

use std::collections::HashMap;

use crate::error::{HighlightError, Result};

/// Description of one accepted switch
#[derive(Debug, Clone, Copy)]
pub struct SwitchDesc {
    pub name: &'static str,
    pub takes_arg: bool,
}

impl SwitchDesc {
    pub const fn flag(name: &'static str) -> Self {
        Self { name, takes_arg: false }
    }

    pub const fn with_arg(name: &'static str) -> Self {
        Self { name, takes_arg: true }
    }
}

/// Parsed parameters
#[derive(Debug)]
pub struct ParametersParser<'a> {
    switches: HashMap<&'static str, Option<&'a str>>,
    positional: Vec<&'a str>,
}

impl<'a> ParametersParser<'a> {
    /// Parse `params`, accepting the given switches and between
    /// `min_positional` and `max_positional` positional parameters
    pub fn new(
        params: &'a [String],
        switches: &[SwitchDesc],
        min_positional: usize,
        max_positional: Option<usize>,
    ) -> Result<Self> {
        let mut parsed = HashMap::new();
        let mut positional = Vec::new();
        let mut only_positional = false;
        let mut iter = params.iter();

        while let Some(param) = iter.next() {
            if only_positional || !param.starts_with('-') || param == "-" {
                positional.push(param.as_str());
                // Switches must precede positional parameters
                only_positional = true;
                continue;
            }
            if param == "--" {
                only_positional = true;
                continue;
            }

            let name = &param[1..];
            let desc = switches
                .iter()
                .find(|desc| desc.name == name)
                .ok_or_else(|| HighlightError::bad_params(format!("unknown switch '{}'", param)))?;
            let value = if desc.takes_arg {
                let value = iter.next().ok_or_else(|| {
                    HighlightError::bad_params(format!("missing argument for switch '{}'", param))
                })?;
                Some(value.as_str())
            } else {
                None
            };
            parsed.insert(desc.name, value);
        }

        if positional.len() < min_positional {
            return Err(HighlightError::bad_params("wrong argument count"));
        }
        if let Some(max) = max_positional {
            if positional.len() > max {
                return Err(HighlightError::bad_params("wrong argument count"));
            }
        }

        Ok(Self {
            switches: parsed,
            positional,
        })
    }

    /// Whether a switch was given
    pub fn has(&self, name: &str) -> bool {
        self.switches.contains_key(name)
    }

    /// Value of a switch taking an argument
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.switches.get(name).copied().flatten()
    }

    pub fn positional(&self) -> &[&'a str] {
        &self.positional
    }

    /// Parse a switch value as a number
    pub fn get_number(&self, name: &str) -> Result<Option<usize>> {
        self.get(name)
            .map(|value| {
                value.parse::<usize>().map_err(|_| {
                    HighlightError::bad_params(format!("invalid number for -{}: '{}'", name, value))
                })
            })
            .transpose()
    }
}
