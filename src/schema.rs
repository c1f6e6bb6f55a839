use crate::extract::ExtractError;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declarative description of a repeated record within a document: one
/// selector locating every container node, plus an ordered list of fields
/// to read out of each container. Built once by the caller (in code or from
/// a YAML/JSON file) and never mutated afterwards.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Schema {
    pub container: String,
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default)]
    pub extract: ExtractMode,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    #[default]
    Text,
    Attribute,
}

impl Field {
    pub fn text<S: ToString>(name: S, selector: S) -> Self {
        Self {
            name: name.to_string(),
            selector: selector.to_string(),
            attribute: None,
            extract: ExtractMode::Text,
        }
    }

    pub fn attribute<S: ToString>(name: S, selector: S, attribute: S) -> Self {
        Self {
            name: name.to_string(),
            selector: selector.to_string(),
            attribute: Some(attribute.to_string()),
            extract: ExtractMode::Attribute,
        }
    }
}

impl Schema {
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.container.trim().is_empty() {
            return Err(ExtractError::InvalidSchema(
                "empty container selector".to_string(),
            ));
        }
        if self.fields.is_empty() {
            return Err(ExtractError::InvalidSchema("no fields".to_string()));
        }
        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(ExtractError::InvalidSchema(format!(
                    "duplicate field {:?}",
                    field.name
                )));
            }
            if field.extract == ExtractMode::Attribute && field.attribute.is_none() {
                return Err(ExtractError::InvalidSchema(format!(
                    "field {:?} extracts an attribute but names none",
                    field.name
                )));
            }
        }
        Ok(())
    }

    /// Validates the schema and parses every selector. Compilation is the
    /// single point where configuration mistakes surface; extraction over a
    /// compiled schema cannot fail. The compiled form is reusable across
    /// documents.
    pub fn compile(&self) -> Result<CompiledSchema, ExtractError> {
        self.validate()?;
        let container = Selector::parse(&self.container).map_err(|_| {
            ExtractError::InvalidLocator {
                field: "container".to_string(),
                selector: self.container.clone(),
            }
        })?;
        let fields = self
            .fields
            .iter()
            .map(|f| {
                let selector =
                    Selector::parse(&f.selector).map_err(|_| ExtractError::InvalidLocator {
                        field: f.name.clone(),
                        selector: f.selector.clone(),
                    })?;
                let source = match (f.extract, f.attribute.as_ref()) {
                    (ExtractMode::Attribute, Some(attribute)) => {
                        ValueSource::Attribute(attribute.clone())
                    }
                    // validate() rejects Attribute mode without a name
                    _ => ValueSource::Text,
                };
                Ok(CompiledField {
                    name: f.name.clone(),
                    selector,
                    source,
                })
            })
            .collect::<Result<Vec<_>, ExtractError>>()?;
        Ok(CompiledSchema { container, fields })
    }
}

pub struct CompiledSchema {
    pub(crate) container: Selector,
    pub(crate) fields: Vec<CompiledField>,
}

pub(crate) struct CompiledField {
    pub(crate) name: String,
    pub(crate) selector: Selector,
    pub(crate) source: ValueSource,
}

pub(crate) enum ValueSource {
    Text,
    Attribute(String),
}
