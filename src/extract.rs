use crate::schema::{CompiledSchema, Schema, ValueSource};
use derive_more::{Display, Error};
use scraper::{ElementRef, Html};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[display("invalid schema: {_0}")]
    #[error(ignore)]
    InvalidSchema(String),
    #[display("invalid locator {selector:?} for field {field:?}")]
    InvalidLocator { field: String, selector: String },
}

/// One extracted repetition of the schema. Keys are exactly the schema's
/// field names in declaration order; a field whose node (or attribute) was
/// not found is kept with `None` rather than dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

pub type ExtractionResult = Vec<Record>;

impl Record {
    /// Outer `None` means the record has no such key; inner `None` means the
    /// key is present but its node was absent from the container.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Compiles the schema and extracts one record per container match under
/// `root`, in document order. Zero matches is a valid empty result; a broken
/// schema or selector fails the whole call before any traversal.
pub fn extract(root: ElementRef<'_>, schema: &Schema) -> Result<ExtractionResult, ExtractError> {
    Ok(schema.compile()?.extract(root))
}

pub fn extract_document(
    document: &Html,
    schema: &Schema,
) -> Result<ExtractionResult, ExtractError> {
    extract(document.root_element(), schema)
}

impl CompiledSchema {
    pub fn extract(&self, root: ElementRef<'_>) -> ExtractionResult {
        let mut records = Vec::new();
        for container in root.select(&self.container) {
            let mut fields = Vec::with_capacity(self.fields.len());
            for field in &self.fields {
                // Scoped to this container so sibling items never leak into
                // each other.
                let node = container.select(&field.selector).next();
                let value = node.and_then(|e| match &field.source {
                    ValueSource::Text => Some(text_of(&e)),
                    ValueSource::Attribute(attribute) => match e.attr(attribute) {
                        Some(value) => Some(value.to_string()),
                        None => {
                            log::warn!(
                                "Node matched by field {:?} has no attribute {attribute:?}",
                                field.name
                            );
                            None
                        }
                    },
                });
                fields.push((field.name.clone(), value));
            }
            records.push(Record { fields });
        }
        records
    }
}

fn text_of(e: &ElementRef<'_>) -> String {
    e.text().collect::<String>().trim().to_string()
}
