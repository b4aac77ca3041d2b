//! Response schema descriptors.
//!
//! Serializes to the OpenAPI subset the Gemini API accepts for
//! `generationConfig.responseSchema`.

use serde::Serialize;
use std::collections::BTreeMap;

/// Schema node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string.
    String,
    /// JSON number.
    Number,
    /// JSON integer.
    Integer,
    /// JSON boolean.
    Boolean,
}

/// A declared output shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    /// Node type.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Field description shown to the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object properties.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Self>,
    /// Order the model should emit properties in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    /// Array item schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Self>>,
    /// Required property names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ResponseSchema {
    const fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            items: None,
            required: Vec::new(),
        }
    }

    /// An empty object schema.
    #[must_use]
    pub const fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    /// A string schema.
    #[must_use]
    pub const fn string() -> Self {
        Self::of(SchemaType::String)
    }

    /// An array schema with the given item schema.
    #[must_use]
    pub fn array(items: Self) -> Self {
        let mut schema = Self::of(SchemaType::Array);
        schema.items = Some(Box::new(items));
        schema
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a required property.
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>, schema: Self) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.with_property(name, schema)
    }

    /// Adds an optional property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Self) -> Self {
        let name = name.into();
        self.property_ordering.push(name.clone());
        self.properties.insert(name, schema);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_gemini_format() {
        let schema = ResponseSchema::object()
            .with_required("name", ResponseSchema::string().with_description("A name"))
            .with_property("tags", ResponseSchema::array(ResponseSchema::string()));

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "OBJECT",
                "properties": {
                    "name": {"type": "STRING", "description": "A name"},
                    "tags": {"type": "ARRAY", "items": {"type": "STRING"}}
                },
                "propertyOrdering": ["name", "tags"],
                "required": ["name"]
            })
        );
    }
}
