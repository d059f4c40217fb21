#![warn(missing_docs)]
//! # champs-e2e-schema
//!
//! ## Purpose
//! Loads the published API schema document and validates response bodies
//! against its named definitions.
//!
//! ## Responsibilities
//! - Look up definitions (`Sport`, `SportResponse`, ...) by name.
//! - Accept extra fragments and external documents before validation, so
//!   nested `$ref`s resolve.
//! - Report every schema violation for a body, not only the first.
//!
//! ## Data flow
//! Schema file -> [`SchemaRegistry::from_path`] -> [`SchemaRegistry::compile`]
//! -> [`DefinitionValidator::validate`] on each response body.
//!
//! ## Ownership and lifetimes
//! The registry owns its definitions and is shared by reference between
//! scenarios. Compiled validators are cached per definition name behind an
//! `Arc` and dropped whenever a fragment or document is registered.
//!
//! ## Error model
//! Loading, lookup, and compile problems and validation failures are all
//! [`SchemaError`] variants; validation failures carry the full message list.
//!
//! ## Example
//! ```rust
//! use champs_e2e_schema::SchemaRegistry;
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::from_document(json!({
//!     "definitions": {
//!         "Name": { "type": "string" },
//!         "Team": {
//!             "type": "object",
//!             "required": ["name"],
//!             "properties": { "name": { "$ref": "#/definitions/Name" } }
//!         }
//!     }
//! }))
//! .unwrap();
//! assert!(registry.validate("Team", &json!({ "name": "Bulls" })).is_ok());
//! assert!(registry.validate("Team", &json!({ "name": 3 })).is_err());
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use jsonschema::{Draft, JSONSchema};
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Where a document keeps its named definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionLayout {
    /// Swagger 2.0: `#/definitions/{name}`, JSON-Schema draft 4.
    Swagger2,
    /// OpenAPI 3: `#/components/schemas/{name}`, JSON-Schema draft 7.
    OpenApi3,
}

impl DefinitionLayout {
    fn detect(document: &Value) -> Option<Self> {
        if document.get("definitions").is_some_and(Value::is_object) {
            return Some(Self::Swagger2);
        }
        if document
            .get("components")
            .and_then(|components| components.get("schemas"))
            .is_some_and(Value::is_object)
        {
            return Some(Self::OpenApi3);
        }
        None
    }

    fn definitions(self, document: Value) -> Map<String, Value> {
        let section = match self {
            Self::Swagger2 => document.get("definitions"),
            Self::OpenApi3 => document
                .get("components")
                .and_then(|components| components.get("schemas")),
        };
        section
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    fn reference(self, name: &str) -> String {
        let escaped = name.replace('~', "~0").replace('/', "~1");
        match self {
            Self::Swagger2 => format!("#/definitions/{escaped}"),
            Self::OpenApi3 => format!("#/components/schemas/{escaped}"),
        }
    }

    fn draft(self) -> Draft {
        match self {
            Self::Swagger2 => Draft::Draft4,
            Self::OpenApi3 => Draft::Draft7,
        }
    }

    fn wrap(self, definitions: &Map<String, Value>, name: &str) -> Value {
        let target = json!([{ "$ref": self.reference(name) }]);
        match self {
            Self::Swagger2 => json!({ "definitions": definitions, "allOf": target }),
            Self::OpenApi3 => json!({
                "components": { "schemas": definitions },
                "allOf": target,
            }),
        }
    }
}

/// Named-definition registry built once per test run.
pub struct SchemaRegistry {
    layout: DefinitionLayout,
    definitions: Map<String, Value>,
    documents: Vec<(String, Value)>,
    compiled: RwLock<HashMap<String, Arc<DefinitionValidator>>>,
}

impl SchemaRegistry {
    /// Builds a registry from a parsed schema document.
    ///
    /// # Errors
    /// Returns [`SchemaError::MissingDefinitions`] when the document has
    /// neither a `definitions` object nor a `components.schemas` object.
    pub fn from_document(document: Value) -> Result<Self, SchemaError> {
        let layout = DefinitionLayout::detect(&document).ok_or(SchemaError::MissingDefinitions)?;
        let definitions = layout.definitions(document);
        tracing::debug!(
            layout = ?layout,
            definitions = definitions.len(),
            "schema document loaded"
        );
        Ok(Self {
            layout,
            definitions,
            documents: Vec::new(),
            compiled: RwLock::default(),
        })
    }

    /// Reads and parses a schema document from disk.
    ///
    /// # Errors
    /// Returns [`SchemaError::Io`] or [`SchemaError::Decode`] when the file
    /// cannot be read or parsed, plus any [`Self::from_document`] error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let document = serde_json::from_str(&raw).map_err(SchemaError::Decode)?;
        Self::from_document(document)
    }

    /// Returns the detected definition layout.
    pub fn layout(&self) -> DefinitionLayout {
        self.layout
    }

    /// Looks up a definition by name.
    pub fn definition(&self, name: &str) -> Option<&Value> {
        self.definitions.get(name)
    }

    /// Returns all definition names in sorted order.
    pub fn definition_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Adds or replaces a named definition.
    pub fn register_definition(&mut self, name: impl Into<String>, schema: Value) -> &mut Self {
        self.definitions.insert(name.into(), schema);
        self.compiled = RwLock::default();
        self
    }

    /// Registers an external document that `$ref`s may address by `uri`.
    pub fn register_document(&mut self, uri: impl Into<String>, document: Value) -> &mut Self {
        self.documents.push((uri.into(), document));
        self.compiled = RwLock::default();
        self
    }

    /// Compiles the named definition with every registered fragment in scope.
    ///
    /// Repeated calls for the same name return the cached validator until the
    /// registry is modified.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownDefinition`] for unregistered names and
    /// [`SchemaError::Compile`] when the schema (or a `$ref` it uses) is
    /// invalid.
    pub fn compile(&self, name: &str) -> Result<Arc<DefinitionValidator>, SchemaError> {
        if let Some(validator) = self
            .compiled
            .read()
            .ok()
            .and_then(|cache| cache.get(name).cloned())
        {
            return Ok(validator);
        }
        if !self.definitions.contains_key(name) {
            return Err(SchemaError::UnknownDefinition(name.to_string()));
        }

        let wrapper = self.layout.wrap(&self.definitions, name);
        let mut options = JSONSchema::options();
        options.with_draft(self.layout.draft());
        for (uri, document) in &self.documents {
            options.with_document(uri.clone(), document.clone());
        }

        let compiled = options
            .compile(&wrapper)
            .map_err(|error| SchemaError::Compile {
                definition: name.to_string(),
                message: error.to_string(),
            })?;

        let validator = Arc::new(DefinitionValidator {
            definition: name.to_string(),
            compiled,
        });
        tracing::debug!(definition = name, "schema definition compiled");
        if let Ok(mut cache) = self.compiled.write() {
            cache.insert(name.to_string(), Arc::clone(&validator));
        }
        Ok(validator)
    }

    /// Compiles `name` and validates `instance` against it.
    ///
    /// # Errors
    /// See [`Self::compile`] and [`DefinitionValidator::validate`].
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        self.compile(name)?.validate(instance)
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            layout: self.layout,
            definitions: self.definitions.clone(),
            documents: self.documents.clone(),
            compiled: RwLock::default(),
        }
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("layout", &self.layout)
            .field("definitions", &self.definitions.len())
            .field("documents", &self.documents.len())
            .finish_non_exhaustive()
    }
}

/// Compiled validator for one named definition.
pub struct DefinitionValidator {
    definition: String,
    compiled: JSONSchema,
}

impl DefinitionValidator {
    /// Definition this validator checks.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Returns `true` when `instance` satisfies the definition.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.compiled.is_valid(instance)
    }

    /// Validates `instance`, collecting every violation message.
    ///
    /// # Errors
    /// Returns [`SchemaError::Violation`] when `instance` does not match.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaError> {
        let errors = match self.compiled.validate(instance) {
            Ok(()) => return Ok(()),
            Err(errors) => errors.map(|error| error.to_string()).collect::<Vec<_>>(),
        };
        Err(SchemaError::Violation {
            definition: self.definition.clone(),
            errors,
        })
    }
}

impl std::fmt::Debug for DefinitionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionValidator")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Schema loading and validation errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema file could not be read.
    #[error("failed to read schema document {path}: {source}")]
    Io {
        /// File path as given.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Schema file is not valid JSON.
    #[error("schema document decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Document has no definitions section.
    #[error("schema document has no `definitions` or `components.schemas` object")]
    MissingDefinitions,
    /// Requested definition is not registered.
    #[error("unknown schema definition `{0}`")]
    UnknownDefinition(String),
    /// Definition failed to compile.
    #[error("schema definition `{definition}` does not compile: {message}")]
    Compile {
        /// Definition name.
        definition: String,
        /// Compiler message.
        message: String,
    },
    /// Instance does not match the definition.
    #[error("response does not match schema `{definition}`: {}", .errors.join("; "))]
    Violation {
        /// Definition name.
        definition: String,
        /// One message per violation.
        errors: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    //! Unit tests for layout detection and reference escaping.

    use super::*;

    #[test]
    fn detects_both_layouts() {
        let swagger = json!({ "swagger": "2.0", "definitions": {} });
        let openapi = json!({ "openapi": "3.0.0", "components": { "schemas": {} } });
        assert_eq!(
            DefinitionLayout::detect(&swagger),
            Some(DefinitionLayout::Swagger2)
        );
        assert_eq!(
            DefinitionLayout::detect(&openapi),
            Some(DefinitionLayout::OpenApi3)
        );
        assert_eq!(DefinitionLayout::detect(&json!({ "paths": {} })), None);
    }

    #[test]
    fn escapes_pointer_tokens_in_references() {
        assert_eq!(
            DefinitionLayout::Swagger2.reference("a/b~c"),
            "#/definitions/a~1b~0c"
        );
        assert_eq!(
            DefinitionLayout::OpenApi3.reference("Sport"),
            "#/components/schemas/Sport"
        );
    }

    #[test]
    fn unknown_definition_is_reported_before_compiling() {
        let registry = SchemaRegistry::from_document(json!({ "definitions": {} }))
            .expect("empty definitions should load");
        assert!(matches!(
            registry.compile("Missing"),
            Err(SchemaError::UnknownDefinition(name)) if name == "Missing"
        ));
    }
}
