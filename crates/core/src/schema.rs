//! Parameter schemas for tool arguments.
//!
//! A [`ParameterSchema`] is derived from a tool's typed argument struct. It is both
//! what the tool advertises to the engine (a JSON Schema object generated by
//! `schemars`) and what the dispatcher checks incoming argument strings against
//! before any executor runs. The check deserializes into the same struct the
//! executor reads, so the two can never disagree.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

/// Failure to accept a serialized argument object.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("arguments are not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("arguments must be a JSON object")]
    NotAnObject,
    #[error("{0}")]
    Mismatch(#[source] serde_json::Error),
}

type Check = fn(&Value) -> Result<(), serde_json::Error>;

/// Schema of an argument object.
///
/// Properties the argument type does not name are tolerated and ignored.
#[derive(Clone)]
pub struct ParameterSchema {
    json: Value,
    check: Check,
}

impl std::fmt::Debug for ParameterSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ParameterSchema").field(&self.json).finish()
    }
}

impl ParameterSchema {
    /// An object schema without properties. Any object is accepted.
    pub fn object() -> Self {
        Self {
            json: json!({ "type": "object", "properties": {} }),
            check: |_| Ok(()),
        }
    }

    /// The schema of `A`, as generated by `schemars`.
    pub fn of<A>() -> Self
    where
        A: JsonSchema + DeserializeOwned,
    {
        let mut json = schemars::schema_for!(A).to_value();
        if let Some(schema) = json.as_object_mut() {
            // Engines only want the object description itself.
            schema.remove("$schema");
            schema.remove("title");
        }
        Self {
            json,
            check: deserializes_as::<A>,
        }
    }

    /// The JSON Schema form the engine expects.
    pub fn to_json(&self) -> Value {
        self.json.clone()
    }

    /// Parses a serialized argument object and checks it against the schema.
    ///
    /// A blank string is read as an empty object, since engines send `""` for
    /// functions without parameters.
    pub fn validate(&self, args_json: &str) -> Result<Map<String, Value>, SchemaError> {
        let args = if args_json.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str::<Value>(args_json)?
        };
        if !args.is_object() {
            return Err(SchemaError::NotAnObject);
        }

        (self.check)(&args).map_err(SchemaError::Mismatch)?;
        match args {
            Value::Object(map) => Ok(map),
            _ => Err(SchemaError::NotAnObject),
        }
    }
}

fn deserializes_as<A: DeserializeOwned>(value: &Value) -> Result<(), serde_json::Error> {
    A::deserialize(value).map(drop)
}
