use serde_json::{Map, Value, json};

/// Fluent builder for JSON-Schema-like response shapes.
///
/// The builder wraps one open JSON mapping and performs no validation
/// of its own: it only shapes the structure the server is asked to
/// conform to. Two kinds of operations exist and behave differently:
///
/// - Shape setters ([`object`](Self::object), [`array`](Self::array),
///   [`string`](Self::string), [`number`](Self::number),
///   [`integer`](Self::integer), [`boolean`](Self::boolean)) replace
///   the whole internal state. Calling two in sequence keeps only the
///   last one.
/// - Property and constraint setters patch individual keys on the
///   current state without resetting anything else, so `object()` can
///   be followed by any number of `add_*_property` calls.
///
/// ```
/// use snakequery::SchemaBuilder;
/// use serde_json::json;
///
/// let schema = SchemaBuilder::create()
///     .object()
///     .add_string_property("name")
///     .add_number_property("price")
///     .required(["name", "price"])
///     .build();
///
/// assert_eq!(schema["type"], json!("object"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    schema: Map<String, Value>,
}

impl SchemaBuilder {
    /// Returns a fresh, empty builder.
    pub fn create() -> Self {
        Self::default()
    }

    /// Builds an array schema whose items are `{"type": <name>}` when
    /// given a string, or the given schema node verbatim otherwise.
    pub fn array_of(item_type: impl Into<Value>) -> Self {
        let items = match item_type.into() {
            Value::String(name) => json!({ "type": name }),
            other => other,
        };
        Self::create().array_with(items)
    }

    /// Builds an object schema directly from a properties mapping.
    pub fn object_with(properties: Value) -> Self {
        let mut builder = Self::create();
        builder.schema.insert("type".into(), json!("object"));
        builder.schema.insert("properties".into(), properties);
        builder
    }

    // Shape setters. Each one discards the current state wholesale.

    pub fn object(mut self) -> Self {
        self.schema = Map::new();
        self.schema.insert("type".into(), json!("object"));
        self.schema.insert("properties".into(), json!({}));
        self
    }

    /// Array schema with `{"type": "object"}` items.
    pub fn array(self) -> Self {
        self.array_with(json!({ "type": "object" }))
    }

    /// Array schema with the given items schema.
    pub fn array_with(mut self, items: Value) -> Self {
        self.schema = Map::new();
        self.schema.insert("type".into(), json!("array"));
        self.schema.insert("items".into(), items);
        self
    }

    pub fn string(mut self) -> Self {
        self.schema = Map::new();
        self.schema.insert("type".into(), json!("string"));
        self
    }

    pub fn number(mut self) -> Self {
        self.schema = Map::new();
        self.schema.insert("type".into(), json!("number"));
        self
    }

    /// Alias of [`number`](Self::number): the wire format never emits
    /// `"integer"`, and servers depend on that.
    pub fn integer(self) -> Self {
        self.number()
    }

    pub fn boolean(mut self) -> Self {
        self.schema = Map::new();
        self.schema.insert("type".into(), json!("boolean"));
        self
    }

    // Property path. Additive: initializes `properties` on first use,
    // then inserts or overwrites one named entry.

    pub fn add_property(mut self, name: impl Into<String>, schema: Value) -> Self {
        let props = self
            .schema
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        if !props.is_object() {
            *props = Value::Object(Map::new());
        }
        if let Value::Object(map) = props {
            map.insert(name.into(), schema);
        }
        self
    }

    pub fn add_string_property(self, name: impl Into<String>) -> Self {
        self.add_property(name, json!({ "type": "string" }))
    }

    pub fn add_number_property(self, name: impl Into<String>) -> Self {
        self.add_property(name, json!({ "type": "number" }))
    }

    /// Same wire representation as [`add_number_property`](Self::add_number_property).
    pub fn add_integer_property(self, name: impl Into<String>) -> Self {
        self.add_number_property(name)
    }

    pub fn add_boolean_property(self, name: impl Into<String>) -> Self {
        self.add_property(name, json!({ "type": "boolean" }))
    }

    /// Array-typed property; items default to `{"type": "string"}`.
    pub fn add_array_property(
        self,
        name: impl Into<String>,
        items: impl Into<Option<Value>>,
    ) -> Self {
        let items = items.into().unwrap_or_else(|| json!({ "type": "string" }));
        self.add_property(name, json!({ "type": "array", "items": items }))
    }

    /// Object-typed property; properties default to `{}`.
    pub fn add_object_property(
        self,
        name: impl Into<String>,
        properties: impl Into<Option<Value>>,
    ) -> Self {
        let properties = properties.into().unwrap_or_else(|| json!({}));
        self.add_property(name, json!({ "type": "object", "properties": properties }))
    }

    /// Replaces the required-field list wholesale.
    pub fn required<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<Value> = fields
            .into_iter()
            .map(|f| Value::String(f.into()))
            .collect();
        self.schema.insert("required".into(), Value::Array(fields));
        self
    }

    /// Appends one field to the required list, skipping duplicates.
    pub fn add_required(mut self, field: impl Into<String>) -> Self {
        let field = Value::String(field.into());
        let list = self
            .schema
            .entry("required")
            .or_insert_with(|| Value::Array(Vec::new()));
        if !list.is_array() {
            *list = Value::Array(Vec::new());
        }
        if let Value::Array(items) = list {
            if !items.contains(&field) {
                items.push(field);
            }
        }
        self
    }

    // Constraint setters. Each one sets exactly one key on the current
    // schema, with no type-appropriateness check.

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.schema
            .insert("description".into(), Value::String(desc.into()));
        self
    }

    /// Sets the `enum` key.
    pub fn enumeration<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.schema.insert("enum".into(), Value::Array(values));
        self
    }

    pub fn minimum(mut self, value: impl Into<Value>) -> Self {
        self.schema.insert("minimum".into(), value.into());
        self
    }

    pub fn maximum(mut self, value: impl Into<Value>) -> Self {
        self.schema.insert("maximum".into(), value.into());
        self
    }

    pub fn min_length(mut self, value: u64) -> Self {
        self.schema.insert("minLength".into(), json!(value));
        self
    }

    pub fn max_length(mut self, value: u64) -> Self {
        self.schema.insert("maxLength".into(), json!(value));
        self
    }

    pub fn min_items(mut self, value: u64) -> Self {
        self.schema.insert("minItems".into(), json!(value));
        self
    }

    pub fn max_items(mut self, value: u64) -> Self {
        self.schema.insert("maxItems".into(), json!(value));
        self
    }

    /// Returns a detached snapshot of the schema. Later mutation of
    /// the builder does not affect previously built values.
    pub fn build(&self) -> Value {
        Value::Object(self.schema.clone())
    }
}
