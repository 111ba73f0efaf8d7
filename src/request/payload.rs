use crate::request::{RequestContext, StarFilter};
use crate::ConfigError;
use serde_json::{Map, Value};

/// JSON body of the reviews request
///
/// Built from a pre-supplied template. Every change returns a new payload,
/// so one page's request body is never shared with the next.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPayload(Value);

impl RequestPayload {
    /// Wraps a payload template; the template must be a JSON object
    pub fn from_template(template: Value) -> Result<Self, ConfigError> {
        if !template.is_object() {
            return Err(ConfigError::Validation(
                "payload template must be a JSON object".to_string(),
            ));
        }
        Ok(Self(template))
    }

    /// Targets the payload at one product and star-rating filter
    pub fn for_item(&self, context: &RequestContext, stars: &StarFilter) -> Self {
        self.with_field(&["variables", "itemId"], Value::from(context.item_id()))
            .with_field(
                &["variables", "filters", "starRatings"],
                Value::from(stars.as_slice().to_vec()),
            )
    }

    /// Returns a copy with `variables.startIndex` replaced
    pub fn with_start_index(&self, start_index: u32) -> Self {
        self.with_field(&["variables", "startIndex"], Value::from(start_index))
    }

    /// Current `variables.startIndex`, if set
    pub fn start_index(&self) -> Option<u64> {
        self.0
            .get("variables")
            .and_then(|variables| variables.get("startIndex"))
            .and_then(Value::as_u64)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Sets a nested field, creating (or replacing non-object) parents
    fn with_field(&self, path: &[&str], value: Value) -> Self {
        let mut document = self.0.clone();
        let Some((leaf, parents)) = path.split_last() else {
            return Self(document);
        };

        let mut node = &mut document;
        for key in parents {
            node = ensure_object(node)
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        ensure_object(node).insert(leaf.to_string(), value);

        Self(document)
    }
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}
