use serde_json::Value;

/// One step of a path into a JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Object member by name
    Key(&'a str),
    /// Array element by position
    Index(usize),
}

/// Follows `path` into `root`, tolerating absence at every level
///
/// Returns `None` when a key is missing, an index is out of bounds, a step
/// meets a value of the wrong shape, or the final value is `null`.
///
/// # Examples
///
/// ```
/// use review_harvest::extract::{lookup, Step};
/// use serde_json::json;
///
/// let review = json!({"ContextDataValues": {"Age": {"Value": "25to34"}}});
/// let age = lookup(&review, &[Step::Key("ContextDataValues"), Step::Key("Age"), Step::Key("Value")]);
/// assert_eq!(age, Some(&json!("25to34")));
///
/// assert_eq!(lookup(&review, &[Step::Key("BadgesOrder"), Step::Index(0)]), None);
/// ```
pub fn lookup<'v>(root: &'v Value, path: &[Step<'_>]) -> Option<&'v Value> {
    path.iter()
        .try_fold(root, |node, step| match step {
            Step::Key(key) => node.get(*key),
            Step::Index(index) => node.get(*index),
        })
        .filter(|value| !value.is_null())
}
