use crate::extract::cleaner::clean_markup;
use crate::extract::lookup::{lookup, Step};
use serde_json::Value;

/// Column names of the flattened review, in export order
pub const COLUMNS: [&str; 12] = [
    "BadgesOrder",
    "Age",
    "IsRecommended",
    "IsSyndicated",
    "ProductId",
    "SubmissionTime",
    "Rating",
    "Title",
    "ReviewText",
    "ClientResponses",
    "ClientResponses_Date",
    "ClientResponses_Department",
];

const BADGE: &[Step<'static>] = &[Step::Key("BadgesOrder"), Step::Index(0)];
const AGE: &[Step<'static>] = &[
    Step::Key("ContextDataValues"),
    Step::Key("Age"),
    Step::Key("Value"),
];
const IS_RECOMMENDED: &[Step<'static>] = &[Step::Key("IsRecommended")];
const IS_SYNDICATED: &[Step<'static>] = &[Step::Key("IsSyndicated")];
const PRODUCT_ID: &[Step<'static>] = &[Step::Key("ProductId")];
const SUBMISSION_TIME: &[Step<'static>] = &[Step::Key("SubmissionTime")];
const RATING: &[Step<'static>] = &[Step::Key("Rating")];
const TITLE: &[Step<'static>] = &[Step::Key("Title")];
const REVIEW_TEXT: &[Step<'static>] = &[Step::Key("ReviewText")];
const RESPONSE_TEXT: &[Step<'static>] = &[
    Step::Key("ClientResponses"),
    Step::Index(0),
    Step::Key("Response"),
];
const RESPONSE_DATE: &[Step<'static>] = &[
    Step::Key("ClientResponses"),
    Step::Index(0),
    Step::Key("Date"),
];
const RESPONSE_DEPARTMENT: &[Step<'static>] = &[
    Step::Key("ClientResponses"),
    Step::Index(0),
    Step::Key("Department"),
];

/// A scalar copied out of a raw review
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    /// JSON integer, kept exact (covers the full `i64` and `u64` ranges)
    Integer(i128),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Converts a JSON value; `null` has no cell value
    ///
    /// Arrays and objects are kept as their compact JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(if let Some(i) = n.as_i64() {
                Self::Integer(i.into())
            } else if let Some(u) = n.as_u64() {
                Self::Integer(u.into())
            } else if let Some(f) = n.as_f64() {
                Self::Number(f)
            } else {
                Self::Text(n.to_string())
            }),
            Value::String(s) => Some(Self::Text(s.clone())),
            other => Some(Self::Text(other.to_string())),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One review flattened into the export columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewRow {
    pub badge: Option<CellValue>,
    pub age: Option<CellValue>,
    pub is_recommended: Option<CellValue>,
    pub is_syndicated: Option<CellValue>,
    pub product_id: Option<CellValue>,
    pub submission_time: Option<CellValue>,
    pub rating: Option<CellValue>,
    pub title: Option<CellValue>,
    pub review_text: Option<CellValue>,
    pub client_response: Option<CellValue>,
    pub client_response_date: Option<CellValue>,
    pub client_response_department: Option<CellValue>,
}

impl ReviewRow {
    /// Cells in `COLUMNS` order
    pub fn cells(&self) -> [Option<&CellValue>; 12] {
        [
            self.badge.as_ref(),
            self.age.as_ref(),
            self.is_recommended.as_ref(),
            self.is_syndicated.as_ref(),
            self.product_id.as_ref(),
            self.submission_time.as_ref(),
            self.rating.as_ref(),
            self.title.as_ref(),
            self.review_text.as_ref(),
            self.client_response.as_ref(),
            self.client_response_date.as_ref(),
            self.client_response_department.as_ref(),
        ]
    }
}

/// Flattens one raw review record
///
/// Never fails: a missing key, empty list or mismatched shape leaves the
/// column empty. The responder text is stripped of markup; every other
/// field is copied as-is.
///
/// # Examples
///
/// ```
/// use review_harvest::extract::{normalize_review, CellValue};
/// use serde_json::json;
///
/// let row = normalize_review(&json!({"Rating": 1, "Title": "Broke in a week"}));
/// assert_eq!(row.rating, Some(CellValue::Integer(1)));
/// assert_eq!(row.age, None);
/// ```
pub fn normalize_review(review: &Value) -> ReviewRow {
    let field = |path| lookup(review, path).and_then(CellValue::from_json);

    let response_text = lookup(review, RESPONSE_TEXT).and_then(Value::as_str);

    ReviewRow {
        badge: field(BADGE),
        age: field(AGE),
        is_recommended: field(IS_RECOMMENDED),
        is_syndicated: field(IS_SYNDICATED),
        product_id: field(PRODUCT_ID),
        submission_time: field(SUBMISSION_TIME),
        rating: field(RATING),
        title: field(TITLE),
        review_text: field(REVIEW_TEXT),
        client_response: clean_markup(response_text).map(CellValue::Text),
        client_response_date: field(RESPONSE_DATE),
        client_response_department: field(RESPONSE_DEPARTMENT),
    }
}
