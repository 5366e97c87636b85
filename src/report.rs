use serde_json::{Map, Value};

/// Safe dotted-path reads over a loosely structured JSON document.
///
/// Every read walks the path one segment at a time and gives up at the first
/// missing key, out-of-range index, null or scalar, returning `None` (or the
/// supplied default) instead of failing.
pub trait FieldAccess {
    /// Look up the value at a dotted path such as `categories.seo.score`
    fn field(&self, path: &str) -> Option<&Value>;

    /// Numeric value at `path`, or `default` when absent or not a number
    fn f64_or(&self, path: &str, default: f64) -> f64 {
        self.field(path).and_then(Value::as_f64).unwrap_or(default)
    }

    /// String value at `path`, or `default` when absent or not a string
    fn str_or(&self, path: &str, default: &str) -> String {
        self.field(path)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Boolean value at `path`, or `default` when absent or not a boolean
    fn bool_or(&self, path: &str, default: bool) -> bool {
        self.field(path).and_then(Value::as_bool).unwrap_or(default)
    }
}

impl FieldAccess for Value {
    fn field(&self, path: &str) -> Option<&Value> {
        let mut current = self;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        if current.is_null() { None } else { Some(current) }
    }
}

/// Raw report produced by the page audit tool.
///
/// The shape is owned by the external tool, so the report is kept as an
/// opaque JSON tree and read only through [`FieldAccess`].
#[derive(Debug, Clone)]
pub struct AuditReport(Value);

impl AuditReport {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Score of a category in the 0..=1 range, 0 when missing
    pub fn category_score(&self, category: &str) -> f64 {
        self.0.f64_or(&format!("categories.{}.score", category), 0.0)
    }

    /// Human readable value of a named audit, `"N/A"` when missing
    pub fn display_value(&self, audit_id: &str) -> String {
        self.0.str_or(&format!("audits.{}.displayValue", audit_id), "N/A")
    }

    /// Total bytes transferred while loading the page, 0 when unavailable
    pub fn total_byte_weight(&self) -> u64 {
        let bytes = self.0.f64_or("audits.total-byte-weight.numericValue", 0.0);
        if bytes.is_finite() && bytes > 0.0 {
            bytes.round() as u64
        } else {
            0
        }
    }

    /// All audit entries in report order
    pub fn audits(&self) -> Option<&Map<String, Value>> {
        self.0.field("audits").and_then(Value::as_object)
    }

    /// Error code the tool records when it could not load the page
    pub fn runtime_error(&self) -> Option<String> {
        let code = self.0.field("runtimeError.code")?.as_str()?;
        if code == "NO_ERROR" {
            return None;
        }
        let message = self.0.str_or("runtimeError.message", code);
        Some(message)
    }
}

impl From<Value> for AuditReport {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
