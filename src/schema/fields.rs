use crate::codes::GanCode;
use crate::error::{IssueKind, ValidationIssue};
use crate::xml::{ATTRIBUTE_PREFIX, TEXT_KEY};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::LazyLock;

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d*\.)?\d+$").expect("valid decimal pattern"));
static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid digits pattern"));
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(?:0[1-9]|1[0-2])-(?:[12]\d|0[1-9]|3[01])$").expect("valid date pattern")
});
// day/month/year, written by old GanttProject versions
static LEGACY_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([1-9][0-9]*)/([1-9][0-9]*)/([1-9][0-9]*)$").expect("valid legacy date pattern")
});

/// Issues found so far, in document order.
#[derive(Debug, Default)]
pub(crate) struct Issues {
    issues: Vec<ValidationIssue>,
}

impl Issues {
    pub fn push(&mut self, path: impl Into<String>, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            kind,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn into_vec(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

/// Why a raw attribute string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rejection {
    pub kind: IssueKind,
    pub message: String,
}

impl Rejection {
    fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub(crate) type Coerced<T> = Result<T, Rejection>;

pub(crate) fn string(raw: &str) -> Coerced<String> {
    Ok(raw.to_string())
}

/// Target type of a decimal attribute.
pub(crate) trait Numeric: FromStr {
    const NAME: &'static str;

    /// Narrow a value that did not parse directly, e.g. `"1.0"` as an integer.
    fn narrow(value: f64) -> Result<Self, Narrowing>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Narrowing {
    Fractional,
    OutOfRange,
}

macro_rules! whole_numeric {
    ($($t:ty),*) => {$(
        impl Numeric for $t {
            const NAME: &'static str = stringify!($t);

            fn narrow(value: f64) -> Result<Self, Narrowing> {
                if !value.is_finite() {
                    return Err(Narrowing::OutOfRange);
                }
                if value.fract() != 0.0 {
                    return Err(Narrowing::Fractional);
                }
                // i128 holds every whole f64 in range of the target types
                <$t>::try_from(value as i128).map_err(|_| Narrowing::OutOfRange)
            }
        }
    )*};
}

whole_numeric!(i32, i64, u32);

impl Numeric for f64 {
    const NAME: &'static str = "f64";

    fn narrow(value: f64) -> Result<Self, Narrowing> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Narrowing::OutOfRange)
        }
    }
}

/// Any string of the decimal grammar, narrowed to `T`.
pub(crate) fn decimal<T: Numeric>(raw: &str) -> Coerced<T> {
    if !DECIMAL.is_match(raw) {
        return Err(Rejection::new(
            IssueKind::InvalidNumber,
            format!("expected a decimal number, found '{raw}'"),
        ));
    }
    if let Ok(value) = raw.parse::<T>() {
        return Ok(value);
    }
    let narrowed = raw
        .parse::<f64>()
        .map_err(|_| Narrowing::OutOfRange)
        .and_then(T::narrow);
    narrowed.map_err(|reason| {
        let message = match reason {
            Narrowing::Fractional => format!("'{raw}' is not a whole number"),
            Narrowing::OutOfRange => format!("'{raw}' is out of range for {}", T::NAME),
        };
        Rejection::new(IssueKind::InvalidNumber, message)
    })
}

pub(crate) fn boolean(raw: &str) -> Coerced<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Rejection::new(
            IssueKind::InvalidBoolean,
            format!("expected 'true' or 'false', found '{other}'"),
        )),
    }
}

/// Digits or an empty string; the empty string means "every year".
pub(crate) fn optional_year(raw: &str) -> Coerced<Option<i32>> {
    if raw.is_empty() {
        return Ok(None);
    }
    if !DIGITS.is_match(raw) {
        return Err(Rejection::new(
            IssueKind::InvalidNumber,
            format!("expected a year or an empty string, found '{raw}'"),
        ));
    }
    raw.parse::<i32>().map(Some).map_err(|_| {
        Rejection::new(IssueKind::InvalidNumber, format!("year '{raw}' is out of range"))
    })
}

/// `YYYY-MM-DD` or legacy `day/month/year`.
pub(crate) fn date(raw: &str) -> Coerced<NaiveDate> {
    if ISO_DATE.is_match(raw) {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            Rejection::new(IssueKind::InvalidDate, format!("'{raw}' is not a calendar date"))
        });
    }
    if let Some(caps) = LEGACY_DATE.captures(raw) {
        let day = caps[1].parse::<u32>().ok();
        let month = caps[2].parse::<u32>().ok();
        let year = caps[3].parse::<i32>().ok();
        return match (year, month, day) {
            (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day),
            _ => None,
        }
        .ok_or_else(|| {
            Rejection::new(IssueKind::InvalidDate, format!("'{raw}' is not a calendar date"))
        });
    }
    Err(Rejection::new(
        IssueKind::InvalidDate,
        format!("expected YYYY-MM-DD or day/month/year, found '{raw}'"),
    ))
}

pub(crate) fn code<E: GanCode>(raw: &str) -> Coerced<E> {
    E::from_code(raw).ok_or_else(|| {
        Rejection::new(
            IssueKind::InvalidEnum,
            format!(
                "'{raw}' is not a valid {} (expected one of {})",
                E::KIND,
                E::expected_codes()
            ),
        )
    })
}

/// Percent-decoded URI component.
pub(crate) fn uri_component(raw: &str) -> Coerced<String> {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|err| {
            Rejection::new(
                IssueKind::InvalidType,
                format!("'{raw}' does not decode to UTF-8: {err}"),
            )
        })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(s) if s.is_empty() => "an empty element",
        Value::String(_) => "text",
        Value::Array(_) => "a repeated element",
        Value::Object(_) => "an element",
    }
}

/// An element of the raw tree, addressed by its path for issue reporting.
///
/// Every accessor returns `None` when it recorded an issue. Optional fields
/// return `Some(None)` when absent.
#[derive(Debug, Clone)]
pub(crate) struct Element<'v> {
    path: String,
    fields: &'v Map<String, Value>,
}

impl<'v> Element<'v> {
    pub fn from_value(value: &'v Value, path: String, issues: &mut Issues) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { path, fields }),
            other => {
                issues.push(
                    path,
                    IssueKind::InvalidType,
                    format!("expected an element with attributes, found {}", describe(other)),
                );
                None
            }
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn attribute_path(&self, name: &str) -> String {
        format!("{}.@{}", self.path, name)
    }

    fn child_path(&self, name: &str) -> String {
        format!("{}.{}", self.path, name)
    }

    pub fn attribute<T>(
        &self,
        name: &str,
        issues: &mut Issues,
        coerce: impl FnOnce(&str) -> Coerced<T>,
    ) -> Option<Option<T>> {
        match self.fields.get(&format!("{ATTRIBUTE_PREFIX}{name}")) {
            None => Some(None),
            Some(Value::String(raw)) => match coerce(raw) {
                Ok(value) => Some(Some(value)),
                Err(rejection) => {
                    issues.push(self.attribute_path(name), rejection.kind, rejection.message);
                    None
                }
            },
            Some(other) => {
                issues.push(
                    self.attribute_path(name),
                    IssueKind::InvalidType,
                    format!("expected a string, found {}", describe(other)),
                );
                None
            }
        }
    }

    pub fn required<T>(
        &self,
        name: &str,
        issues: &mut Issues,
        coerce: impl FnOnce(&str) -> Coerced<T>,
    ) -> Option<T> {
        match self.attribute(name, issues, coerce)? {
            Some(value) => Some(value),
            None => {
                issues.push(
                    self.attribute_path(name),
                    IssueKind::Missing,
                    "required attribute is missing",
                );
                None
            }
        }
    }

    pub fn required_str(&self, name: &str, issues: &mut Issues) -> Option<String> {
        self.required(name, issues, string)
    }

    pub fn optional_str(&self, name: &str, issues: &mut Issues) -> Option<Option<String>> {
        self.attribute(name, issues, string)
    }

    pub fn required_number<T: Numeric>(&self, name: &str, issues: &mut Issues) -> Option<T> {
        self.required(name, issues, decimal::<T>)
    }

    pub fn optional_number<T: Numeric>(
        &self,
        name: &str,
        issues: &mut Issues,
    ) -> Option<Option<T>> {
        self.attribute(name, issues, decimal::<T>)
    }

    pub fn required_bool(&self, name: &str, issues: &mut Issues) -> Option<bool> {
        self.required(name, issues, boolean)
    }

    pub fn optional_bool(&self, name: &str, issues: &mut Issues) -> Option<Option<bool>> {
        self.attribute(name, issues, boolean)
    }

    pub fn required_date(&self, name: &str, issues: &mut Issues) -> Option<NaiveDate> {
        self.required(name, issues, date)
    }

    pub fn optional_date(&self, name: &str, issues: &mut Issues) -> Option<Option<NaiveDate>> {
        self.attribute(name, issues, date)
    }

    pub fn required_code<E: GanCode>(&self, name: &str, issues: &mut Issues) -> Option<E> {
        self.required(name, issues, code::<E>)
    }

    pub fn optional_code<E: GanCode>(&self, name: &str, issues: &mut Issues) -> Option<Option<E>> {
        self.attribute(name, issues, code::<E>)
    }

    /// Text content of this element.
    pub fn text(&self, issues: &mut Issues) -> Option<Option<String>> {
        self.text_at(TEXT_KEY, format!("{}.{}", self.path, TEXT_KEY), issues)
    }

    /// Text content of a child element that carries no attributes, e.g. `<notes>`.
    pub fn child_text(&self, name: &str, issues: &mut Issues) -> Option<Option<String>> {
        self.text_at(name, self.child_path(name), issues)
    }

    fn text_at(&self, key: &str, path: String, issues: &mut Issues) -> Option<Option<String>> {
        match self.fields.get(key) {
            None => Some(None),
            Some(Value::String(text)) => Some(Some(text.clone())),
            Some(other) => {
                issues.push(
                    path,
                    IssueKind::InvalidType,
                    format!("expected text, found {}", describe(other)),
                );
                None
            }
        }
    }

    pub fn required_child(&self, name: &str, issues: &mut Issues) -> Option<Element<'v>> {
        match self.fields.get(name) {
            None => {
                issues.push(
                    self.child_path(name),
                    IssueKind::Missing,
                    "required element is missing",
                );
                None
            }
            Some(value) => Element::from_value(value, self.child_path(name), issues),
        }
    }

    pub fn optional_child(&self, name: &str, issues: &mut Issues) -> Option<Option<Element<'v>>> {
        match self.fields.get(name) {
            None => Some(None),
            Some(value) => Element::from_value(value, self.child_path(name), issues).map(Some),
        }
    }

    /// A child container that is written as an empty element when it has no content.
    pub fn blankable_child(
        &self,
        name: &str,
        issues: &mut Issues,
    ) -> Option<Option<Element<'v>>> {
        match self.fields.get(name) {
            Some(Value::String(text)) if text.is_empty() => Some(None),
            _ => self.optional_child(name, issues),
        }
    }

    /// Occurrences of a repeatable child element, always as a sequence.
    fn occurrences(&self, name: &str) -> Vec<(String, &'v Value)> {
        match self.fields.get(name) {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| (format!("{}.{}[{}]", self.path, name, idx), item))
                .collect(),
            Some(single) => vec![(format!("{}.{}[0]", self.path, name), single)],
        }
    }

    /// Validate every occurrence of a repeatable child; absent means empty.
    pub fn list<T>(
        &self,
        name: &str,
        issues: &mut Issues,
        mut validate: impl FnMut(Element<'v>, &mut Issues) -> Option<T>,
    ) -> Option<Vec<T>> {
        let mut items = Vec::new();
        let mut all_valid = true;
        for (path, value) in self.occurrences(name) {
            match Element::from_value(value, path, issues).and_then(|el| validate(el, issues)) {
                Some(item) => items.push(item),
                None => all_valid = false,
            }
        }
        all_valid.then_some(items)
    }

    /// Like [`Element::list`], but at least one occurrence must be present.
    pub fn required_list<T>(
        &self,
        name: &str,
        issues: &mut Issues,
        validate: impl FnMut(Element<'v>, &mut Issues) -> Option<T>,
    ) -> Option<Vec<T>> {
        if !self.fields.contains_key(name) {
            issues.push(
                self.child_path(name),
                IssueKind::Missing,
                "required element is missing",
            );
            return None;
        }
        self.list(name, issues, validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::DependencyConstraint;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn decimal_accepts_signed_and_fractional_numbers() {
        assert_eq!(decimal::<i32>("-1"), Ok(-1));
        assert_eq!(decimal::<i32>("+7"), Ok(7));
        assert_eq!(decimal::<f64>("100.0"), Ok(100.0));
        assert_eq!(decimal::<f64>(".5"), Ok(0.5));
    }

    #[test]
    fn decimal_rejects_non_numbers() {
        for raw in ["", "abc", "1e3", "5.", "1,5", " 1"] {
            let err = decimal::<f64>(raw).unwrap_err();
            assert_eq!(err.kind, IssueKind::InvalidNumber, "{raw}");
        }
        assert_eq!(
            decimal::<i32>("1.5").unwrap_err().kind,
            IssueKind::InvalidNumber
        );
    }

    #[test]
    fn whole_decimals_narrow_to_integers() {
        assert_eq!(decimal::<i32>("1.0"), Ok(1));
        assert_eq!(decimal::<i64>("-3.000"), Ok(-3));
        assert_eq!(decimal::<u32>("12.0"), Ok(12));
        assert_eq!(decimal::<i64>("-9223372036854775808"), Ok(i64::MIN));
    }

    #[test]
    fn narrowing_failures_are_told_apart() {
        let fractional = decimal::<i32>("50.5").unwrap_err();
        assert!(fractional.message.contains("not a whole number"), "{}", fractional.message);

        let too_big = decimal::<i32>("2147483648").unwrap_err();
        assert_eq!(too_big.kind, IssueKind::InvalidNumber);
        assert!(too_big.message.contains("out of range for i32"), "{}", too_big.message);

        let negative = decimal::<u32>("-1").unwrap_err();
        assert!(negative.message.contains("out of range for u32"), "{}", negative.message);
    }

    #[test]
    fn boolean_only_accepts_lowercase_literals() {
        assert_eq!(boolean("true"), Ok(true));
        assert_eq!(boolean("false"), Ok(false));
        assert!(boolean("True").is_err());
        assert!(boolean("1").is_err());
    }

    #[test]
    fn both_date_formats_yield_the_same_date() {
        assert_eq!(date("2024-01-04"), Ok(d(2024, 1, 4)));
        assert_eq!(date("4/1/2024"), Ok(d(2024, 1, 4)));
    }

    #[test]
    fn impossible_and_unknown_dates_are_rejected() {
        for raw in ["2024-02-30", "31/2/2024", "2024/01/04", "01/01/2024", "yesterday"] {
            assert_eq!(date(raw).unwrap_err().kind, IssueKind::InvalidDate, "{raw}");
        }
    }

    #[test]
    fn empty_year_means_recurring() {
        assert_eq!(optional_year(""), Ok(None));
        assert_eq!(optional_year("2024"), Ok(Some(2024)));
        assert!(optional_year("-1").is_err());
    }

    #[test]
    fn codes_are_matched_exactly() {
        assert_eq!(
            code::<DependencyConstraint>("3"),
            Ok(DependencyConstraint::FinishFinish)
        );
        let err = code::<DependencyConstraint>("5").unwrap_err();
        assert_eq!(err.kind, IssueKind::InvalidEnum);
        assert!(err.message.contains("1, 2, 3, 4"));
    }

    #[test]
    fn uri_component_is_percent_decoded() {
        assert_eq!(
            uri_component("https%3A%2F%2Fexample.test%3Fq%3Dv"),
            Ok("https://example.test?q=v".to_string())
        );
    }
}
