//! Registration submission models
//!
//! `SubmissionFields` holds the client-supplied text, `ClientContext` the
//! values derived from the request, and `NewRegistration` the validated
//! combination ready to insert.

use serde_json::{Number, Value};

use super::{is_valid_email, ValidationError};

/// Client-supplied fields, coerced to text and trimmed.
///
/// Missing fields are empty strings until validation turns them into
/// `None` or an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFields {
    pub name: String,
    pub email: String,
    pub company: String,
    pub date: String,
}

impl SubmissionFields {
    /// Extract fields from a parsed JSON body.
    ///
    /// A body that is not a JSON object has no fields.
    pub fn from_json(body: &Value) -> Self {
        let field = |key: &str| coerce(body.as_object().and_then(|map| map.get(key)));
        Self {
            name: field("name"),
            email: field("email"),
            company: field("company"),
            date: field("date"),
        }
    }
}

/// Render a field as trimmed text.
///
/// Falsy values (`null`, `false`, `0`, `""`) and missing fields are empty.
fn coerce(value: Option<&Value>) -> String {
    match value {
        Some(value) if !is_falsy(value) => text(value).trim().to_owned(),
        _ => String::new(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text form of a JSON value; arrays join their items with `,`.
fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Integral floats print without a fraction (`2.0` is `2`).
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Request-derived values, never supplied in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    pub ip: String,
    pub user_agent: String,
    pub ip_country: String,
    pub ip_region: String,
}

/// Validated registration, ready for insert.
///
/// Optional fields are `None` rather than empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    name: String,
    email: Option<String>,
    company: Option<String>,
    date: String,
    ip: Option<String>,
    user_agent: Option<String>,
    ip_country: Option<String>,
    ip_region: Option<String>,
}

impl NewRegistration {
    /// Validate submitted fields and attach the request context.
    ///
    /// # Rules (checked in order)
    /// - `name` must be non-empty
    /// - `date` must be non-empty
    /// - `email`, when non-empty, must look like `local@domain.tld`
    ///
    /// # Example
    /// ```
    /// use regdesk_server::models::{ClientContext, NewRegistration, SubmissionFields, ValidationError};
    ///
    /// let fields = SubmissionFields { name: "Ada".into(), date: "2024-01-01".into(), ..Default::default() };
    /// assert!(NewRegistration::validate(fields, ClientContext::default()).is_ok());
    ///
    /// let fields = SubmissionFields { date: "2024-01-01".into(), ..Default::default() };
    /// let err = NewRegistration::validate(fields, ClientContext::default()).unwrap_err();
    /// assert_eq!(err, ValidationError::MissingName);
    /// ```
    pub fn validate(
        fields: SubmissionFields,
        context: ClientContext,
    ) -> Result<Self, ValidationError> {
        if fields.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if fields.date.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        if !is_valid_email(&fields.email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self {
            name: fields.name,
            email: non_empty(fields.email),
            company: non_empty(fields.company),
            date: fields.date,
            ip: non_empty(context.ip),
            user_agent: non_empty(context.user_agent),
            ip_country: non_empty(context.ip_country.trim().to_owned()),
            ip_region: non_empty(context.ip_region.trim().to_owned()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn ip(&self) -> Option<&str> {
        self.ip.as_deref()
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn ip_country(&self) -> Option<&str> {
        self.ip_country.as_deref()
    }

    pub fn ip_region(&self) -> Option<&str> {
        self.ip_region.as_deref()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(body: Value) -> SubmissionFields {
        SubmissionFields::from_json(&body)
    }

    #[test]
    fn extracts_and_trims() {
        let f = fields(json!({
            "name": "  Ada  ",
            "email": " ada@example.com ",
            "company": "\tAnalytical Engines\n",
            "date": " 2024-01-01 "
        }));
        assert_eq!(f.name, "Ada");
        assert_eq!(f.email, "ada@example.com");
        assert_eq!(f.company, "Analytical Engines");
        assert_eq!(f.date, "2024-01-01");
    }

    #[test]
    fn missing_and_null_fields_are_empty() {
        let f = fields(json!({ "name": null }));
        assert_eq!(f, SubmissionFields::default());
    }

    #[test]
    fn non_object_body_has_no_fields() {
        assert_eq!(fields(json!([1, 2, 3])), SubmissionFields::default());
        assert_eq!(fields(json!("Ada")), SubmissionFields::default());
    }

    #[test]
    fn scalars_are_coerced_to_text() {
        let f = fields(json!({ "name": 42, "date": true, "company": 2.0 }));
        assert_eq!(f.name, "42");
        assert_eq!(f.date, "true");
        assert_eq!(f.company, "2");
    }

    #[test]
    fn falsy_values_are_missing() {
        let f = fields(json!({ "name": false, "date": 0, "company": "", "email": 0.0 }));
        assert_eq!(f, SubmissionFields::default());

        let err = NewRegistration::validate(f, ClientContext::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingName);

        let f = fields(json!({ "name": "Ada", "date": false }));
        let err = NewRegistration::validate(f, ClientContext::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingDate);
    }

    #[test]
    fn arrays_join_with_commas() {
        let f = fields(json!({
            "name": ["Ada", "Lovelace"],
            "email": [" ada@example.com "],
            "company": [null, 1, [2, 3]],
            "date": "2024-01-01"
        }));
        assert_eq!(f.name, "Ada,Lovelace");
        assert_eq!(f.email, "ada@example.com");
        assert_eq!(f.company, ",1,2,3");

        let registration = NewRegistration::validate(f, ClientContext::default()).unwrap();
        assert_eq!(registration.email(), Some("ada@example.com"));
    }

    #[test]
    fn empty_array_and_objects() {
        let f = fields(json!({ "name": [], "company": { "a": 1 } }));
        assert_eq!(f.name, "");
        assert_eq!(f.company, "[object Object]");
    }

    #[test]
    fn validation_order() {
        let err = NewRegistration::validate(
            SubmissionFields {
                email: "bad".into(),
                ..Default::default()
            },
            ClientContext::default(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingName);

        let err = NewRegistration::validate(
            SubmissionFields {
                name: "Ada".into(),
                email: "bad".into(),
                ..Default::default()
            },
            ClientContext::default(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingDate);

        let err = NewRegistration::validate(
            SubmissionFields {
                name: "Ada".into(),
                date: "2024-01-01".into(),
                email: "not-an-email".into(),
                ..Default::default()
            },
            ClientContext::default(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
    }

    #[test]
    fn empty_optionals_become_none() {
        let registration = NewRegistration::validate(
            SubmissionFields {
                name: "Ada".into(),
                date: "next tuesday".into(),
                ..Default::default()
            },
            ClientContext {
                ip: String::new(),
                user_agent: String::new(),
                ip_country: "   ".into(),
                ip_region: String::new(),
            },
        )
        .unwrap();

        assert_eq!(registration.date(), "next tuesday");
        assert_eq!(registration.email(), None);
        assert_eq!(registration.company(), None);
        assert_eq!(registration.ip(), None);
        assert_eq!(registration.user_agent(), None);
        assert_eq!(registration.ip_country(), None);
        assert_eq!(registration.ip_region(), None);
    }

    #[test]
    fn context_values_are_kept() {
        let registration = NewRegistration::validate(
            SubmissionFields {
                name: "Ada".into(),
                date: "2024-01-01".into(),
                email: "ada@example.com".into(),
                company: "Engines".into(),
            },
            ClientContext {
                ip: "203.0.113.7".into(),
                user_agent: "curl/8.0".into(),
                ip_country: " US ".into(),
                ip_region: "CA".into(),
            },
        )
        .unwrap();

        assert_eq!(registration.email(), Some("ada@example.com"));
        assert_eq!(registration.company(), Some("Engines"));
        assert_eq!(registration.ip(), Some("203.0.113.7"));
        assert_eq!(registration.user_agent(), Some("curl/8.0"));
        assert_eq!(registration.ip_country(), Some("US"));
        assert_eq!(registration.ip_region(), Some("CA"));
    }
}
