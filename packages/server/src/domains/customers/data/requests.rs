//! Request payloads and their validation.
//!
//! Fields are read as raw JSON so that a missing key and an explicit `null`
//! land in the same place (`None`), while falsy-but-present values such as
//! `0` and `""` survive validation.

use serde::Deserialize;
use serde_json::Value;

use crate::domains::customers::models::NewCustomer;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields(Vec<&'static str>),

    #[error("Field '{0}' must be a string or number")]
    InvalidField(&'static str),
}

/// Body of `POST /add-customer`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddCustomerRequest {
    #[serde(default)]
    pub quality: Option<Value>,
    #[serde(default)]
    pub service: Option<Value>,
    #[serde(default)]
    pub money_value: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    /// Older clients send the phone under this key; `phone` wins when both are set.
    #[serde(default)]
    pub phone_no: Option<Value>,
}

impl AddCustomerRequest {
    /// Check presence, then type, of every field.
    ///
    /// Metrics must be a JSON string or number and are stored as given.
    /// A numeric phone is stored as its decimal text.
    pub fn validate(self) -> Result<NewCustomer, ValidationError> {
        let phone = preferred_phone(self.phone, self.phone_no);

        match (self.quality, self.service, self.money_value, phone) {
            (Some(quality), Some(service), Some(money_value), Some(phone)) => Ok(NewCustomer {
                quality: require_scalar("quality", quality)?,
                service: require_scalar("service", service)?,
                money_value: require_scalar("money_value", money_value)?,
                phone: scalar_text(&phone).ok_or(ValidationError::InvalidField("phone"))?,
            }),
            (quality, service, money_value, phone) => {
                let missing = [
                    ("quality", quality.is_none()),
                    ("service", service.is_none()),
                    ("money_value", money_value.is_none()),
                    ("phone", phone.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();

                Err(ValidationError::MissingFields(missing))
            }
        }
    }
}

/// Body of `POST /check-phone`. The phone is optional and unvalidated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckPhoneRequest {
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub phone_no: Option<Value>,
}

impl CheckPhoneRequest {
    /// Lookup key, or `None` when absent or not a string/number.
    pub fn phone(&self) -> Option<String> {
        preferred_phone(self.phone.as_ref(), self.phone_no.as_ref()).and_then(scalar_text)
    }
}

/// Body of `POST /send-otp`. Neither field is validated locally.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub otp: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub phone_no: Option<Value>,
}

impl SendOtpRequest {
    pub fn otp(&self) -> String {
        forwardable_text(self.otp.as_ref())
    }

    pub fn phone(&self) -> String {
        forwardable_text(preferred_phone(self.phone.as_ref(), self.phone_no.as_ref()))
    }
}

fn preferred_phone<T>(phone: Option<T>, phone_no: Option<T>) -> Option<T> {
    phone.or(phone_no)
}

fn require_scalar(name: &'static str, value: Value) -> Result<Value, ValidationError> {
    match value {
        Value::String(_) | Value::Number(_) => Ok(value),
        _ => Err(ValidationError::InvalidField(name)),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Absent or non-scalar values go out as an empty string.
fn forwardable_text(value: Option<&Value>) -> String {
    value.and_then(scalar_text).unwrap_or_default()
}
