use serde::Serialize;

/// Form body posted to the gateway's OTP route.
#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest<'a> {
    /// The one-time password, substituted into the gateway's OTP template
    pub variables_values: &'a str,
    pub route: &'a str,
    /// Recipient phone number(s), comma separated when more than one
    pub numbers: &'a str,
}
