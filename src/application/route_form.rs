//! Route Form
//!
//! Raw text inputs for the "create route" form and their conversion into
//! a create payload.

use crate::domain::entities::Route;
use std::fmt;

/// Validation failures when turning the form into a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{field} must be a non-negative integer, got {value:?}")]
    InvalidInteger { field: FormField, value: String },
    #[error("{field} must be a non-negative number, got {value:?}")]
    InvalidNumber { field: FormField, value: String },
    #[error("enabled must be true or false, got {0:?}")]
    InvalidFlag(String),
    #[error("unknown form field {0:?}")]
    UnknownField(String),
}

/// Addressable form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Path,
    Methods,
    Target,
    StripPrefix,
    Rewrite,
    Group,
    AuthType,
    ApiKey,
    RateLimitQps,
    TimeoutMs,
    Enabled,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        Self::Path,
        Self::Methods,
        Self::Target,
        Self::StripPrefix,
        Self::Rewrite,
        Self::Group,
        Self::AuthType,
        Self::ApiKey,
        Self::RateLimitQps,
        Self::TimeoutMs,
        Self::Enabled,
    ];

    /// Wire name of the field, as used in route payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Methods => "methods",
            Self::Target => "target",
            Self::StripPrefix => "stripPrefix",
            Self::Rewrite => "rewrite",
            Self::Group => "group",
            Self::AuthType => "authType",
            Self::ApiKey => "apiKey",
            Self::RateLimitQps => "rateLimitQps",
            Self::TimeoutMs => "timeoutMs",
            Self::Enabled => "enabled",
        }
    }

    /// Parse a field name, case-insensitive.
    pub fn parse(name: &str) -> Result<Self, FormError> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Create-route form contents, kept as typed text.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteForm {
    pub path: String,
    /// Comma-separated method list
    pub methods: String,
    pub target: String,
    pub strip_prefix: String,
    pub rewrite: String,
    pub group: String,
    pub auth_type: String,
    pub api_key: String,
    pub rate_limit_qps: String,
    pub timeout_ms: String,
    pub enabled: bool,
}

impl Default for RouteForm {
    fn default() -> Self {
        Self {
            path: String::new(),
            methods: "GET".to_string(),
            target: String::new(),
            strip_prefix: "0".to_string(),
            rewrite: String::new(),
            group: String::new(),
            auth_type: String::new(),
            api_key: String::new(),
            rate_limit_qps: String::new(),
            timeout_ms: "3000".to_string(),
            enabled: true,
        }
    }
}

impl RouteForm {
    /// Set one input from operator text.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        let value = value.to_string();
        match field {
            FormField::Path => self.path = value,
            FormField::Methods => self.methods = value,
            FormField::Target => self.target = value,
            FormField::StripPrefix => self.strip_prefix = value,
            FormField::Rewrite => self.rewrite = value,
            FormField::Group => self.group = value,
            FormField::AuthType => self.auth_type = value,
            FormField::ApiKey => self.api_key = value,
            FormField::RateLimitQps => self.rate_limit_qps = value,
            FormField::TimeoutMs => self.timeout_ms = value,
            FormField::Enabled => self.enabled = parse_flag(&value)?,
        }
        Ok(())
    }

    /// Current text of one input.
    pub fn get(&self, field: FormField) -> String {
        match field {
            FormField::Path => self.path.clone(),
            FormField::Methods => self.methods.clone(),
            FormField::Target => self.target.clone(),
            FormField::StripPrefix => self.strip_prefix.clone(),
            FormField::Rewrite => self.rewrite.clone(),
            FormField::Group => self.group.clone(),
            FormField::AuthType => self.auth_type.clone(),
            FormField::ApiKey => self.api_key.clone(),
            FormField::RateLimitQps => self.rate_limit_qps.clone(),
            FormField::TimeoutMs => self.timeout_ms.clone(),
            FormField::Enabled => self.enabled.to_string(),
        }
    }

    /// Assemble the create payload.
    ///
    /// Blank numbers become 0, blank optional strings become absent.
    pub fn to_route(&self) -> Result<Route, FormError> {
        let methods = self
            .methods
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Route {
            id: None,
            group: optional(&self.group),
            path: Some(self.path.clone()),
            methods: Some(methods),
            target: Some(self.target.clone()),
            strip_prefix: Some(parse_integer(FormField::StripPrefix, &self.strip_prefix)?),
            rewrite: optional(&self.rewrite),
            auth_type: optional(&self.auth_type),
            api_key: optional(&self.api_key),
            rate_limit_qps: Some(parse_number(FormField::RateLimitQps, &self.rate_limit_qps)?),
            timeout_ms: Some(parse_integer(FormField::TimeoutMs, &self.timeout_ms)?.into()),
            enabled: Some(self.enabled),
            created_at: None,
            updated_at: None,
        })
    }
}

fn optional(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_integer(field: FormField, value: &str) -> Result<u32, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| FormError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn parse_number(field: FormField, value: &str) -> Result<f64, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(FormError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_flag(value: &str) -> Result<bool, FormError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(FormError::InvalidFlag(value.to_string())),
    }
}
