//! Decoded token claims

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::DomainError;

/// Claims carried by a verified access token.
///
/// Every field starts absent. The record performs no validation of its own;
/// the decoder that verified the token is responsible for what it stores here.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwtData {
    /// Raw bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    /// Subject (user ID)
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<String>,
    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    aud: Option<String>,
    /// Expiration timestamp (Unix epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
    /// Issued at timestamp (Unix epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
    /// Item the token grants access to, as `<type>:<id>`
    #[serde(skip_serializing_if = "Option::is_none")]
    iid: Option<String>,
    /// Role of the subject
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Consumer constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    cons: Option<Map<String, Value>>,
    /// Delegator role
    #[serde(skip_serializing_if = "Option::is_none")]
    drl: Option<String>,
    /// Delegator ID
    #[serde(skip_serializing_if = "Option::is_none")]
    did: Option<String>,
}

impl JwtData {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a decoded claims object.
    ///
    /// Unknown keys are ignored and `null` values are treated as absent.
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        if !value.is_object() {
            debug!(kind = json_kind(&value), "rejected token claims");
            return Err(DomainError::invalid_claims("claims must be a JSON object"));
        }

        serde_json::from_value(value).map_err(|e| {
            debug!(error = %e, "rejected token claims");
            DomainError::invalid_claims(e.to_string())
        })
    }

    /// Structured form of the record. Absent fields are omitted.
    ///
    /// Produces the same shape as the derived `Serialize`, without the
    /// `Result` that `serde_json::to_value` carries.
    pub fn to_json(&self) -> Value {
        let mut json = Map::new();

        insert(&mut json, "access_token", self.access_token.clone());
        insert(&mut json, "sub", self.sub.clone());
        insert(&mut json, "iss", self.iss.clone());
        insert(&mut json, "aud", self.aud.clone());
        insert(&mut json, "exp", self.exp);
        insert(&mut json, "iat", self.iat);
        insert(&mut json, "iid", self.iid.clone());
        insert(&mut json, "role", self.role.clone());
        insert(&mut json, "cons", self.cons.clone().map(Value::Object));
        insert(&mut json, "drl", self.drl.clone());
        insert(&mut json, "did", self.did.clone());

        Value::Object(json)
    }

    // Getters

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    pub fn iss(&self) -> Option<&str> {
        self.iss.as_deref()
    }

    pub fn aud(&self) -> Option<&str> {
        self.aud.as_deref()
    }

    pub fn exp(&self) -> Option<i64> {
        self.exp
    }

    pub fn iat(&self) -> Option<i64> {
        self.iat
    }

    pub fn iid(&self) -> Option<&str> {
        self.iid.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn cons(&self) -> Option<&Map<String, Value>> {
        self.cons.as_ref()
    }

    pub fn drl(&self) -> Option<&str> {
        self.drl.as_deref()
    }

    pub fn did(&self) -> Option<&str> {
        self.did.as_deref()
    }

    /// Look up a single consumer constraint
    pub fn constraint(&self, key: &str) -> Option<&Value> {
        self.cons.as_ref().and_then(|cons| cons.get(key))
    }

    /// Expiration as a timestamp, if present and representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Issue time as a timestamp, if present and representable
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check expiry against a given instant. A record without `exp` never expires here.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| now.timestamp() >= exp)
    }

    /// Whether the token was issued to a delegate
    pub fn is_delegated(&self) -> bool {
        self.drl.is_some() && self.did.is_some()
    }

    // Mutators

    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = Some(access_token.into());
    }

    /// Drop the raw token once it is no longer needed
    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    pub fn set_sub(&mut self, sub: impl Into<String>) {
        self.sub = Some(sub.into());
    }

    pub fn set_iss(&mut self, iss: impl Into<String>) {
        self.iss = Some(iss.into());
    }

    pub fn set_aud(&mut self, aud: impl Into<String>) {
        self.aud = Some(aud.into());
    }

    pub fn set_exp(&mut self, exp: i64) {
        self.exp = Some(exp);
    }

    pub fn set_iat(&mut self, iat: i64) {
        self.iat = Some(iat);
    }

    pub fn set_iid(&mut self, iid: impl Into<String>) {
        self.iid = Some(iid.into());
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = Some(role.into());
    }

    pub fn set_cons(&mut self, cons: Map<String, Value>) {
        self.cons = Some(cons);
    }

    pub fn set_drl(&mut self, drl: impl Into<String>) {
        self.drl = Some(drl.into());
    }

    pub fn set_did(&mut self, did: impl Into<String>) {
        self.did = Some(did.into());
    }
}

fn insert<T: Into<Value>>(json: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        json.insert(key.to_string(), value.into());
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl FromStr for JwtData {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| DomainError::serialization(e.to_string()))?;
        Self::from_json(value)
    }
}

struct Hidden;

impl fmt::Debug for Hidden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[hidden]")
    }
}

impl fmt::Debug for JwtData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtData")
            .field("access_token", &self.access_token.as_ref().map(|_| Hidden))
            .field("sub", &self.sub)
            .field("iss", &self.iss)
            .field("aud", &self.aud)
            .field("exp", &self.exp)
            .field("iat", &self.iat)
            .field("iid", &self.iid)
            .field("role", &self.role)
            .field("cons", &self.cons)
            .field("drl", &self.drl)
            .field("did", &self.did)
            .finish()
    }
}

struct Opt<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Opt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("null"),
        }
    }
}

impl fmt::Display for JwtData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let access_token = self.access_token.as_ref().map(|_| "[hidden]");
        let cons = self.cons.clone().map(Value::Object);

        write!(
            f,
            "JwtData [access_token={}, sub={}, iss={}, aud={}, exp={}, iat={}, iid={}, role={}, cons={}, drl={}, did={}]",
            Opt(&access_token),
            Opt(&self.sub),
            Opt(&self.iss),
            Opt(&self.aud),
            Opt(&self.exp),
            Opt(&self.iat),
            Opt(&self.iid),
            Opt(&self.role),
            Opt(&cons),
            Opt(&self.drl),
            Opt(&self.did),
        )
    }
}
