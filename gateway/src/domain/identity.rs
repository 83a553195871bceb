//! Introspection claims and the caller identity derived from them.
//!
//! Identity providers disagree on claim layout (Keycloak nests realm roles
//! under `realm_access`, others emit a flat `roles` list), so claims are
//! decoded leniently rather than failing validation. Role and group claims of
//! an unexpected shape are kept as raw data and ignored by
//! [`extract_identity`]; name claims that are not strings are dropped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Decoded RFC 7662 introspection response.
///
/// Only `active` decides validity. Every field the gateway does not model is
/// retained in `extra`. Re-serialising yields the provider's body except for
/// `username`, `preferred_username`, `email` and `sub` values that were not
/// strings, which are discarded on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionClaims {
    /// Raw `active` claim; see [`IntrospectionClaims::is_active`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<Value>,
    /// Login name of the resource owner.
    #[serde(
        default,
        deserialize_with = "string_claim",
        skip_serializing_if = "Option::is_none"
    )]
    pub username: Option<String>,
    /// OIDC preferred user name.
    #[serde(
        default,
        deserialize_with = "string_claim",
        skip_serializing_if = "Option::is_none"
    )]
    pub preferred_username: Option<String>,
    /// E-mail address of the resource owner.
    #[serde(
        default,
        deserialize_with = "string_claim",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    /// Subject identifier.
    #[serde(
        default,
        deserialize_with = "string_claim",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<String>,
    /// Keycloak realm access block, normally `{"roles": [...]}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_access: Option<Value>,
    /// Flat roles claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Value>,
    /// Group membership claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Value>,
    /// Claims not modelled above (`exp`, `scope`, `client_id`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// String claims of any other JSON type are treated as absent.
fn string_claim<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

impl IntrospectionClaims {
    /// True only when the provider reported `"active": true`.
    ///
    /// A missing flag, `false`, or a non-boolean value all mean inactive.
    pub fn is_active(&self) -> bool {
        matches!(self.active, Some(Value::Bool(true)))
    }

    /// Name used in log lines; falls back to `unknown`.
    pub fn display_username(&self) -> &str {
        self.username.as_deref().unwrap_or("unknown")
    }
}

/// Normalised identity of the token owner.
///
/// Absent scalar claims serialise as JSON `null`; `roles` and `groups` are
/// always arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserIdentity {
    /// First non-empty of `preferred_username`, `username`, `email`, `sub`.
    #[schema(example = "alice")]
    pub username: Option<String>,
    /// The `email` claim.
    pub email: Option<String>,
    /// The `sub` claim.
    pub user_id: Option<String>,
    /// Realm roles followed by the flat `roles` claim; duplicates kept.
    pub roles: Vec<String>,
    /// The `groups` claim when it is a list.
    pub groups: Vec<String>,
}

/// Project introspection claims onto a [`UserIdentity`].
///
/// Pure and infallible. The username priority order is part of the public
/// contract: `preferred_username`, `username`, `email`, then `sub`.
///
/// # Examples
/// ```
/// use gateway::domain::{extract_identity, IntrospectionClaims};
/// use serde_json::json;
///
/// let claims: IntrospectionClaims = serde_json::from_value(json!({
///     "active": true,
///     "username": "alice.smith",
///     "preferred_username": "alice",
///     "realm_access": { "roles": ["admin"] },
///     "roles": ["user"],
/// }))
/// .expect("claims decode");
/// let identity = extract_identity(&claims);
/// assert_eq!(identity.username.as_deref(), Some("alice"));
/// assert_eq!(identity.roles, vec!["admin", "user"]);
/// ```
pub fn extract_identity(claims: &IntrospectionClaims) -> UserIdentity {
    let username = [
        &claims.preferred_username,
        &claims.username,
        &claims.email,
        &claims.sub,
    ]
    .into_iter()
    .flatten()
    .find(|candidate| !candidate.is_empty())
    .cloned();

    let realm_roles = claims
        .realm_access
        .as_ref()
        .and_then(|access| access.get("roles"));
    let mut roles = string_list(realm_roles);
    roles.extend(string_list(claims.roles.as_ref()));

    UserIdentity {
        username,
        email: claims.email.clone(),
        user_id: claims.sub.clone(),
        roles,
        groups: string_list(claims.groups.as_ref()),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}
