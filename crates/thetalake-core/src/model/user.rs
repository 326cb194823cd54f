// ── User domain types ──

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

/// A platform user.
///
/// The password pair is write-only: it is accepted on input, sent to the
/// service on create (and on update when it changed), and never written
/// back out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_id: Option<i64>,
    #[serde(default, skip_serializing, deserialize_with = "deserialize_secret")]
    pub password: Option<SecretString>,
    #[serde(default, skip_serializing, deserialize_with = "deserialize_secret")]
    pub password_confirmation: Option<SecretString>,
}

impl User {
    /// Whether the password pair differs from `other`'s.
    pub fn password_changed(&self, other: &User) -> bool {
        !same_secret(self.password.as_ref(), other.password.as_ref())
            || !same_secret(
                self.password_confirmation.as_ref(),
                other.password_confirmation.as_ref(),
            )
    }
}

/// Everything except the password pair.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.email == other.email
            && self.role_id == other.role_id
            && self.search_id == other.search_id
    }
}

fn same_secret(a: Option<&SecretString>, b: Option<&SecretString>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.expose_secret() == b.expose_secret(),
        (None, None) => true,
        _ => false,
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn password_is_read_but_never_written() {
        let user: User = serde_json::from_str(
            r#"{"name":"Jane","email":"jane@example.com","password":"p1","password_confirmation":"p1"}"#,
        )
        .unwrap();
        assert_eq!(user.password.as_ref().unwrap().expose_secret(), "p1");

        let out = serde_json::to_string(&user).unwrap();
        assert!(!out.contains("p1"));
        assert!(!out.contains("password"));
    }

    #[test]
    fn password_change_detection() {
        let secret = |s: &str| Some(SecretString::from(s.to_owned()));
        let prior = User {
            password: secret("old"),
            password_confirmation: secret("old"),
            ..User::default()
        };
        let same = prior.clone();
        let rotated = User {
            password: secret("new"),
            password_confirmation: secret("new"),
            ..User::default()
        };

        assert!(!same.password_changed(&prior));
        assert!(rotated.password_changed(&prior));
        assert!(User::default().password_changed(&prior));
    }
}
