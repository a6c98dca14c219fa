use serde::Deserialize;

/// A receiving domain offered by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Provider identifier.
    #[serde(default)]
    pub id: String,
    /// Domain name, e.g. "mail.gw".
    pub domain: String,
    /// Whether new accounts may be registered on it.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Private domains are reserved for their owner.
    #[serde(default)]
    pub is_private: bool,
}

impl Domain {
    /// Create an active public domain.
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            id: domain.clone(),
            domain,
            is_active: true,
            is_private: false,
        }
    }

    /// Whether an anonymous client can register on this domain.
    pub fn is_usable(&self) -> bool {
        self.is_active && !self.is_private
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_default_to_usable() {
        let domain: Domain = serde_json::from_str(r#"{"domain": "mail.gw"}"#).unwrap();
        assert!(domain.is_usable());
    }

    #[test]
    fn test_private_domain_is_not_usable() {
        let domain: Domain = serde_json::from_str(
            r#"{"id": "x", "domain": "corp.example", "isActive": true, "isPrivate": true}"#,
        )
        .unwrap();
        assert!(!domain.is_usable());
    }
}
