use crate::error::{CatalogError, Result};

/// Admin access state for one run.
///
/// There is a single shared passcode, taken from configuration. When none is
/// configured nobody can log in.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    passcode: Option<String>,
    authenticated: bool,
}

impl AdminSession {
    pub fn new(passcode: Option<String>) -> Self {
        Self {
            passcode: passcode.filter(|p| !p.is_empty()),
            authenticated: false,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.passcode.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.authenticated
    }

    /// Returns whether `attempt` matched. A failed attempt logs the session out.
    pub fn login(&mut self, attempt: &str) -> bool {
        self.authenticated = match &self.passcode {
            Some(expected) => constant_time_eq(expected.as_bytes(), attempt.as_bytes()),
            None => false,
        };
        if !self.authenticated {
            tracing::warn!("admin login rejected");
        }
        self.authenticated
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn require_admin(&self) -> Result<()> {
        if self.authenticated {
            return Ok(());
        }
        if self.passcode.is_none() {
            return Err(CatalogError::Unauthorized(
                "no admin passcode is configured".to_string(),
            ));
        }
        Err(CatalogError::Unauthorized(
            "a valid admin passcode is required (--passcode or PRODCAT_PASSCODE)".to_string(),
        ))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
