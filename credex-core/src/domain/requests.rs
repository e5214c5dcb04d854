//! Inputs to the credential operations, one struct per public operation.
//!
//! Fields are public and constructed by struct literal. Each struct knows
//! its own constraints via `validate()`; the service refuses to touch the
//! store until the report comes back clean.

use crate::validate::{
    ValidationReport, check_email, check_equals, check_not_equals, check_password,
    check_positive_id,
};

/// Input to [`CredentialService::register`](crate::CredentialService::register).
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Email for the new account.
    pub email: String,
    /// Plaintext password; hashed before storage, never persisted.
    pub password: String,
    /// Must match `password` exactly.
    pub password_confirm: String,
}

impl RegisterRequest {
    /// Check field constraints without touching the store.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        check_email(&mut report, "email", &self.email);
        check_password(&mut report, "password", &self.password);
        check_equals(
            &mut report,
            "password_confirm",
            "password",
            &self.password_confirm,
            &self.password,
        );
        report
    }
}

/// Input to [`CredentialService::authenticate`](crate::CredentialService::authenticate).
#[derive(Debug, Clone)]
pub struct AuthenticateRequest {
    /// Email to look up.
    pub email: String,
    /// Plaintext password to verify.
    pub password: String,
}

impl AuthenticateRequest {
    /// Check field constraints; malformed probes fail before any store or
    /// hashing work.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        check_email(&mut report, "email", &self.email);
        check_password(&mut report, "password", &self.password);
        report
    }
}

/// Input to [`CredentialService::change_password`](crate::CredentialService::change_password).
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    /// Email of the account being changed.
    pub email: String,
    /// Current plaintext password; re-authenticated before any mutation.
    pub current_password: String,
    /// Replacement password. Must differ from `current_password`.
    pub new_password: String,
    /// Must match `new_password` exactly.
    pub new_password_confirm: String,
}

impl ChangePasswordRequest {
    /// Check field constraints without touching the store.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        check_email(&mut report, "email", &self.email);
        check_password(&mut report, "current_password", &self.current_password);
        check_password(&mut report, "new_password", &self.new_password);
        check_not_equals(
            &mut report,
            "new_password",
            "current_password",
            &self.new_password,
            &self.current_password,
        );
        check_equals(
            &mut report,
            "new_password_confirm",
            "new_password",
            &self.new_password_confirm,
            &self.new_password,
        );
        report
    }
}

/// Input to [`CredentialService::change_email`](crate::CredentialService::change_email).
#[derive(Debug, Clone)]
pub struct ChangeEmailRequest {
    /// Current email of the account.
    pub email: String,
    /// Plaintext password; re-authenticated before any mutation.
    pub password: String,
    /// Replacement email. Must differ from `email`.
    pub new_email: String,
    /// Must match `new_email` exactly.
    pub new_email_confirm: String,
}

impl ChangeEmailRequest {
    /// Check field constraints without touching the store.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        check_email(&mut report, "email", &self.email);
        check_password(&mut report, "password", &self.password);
        check_email(&mut report, "new_email", &self.new_email);
        check_not_equals(
            &mut report,
            "new_email",
            "email",
            &self.new_email,
            &self.email,
        );
        check_equals(
            &mut report,
            "new_email_confirm",
            "new_email",
            &self.new_email_confirm,
            &self.new_email,
        );
        report
    }
}

/// Input to [`CredentialService::force_change_password`](crate::CredentialService::force_change_password).
#[derive(Debug, Clone)]
pub struct ForceChangePasswordRequest {
    /// Target record id; the caller vouches for its authority.
    pub user_id: i64,
    /// Replacement password.
    pub new_password: String,
    /// Must match `new_password` exactly.
    pub new_password_confirm: String,
}

impl ForceChangePasswordRequest {
    /// Check field constraints without touching the store.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        check_positive_id(&mut report, "user_id", self.user_id);
        check_password(&mut report, "new_password", &self.new_password);
        check_equals(
            &mut report,
            "new_password_confirm",
            "new_password",
            &self.new_password_confirm,
            &self.new_password,
        );
        report
    }
}

/// Input to [`CredentialService::force_change_email`](crate::CredentialService::force_change_email).
#[derive(Debug, Clone)]
pub struct ForceChangeEmailRequest {
    /// Target record id; the caller vouches for its authority.
    pub user_id: i64,
    /// Replacement email.
    pub new_email: String,
    /// Must match `new_email` exactly.
    pub new_email_confirm: String,
}

impl ForceChangeEmailRequest {
    /// Check field constraints without touching the store.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        check_positive_id(&mut report, "user_id", self.user_id);
        check_email(&mut report, "new_email", &self.new_email);
        check_equals(
            &mut report,
            "new_email_confirm",
            "new_email",
            &self.new_email_confirm,
            &self.new_email,
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ViolationRule;

    fn register(email: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            password_confirm: confirm.into(),
        }
    }

    #[test]
    fn register_accepts_well_formed_input() {
        let report = register("a@x.com", "password1", "password1").validate();
        assert!(report.is_satisfied(), "{report}");
    }

    #[test]
    fn register_rejects_missing_and_malformed_email() {
        assert!(
            register("", "password1", "password1")
                .validate()
                .has_violation_on("email")
        );
        assert!(
            register("not-an-email@host", "password1", "password1")
                .validate()
                .has_violation_on("email")
        );
    }

    #[test]
    fn register_rejects_mismatched_confirmation() {
        let report = register("a@x.com", "password1", "other_password1").validate();
        assert!(report.has_violation_on("password_confirm"));
    }

    #[test]
    fn change_password_requires_new_to_differ() {
        let request = ChangePasswordRequest {
            email: "a@x.com".into(),
            current_password: "password1".into(),
            new_password: "password1".into(),
            new_password_confirm: "password1".into(),
        };
        let report = request.validate();
        assert!(report.violations.iter().any(|v| {
            v.field == "new_password" && v.rule == ViolationRule::NotEqualsField("current_password")
        }));
    }

    #[test]
    fn change_email_requires_new_to_differ() {
        let request = ChangeEmailRequest {
            email: "a@x.com".into(),
            password: "password1".into(),
            new_email: "a@x.com".into(),
            new_email_confirm: "a@x.com".into(),
        };
        assert!(request.validate().has_violation_on("new_email"));
    }

    #[test]
    fn force_requests_require_positive_ids() {
        let request = ForceChangePasswordRequest {
            user_id: 0,
            new_password: "password2".into(),
            new_password_confirm: "password2".into(),
        };
        assert!(request.validate().has_violation_on("user_id"));

        let request = ForceChangeEmailRequest {
            user_id: -1,
            new_email: "b@x.com".into(),
            new_email_confirm: "b@x.com".into(),
        };
        assert!(request.validate().has_violation_on("user_id"));
    }
}
