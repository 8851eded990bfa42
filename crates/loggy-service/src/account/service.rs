//! Account operations and token-based identity.

use std::sync::Arc;

use tracing::{debug, info};

use loggy_auth::password::{PasswordHasher, PasswordValidator};
use loggy_auth::token::TokenSigner;
use loggy_core::error::AppError;
use loggy_core::result::AppResult;
use loggy_database::store::PersonStore;
use loggy_entity::{NewPerson, Person};

use crate::context::RequestContext;

/// Handles account creation, login, and token lifecycle.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Person store.
    persons: Arc<dyn PersonStore>,
    /// Token signer.
    signer: Arc<TokenSigner>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        persons: Arc<dyn PersonStore>,
        signer: Arc<TokenSigner>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            persons,
            signer,
            hasher,
            validator,
        }
    }

    /// Registers a new person and returns a token for them.
    ///
    /// An email that already has an account fails with `BadRequest` and the
    /// `email-taken` code.
    pub async fn create_account(&self, email: &str, password: &str) -> AppResult<String> {
        validate_email(email)?;
        self.validator.validate(password)?;

        let password_hash = self.hasher.hash_password(password)?;
        let person = self
            .persons
            .create(&NewPerson {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(person_id = %person.id, "Account created");
        Ok(self.signer.issue(person.id))
    }

    /// Checks credentials and returns a token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        validate_email(email)?;
        self.validator.validate(password)?;

        let person = self
            .persons
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &person.password_hash)? {
            debug!(person_id = %person.id, "Login rejected: wrong password");
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        info!(person_id = %person.id, "Login succeeded");
        Ok(self.signer.issue(person.id))
    }

    /// Issues a fresh token for an authenticated caller.
    pub fn refresh_token(&self, ctx: &RequestContext) -> String {
        self.signer.issue(ctx.person_id)
    }

    /// The caller's account.
    pub async fn whoami(&self, ctx: &RequestContext) -> AppResult<Person> {
        self.persons
            .find_by_id(ctx.person_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Token refers to an unknown person"))
    }

    /// Resolves a raw `authorization` header value into a context.
    ///
    /// Invalid tokens are not errors; they leave the request anonymous.
    pub fn authenticate(&self, token: &str) -> Option<RequestContext> {
        match self.signer.verify(token) {
            Ok(person_id) => Some(RequestContext::new(person_id)),
            Err(rejection) => {
                debug!(reason = %rejection, "Ignoring invalid token");
                None
            }
        }
    }
}

/// Minimal structural check; the HTTP layer applies full email syntax rules.
fn validate_email(email: &str) -> AppResult<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::bad_request("Invalid email address")),
    }
}
