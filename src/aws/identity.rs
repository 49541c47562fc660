/// Caller identity resolution via STS.
use aws_sdk_sts::error::DisplayErrorContext;

use super::AwsSession;
use crate::records::PeekError;

/// Something that knows which account the caller runs as.
pub trait IdentityProvider {
    /// Return the caller's account number.
    ///
    /// # Errors
    ///
    /// Returns `PeekError::Identity` or `PeekError::MissingAccount`.
    fn account_number(&self) -> Result<String, PeekError>;
}

/// `GetCallerIdentity` against STS.
pub struct StsIdentity<'a> {
    session: &'a AwsSession,
    client: aws_sdk_sts::Client,
}

impl<'a> StsIdentity<'a> {
    #[must_use]
    pub fn new(session: &'a AwsSession) -> Self {
        Self {
            session,
            client: aws_sdk_sts::Client::new(session.config()),
        }
    }
}

impl IdentityProvider for StsIdentity<'_> {
    fn account_number(&self) -> Result<String, PeekError> {
        let output = self
            .session
            .block_on(self.client.get_caller_identity().send())
            .map_err(|e| PeekError::Identity(DisplayErrorContext(&e).to_string()))?;

        let account = output
            .account()
            .filter(|a| !a.is_empty())
            .ok_or(PeekError::MissingAccount)?;
        tracing::info!(account, arn = output.arn().unwrap_or_default(), "resolved caller identity");
        Ok(account.to_owned())
    }
}
