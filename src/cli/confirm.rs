//! Confirmation gate for destructive commands
//!
//! Nothing is sent to the backend until the operator says yes. Declining
//! issues no request at all.

use std::future::Future;

use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;

use crate::error::Result;

/// Asks the operator a yes/no question
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Interactive prompt on the terminal, defaulting to "no"
pub struct PromptConfirmer;

impl Confirmer for PromptConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

/// `--yes`: every question is answered yes
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// The confirmer matching the `--yes` flag
pub fn confirmer_for(yes: bool) -> Box<dyn Confirmer> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirmer)
    }
}

/// Run `action` only if the operator confirms; `Ok(None)` means cancelled
pub async fn confirm_then<T, F, Fut>(
    confirmer: &dyn Confirmer,
    prompt: &str,
    action: F,
) -> Result<Option<T>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if !confirmer.confirm(prompt)? {
        return Ok(None);
    }
    action().await.map(Some)
}
