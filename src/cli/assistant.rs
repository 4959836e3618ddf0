//! Assistant commands
//!
//! Edits go through [`AssistantDraft`]: the stored assistant is loaded,
//! the requested changes are applied locally, the draft is validated, and
//! only then is the full update sent. Fields the CLI does not know about
//! ride along untouched.

use colored::Colorize;
use serde_json::Map;

use crate::cli::args::GlobalOptions;
use crate::cli::confirm::{Confirmer, confirm_then};
use crate::cli::handlers::{print_ack, run_list_command};
use crate::cli::{AssistantFields, CommandContext, OutputFormat};
use crate::client::AssistantApi;
use crate::client::models::{Ack, Assistant, AssistantDraft, ModelConfig, VoiceConfig};
use crate::error::{Result, ValidationError};
use crate::models::{AssistantDisplay, assistant_detail_rows};
use crate::output::json::format_json;
use crate::output::print_record;
use crate::session::Route;

impl AssistantFields {
    /// Apply the requested changes to `draft`
    pub fn apply(&self, draft: &mut AssistantDraft) -> Result<()> {
        if let Some(ref name) = self.name {
            draft.name = name.clone();
        }
        if let Some(ref message) = self.first_message {
            draft.first_message = Some(message.clone());
        }
        if let Some(ref prompt) = self.system_prompt {
            draft.system_prompt = Some(prompt.clone());
        }
        if let Some(ref path) = self.system_prompt_file {
            draft.system_prompt = Some(std::fs::read_to_string(path)?);
        }
        if let Some(ref model) = self.model {
            let existing = draft.model.take();
            let provider = self
                .model_provider
                .clone()
                .or_else(|| existing.as_ref().map(|m| m.provider.clone()))
                .ok_or_else(|| ValidationError::new("model", "needs --model-provider"))?;
            draft.model = Some(ModelConfig {
                provider,
                model: model.clone(),
                extra: existing.map(|m| m.extra).unwrap_or_else(Map::new),
            });
        }
        if let Some(t) = self.temperature {
            draft.temperature = Some(t);
        }
        if let Some(n) = self.max_tokens {
            draft.max_tokens = Some(n);
        }
        if let Some(ref voice_id) = self.voice_id {
            let existing = draft.voice.take();
            let provider = self
                .voice_provider
                .clone()
                .or_else(|| existing.as_ref().map(|v| v.provider.clone()))
                .ok_or_else(|| ValidationError::new("voice", "needs --voice-provider"))?;
            draft.voice = Some(VoiceConfig {
                provider,
                voice_id: voice_id.clone(),
                extra: existing.map(|v| v.extra).unwrap_or_else(Map::new),
            });
        }
        if let Some(ref message) = self.end_call_message {
            draft.end_call_message = Some(message.clone());
        }
        Ok(())
    }
}

/// Create an assistant from the given fields
pub async fn create_assistant(api: &dyn AssistantApi, fields: &AssistantFields) -> Result<Assistant> {
    let mut draft = AssistantDraft::new(String::new());
    fields.apply(&mut draft)?;
    draft.validate()?;
    api.create_assistant(&draft.to_update_request()).await
}

/// Load, change, validate, save
pub async fn edit_assistant(
    api: &dyn AssistantApi,
    id: &str,
    fields: &AssistantFields,
) -> Result<Ack> {
    let mut draft = AssistantDraft::from(api.get_assistant(id).await?);
    fields.apply(&mut draft)?;
    draft.validate()?;
    api.update_assistant(id, &draft.to_update_request()).await
}

/// Set or clear the number an assistant forwards calls to
pub async fn set_forwarding(
    api: &dyn AssistantApi,
    id: &str,
    number: Option<String>,
) -> Result<Ack> {
    let mut draft = AssistantDraft::from(api.get_assistant(id).await?);
    draft.forwarding_phone_number = number;
    draft.validate()?;
    api.update_assistant(id, &draft.to_update_request()).await
}

/// Delete after confirmation; `None` if the operator declined
pub async fn delete_assistant(
    api: &dyn AssistantApi,
    confirmer: &dyn Confirmer,
    id: &str,
) -> Result<Option<Ack>> {
    let assistant = api.get_assistant(id).await?;
    let prompt = format!(
        "Delete assistant \"{}\"? Phone numbers attached to it stop answering.",
        assistant.name
    );
    confirm_then(confirmer, &prompt, || api.delete_assistant(id)).await
}

pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<Assistant, AssistantDisplay, _, _>(
        opts,
        Route::Assistants,
        "assistants",
        |client| async move { client.list_assistants().await },
    )
    .await
}

pub async fn get(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::AssistantEditor(Some(id.to_string()))).await?;
    let assistant = ctx.client.get_assistant(id).await?;
    print_record(&assistant_detail_rows(&assistant), &assistant, ctx.format)
}

pub async fn create(opts: &GlobalOptions, fields: &AssistantFields) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::AssistantEditor(None)).await?;
    let assistant = create_assistant(ctx.client.as_ref(), fields).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&assistant)?),
        OutputFormat::Table => eprintln!(
            "{} Assistant \"{}\" created ({})",
            "✓".green(),
            assistant.name,
            assistant.id.as_deref().unwrap_or("-")
        ),
    }
    Ok(())
}

pub async fn edit(opts: &GlobalOptions, id: &str, fields: &AssistantFields) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::AssistantEditor(Some(id.to_string()))).await?;
    let ack = edit_assistant(ctx.client.as_ref(), id, fields).await?;
    print_ack(&ack, "Assistant updated", ctx.format)
}

pub async fn delete(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::enter(opts, Route::Assistants).await?;
    let confirmer = ctx.confirmer();

    match delete_assistant(ctx.client.as_ref(), confirmer.as_ref(), id).await? {
        Some(ack) => print_ack(&ack, "Assistant deleted", ctx.format),
        None => {
            eprintln!("Cancelled.");
            Ok(())
        }
    }
}
