//! Filter argument types for CLI commands

use clap::Args;

use crate::client::CallFilterParams;
use crate::client::models::CallRecord;

/// Filter arguments for `report calls` and `report usage`.
#[derive(Args, Debug, Clone, Default)]
pub struct CallFilterArgs {
    /// Only calls handled by this assistant ID (filtered by the backend)
    #[arg(long)]
    pub assistant_id: Option<String>,

    /// Only calls whose assistant ID or name contains this text
    #[arg(long, short = 'a')]
    pub assistant: Option<String>,

    /// Only calls with this status (e.g. ended, in-progress)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

impl CallFilterArgs {
    /// Filters the backend applies
    pub fn to_params(&self) -> CallFilterParams {
        CallFilterParams {
            assistant_id: self.assistant_id.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }

    /// Whether any filter runs locally, after the page is fetched
    pub fn filters_locally(&self) -> bool {
        self.status.is_some() || self.assistant.is_some()
    }

    /// Filters applied locally after fetching
    pub fn matches(&self, call: &CallRecord) -> bool {
        let status_ok = self.status.as_ref().is_none_or(|wanted| {
            call.status
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(wanted))
        });

        let assistant_ok = self.assistant.as_ref().is_none_or(|wanted| {
            let wanted = wanted.to_lowercase();
            call.assistant_id
                .as_deref()
                .is_some_and(|id| id.to_lowercase().contains(&wanted))
                || call
                    .assistant_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&wanted))
        });

        status_ok && assistant_ok
    }
}
