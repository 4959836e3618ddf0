//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::PaginationParams;

/// Shared pagination arguments for paged list commands.
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Page number (1-indexed)
    #[arg(long, short = 'p')]
    pub page: Option<usize>,

    /// Fetch every page (in parallel)
    #[arg(long, conflicts_with = "page")]
    pub all: bool,
}

impl PaginationArgs {
    /// Convert CLI args to API pagination params using `page_size` per page.
    ///
    /// `--limit` only shrinks the page when nothing is filtered out after
    /// fetching.
    pub fn to_params(&self, page_size: usize, filtered_locally: bool) -> PaginationParams {
        let size = match self.limit {
            Some(limit) if !self.all && !filtered_locally => limit.min(page_size),
            _ => page_size,
        };
        PaginationParams::new()
            .page_size(size)
            .page(self.page.unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_shrinks_page() {
        let args = PaginationArgs {
            limit: Some(10),
            ..Default::default()
        };
        let params = args.to_params(100, false);
        assert_eq!(params.page_size, Some(10));
        assert_eq!(params.page, Some(1));
    }

    #[test]
    fn test_all_keeps_full_pages() {
        let args = PaginationArgs {
            limit: Some(10),
            all: true,
            ..Default::default()
        };
        assert_eq!(args.to_params(100, false).page_size, Some(100));
    }

    #[test]
    fn test_local_filter_keeps_full_pages() {
        let args = PaginationArgs {
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(args.to_params(100, true).page_size, Some(100));
    }
}
