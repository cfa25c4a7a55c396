use async_trait::async_trait;
use crate::{FundResult, SchemeDetail, SchemeSummary};

/// Trait for scheme catalog sources (remote NAV providers)
#[async_trait]
pub trait SchemeSource: Send + Sync {
    /// List available schemes, truncated to `limit` entries.
    async fn list_schemes(&self, limit: usize) -> FundResult<Vec<SchemeSummary>>;

    /// Fetch scheme metadata plus its full NAV history.
    async fn scheme_detail(&self, scheme_code: u64) -> FundResult<SchemeDetail>;
}
