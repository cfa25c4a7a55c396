use fund_core::{ExternalFields, MetricsRecord, SchemeDetail};
use rayon::prelude::*;

use crate::MetricsAssembler;

/// One fund's inputs for batch analysis
#[derive(Debug, Clone, Default)]
pub struct FundInput {
    pub scheme_code: u64,
    pub detail: SchemeDetail,
    pub external: ExternalFields,
}

/// Analyze independent funds in parallel. Output order matches input order;
/// funds without NAV data yield `None`.
pub fn analyze_batch(inputs: &[FundInput], assembler: &MetricsAssembler) -> Vec<Option<MetricsRecord>> {
    inputs
        .par_iter()
        .map(|input| assembler.assemble(input.scheme_code, &input.detail, &input.external))
        .collect()
}
