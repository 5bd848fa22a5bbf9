use serde::Serialize;

/// An illustrative clause offered to API consumers for trying the service.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SampleClause {
    pub title: &'static str,
    pub clause: &'static str,
    pub category: &'static str,
}

pub const SAMPLE_CLAUSES: &[SampleClause] = &[
    SampleClause {
        title: "Unlimited Liability",
        clause: "The Contractor shall be liable for any and all damages, losses, costs, and \
                 expenses arising from or related to the performance of services under this \
                 Agreement, without any limitation.",
        category: "liability",
    },
    SampleClause {
        title: "Automatic Renewal",
        clause: "This Agreement shall automatically renew for successive one-year terms unless \
                 either party provides written notice of non-renewal at least 90 days prior to \
                 the end of the current term.",
        category: "term",
    },
    SampleClause {
        title: "Broad Confidentiality",
        clause: "All information shared by either party, whether marked confidential or not, \
                 shall be deemed confidential and shall not be disclosed for a period of 10 \
                 years after termination.",
        category: "confidentiality",
    },
];
