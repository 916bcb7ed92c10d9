use std::collections::BTreeSet;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: String,
    /// Raw spellings seen for this candidate, excluding `id` itself.
    pub aliases: BTreeSet<String>,
}

