use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::input::InputBundle;
use crate::model::candidate::Candidate;
use crate::model::poll::{PollEntry, PollRecord};
use crate::model::profile::ScoringProfile;
use crate::model::results::{ActualResult, ResultEntry};
use crate::names::{AliasTable, NameNormalizer, Resolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    Results,
    Polls,
}

impl NameSource {
    pub fn as_str(self) -> &'static str {
        match self {
            NameSource::Results => "results",
            NameSource::Polls => "polls",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameResolution {
    pub source: NameSource,
    pub raw: String,
    pub id: String,
    pub via: Resolution,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub actual: ActualResult,
    pub polls: Vec<PollRecord>,
    pub candidates: Vec<Candidate>,
    /// One row per distinct (source, raw spelling), in first-seen order.
    pub resolutions: Vec<NameResolution>,
}

impl Stage2Output {
    pub fn unmapped(&self) -> impl Iterator<Item = &NameResolution> {
        self.resolutions.iter().filter(|r| !r.via.is_mapped())
    }
}

/// Builds the normalizer for a load: built-in aliases (unless disabled)
/// overridden by the alias file, with every actual-results name registered
/// as a canonical identifier in its standard form.
pub fn build_normalizer(bundle: &InputBundle) -> NameNormalizer {
    let mut aliases = if bundle.paths.builtin_aliases {
        AliasTable::builtin()
    } else {
        AliasTable::empty()
    };
    for pair in &bundle.aliases {
        tracing::trace!(
            "alias {:?} -> {:?} (line {})",
            pair.alias,
            pair.canonical,
            pair.line
        );
    }
    aliases.extend_from_pairs(
        bundle
            .aliases
            .iter()
            .map(|p| (p.alias.as_str(), p.canonical.as_str())),
    );
    if aliases.is_empty() {
        tracing::debug!("no alias entries; names resolve by standardization only");
    }

    let base = NameNormalizer::new(aliases);
    let reference: Vec<String> = bundle
        .results
        .iter()
        .map(|row| base.canonical_form(&row.name))
        .collect();
    let normalizer = base.with_canonical(reference);
    tracing::debug!(
        "name normalizer: {} aliases, {} canonical identifiers",
        normalizer.aliases().len(),
        normalizer.canonical_count()
    );
    normalizer
}

struct Resolver<'a> {
    normalizer: &'a NameNormalizer,
    seen: BTreeMap<(NameSource, String), usize>,
    resolutions: Vec<NameResolution>,
}

impl<'a> Resolver<'a> {
    fn new(normalizer: &'a NameNormalizer) -> Self {
        Self {
            normalizer,
            seen: BTreeMap::new(),
            resolutions: Vec::new(),
        }
    }

    fn resolve(&mut self, source: NameSource, raw: &str) -> String {
        let key = (source, raw.to_string());
        if let Some(&idx) = self.seen.get(&key) {
            return self.resolutions[idx].id.clone();
        }
        let resolved = self.normalizer.resolve(raw);
        if resolved.via.is_mapped() {
            tracing::debug!("{} name {raw:?} -> {:?} ({})", source.as_str(), resolved.id, resolved.via);
        } else {
            tracing::warn!(
                "unmapped {} name {raw:?}; using it as its own identifier",
                source.as_str()
            );
        }
        self.seen.insert(key, self.resolutions.len());
        self.resolutions.push(NameResolution {
            source,
            raw: raw.to_string(),
            id: resolved.id.clone(),
            via: resolved.via,
        });
        resolved.id
    }
}

pub fn run_stage2(
    bundle: &InputBundle,
    normalizer: &NameNormalizer,
    profile: &ScoringProfile,
) -> Stage2Output {
    let mut resolver = Resolver::new(normalizer);

    let mut standings: Vec<ResultEntry> = Vec::with_capacity(bundle.results.len());
    for row in &bundle.results {
        let id = resolver.resolve(NameSource::Results, &row.name);
        if standings.iter().any(|e| e.id == id) {
            tracing::warn!(
                "results list {id:?} more than once; keeping first (line {})",
                row.line
            );
            continue;
        }
        standings.push(ResultEntry {
            rank: standings.len() + 1,
            id,
            raw: row.name.clone(),
            votes: row.votes,
        });
    }
    let actual = ActualResult {
        standings,
        top_n: profile.top_n,
    };
    if !actual.is_complete() {
        tracing::warn!(
            "actual results list only {} candidates for {} seats; accuracy uses a reduced denominator",
            actual.standings.len(),
            profile.top_n
        );
    }

    let mut polls = Vec::with_capacity(bundle.polls.len());
    for raw in &bundle.polls {
        let standings: Vec<PollEntry> = raw
            .standings
            .iter()
            .map(|e| PollEntry {
                id: resolver.resolve(NameSource::Polls, &e.name),
                raw: e.name.clone(),
                percentage: e.percentage,
            })
            .collect();
        let predictions: Vec<PollEntry> = standings.iter().take(profile.top_n).cloned().collect();
        if predictions.len() < profile.top_n {
            tracing::info!(
                "station {:?} predicts only {} of {} seats",
                raw.station,
                predictions.len(),
                profile.top_n
            );
        }
        polls.push(PollRecord {
            station: raw.station.clone(),
            predictions,
            standings,
        });
    }

    let candidates = collect_candidates(&resolver.resolutions);
    let unmapped = resolver
        .resolutions
        .iter()
        .filter(|r| !r.via.is_mapped())
        .count();
    tracing::info!(
        "normalized {} distinct spellings into {} candidates ({} unmapped)",
        resolver.resolutions.len(),
        candidates.len(),
        unmapped
    );

    Stage2Output {
        actual,
        polls,
        candidates,
        resolutions: resolver.resolutions,
    }
}

fn collect_candidates(resolutions: &[NameResolution]) -> Vec<Candidate> {
    let mut by_id: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for r in resolutions {
        let aliases = by_id.entry(r.id.as_str()).or_default();
        if r.raw != r.id {
            aliases.insert(r.raw.clone());
        }
    }
    by_id
        .into_iter()
        .map(|(id, aliases)| Candidate {
            id: id.to_string(),
            aliases,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_normalize.rs"]
mod tests;
