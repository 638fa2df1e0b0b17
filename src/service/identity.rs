//! Resolution of a typed display name to a guild member.
//!
//! Admins refer to participants by name, not id. `IdentityResolver` matches the query
//! against each member's nickname and account name. A case-insensitive exact match always
//! wins; under the fuzzy strategy, the first member in directory order whose similarity
//! score reaches the threshold is accepted when no exact match exists.

use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};

use crate::{
    error::{
        command::{ArgumentError, NotFoundError},
        AppError,
    },
    model::{directory::MemberDirectory, ledger::UserId},
};

/// Default acceptance threshold for fuzzy matching on the 0-100 scale.
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 70;

/// How a name query is matched against the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Case-insensitive equality only.
    #[default]
    Exact,
    /// Exact first, then the first member scoring at least `threshold`.
    Fuzzy { threshold: u8 },
}

pub struct IdentityResolver {
    strategy: MatchStrategy,
    matcher: SkimMatcherV2,
}

impl IdentityResolver {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self {
            strategy,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Resolves `query` to a member id.
    ///
    /// # Arguments
    /// - `query` - Name typed by the admin, surrounding whitespace ignored
    /// - `directory` - Members to match against
    ///
    /// # Returns
    /// - `Ok(UserId)` - The matched member
    /// - `Err(AppError::ArgumentErr)` - The query is blank
    /// - `Err(AppError::NotFoundErr)` - No member matched under the strategy
    pub fn resolve<D>(&self, query: &str, directory: &D) -> Result<UserId, AppError>
    where
        D: MemberDirectory + ?Sized,
    {
        let query = query.trim();
        if query.is_empty() {
            return Err(ArgumentError::Missing("display_name").into());
        }

        let wanted = query.to_lowercase();
        let exact = directory
            .members()
            .iter()
            .find(|member| member.names().any(|name| name.to_lowercase() == wanted));

        if let Some(member) = exact {
            return Ok(member.id);
        }

        let MatchStrategy::Fuzzy { threshold } = self.strategy else {
            return Err(NotFoundError::User(query.to_string()).into());
        };

        directory
            .members()
            .iter()
            .find(|member| {
                member
                    .names()
                    .any(|name| self.similarity(query, name) >= threshold)
            })
            .map(|member| {
                tracing::debug!(
                    "Fuzzy matched '{}' to {} ({})",
                    query,
                    member.display_name(),
                    member.id
                );
                member.id
            })
            .ok_or_else(|| NotFoundError::User(query.to_string()).into())
    }

    /// Similarity of `candidate` to `query` on a 0-100 scale.
    ///
    /// The higher of two scores, both case-insensitive:
    /// - the skim match score normalized against the query's score on itself, scaled by
    ///   `2·|query| / (|query| + |candidate|)` so long names that merely contain the query
    ///   score lower than close spellings
    /// - the Damerau-Levenshtein similarity, which scores typos, transpositions and
    ///   doubled letters that are not subsequences of the name
    pub fn similarity(&self, query: &str, candidate: &str) -> u8 {
        let query = query.to_lowercase();
        let candidate = candidate.to_lowercase();

        let spelled = strsim::normalized_damerau_levenshtein(&query, &candidate);

        to_percent(self.subsequence_score(&query, &candidate).max(spelled))
    }

    fn subsequence_score(&self, query: &str, candidate: &str) -> f64 {
        let Some(best) = self.matcher.fuzzy_match(query, query).filter(|s| *s > 0) else {
            return 0.0;
        };
        let Some(score) = self.matcher.fuzzy_match(candidate, query) else {
            return 0.0;
        };

        let quality = (score as f64 / best as f64).clamp(0.0, 1.0);
        let query_len = query.chars().count() as f64;
        let candidate_len = candidate.chars().count() as f64;

        quality * 2.0 * query_len / (query_len + candidate_len)
    }
}

fn to_percent(ratio: f64) -> u8 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new(MatchStrategy::default())
    }
}
