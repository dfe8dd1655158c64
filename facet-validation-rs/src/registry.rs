//! Canonical schema registry
//!
//! Every closed vocabulary the validator enforces lives here, as const tables
//! that are compiled once per process into hash lookups. Nothing in the
//! validator hard-codes a canonical value; it always goes through
//! [`registry()`].

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

// ── Field names ──────────────────────────────────────────────────────────────

pub const OUTCOME: &str = "outcome";
pub const CLAUDE_HELPFULNESS: &str = "claude_helpfulness";
pub const SESSION_TYPE: &str = "session_type";
pub const PRIMARY_SUCCESS: &str = "primary_success";
pub const FRICTION_COUNTS: &str = "friction_counts";
pub const USER_SATISFACTION_COUNTS: &str = "user_satisfaction_counts";
pub const SESSION_COMPLEXITY: &str = "session_complexity";
pub const RECOVERY_QUALITY: &str = "recovery_quality";
pub const ROOT_CAUSE_DEPTH: &str = "root_cause_depth";
pub const CONTEXT_SWITCHES: &str = "context_switches";

pub const SESSION_ID: &str = "session_id";
pub const FACET_MODEL: &str = "facet_model";
pub const SOURCE: &str = "source";
pub const TIMESTAMP: &str = "timestamp";

/// Provenance label assigned when the caller supplies none
pub const DEFAULT_SOURCE: &str = "self-improve";

// ── Canonical value sets ─────────────────────────────────────────────────────

const OUTCOMES: &[&str] = &[
    "fully_achieved",
    "mostly_achieved",
    "partially_achieved",
    "not_achieved",
    "unclear_from_transcript",
];

const HELPFULNESS: &[&str] = &["very_helpful", "helpful", "somewhat_helpful", "not_helpful"];

const SESSION_TYPES: &[&str] = &[
    "quick_fix",
    "iterative_refinement",
    "exploration",
    "debugging",
    "documentation",
];

const SUCCESS: &[&str] = &[
    "good_debugging",
    "multi_file_changes",
    "proactive_help",
    "correct_code_edits",
    "good_explanations",
    "fast_accurate_search",
    "efficient_workflow",
];

const FRICTION: &[&str] = &[
    "wrong_approach",
    "misunderstood_request",
    "unnecessary_changes",
    "wasted_time",
    "forgot_workflow_step",
    "tool_misuse",
    "over_engineering",
    "buggy_code",
];

const SATISFACTION: &[&str] = &["happy", "satisfied", "likely_satisfied", "dissatisfied"];

const COMPLEXITY: &[&str] = &["low", "medium", "high"];

const RECOVERY: &[&str] = &["excellent", "good", "partial", "poor", "not_applicable"];

const ROOT_CAUSE_DEPTHS: &[&str] = &["surface", "moderate", "deep", "not_applicable"];

// ── Synonym tables ───────────────────────────────────────────────────────────

const HELPFULNESS_SYNONYMS: &[(&str, &str)] = &[
    ("essential", "very_helpful"),
    ("extremely_helpful", "very_helpful"),
    ("moderately_helpful", "somewhat_helpful"),
    ("slightly_helpful", "not_helpful"),
    ("unhelpful", "not_helpful"),
];

const SESSION_TYPE_SYNONYMS: &[(&str, &str)] = &[
    ("multi_task", "iterative_refinement"),
    ("single_task", "quick_fix"),
    ("monitoring", "exploration"),
    ("investigation", "exploration"),
    ("quick_question", "quick_fix"),
    ("data_analysis", "exploration"),
    ("code_review", "exploration"),
    ("deployment", "iterative_refinement"),
    ("configuration", "quick_fix"),
    ("troubleshooting", "debugging"),
];

const FRICTION_SYNONYMS: &[(&str, &str)] = &[
    ("infrastructure_failure", "tool_misuse"),
    ("infrastructure_issues", "tool_misuse"),
    ("excessive_changes", "unnecessary_changes"),
    ("missed_workflow_step", "forgot_workflow_step"),
    ("fabricated_data", "buggy_code"),
    ("tool_limitation", "tool_misuse"),
    ("user_rejected_action", "unnecessary_changes"),
    ("incomplete_fix", "buggy_code"),
    ("tool_timeout", "tool_misuse"),
    ("external_tool_issue", "tool_misuse"),
    ("api_errors", "tool_misuse"),
    ("missing_context", "misunderstood_request"),
    ("environment_setup", "tool_misuse"),
    ("tool_environment_issue", "tool_misuse"),
    ("missed_content", "wrong_approach"),
    ("incomplete_validation", "buggy_code"),
    ("incomplete_answer", "wrong_approach"),
    ("premature_action", "wrong_approach"),
    ("communication_error", "misunderstood_request"),
    ("incorrect_assumption", "wrong_approach"),
    ("scope_creep", "unnecessary_changes"),
    ("excessive_output", "over_engineering"),
    ("verbose_output", "over_engineering"),
    ("wrong_tool", "tool_misuse"),
    ("wrong_file", "wrong_approach"),
    ("permission_error", "tool_misuse"),
];

const SATISFACTION_SYNONYMS: &[(&str, &str)] = &[
    ("neutral", "likely_satisfied"),
    ("concerned", "dissatisfied"),
    ("frustrated", "dissatisfied"),
    ("impressed", "happy"),
    ("relieved", "satisfied"),
];

// ── Defaults ─────────────────────────────────────────────────────────────────

/// `recovery_quality` default when the cleaned friction map is empty
pub const RECOVERY_DEFAULT_WITHOUT_FRICTION: &str = "not_applicable";
/// `recovery_quality` default when any friction was recorded
pub const RECOVERY_DEFAULT_WITH_FRICTION: &str = "good";

/// Default for `context_switches` when absent or not numeric
pub const CONTEXT_SWITCHES_DEFAULT: u64 = 0;

/// A closed vocabulary for one enum-valued field
#[derive(Debug)]
pub struct EnumDomain {
    pub field: &'static str,
    valid: HashSet<&'static str>,
    synonyms: HashMap<&'static str, &'static str>,
    default: &'static str,
}

impl EnumDomain {
    fn new(
        field: &'static str,
        valid: &[&'static str],
        synonyms: &[(&'static str, &'static str)],
        default: &'static str,
    ) -> Self {
        Self {
            field,
            valid: valid.iter().copied().collect(),
            synonyms: synonyms.iter().copied().collect(),
            default,
        }
    }

    /// Canonical member equal to `value`, if any
    pub fn member(&self, value: &str) -> Option<&'static str> {
        self.valid.get(value).copied()
    }

    /// Canonical target of a known synonym
    pub fn synonym(&self, value: &str) -> Option<&'static str> {
        self.synonyms.get(value).copied()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.valid.contains(value)
    }

    /// Fixed fallback for this field
    pub fn default_value(&self) -> &'static str {
        self.default
    }

    pub fn values(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.valid.iter().copied()
    }
}

/// Valid keys, synonyms and catch-all for one frequency-map field
#[derive(Debug)]
pub struct FrequencyDomain {
    pub field: &'static str,
    keys: HashSet<&'static str>,
    synonyms: HashMap<&'static str, &'static str>,
    catch_all: &'static str,
}

impl FrequencyDomain {
    fn new(
        field: &'static str,
        keys: &[&'static str],
        synonyms: &[(&'static str, &'static str)],
        catch_all: &'static str,
    ) -> Self {
        Self {
            field,
            keys: keys.iter().copied().collect(),
            synonyms: synonyms.iter().copied().collect(),
            catch_all,
        }
    }

    pub fn key(&self, key: &str) -> Option<&'static str> {
        self.keys.get(key).copied()
    }

    pub fn synonym(&self, key: &str) -> Option<&'static str> {
        self.synonyms.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Key that absorbs entries matching neither a valid key nor a synonym
    pub fn catch_all(&self) -> &'static str {
        self.catch_all
    }
}

/// The full set of canonical domains for a facet record
#[derive(Debug)]
pub struct FacetRegistry {
    pub outcome: EnumDomain,
    pub helpfulness: EnumDomain,
    pub session_type: EnumDomain,
    pub primary_success: EnumDomain,
    pub session_complexity: EnumDomain,
    pub recovery_quality: EnumDomain,
    pub root_cause_depth: EnumDomain,
    pub friction: FrequencyDomain,
    pub satisfaction: FrequencyDomain,
}

static REGISTRY: Lazy<FacetRegistry> = Lazy::new(FacetRegistry::build);

/// Process-wide registry, built on first use
pub fn registry() -> &'static FacetRegistry {
    &REGISTRY
}

impl FacetRegistry {
    fn build() -> Self {
        Self {
            outcome: EnumDomain::new(OUTCOME, OUTCOMES, &[], "unclear_from_transcript"),
            helpfulness: EnumDomain::new(
                CLAUDE_HELPFULNESS,
                HELPFULNESS,
                HELPFULNESS_SYNONYMS,
                "helpful",
            ),
            session_type: EnumDomain::new(
                SESSION_TYPE,
                SESSION_TYPES,
                SESSION_TYPE_SYNONYMS,
                "exploration",
            ),
            primary_success: EnumDomain::new(PRIMARY_SUCCESS, SUCCESS, &[], "efficient_workflow"),
            session_complexity: EnumDomain::new(SESSION_COMPLEXITY, COMPLEXITY, &[], "medium"),
            recovery_quality: EnumDomain::new(
                RECOVERY_QUALITY,
                RECOVERY,
                &[],
                RECOVERY_DEFAULT_WITHOUT_FRICTION,
            ),
            root_cause_depth: EnumDomain::new(
                ROOT_CAUSE_DEPTH,
                ROOT_CAUSE_DEPTHS,
                &[],
                "not_applicable",
            ),
            friction: FrequencyDomain::new(
                FRICTION_COUNTS,
                FRICTION,
                FRICTION_SYNONYMS,
                "wrong_approach",
            ),
            satisfaction: FrequencyDomain::new(
                USER_SATISFACTION_COUNTS,
                SATISFACTION,
                SATISFACTION_SYNONYMS,
                "likely_satisfied",
            ),
        }
    }

    fn enum_domains(&self) -> [&EnumDomain; 7] {
        [
            &self.outcome,
            &self.helpfulness,
            &self.session_type,
            &self.primary_success,
            &self.session_complexity,
            &self.recovery_quality,
            &self.root_cause_depth,
        ]
    }

    /// `recovery_quality` fallback given whether friction was recorded
    pub fn recovery_default(&self, has_friction: bool) -> &'static str {
        if has_friction {
            RECOVERY_DEFAULT_WITH_FRICTION
        } else {
            RECOVERY_DEFAULT_WITHOUT_FRICTION
        }
    }

    /// Audit the tables for internal consistency.
    ///
    /// Every default, catch-all and synonym target must belong to its own
    /// domain, and no synonym may shadow a canonical value. Returns one
    /// message per violation; an empty list means the registry is sound.
    pub fn check(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for domain in self.enum_domains() {
            if !domain.contains(domain.default) {
                violations.push(format!(
                    "{}: default '{}' is not a canonical value",
                    domain.field, domain.default
                ));
            }
            for (from, to) in &domain.synonyms {
                if !domain.contains(to) {
                    violations.push(format!(
                        "{}: synonym '{}' maps to unknown value '{}'",
                        domain.field, from, to
                    ));
                }
                if domain.contains(from) {
                    violations.push(format!(
                        "{}: synonym '{}' shadows a canonical value",
                        domain.field, from
                    ));
                }
            }
        }

        for recovery in [RECOVERY_DEFAULT_WITH_FRICTION, RECOVERY_DEFAULT_WITHOUT_FRICTION] {
            if !self.recovery_quality.contains(recovery) {
                violations.push(format!(
                    "{}: default '{}' is not a canonical value",
                    RECOVERY_QUALITY, recovery
                ));
            }
        }

        for domain in [&self.friction, &self.satisfaction] {
            if !domain.contains(domain.catch_all) {
                violations.push(format!(
                    "{}: catch-all '{}' is not a canonical key",
                    domain.field, domain.catch_all
                ));
            }
            for (from, to) in &domain.synonyms {
                if !domain.contains(to) {
                    violations.push(format!(
                        "{}: synonym '{}' maps to unknown key '{}'",
                        domain.field, from, to
                    ));
                }
                if domain.contains(from) {
                    violations.push(format!(
                        "{}: synonym '{}' shadows a canonical key",
                        domain.field, from
                    ));
                }
            }
        }

        violations
    }
}
