//! The ordered normalization rules.
//!
//! Each [`Rule`] is an independent step over a [`Table`]. Rules only rename
//! columns, add columns, or rewrite cells in place; they never add, remove
//! or reorder rows. A rule whose columns are absent is skipped.
//!
//! Order matters for the lead-rating chain: the source-driven "Cold"
//! assignment and the rating text cleanup run before the "Hot" override,
//! and the "Warm" default fills whatever is still blank at the end.

use std::borrow::Cow;

use lead_model::{Cell, Table};
use serde::{Deserialize, Serialize};

use crate::columns::{
    COMPANY_NAME, CONTACT_PHONE, COUNTRY, COUNTRY_REGION_MARKER, EMAIL_ADDRESS, LEAD_RATING,
    LEAD_SOURCE, NOTES, PROSPECT_LEAD_REASSIGNMENT, SOURCE, STATE,
};
use crate::report::StepOutcome;

/// Value injected into the "Lead Source" column.
pub const LEAD_SOURCE_VALUE: &str = "Lead - Solidworks";

pub const DEFAULT_CONTACT_PHONE: &str = "1111111111";
pub const DEFAULT_EMAIL_ADDRESS: &str = "noemail@gmail.com";
pub const DEFAULT_COUNTRY: &str = "Canada";
pub const DEFAULT_STATE: &str = "QC";
pub const DEFAULT_COMPANY_NAME: &str = "NA";

/// Countries kept as-is; anything else becomes [`DEFAULT_COUNTRY`].
pub const ALLOWED_COUNTRIES: [&str; 2] = ["Canada", "USA"];

/// Legacy Quebec province code and its replacement.
pub const LEGACY_QUEBEC_CODE: &str = "PQ";
pub const QUEBEC_CODE: &str = "QC";

/// Source value that marks a lead as cold.
pub const COLD_SOURCE: &str = "eDrawings Activation";

/// Rating spellings rewritten to [`COLD_RATING_TEXT`]. Matched exactly.
pub const VERY_COLD_SPELLINGS: [&str; 3] = ["5 - very cold", "very cold", "5 - Very Cold"];
pub const COLD_RATING_TEXT: &str = "cold";

/// Case-insensitive source substrings that mark a lead as hot.
pub const HOT_SOURCE_KEYWORDS: [&str; 4] = ["RAQ", "RAC", "RAD", "SWOPT"];

pub const HOT_RATING: &str = "Hot";
pub const COLD_RATING: &str = "Cold";
pub const WARM_RATING: &str = "Warm";

pub const REASSIGNED_NOTE: &str = "Reassigned Lead";
pub const REASSIGNED_FLAG: &str = "Y";

/// A single normalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Rename "Country/Region" style headers to "Country".
    CountryHeader,
    /// Replace the legacy "PQ" state code with "QC".
    StateCode,
    /// Set "Lead Source" to a constant on every row.
    LeadSource,
    /// Backfill blanks in contact columns and clean phone numbers.
    ContactDefaults,
    /// Rate leads from the eDrawings activation source as cold.
    ColdSource,
    /// Collapse "very cold" spellings into "cold".
    ColdRatingText,
    /// Rate leads from quote/demo/option sources as hot.
    HotSource,
    /// Rate any still-unrated lead as warm.
    WarmDefault,
    /// Add a reassignment marker to the notes of reassigned leads.
    ReassignmentNote,
}

impl Rule {
    /// All rules, in execution order.
    pub const ALL: [Rule; 9] = [
        Rule::CountryHeader,
        Rule::StateCode,
        Rule::LeadSource,
        Rule::ContactDefaults,
        Rule::ColdSource,
        Rule::ColdRatingText,
        Rule::HotSource,
        Rule::WarmDefault,
        Rule::ReassignmentNote,
    ];

    /// Returns a human-readable display name for the rule.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CountryHeader => "Country header",
            Self::StateCode => "State code",
            Self::LeadSource => "Lead source",
            Self::ContactDefaults => "Contact defaults",
            Self::ColdSource => "Cold by source",
            Self::ColdRatingText => "Cold rating text",
            Self::HotSource => "Hot by source",
            Self::WarmDefault => "Warm default",
            Self::ReassignmentNote => "Reassignment note",
        }
    }

    /// One-line description of what the rule does.
    pub fn description(&self) -> &'static str {
        match self {
            Self::CountryHeader => "Strip \"Region\" and \"/\" from \"Country/Region\" headers",
            Self::StateCode => "State: PQ -> QC",
            Self::LeadSource => "Lead Source = \"Lead - Solidworks\" on every row",
            Self::ContactDefaults => {
                "Fill blank ContactPhone/EmailAddress/Country/State/CompanyName; \
                 clean phone numbers; restrict Country to Canada/USA"
            }
            Self::ColdSource => "Lead Rating = Cold where Source is \"eDrawings Activation\"",
            Self::ColdRatingText => "Lead Rating: \"very cold\" spellings -> cold",
            Self::HotSource => "Lead Rating = Hot where Source mentions RAQ/RAC/RAD/SWOPT",
            Self::WarmDefault => "Lead Rating = Warm where still blank",
            Self::ReassignmentNote => {
                "Append \"Reassigned Lead\" to Notes where Prospect Lead Reassignment is Y"
            }
        }
    }

    /// Columns the rule needs; the rule is skipped unless they are present.
    ///
    /// `ContactDefaults` works on each of its columns independently and is
    /// only skipped when none of them exist.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::CountryHeader | Self::LeadSource | Self::ContactDefaults => &[],
            Self::StateCode => &[STATE],
            Self::ColdSource | Self::HotSource => &[SOURCE, LEAD_RATING],
            Self::ColdRatingText | Self::WarmDefault => &[LEAD_RATING],
            Self::ReassignmentNote => &[PROSPECT_LEAD_REASSIGNMENT],
        }
    }

    /// Apply the rule to `table` in place.
    pub fn apply(&self, table: &mut Table) -> StepOutcome {
        match self {
            Self::CountryHeader => clean_country_headers(table),
            Self::StateCode => replace_legacy_state_code(table),
            Self::LeadSource => set_lead_source(table),
            Self::ContactDefaults => fill_contact_defaults(table),
            Self::ColdSource => rate_cold_sources(table),
            Self::ColdRatingText => collapse_cold_ratings(table),
            Self::HotSource => rate_hot_sources(table),
            Self::WarmDefault => default_warm_rating(table),
            Self::ReassignmentNote => annotate_reassigned_leads(table),
        }
    }
}

fn clean_country_headers(table: &mut Table) -> StepOutcome {
    let renamed = table.rename_columns(|name| {
        name.contains(COUNTRY_REGION_MARKER)
            .then(|| name.replace("Region", "").replace('/', "").trim().to_string())
    });
    StepOutcome::Applied { changed: renamed }
}

fn replace_legacy_state_code(table: &mut Table) -> StepOutcome {
    table
        .update_column(STATE, |cell| {
            cell.is_text(LEGACY_QUEBEC_CODE)
                .then(|| Cell::text(QUEBEC_CODE))
        })
        .into()
}

fn set_lead_source(table: &mut Table) -> StepOutcome {
    let changed = table.set_constant_column(LEAD_SOURCE, &Cell::text(LEAD_SOURCE_VALUE));
    StepOutcome::Applied { changed }
}

fn fill_contact_defaults(table: &mut Table) -> StepOutcome {
    let outcomes = [
        table.update_column(CONTACT_PHONE, |cell| {
            let raw = cell
                .to_text()
                .unwrap_or(Cow::Borrowed(DEFAULT_CONTACT_PHONE));
            Some(Cell::text(strip_phone_punctuation(&raw)))
        }),
        fill_blank(table, EMAIL_ADDRESS, DEFAULT_EMAIL_ADDRESS),
        table.update_column(COUNTRY, |cell| {
            let allowed = ALLOWED_COUNTRIES.iter().any(|country| cell.is_text(country));
            (!allowed).then(|| Cell::text(DEFAULT_COUNTRY))
        }),
        fill_blank(table, STATE, DEFAULT_STATE),
        fill_blank(table, COMPANY_NAME, DEFAULT_COMPANY_NAME),
    ];
    outcomes
        .into_iter()
        .map(StepOutcome::from)
        .fold(StepOutcome::Skipped, StepOutcome::merge)
}

fn rate_cold_sources(table: &mut Table) -> StepOutcome {
    table
        .update_column_where(
            LEAD_RATING,
            SOURCE,
            |source| source.is_text(COLD_SOURCE),
            |_| Some(Cell::text(COLD_RATING)),
        )
        .into()
}

fn collapse_cold_ratings(table: &mut Table) -> StepOutcome {
    table
        .update_column(LEAD_RATING, |cell| {
            cell.as_str()
                .is_some_and(|rating| VERY_COLD_SPELLINGS.contains(&rating))
                .then(|| Cell::text(COLD_RATING_TEXT))
        })
        .into()
}

fn rate_hot_sources(table: &mut Table) -> StepOutcome {
    table
        .update_column_where(
            LEAD_RATING,
            SOURCE,
            |source| source.to_text().is_some_and(|text| has_hot_keyword(&text)),
            |_| Some(Cell::text(HOT_RATING)),
        )
        .into()
}

fn default_warm_rating(table: &mut Table) -> StepOutcome {
    fill_blank(table, LEAD_RATING, WARM_RATING).into()
}

fn annotate_reassigned_leads(table: &mut Table) -> StepOutcome {
    if !table.has_column(PROSPECT_LEAD_REASSIGNMENT) {
        return StepOutcome::Skipped;
    }
    table.ensure_column(NOTES, &Cell::text(""));
    table
        .update_column_where(
            NOTES,
            PROSPECT_LEAD_REASSIGNMENT,
            is_reassigned,
            |notes| Some(Cell::text(append_reassigned_note(notes))),
        )
        .into()
}

/// Replace `Null` cells of `column` with `value`.
fn fill_blank(table: &mut Table, column: &str, value: &str) -> Option<usize> {
    table.update_column(column, |cell| cell.is_null().then(|| Cell::text(value)))
}

/// Remove parentheses, whitespace and dashes from a phone number.
///
/// ```
/// use lead_normalize::rules::strip_phone_punctuation;
///
/// assert_eq!(strip_phone_punctuation("(514) 555-1234"), "5145551234");
/// assert_eq!(strip_phone_punctuation("+1 514.555.1234"), "+1514.555.1234");
/// ```
pub fn strip_phone_punctuation(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, '(' | ')' | '-') && !ch.is_whitespace())
        .collect()
}

/// Returns true if `source` mentions any hot keyword, ignoring case.
pub fn has_hot_keyword(source: &str) -> bool {
    let upper = source.to_uppercase();
    HOT_SOURCE_KEYWORDS
        .iter()
        .any(|keyword| upper.contains(keyword))
}

fn is_reassigned(flag: &Cell) -> bool {
    flag.to_text()
        .is_some_and(|text| text.to_uppercase().trim() == REASSIGNED_FLAG)
}

/// Add the reassignment marker to existing notes without duplicating it.
///
/// ```
/// use lead_model::Cell;
/// use lead_normalize::rules::append_reassigned_note;
///
/// assert_eq!(append_reassigned_note(&Cell::Null), "Reassigned Lead");
/// assert_eq!(append_reassigned_note(&Cell::text("Called twice")), "Called twice; Reassigned Lead");
/// ```
pub fn append_reassigned_note(notes: &Cell) -> String {
    let current = notes.to_text().unwrap_or_default();
    if current.trim().is_empty() {
        REASSIGNED_NOTE.to_string()
    } else if current.contains(REASSIGNED_NOTE) {
        current.into_owned()
    } else {
        format!("{current}; {REASSIGNED_NOTE}")
    }
}
