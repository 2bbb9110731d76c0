//! Column names recognized by the normalization rules.
//!
//! Every rule is gated on the presence of the columns it reads or writes;
//! a table missing any of these is still valid input.

/// Marker in exported headers that is cleaned down to [`COUNTRY`].
pub const COUNTRY_REGION_MARKER: &str = "Country/Region";

pub const COUNTRY: &str = "Country";
pub const STATE: &str = "State";
pub const LEAD_SOURCE: &str = "Lead Source";
pub const CONTACT_PHONE: &str = "ContactPhone";
pub const EMAIL_ADDRESS: &str = "EmailAddress";
pub const COMPANY_NAME: &str = "CompanyName";
pub const SOURCE: &str = "Source";
pub const LEAD_RATING: &str = "Lead Rating";
pub const PROSPECT_LEAD_REASSIGNMENT: &str = "Prospect Lead Reassignment";
pub const NOTES: &str = "Notes";
