//! Parsing of typed console fields.
//!
//! Every parser reports malformed input as
//! [`CoworkingError::InvalidArgument`], so the menu loop prints it like any
//! other rejected request.

use chrono::{NaiveDate, NaiveDateTime};
use coworking_core::{CoworkingError, ResourceKind, ResourceRef, Result};

/// Date format accepted at prompts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Timestamp format accepted at prompts.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A numeric identifier.
///
/// # Errors
///
/// `InvalidArgument` if `raw` is not an integer.
pub fn parse_id(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    raw.parse()
        .map_err(|_| CoworkingError::InvalidArgument(format!("Invalid ID: '{raw}'")))
}

/// An identifier that may be left blank.
///
/// # Errors
///
/// As [`parse_id`].
pub fn parse_optional_id(raw: &str) -> Result<Option<i64>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_id(raw).map(Some)
}

/// A `yyyy-MM-dd` date that may be left blank.
///
/// # Errors
///
/// `InvalidArgument` for any other non-blank text.
pub fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| {
            CoworkingError::InvalidArgument(format!("Invalid date '{raw}', expected yyyy-MM-dd"))
        })
}

/// A `yyyy-MM-ddTHH:mm` timestamp. Seconds are accepted but not required.
///
/// # Errors
///
/// `InvalidArgument` for anything else.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| {
            CoworkingError::InvalidArgument(format!(
                "Invalid time '{raw}', expected yyyy-MM-ddTHH:mm"
            ))
        })
}

/// The resource part of a booking filter: a kind and an id, both optional
/// as long as an id never comes without its kind.
///
/// # Errors
///
/// `InvalidArgument` for an unknown kind, a malformed id, or an id given
/// without a kind.
pub fn parse_resource_filter(kind: &str, id: &str) -> Result<Option<ResourceRef>> {
    let id = parse_optional_id(id)?;
    if kind.trim().is_empty() {
        return match id {
            Some(_) => Err(CoworkingError::invalid_argument(
                "Resource type is required to filter by resource ID",
            )),
            None => Ok(None),
        };
    }

    let kind = ResourceKind::parse(kind)?;
    match id {
        Some(id) => Ok(Some(ResourceRef::from_parts(kind, id))),
        None => Err(CoworkingError::invalid_argument(
            "Resource ID is required to filter by resource type",
        )),
    }
}
