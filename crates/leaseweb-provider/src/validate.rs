// ── Field validators ──
//
// Pure single-field checks. Each returns the failure detail on error; the
// schema layer attaches the attribute path and turns it into a diagnostic.

use leaseweb_api::types::CredentialType;
use strum::VariantNames;

pub const FREQUENCIES: &[&str] = &["DAILY", "WEEKLY", "MONTHLY"];
pub const DATATRAFFIC_UNITS: &[&str] = &["MB", "GB", "TB"];
pub const BANDWIDTH_UNITS: &[&str] = &["Mbps", "Gbps"];
pub const RAID_TYPES: &[&str] = &["HW", "SW", "NONE"];
pub const RAID_LEVELS: &[i64] = &[0, 1, 5, 10];

/// Every credential type the remote accepts.
pub fn credential_types() -> &'static [&'static str] {
    CredentialType::VARIANTS
}

fn quoted_list<T: std::fmt::Display>(allowed: &[T]) -> String {
    allowed
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Value must be one of `allowed` (case-sensitive).
pub fn one_of(value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(format!(
        "value must be one of: [{}], got: \"{value}\"",
        quoted_list(allowed)
    ))
}

pub fn one_of_int(value: i64, allowed: &[i64]) -> Result<(), String> {
    if allowed.contains(&value) {
        return Ok(());
    }
    let list = allowed
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(format!("value must be one of: [{list}], got: {value}"))
}

/// A string-encoded number that must be strictly positive.
///
/// Integers are tried first, then floats.
pub fn greater_than_zero(value: &str) -> Result<(), String> {
    let positive = if let Ok(i) = value.parse::<i64>() {
        i > 0
    } else if let Ok(f) = value.parse::<f64>() {
        if f.is_nan() {
            return Err(format!("\"{value}\" is not a valid number"));
        }
        f > 0.0
    } else {
        return Err(format!("\"{value}\" is not a valid number"));
    };

    if positive {
        Ok(())
    } else {
        Err(format!("value must be greater than 0, got: {value}"))
    }
}

/// Length in bytes, not characters.
pub fn max_length(value: &str, max: usize) -> Result<(), String> {
    if value.len() <= max {
        return Ok(());
    }
    Err(format!(
        "string length must be at most {max}, got: {}",
        value.len()
    ))
}

/// Reject changing a value once the resource exists.
///
/// `configured` is `None` when the configuration leaves the value null or
/// unknown; that never fails. Neither does a resource whose id is not
/// known yet.
pub fn immutable_on_update(
    prior_id_known: bool,
    prior: &str,
    configured: Option<&str>,
) -> Result<(), String> {
    match configured {
        Some(value) if prior_id_known && value != prior => Err(format!(
            "value cannot be changed after creation (was \"{prior}\", configured \"{value}\")"
        )),
        _ => Ok(()),
    }
}
