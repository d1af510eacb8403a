//! Record types flowing through the pipeline.

use serde::{Deserialize, Serialize};

/// A stadium row as extracted from the source table, before coercion.
///
/// `capacity` is kept as cleaned digits-only text; the transform stage owns
/// the integer coercion so a bad value fails that step, not extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStadiumRow {
    /// 1-based position in the source table.
    pub rank: u32,
    /// Stadium name.
    pub stadium: String,
    /// Capacity text with thousands separators stripped.
    pub capacity: String,
    /// Continental region.
    pub region: String,
    /// Country.
    pub country: String,
    /// City.
    pub city: String,
    /// Image URL, or `None` when the source row deliberately has no image.
    pub image: Option<String>,
    /// Home team.
    pub home_team: String,
}

/// A fully transformed stadium record, ready for CSV serialization.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StadiumRecord {
    /// 1-based position in the source table.
    pub rank: u32,
    /// Stadium name.
    pub stadium: String,
    /// Seating capacity.
    pub capacity: u64,
    /// Continental region.
    pub region: String,
    /// Country.
    pub country: String,
    /// City.
    pub city: String,
    /// Image URL, never empty: the placeholder is substituted when absent.
    pub image: String,
    /// Home team.
    pub home_team: String,
    /// Derived composite location, `"<country>, <city>"`.
    pub location: String,
}
