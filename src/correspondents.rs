//! Country to correspondent catalog
//!
//! Lists, per country, the mobile-money operators ("correspondents") pawaPay
//! routes to and whether each operation type is currently available. The
//! catalog is read-only reference data; the operation wrappers never consult
//! it, the remote API is the authority on correspondents.

use crate::country::calling_code_for;
use crate::error::{PawaPayError, PawaPayResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const CATALOG_FILE: &str = "momo.json";

#[cfg(feature = "bundled-catalog")]
const BUNDLED_CATALOG: &str = include_str!("../data/momo.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationType {
    /// DEPOSIT, PAYOUT or REFUND
    pub operation_type: String,
    /// OPERATIONAL, DELAYED or CLOSED
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correspondent {
    pub correspondent: String,
    pub operation_types: Vec<OperationType>,
}

impl Correspondent {
    pub fn is_operational(&self, operation_type: &str) -> bool {
        self.operation_types.iter().any(|op| {
            op.operation_type.eq_ignore_ascii_case(operation_type)
                && op.status.eq_ignore_ascii_case("operational")
        })
    }
}

/// Correspondents available in one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomoMapping {
    /// Alpha-3 country code
    pub country: String,
    /// Calling code, without `+`
    pub extension: String,
    pub correspondents: Vec<Correspondent>,
}

#[derive(Debug, Clone, Default)]
pub struct CorrespondentCatalog {
    mappings: Vec<MomoMapping>,
}

impl CorrespondentCatalog {
    pub fn from_json(raw: &str) -> PawaPayResult<Self> {
        let mappings: Vec<MomoMapping> = serde_json::from_str(raw)
            .map_err(|e| PawaPayError::config(format!("Invalid correspondent catalog: {}", e)))?;
        Ok(Self { mappings })
    }

    /// The catalog shipped with this crate
    #[cfg(feature = "bundled-catalog")]
    pub fn bundled() -> PawaPayResult<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Read `momo.json` from `dir`
    pub fn load(dir: impl AsRef<Path>) -> PawaPayResult<Self> {
        let path = dir.as_ref().join(CATALOG_FILE);
        debug!("Loading correspondent catalog from {}", path.display());

        let raw = std::fs::read_to_string(&path).map_err(|e| {
            PawaPayError::config(format!(
                "Unable to read correspondent catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        let catalog = Self::from_json(&raw)?;
        info!(
            "Correspondent catalog loaded: {} countries from {}",
            catalog.mappings.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load from the directory in `PAWAPAY_CATALOG_PATH`, or fall back to the
    /// bundled catalog when the variable is unset.
    pub fn from_env() -> PawaPayResult<Self> {
        match std::env::var("PAWAPAY_CATALOG_PATH") {
            Ok(dir) if !dir.trim().is_empty() => Self::load(dir),
            _ => Self::fallback(),
        }
    }

    #[cfg(feature = "bundled-catalog")]
    fn fallback() -> PawaPayResult<Self> {
        Self::bundled()
    }

    #[cfg(not(feature = "bundled-catalog"))]
    fn fallback() -> PawaPayResult<Self> {
        Err(PawaPayError::config(
            "PAWAPAY_CATALOG_PATH must be set when the bundled catalog is disabled",
        ))
    }

    pub fn all(&self) -> &[MomoMapping] {
        &self.mappings
    }

    /// Mapping for the country a calling code belongs to
    pub fn mapping_for(&self, calling_code: &str) -> PawaPayResult<&MomoMapping> {
        let code = calling_code.trim();
        let code = code.strip_prefix('+').unwrap_or(code);

        self.mappings
            .iter()
            .find(|mapping| mapping.extension == code)
            .ok_or_else(|| PawaPayError::unknown_calling_code(calling_code))
    }

    /// Mapping for an alpha-3 country code
    pub fn mapping_for_country(&self, alpha3: &str) -> PawaPayResult<&MomoMapping> {
        let calling_code =
            calling_code_for(alpha3).ok_or_else(|| PawaPayError::unknown_calling_code(alpha3))?;
        self.mapping_for(calling_code)
    }

    pub fn find(&self, correspondent: &str) -> Option<&Correspondent> {
        self.mappings
            .iter()
            .flat_map(|mapping| mapping.correspondents.iter())
            .find(|c| c.correspondent.eq_ignore_ascii_case(correspondent))
    }

    /// Whether `correspondent` currently accepts `operation_type`
    pub fn supports(&self, correspondent: &str, operation_type: &str) -> bool {
        self.find(correspondent)
            .map(|c| c.is_operational(operation_type))
            .unwrap_or(false)
    }
}
