//! Display band choice
//!
//! Band 8 being near-infrared is a Sentinel-2 ordering convention, not something
//! the file guarantees. A band whose metadata names it as NIR always wins; the
//! positional rule only applies when no band says what it is.

use crate::io::configuration::{FALLBACK_BAND_INDEX, NIR_BAND_INDEX};
use std::fmt;

/// Why a band was picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionReason {
    /// The band's own description identifies it as near-infrared
    Tagged {
        /// Description that matched
        label: String,
    },
    /// The raster has at least eight bands; band 8 is NIR by convention
    Conventional,
    /// Too few bands for the convention; the first band is shown
    Fallback,
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tagged { label } => write!(f, "described as '{label}'"),
            Self::Conventional => write!(f, "band {NIR_BAND_INDEX} is NIR by convention"),
            Self::Fallback => write!(f, "fewer than {NIR_BAND_INDEX} bands, showing first band"),
        }
    }
}

/// The band to render and the reason for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandSelection {
    /// 1-based band number
    pub band: usize,
    /// Why this band was picked
    pub reason: SelectionReason,
}

impl BandSelection {
    /// Figure title for this selection
    pub fn title(&self) -> String {
        match &self.reason {
            SelectionReason::Tagged { label } => format!(
                "Sentinel-2: Band {} ({label}) - Vegetation Anomaly Detection",
                self.band
            ),
            SelectionReason::Conventional => format!(
                "Sentinel-2: Band {} (NIR) - Vegetation Anomaly Detection",
                self.band
            ),
            SelectionReason::Fallback => {
                format!("Sentinel-2: Band {} (only band available)", self.band)
            }
        }
    }
}

/// Whether a band description names a near-infrared band
///
/// Matches whole words, so GDAL's Sentinel-2 form `B8, central wavelength 842 nm`
/// is recognised while `B8A` and `SWIR` are not.
pub fn is_nir_label(label: &str) -> bool {
    let normalized = label.to_ascii_lowercase();
    normalized.contains("near-infrared")
        || normalized.contains("near infrared")
        || normalized
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| matches!(word, "b8" | "b08" | "nir"))
}

/// Pick the band to render
///
/// `descriptions[i]` describes band `i + 1`. Returns `None` for an empty raster.
pub fn choose_display_band(
    band_count: usize,
    descriptions: &[Option<String>],
) -> Option<BandSelection> {
    if band_count == 0 {
        return None;
    }

    let tagged = descriptions
        .iter()
        .take(band_count)
        .enumerate()
        .find_map(|(i, description)| {
            description
                .as_deref()
                .filter(|label| is_nir_label(label))
                .map(|label| BandSelection {
                    band: i + 1,
                    reason: SelectionReason::Tagged {
                        label: label.trim().to_string(),
                    },
                })
        });
    if tagged.is_some() {
        return tagged;
    }

    Some(if band_count >= NIR_BAND_INDEX {
        BandSelection {
            band: NIR_BAND_INDEX,
            reason: SelectionReason::Conventional,
        }
    } else {
        BandSelection {
            band: FALLBACK_BAND_INDEX,
            reason: SelectionReason::Fallback,
        }
    })
}
