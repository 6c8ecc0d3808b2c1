//! Conductor Sizes and NEC Chapter 9 Table 9
//!
//! AC resistance and inductive reactance for 600 V, 60 Hz, 75 °C conductors,
//! three single conductors in conduit. Each entry carries both table columns:
//! Ω per kilometre and Ω per 1000 feet.
//!
//! ## Key Space
//!
//! - 21 wire sizes, 14 AWG through 1000 kcmil
//! - conductor: copper or aluminum (aluminum starts at 12 AWG)
//! - conduit: PVC, aluminum or steel
//!
//! Reactance depends only on the conduit (PVC and aluminum share a column);
//! resistance depends on conductor and conduit together.

use serde::{Deserialize, Serialize};

use crate::units::UnitSystem;

/// Standard conductor size designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum WireSize {
    #[serde(rename = "14")]
    Awg14,
    #[default]
    #[serde(rename = "12")]
    Awg12,
    #[serde(rename = "10")]
    Awg10,
    #[serde(rename = "8")]
    Awg8,
    #[serde(rename = "6")]
    Awg6,
    #[serde(rename = "4")]
    Awg4,
    #[serde(rename = "3")]
    Awg3,
    #[serde(rename = "2")]
    Awg2,
    #[serde(rename = "1")]
    Awg1,
    #[serde(rename = "1/0")]
    Awg1_0,
    #[serde(rename = "2/0")]
    Awg2_0,
    #[serde(rename = "3/0")]
    Awg3_0,
    #[serde(rename = "4/0")]
    Awg4_0,
    #[serde(rename = "250")]
    Kcmil250,
    #[serde(rename = "300")]
    Kcmil300,
    #[serde(rename = "350")]
    Kcmil350,
    #[serde(rename = "400")]
    Kcmil400,
    #[serde(rename = "500")]
    Kcmil500,
    #[serde(rename = "600")]
    Kcmil600,
    #[serde(rename = "750")]
    Kcmil750,
    #[serde(rename = "1000")]
    Kcmil1000,
}

impl WireSize {
    /// All sizes, smallest conductor first
    pub const ALL: [WireSize; 21] = [
        WireSize::Awg14,
        WireSize::Awg12,
        WireSize::Awg10,
        WireSize::Awg8,
        WireSize::Awg6,
        WireSize::Awg4,
        WireSize::Awg3,
        WireSize::Awg2,
        WireSize::Awg1,
        WireSize::Awg1_0,
        WireSize::Awg2_0,
        WireSize::Awg3_0,
        WireSize::Awg4_0,
        WireSize::Kcmil250,
        WireSize::Kcmil300,
        WireSize::Kcmil350,
        WireSize::Kcmil400,
        WireSize::Kcmil500,
        WireSize::Kcmil600,
        WireSize::Kcmil750,
        WireSize::Kcmil1000,
    ];

    /// Row index into the Table 9 arrays
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// AWG / kcmil designation (e.g., "1/0", "250")
    pub fn designation(&self) -> &'static str {
        match self {
            WireSize::Awg14 => "14",
            WireSize::Awg12 => "12",
            WireSize::Awg10 => "10",
            WireSize::Awg8 => "8",
            WireSize::Awg6 => "6",
            WireSize::Awg4 => "4",
            WireSize::Awg3 => "3",
            WireSize::Awg2 => "2",
            WireSize::Awg1 => "1",
            WireSize::Awg1_0 => "1/0",
            WireSize::Awg2_0 => "2/0",
            WireSize::Awg3_0 => "3/0",
            WireSize::Awg4_0 => "4/0",
            WireSize::Kcmil250 => "250",
            WireSize::Kcmil300 => "300",
            WireSize::Kcmil350 => "350",
            WireSize::Kcmil400 => "400",
            WireSize::Kcmil500 => "500",
            WireSize::Kcmil600 => "600",
            WireSize::Kcmil750 => "750",
            WireSize::Kcmil1000 => "1000",
        }
    }

    /// Nearest metric conductor cross-section in mm²
    pub fn metric_mm2(&self) -> f64 {
        match self {
            WireSize::Awg14 => 2.0,
            WireSize::Awg12 => 3.5,
            WireSize::Awg10 => 5.5,
            WireSize::Awg8 => 8.0,
            WireSize::Awg6 => 14.0,
            WireSize::Awg4 => 22.0,
            WireSize::Awg3 => 26.0,
            WireSize::Awg2 => 30.0,
            WireSize::Awg1 => 38.0,
            WireSize::Awg1_0 => 50.0,
            WireSize::Awg2_0 => 60.0,
            WireSize::Awg3_0 => 80.0,
            WireSize::Awg4_0 => 100.0,
            WireSize::Kcmil250 => 125.0,
            WireSize::Kcmil300 => 150.0,
            WireSize::Kcmil350 => 175.0,
            WireSize::Kcmil400 => 200.0,
            WireSize::Kcmil500 => 250.0,
            WireSize::Kcmil600 => 300.0,
            WireSize::Kcmil750 => 375.0,
            WireSize::Kcmil1000 => 500.0,
        }
    }

    /// Label for the given unit system ("3.5 mm²" or "12 AWG" / "250 kcmil")
    pub fn label(&self, system: UnitSystem) -> String {
        match system {
            UnitSystem::Metric => format!("{} mm²", self.metric_mm2()),
            UnitSystem::Imperial if *self >= WireSize::Kcmil250 => {
                format!("{} kcmil", self.designation())
            }
            UnitSystem::Imperial => format!("{} AWG", self.designation()),
        }
    }
}

impl std::fmt::Display for WireSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label(UnitSystem::Imperial))
    }
}

/// Conductor metal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConductorMaterial {
    #[default]
    Copper,
    Aluminum,
}

impl ConductorMaterial {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
        }
    }

    /// Whether Table 9 lists this conductor in the given size
    pub fn is_available_in(&self, size: WireSize) -> bool {
        !(matches!(self, ConductorMaterial::Aluminum) && size == WireSize::Awg14)
    }
}

impl std::fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Raceway material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConduitMaterial {
    #[default]
    #[serde(rename = "PVC")]
    Pvc,
    Aluminum,
    Steel,
}

impl ConduitMaterial {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConduitMaterial::Pvc => "PVC",
            ConduitMaterial::Aluminum => "Aluminum",
            ConduitMaterial::Steel => "Steel",
        }
    }
}

impl std::fmt::Display for ConduitMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resistance and reactance per 1000 length units of the selected system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceReactance {
    /// AC resistance R (Ω per km or per 1000 ft)
    pub resistance_per_unit_length: f64,
    /// Inductive reactance X_L (Ω per km or per 1000 ft)
    pub reactance_per_unit_length: f64,
}

/// (Ω/km, Ω/1000 ft)
type Column = (f64, f64);

const REACTANCE_PVC_ALUMINUM: [Column; 21] = [
    (0.190, 0.058), (0.177, 0.054), (0.164, 0.050), (0.171, 0.052), (0.167, 0.051),
    (0.157, 0.048), (0.154, 0.047), (0.148, 0.045), (0.151, 0.046), (0.144, 0.044),
    (0.141, 0.043), (0.138, 0.042), (0.135, 0.041), (0.135, 0.041), (0.135, 0.041),
    (0.131, 0.040), (0.131, 0.040), (0.128, 0.039), (0.128, 0.039), (0.125, 0.038),
    (0.121, 0.037),
];

const REACTANCE_STEEL: [Column; 21] = [
    (0.240, 0.073), (0.223, 0.068), (0.207, 0.063), (0.213, 0.065), (0.210, 0.064),
    (0.197, 0.060), (0.194, 0.059), (0.187, 0.057), (0.187, 0.057), (0.180, 0.055),
    (0.177, 0.054), (0.171, 0.052), (0.167, 0.051), (0.171, 0.052), (0.167, 0.051),
    (0.164, 0.050), (0.161, 0.049), (0.157, 0.048), (0.157, 0.048), (0.157, 0.048),
    (0.151, 0.046),
];

const COPPER_PVC: [Column; 21] = [
    (10.2, 3.1), (6.6, 2.0), (3.9, 1.2), (2.56, 0.78), (1.61, 0.49),
    (1.02, 0.31), (0.82, 0.25), (0.62, 0.19), (0.49, 0.15), (0.39, 0.12),
    (0.33, 0.10), (0.253, 0.077), (0.203, 0.062), (0.171, 0.052), (0.144, 0.044),
    (0.125, 0.038), (0.108, 0.033), (0.089, 0.027), (0.075, 0.023), (0.062, 0.019),
    (0.049, 0.015),
];

const COPPER_ALUMINUM: [Column; 21] = [
    (10.2, 3.1), (6.6, 2.0), (3.9, 1.2), (2.56, 0.78), (1.61, 0.49),
    (1.02, 0.31), (0.82, 0.25), (0.66, 0.20), (0.52, 0.16), (0.43, 0.13),
    (0.33, 0.10), (0.269, 0.082), (0.220, 0.067), (0.187, 0.057), (0.161, 0.049),
    (0.141, 0.043), (0.125, 0.038), (0.105, 0.032), (0.092, 0.028), (0.079, 0.024),
    (0.062, 0.019),
];

const COPPER_STEEL: [Column; 21] = [
    (10.2, 3.1), (6.6, 2.0), (3.9, 1.2), (2.56, 0.78), (1.61, 0.49),
    (1.02, 0.31), (0.82, 0.25), (0.66, 0.20), (0.52, 0.16), (0.39, 0.12),
    (0.33, 0.10), (0.259, 0.079), (0.207, 0.063), (0.177, 0.054), (0.148, 0.045),
    (0.128, 0.039), (0.115, 0.035), (0.095, 0.029), (0.082, 0.025), (0.069, 0.021),
    (0.059, 0.018),
];

// Aluminum rows start at 12 AWG (index 1).
const ALUMINUM_PVC: [Column; 20] = [
    (10.5, 3.2), (6.6, 2.0), (4.3, 1.3), (2.66, 0.81),
    (1.67, 0.51), (1.31, 0.40), (1.05, 0.32), (0.82, 0.25), (0.66, 0.20),
    (0.52, 0.16), (0.43, 0.13), (0.33, 0.10), (0.279, 0.085), (0.233, 0.071),
    (0.200, 0.061), (0.177, 0.054), (0.141, 0.043), (0.118, 0.036), (0.095, 0.029),
    (0.075, 0.023),
];

const ALUMINUM_ALUMINUM: [Column; 20] = [
    (10.5, 3.2), (6.6, 2.0), (4.3, 1.3), (2.66, 0.81),
    (1.67, 0.51), (1.35, 0.41), (1.05, 0.32), (0.85, 0.26), (0.69, 0.21),
    (0.52, 0.16), (0.43, 0.13), (0.36, 0.11), (0.295, 0.090), (0.249, 0.076),
    (0.217, 0.066), (0.194, 0.059), (0.157, 0.048), (0.135, 0.041), (0.112, 0.034),
    (0.089, 0.027),
];

const ALUMINUM_STEEL: [Column; 20] = [
    (10.5, 3.2), (6.6, 2.0), (4.3, 1.3), (2.66, 0.81),
    (1.67, 0.51), (1.31, 0.40), (1.05, 0.32), (0.82, 0.25), (0.66, 0.20),
    (0.52, 0.16), (0.43, 0.13), (0.33, 0.10), (0.282, 0.086), (0.236, 0.072),
    (0.207, 0.063), (0.180, 0.055), (0.148, 0.045), (0.125, 0.038), (0.102, 0.031),
    (0.082, 0.025),
];

fn pick(column: Column, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => column.0,
        UnitSystem::Imperial => column.1,
    }
}

/// Resistance column for a conductor/conduit pair, or `None` for 14 AWG aluminum.
fn resistance(conductor: ConductorMaterial, conduit: ConduitMaterial, size: WireSize) -> Option<Column> {
    let i = size.index();
    match conductor {
        ConductorMaterial::Copper => Some(match conduit {
            ConduitMaterial::Pvc => COPPER_PVC[i],
            ConduitMaterial::Aluminum => COPPER_ALUMINUM[i],
            ConduitMaterial::Steel => COPPER_STEEL[i],
        }),
        ConductorMaterial::Aluminum => {
            let row = i.checked_sub(1)?;
            Some(match conduit {
                ConduitMaterial::Pvc => ALUMINUM_PVC[row],
                ConduitMaterial::Aluminum => ALUMINUM_ALUMINUM[row],
                ConduitMaterial::Steel => ALUMINUM_STEEL[row],
            })
        }
    }
}

fn reactance(conduit: ConduitMaterial, size: WireSize) -> Column {
    match conduit {
        ConduitMaterial::Steel => REACTANCE_STEEL[size.index()],
        ConduitMaterial::Pvc | ConduitMaterial::Aluminum => REACTANCE_PVC_ALUMINUM[size.index()],
    }
}

/// Look up R and X for a circuit configuration.
///
/// Returns `None` only for 14 AWG aluminum, which Table 9 does not list.
///
/// # Example
///
/// ```rust
/// use elec_core::tables::conductors::{lookup, ConductorMaterial, ConduitMaterial, WireSize};
/// use elec_core::units::UnitSystem;
///
/// let rx = lookup(ConductorMaterial::Copper, ConduitMaterial::Pvc, WireSize::Awg12, UnitSystem::Metric).unwrap();
/// assert_eq!(rx.resistance_per_unit_length, 6.6);
/// assert_eq!(rx.reactance_per_unit_length, 0.177);
/// ```
pub fn lookup(
    conductor: ConductorMaterial,
    conduit: ConduitMaterial,
    size: WireSize,
    system: UnitSystem,
) -> Option<ResistanceReactance> {
    let r = resistance(conductor, conduit, size)?;
    let x = reactance(conduit, size);
    Some(ResistanceReactance {
        resistance_per_unit_length: pick(r, system),
        reactance_per_unit_length: pick(x, system),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sizes_indexed_in_order() {
        for (i, size) in WireSize::ALL.iter().enumerate() {
            assert_eq!(size.index(), i);
        }
    }

    #[test]
    fn test_copper_lookup_both_systems() {
        let metric = lookup(ConductorMaterial::Copper, ConduitMaterial::Steel, WireSize::Awg3_0, UnitSystem::Metric).unwrap();
        assert_eq!(metric.resistance_per_unit_length, 0.259);
        assert_eq!(metric.reactance_per_unit_length, 0.171);

        let imperial = lookup(ConductorMaterial::Copper, ConduitMaterial::Steel, WireSize::Awg3_0, UnitSystem::Imperial).unwrap();
        assert_eq!(imperial.resistance_per_unit_length, 0.079);
        assert_eq!(imperial.reactance_per_unit_length, 0.052);
    }

    #[test]
    fn test_aluminum_rows_offset() {
        let al12 = lookup(ConductorMaterial::Aluminum, ConduitMaterial::Pvc, WireSize::Awg12, UnitSystem::Metric).unwrap();
        assert_eq!(al12.resistance_per_unit_length, 10.5);

        let al1000 = lookup(ConductorMaterial::Aluminum, ConduitMaterial::Aluminum, WireSize::Kcmil1000, UnitSystem::Imperial).unwrap();
        assert_eq!(al1000.resistance_per_unit_length, 0.027);
        assert_eq!(al1000.reactance_per_unit_length, 0.037);
    }

    #[test]
    fn test_aluminum_14_not_tabulated() {
        for conduit in [ConduitMaterial::Pvc, ConduitMaterial::Aluminum, ConduitMaterial::Steel] {
            assert!(lookup(ConductorMaterial::Aluminum, conduit, WireSize::Awg14, UnitSystem::Metric).is_none());
        }
        assert!(!ConductorMaterial::Aluminum.is_available_in(WireSize::Awg14));
        assert!(ConductorMaterial::Copper.is_available_in(WireSize::Awg14));
    }

    #[test]
    fn test_pvc_and_aluminum_conduit_share_reactance() {
        for size in WireSize::ALL {
            let pvc = lookup(ConductorMaterial::Copper, ConduitMaterial::Pvc, size, UnitSystem::Metric).unwrap();
            let al = lookup(ConductorMaterial::Copper, ConduitMaterial::Aluminum, size, UnitSystem::Metric).unwrap();
            assert_eq!(pvc.reactance_per_unit_length, al.reactance_per_unit_length);
        }
    }

    #[test]
    fn test_every_valid_key_resolves() {
        for size in WireSize::ALL {
            for conductor in [ConductorMaterial::Copper, ConductorMaterial::Aluminum] {
                for conduit in [ConduitMaterial::Pvc, ConduitMaterial::Aluminum, ConduitMaterial::Steel] {
                    for system in UnitSystem::ALL {
                        let found = lookup(conductor, conduit, size, system);
                        assert_eq!(found.is_some(), conductor.is_available_in(size));
                    }
                }
            }
        }
    }

    #[test]
    fn test_labels_and_serde() {
        assert_eq!(WireSize::Awg12.label(UnitSystem::Metric), "3.5 mm²");
        assert_eq!(WireSize::Awg1_0.label(UnitSystem::Imperial), "1/0 AWG");
        assert_eq!(WireSize::Kcmil250.label(UnitSystem::Imperial), "250 kcmil");
        let size: WireSize = serde_json::from_str("\"4/0\"").unwrap();
        assert_eq!(size, WireSize::Awg4_0);
        let conduit: ConduitMaterial = serde_json::from_str("\"PVC\"").unwrap();
        assert_eq!(conduit, ConduitMaterial::Pvc);
    }
}
