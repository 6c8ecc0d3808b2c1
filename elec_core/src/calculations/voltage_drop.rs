//! # Voltage Drop
//!
//! Per-circuit voltage drop from NEC Chapter 9 Table 9 impedances.
//!
//! ## Formulas
//!
//! ```text
//! θ  = acos(pf)
//! Ze = R·pf + X·sin θ                  (Ω per 1000 length units)
//! I  = load_va / voltage
//! VD = 2 · (Ze / 1000) · I · length    (out and back)
//! %VD = VD / voltage · 100
//! ```
//!
//! Lengths are in the unit of the input's [`UnitSystem`], which also selects
//! the Ω/km or Ω/1000 ft table column. Circuits are independent of each other.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::numeric::round2;
use crate::tables::conductors::{self, ConductorMaterial, ConduitMaterial, ResistanceReactance, WireSize};
use crate::trace::{Rule, RuleTrace};
use crate::units::{UnitSystem, VoltAmperes, Volts};

/// Table impedances are per this many length units.
pub const TABLE_BASE_LENGTH: f64 = 1000.0;
/// Branch circuit drop above which a circuit is flagged (percent).
pub const RECOMMENDED_MAX_PERCENT_DROP: f64 = 3.0;

fn default_power_factor() -> f64 {
    0.85
}

/// One branch circuit or feeder.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Kitchen",
///   "wire_size": "12",
///   "conductor": "Copper",
///   "conduit": "PVC",
///   "length": 20.0,
///   "load_va": 2400.0,
///   "voltage": 240.0,
///   "power_factor": 0.9
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircuitSpec {
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub wire_size: WireSize,

    #[serde(default)]
    pub conductor: ConductorMaterial,

    #[serde(default)]
    pub conduit: ConduitMaterial,

    /// One-way length in metres or feet
    pub length: f64,

    /// Load (VA)
    pub load_va: f64,

    pub voltage: f64,

    /// Power factor in (0, 1]
    #[serde(default = "default_power_factor")]
    pub power_factor: f64,
}

impl CircuitSpec {
    /// Validate one circuit. `field` is the path prefix used in errors.
    pub fn validate(&self, field: &str) -> CalcResult<()> {
        if !self.conductor.is_available_in(self.wire_size) {
            return Err(CalcError::unsupported_conductor(
                self.wire_size.label(UnitSystem::Imperial),
                self.conductor.display_name(),
            ));
        }
        require_non_negative(&format!("{}.length", field), self.length)?;
        require_non_negative(&format!("{}.load_va", field), self.load_va)?;
        require_positive(&format!("{}.voltage", field), self.voltage)?;
        let pf = require_positive(&format!("{}.power_factor", field), self.power_factor)?;
        if pf > 1.0 {
            return Err(CalcError::invalid_input(
                format!("{}.power_factor", field),
                pf.to_string(),
                "Power factor must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Input parameters for a voltage drop calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoltageDropInput {
    #[serde(default)]
    pub label: String,

    /// System the circuit lengths are expressed in
    #[serde(default)]
    pub unit_system: UnitSystem,

    pub circuits: Vec<CircuitSpec>,
}

impl VoltageDropInput {
    pub fn validate(&self) -> CalcResult<()> {
        for (i, circuit) in self.circuits.iter().enumerate() {
            circuit.validate(&format!("circuits[{}]", i))?;
        }
        Ok(())
    }

    /// Copy of this input with lengths converted to `target`.
    ///
    /// Lengths are scaled without rounding, so switching back and forth
    /// returns the original values within floating-point tolerance.
    pub fn with_unit_system(&self, target: UnitSystem) -> Self {
        let mut converted = self.clone();
        for circuit in &mut converted.circuits {
            circuit.length = self.unit_system.convert_length(circuit.length, target);
        }
        converted.unit_system = target;
        converted
    }
}

/// Result for a single circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitResult {
    pub label: String,
    /// R from Table 9 (Ω per 1000 units)
    pub resistance: f64,
    /// X from Table 9 (Ω per 1000 units)
    pub reactance: f64,
    /// Ze = R·pf + X·sin θ (Ω per 1000 units)
    pub effective_impedance: f64,
    /// I = load_va / voltage (A)
    pub current: f64,
    /// VD (V)
    pub voltage_drop: f64,
    /// VD / voltage × 100
    pub percent_drop: f64,
}

impl CircuitResult {
    pub fn display_voltage_drop(&self) -> f64 {
        round2(self.voltage_drop)
    }

    pub fn display_percent_drop(&self) -> f64 {
        round2(self.percent_drop)
    }

    /// %VD above the 3% branch circuit recommendation
    pub fn exceeds_recommended(&self) -> bool {
        self.percent_drop > RECOMMENDED_MAX_PERCENT_DROP
    }
}

/// Results from a voltage drop calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropResult {
    pub unit_system: UnitSystem,
    /// One entry per input circuit, same order
    pub circuits: Vec<CircuitResult>,
    /// Largest %VD in the batch (0 when empty)
    pub max_percent_drop: f64,
    pub trace: RuleTrace,
}

/// Ze for a power factor, R·pf + X·sin(acos pf).
pub fn effective_impedance(rx: ResistanceReactance, power_factor: f64) -> f64 {
    let pf = power_factor.clamp(-1.0, 1.0);
    let theta = pf.acos();
    rx.resistance_per_unit_length * pf + rx.reactance_per_unit_length * theta.sin()
}

/// Voltage drop for one circuit, assuming it has been validated.
pub fn calculate_circuit(circuit: &CircuitSpec, system: UnitSystem) -> CalcResult<CircuitResult> {
    let rx = conductors::lookup(circuit.conductor, circuit.conduit, circuit.wire_size, system).ok_or_else(|| {
        CalcError::table_lookup(
            "NEC Chapter 9 Table 9",
            format!("{}/{}/{}", circuit.wire_size, circuit.conductor, circuit.conduit),
        )
    })?;
    let ze = effective_impedance(rx, circuit.power_factor);
    let current = VoltAmperes(circuit.load_va).current_at(Volts(circuit.voltage)).value();
    let voltage_drop = 2.0 * (ze / TABLE_BASE_LENGTH) * current * circuit.length;
    let percent_drop = voltage_drop / circuit.voltage * 100.0;
    trace!(label = %circuit.label, ze, current, voltage_drop, "circuit");

    Ok(CircuitResult {
        label: circuit.label.clone(),
        resistance: rx.resistance_per_unit_length,
        reactance: rx.reactance_per_unit_length,
        effective_impedance: ze,
        current,
        voltage_drop,
        percent_drop,
    })
}

/// Calculate voltage drop for every circuit.
///
/// # Errors
///
/// * `UnsupportedConductor` for 14 AWG aluminum
/// * `InvalidInput` for negative length or load, non-positive voltage, or a
///   power factor outside (0, 1]
pub fn calculate(input: &VoltageDropInput) -> CalcResult<VoltageDropResult> {
    input.validate()?;
    let system = input.unit_system;
    let mut rules = RuleTrace::new();

    let circuits = input
        .circuits
        .iter()
        .map(|circuit| {
            let result = calculate_circuit(circuit, system)?;
            rules.record(
                Rule::Table9Impedance,
                format!(
                    "{}: {} {} in {}, R {} X {} {} -> Ze {:.4}",
                    circuit.label,
                    circuit.wire_size.label(system),
                    circuit.conductor,
                    circuit.conduit,
                    result.resistance,
                    result.reactance,
                    system.impedance_symbol(),
                    result.effective_impedance
                ),
            );
            Ok(result)
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let max_percent_drop = circuits.iter().map(|c| c.percent_drop).fold(0.0, f64::max);
    debug!(count = circuits.len(), max_percent_drop, %system, "voltage drop");

    Ok(VoltageDropResult {
        unit_system: system,
        circuits,
        max_percent_drop,
        trace: rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitchen() -> CircuitSpec {
        CircuitSpec {
            label: "Kitchen".to_string(),
            wire_size: WireSize::Awg12,
            conductor: ConductorMaterial::Copper,
            conduit: ConduitMaterial::Pvc,
            length: 20.0,
            load_va: 2400.0,
            voltage: 240.0,
            power_factor: 0.9,
        }
    }

    fn input(circuits: Vec<CircuitSpec>) -> VoltageDropInput {
        VoltageDropInput {
            label: "Panel A".to_string(),
            unit_system: UnitSystem::Metric,
            circuits,
        }
    }

    #[test]
    fn test_single_circuit_metric() {
        let result = calculate(&input(vec![kitchen()])).unwrap();
        let c = &result.circuits[0];
        assert_eq!(c.resistance, 6.6);
        assert_eq!(c.reactance, 0.177);
        let expected_ze = 6.6 * 0.9 + 0.177 * (1.0f64 - 0.81).sqrt();
        assert!((c.effective_impedance - expected_ze).abs() < 1e-12);
        assert!((c.current - 10.0).abs() < 1e-12);
        let expected_vd = 2.0 * expected_ze / 1000.0 * 10.0 * 20.0;
        assert!((c.voltage_drop - expected_vd).abs() < 1e-12);
        assert!((c.percent_drop - expected_vd / 240.0 * 100.0).abs() < 1e-12);
        assert_eq!(c.display_voltage_drop(), 2.41);
        assert!(!c.exceeds_recommended());
    }

    #[test]
    fn test_unity_power_factor_uses_resistance_only() {
        let mut circuit = kitchen();
        circuit.power_factor = 1.0;
        let result = calculate(&input(vec![circuit])).unwrap();
        assert!((result.circuits[0].effective_impedance - 6.6).abs() < 1e-12);
    }

    #[test]
    fn test_imperial_column() {
        let mut vd = input(vec![kitchen()]).with_unit_system(UnitSystem::Imperial);
        vd.circuits[0].length = 100.0;
        let result = calculate(&vd).unwrap();
        assert_eq!(result.unit_system, UnitSystem::Imperial);
        assert_eq!(result.circuits[0].resistance, 2.0);
        assert_eq!(result.circuits[0].reactance, 0.054);
    }

    #[test]
    fn test_unit_round_trip() {
        let original = input(vec![kitchen(), CircuitSpec { length: 37.3, ..kitchen() }]);
        let mut switched = original.clone();
        for _ in 0..10 {
            switched = switched
                .with_unit_system(UnitSystem::Imperial)
                .with_unit_system(UnitSystem::Metric);
        }
        for (a, b) in original.circuits.iter().zip(&switched.circuits) {
            assert!(((a.length - b.length) / a.length).abs() < 1e-6);
        }
        let feet = original.with_unit_system(UnitSystem::Imperial);
        assert!((feet.circuits[0].length - 65.6168).abs() < 1e-9);
    }

    #[test]
    fn test_same_system_is_identity() {
        let original = input(vec![kitchen()]);
        assert_eq!(original.with_unit_system(UnitSystem::Metric), original);
    }

    #[test]
    fn test_aluminum_14_awg_rejected() {
        let mut circuit = kitchen();
        circuit.wire_size = WireSize::Awg14;
        circuit.conductor = ConductorMaterial::Aluminum;
        let err = calculate(&input(vec![circuit])).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_CONDUCTOR");
        assert!(err.is_validation());
    }

    #[test]
    fn test_power_factor_bounds() {
        for pf in [0.0, -0.5, 1.01, f64::NAN] {
            let mut circuit = kitchen();
            circuit.power_factor = pf;
            assert!(calculate(&input(vec![circuit])).is_err(), "pf {} accepted", pf);
        }
    }

    #[test]
    fn test_error_path_points_at_circuit() {
        let mut bad = kitchen();
        bad.voltage = 0.0;
        match calculate(&input(vec![kitchen(), bad])).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "circuits[1].voltage"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_max_percent_drop() {
        let long_run = CircuitSpec {
            label: "Shed".to_string(),
            length: 60.0,
            ..kitchen()
        };
        let result = calculate(&input(vec![kitchen(), long_run])).unwrap();
        assert_eq!(result.max_percent_drop, result.circuits[1].percent_drop);
        // 3x the kitchen run, just over 3%
        assert!(result.circuits[1].exceeds_recommended());
        assert!(result.trace.fired(Rule::Table9Impedance));

        let empty = calculate(&input(vec![])).unwrap();
        assert_eq!(empty.max_percent_drop, 0.0);
    }

    #[test]
    fn test_defaults_from_json() {
        let parsed: CircuitSpec = serde_json::from_str(r#"{ "length": 10.0, "load_va": 1200.0, "voltage": 120.0 }"#).unwrap();
        assert_eq!(parsed.wire_size, WireSize::Awg12);
        assert_eq!(parsed.conduit, ConduitMaterial::Pvc);
        assert_eq!(parsed.power_factor, 0.85);
    }
}
