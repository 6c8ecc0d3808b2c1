//! End-to-end checks of the engines through the public API, using hand-worked
//! NEC examples.

use elec_core::breaker::{suggest_breaker, suggest_breaker_continuous, BreakerRating};
use elec_core::calculations::range::{self, RangeInput, RangeMethod, RangePolicy};
use elec_core::calculations::residential::{self, CalculationMethod, GeneralLoad, ResidentialInput};
use elec_core::calculations::voltage_drop::{self, CircuitSpec, VoltageDropInput};
use elec_core::calculations::CalculationItem;
use elec_core::loads::{ApplianceKind, ApplianceRow, LoadItem};
use elec_core::tables::conductors::{ConductorMaterial, ConduitMaterial, WireSize};
use elec_core::tables::range_columns::column_c_base_kw;
use elec_core::units::{AreaUnit, UnitSystem};
use elec_core::{CalcError, Project};

fn range_input(rows: Vec<ApplianceRow>, voltage: f64) -> RangeInput {
    RangeInput {
        label: String::new(),
        appliances: rows,
        voltage,
        policy: RangePolicy::default(),
    }
}

fn dwelling(floor_area: f64, va_per_area: Option<f64>) -> ResidentialInput {
    ResidentialInput {
        label: "House".to_string(),
        general: GeneralLoad {
            floor_area,
            area_unit: AreaUnit::SquareMeters,
            va_per_area,
            small_appliance_circuits: 2,
            laundry_circuits: 1,
        },
        other_loads: vec![],
        heating_loads: vec![],
        cooling_loads: vec![],
        motor_loads: vec![],
        ev_loads: vec![],
        method: CalculationMethod::Standard,
        demand_table: None,
        voltage: 240.0,
        optional_motor_handling: Default::default(),
    }
}

fn branch_circuit(wire_size: WireSize, length: f64, load_va: f64, voltage: f64) -> CircuitSpec {
    CircuitSpec {
        label: "Branch".to_string(),
        wire_size,
        conductor: ConductorMaterial::Copper,
        conduit: ConduitMaterial::Pvc,
        length,
        load_va,
        voltage,
        power_factor: 0.85,
    }
}

#[test]
fn four_identical_14kw_ranges_note1() {
    let result = range::calculate(&range_input(vec![ApplianceRow::new(ApplianceKind::Range, 14.0, 4)], 240.0)).unwrap();
    assert!((result.demand_kw() - 18.7).abs() < 1e-9);

    let detail = result.range_detail().unwrap();
    assert_eq!(detail.method, RangeMethod::SplitNote3ColumnC);
    assert!(detail.small.is_none());
    let column_c = detail.column_c.as_ref().unwrap();
    assert_eq!(column_c.base_kw, 17.0);
    assert_eq!(column_c.adjustment.increments(), 2);
}

#[test]
fn single_cooktop_note5() {
    let result = range::calculate(&range_input(vec![ApplianceRow::new(ApplianceKind::Cooktop, 6.5, 1)], 230.0)).unwrap();
    assert_eq!(result.demand_va, 6500.0);
    assert_eq!(result.display_amps(), 28.26);
    assert_eq!(result.range_detail().unwrap().method, RangeMethod::Note5Nameplate);
}

#[test]
fn column_c_band_boundary() {
    assert_eq!(column_c_base_kw(25), 40.0);
    assert_eq!(column_c_base_kw(26), 41.0);
}

#[test]
fn residential_standard_general_only() {
    // 100 m² x 33 VA + 3000 + 1500 = 7800 VA; 3000 + 35% of 4800
    let result = residential::calculate(&dwelling(100.0, None)).unwrap();
    assert_eq!(result.subtotals.general_va, 7800.0);
    assert!((result.demand_va - 4680.0).abs() < 1e-9);

    // 38 VA/m² brings the general group to 8300 VA; 3000 + 35% of 5300
    let result = residential::calculate(&dwelling(100.0, Some(38.0))).unwrap();
    assert_eq!(result.subtotals.general_va, 8300.0);
    assert!((result.demand_va - 4855.0).abs() < 1e-9);
}

#[test]
fn residential_breaker_uses_continuous_derate() {
    let mut input = dwelling(100.0, None);
    input.other_loads.push(LoadItem::new("Water heater", 4500.0, 1));
    let result = residential::calculate(&input).unwrap();
    assert_eq!(result.breaker, suggest_breaker_continuous(result.amps));
    assert!(result.breaker >= suggest_breaker(result.amps));
}

#[test]
fn repeated_calculation_is_identical() {
    let items = vec![
        CalculationItem::Range(range_input(
            vec![
                ApplianceRow::new(ApplianceKind::Cooktop, 6.0, 1),
                ApplianceRow::new(ApplianceKind::WallOven, 4.0, 2),
                ApplianceRow::new(ApplianceKind::Range, 14.0, 3),
            ],
            240.0,
        )),
        CalculationItem::Residential(dwelling(180.0, None)),
        CalculationItem::VoltageDrop(VoltageDropInput {
            label: "Feeders".to_string(),
            unit_system: UnitSystem::Imperial,
            circuits: vec![branch_circuit(WireSize::Awg12, 100.0, 1800.0, 120.0)],
        }),
    ];
    for item in &items {
        assert_eq!(item.calculate(), item.calculate(), "{}", item.label());
    }
}

#[test]
fn length_unit_round_trip() {
    for length in [1.0, 15.24, 100.0, 328.084, 12345.678] {
        let feet = UnitSystem::Metric.convert_length(length, UnitSystem::Imperial);
        let back = UnitSystem::Imperial.convert_length(feet, UnitSystem::Metric);
        assert!(((back - length) / length).abs() <= 1e-6, "{} m -> {} m", length, back);

        let metres = UnitSystem::Imperial.convert_length(length, UnitSystem::Metric);
        let back = UnitSystem::Metric.convert_length(metres, UnitSystem::Imperial);
        assert!(((back - length) / length).abs() <= 1e-6, "{} ft -> {} ft", length, back);
    }
    assert_eq!(
        UnitSystem::Imperial.convert_length(UnitSystem::Metric.convert_length(0.0, UnitSystem::Imperial), UnitSystem::Metric),
        0.0
    );

    // Switching a whole input back and forth keeps the lengths
    let input = VoltageDropInput {
        label: String::new(),
        unit_system: UnitSystem::Metric,
        circuits: vec![branch_circuit(WireSize::Awg10, 37.3, 2400.0, 240.0)],
    };
    let back = input.with_unit_system(UnitSystem::Imperial).with_unit_system(UnitSystem::Metric);
    assert_eq!(back.unit_system, UnitSystem::Metric);
    assert!(((back.circuits[0].length - 37.3) / 37.3).abs() <= 1e-6);
}

#[test]
fn breaker_is_monotonic_in_current() {
    let mut previous = suggest_breaker(0.0);
    let mut amps = 0.0;
    while amps <= 7000.0 {
        let rating = suggest_breaker(amps);
        assert!(rating >= previous, "{} A gave {} after {}", amps, rating, previous);
        if let Some(rated) = rating.amps() {
            assert!(f64::from(rated) >= amps);
        }
        previous = rating;
        amps += 2.5;
    }
    assert_eq!(previous, BreakerRating::ExceedsTable);
}

#[test]
fn appliance_rating_ceiling() {
    let at_limit = range::calculate(&range_input(vec![ApplianceRow::new(ApplianceKind::Range, 27.0, 1)], 240.0));
    assert!(at_limit.is_ok());

    let over = range::calculate(&range_input(vec![ApplianceRow::new(ApplianceKind::Range, 27.01, 1)], 240.0))
        .unwrap_err();
    assert!(over.is_validation());
    match over {
        CalcError::InvalidInput { field, .. } => assert_eq!(field, "appliances[0].kw"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn demand_is_non_negative_and_amps_follow_voltage() {
    let sets = [
        vec![ApplianceRow::new(ApplianceKind::Range, 8.0, 1)],
        vec![ApplianceRow::new(ApplianceKind::Range, 3.0, 5)],
        vec![
            ApplianceRow::new(ApplianceKind::Range, 1.5, 2),
            ApplianceRow::new(ApplianceKind::Range, 5.0, 3),
            ApplianceRow::new(ApplianceKind::Range, 16.0, 2),
        ],
        vec![ApplianceRow::new(ApplianceKind::Range, 12.0, 30)],
    ];
    for rows in sets {
        for voltage in [120.0, 208.0, 240.0] {
            let result = range::calculate(&range_input(rows.clone(), voltage)).unwrap();
            assert!(result.demand_va >= 0.0);
            assert!((result.amps - result.demand_va / voltage).abs() < 1e-9);
        }
    }

    for area in [0.0, 50.0, 400.0] {
        let result = residential::calculate(&dwelling(area, None)).unwrap();
        assert!(result.demand_va >= 0.0);
        assert!((result.amps - result.demand_va / 240.0).abs() < 1e-9);
    }
}

#[test]
fn voltage_drop_12awg_copper_branch() {
    // R 2.0, X 0.054 ohm/kft; Ze = 2.0 x 0.85 + 0.054 x sin(acos 0.85)
    let input = VoltageDropInput {
        label: String::new(),
        unit_system: UnitSystem::Imperial,
        circuits: vec![branch_circuit(WireSize::Awg12, 100.0, 1800.0, 120.0)],
    };
    let result = voltage_drop::calculate(&input).unwrap();
    let circuit = &result.circuits[0];

    let ze = 2.0 * 0.85 + 0.054 * (1.0 - 0.85f64 * 0.85).sqrt();
    assert!((circuit.effective_impedance - ze).abs() < 1e-12);
    assert!((circuit.current - 15.0).abs() < 1e-12);
    assert!((circuit.voltage_drop - 2.0 * ze / 1000.0 * 15.0 * 100.0).abs() < 1e-9);
    assert!(circuit.exceeds_recommended());
}

#[test]
fn project_round_trip_keeps_results() {
    let mut project = Project::new("Designer", "25-100", "Client");
    project.add_item(CalculationItem::Residential(dwelling(100.0, None)));
    project.add_item(CalculationItem::Range(range_input(
        vec![ApplianceRow::new(ApplianceKind::Range, 14.0, 4)],
        240.0,
    )));

    let json = serde_json::to_string(&project).unwrap();
    let restored: Project = serde_json::from_str(&json).unwrap();
    assert_eq!(project.calculate_all(), restored.calculate_all());
}
