//! # Report Projection Data
//!
//! Flattens an input and its result into the shape a report consumes:
//! header metadata, summary lines, `[category, name, VA, qty, total]` rows and
//! the rule annotations. Rendering to a file format is left to the caller;
//! [`LoadReport::to_text`] gives a plain tabular dump.
//!
//! ## Example
//!
//! ```rust
//! use elec_core::calculations::range::{calculate, RangeInput};
//! use elec_core::loads::{ApplianceKind, ApplianceRow};
//! use elec_core::report::LoadReport;
//!
//! let input = RangeInput {
//!     label: "Kitchen".to_string(),
//!     appliances: vec![ApplianceRow::new(ApplianceKind::Range, 12.0, 1)],
//!     voltage: 240.0,
//!     policy: Default::default(),
//! };
//! let result = calculate(&input).unwrap();
//! let report = LoadReport::range(&input, &result).unwrap();
//! assert_eq!(report.rows.len(), 1);
//! assert!(report.to_text().contains("Recommended breaker"));
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::calculations::range::RangeInput;
use crate::calculations::residential::ResidentialInput;
use crate::calculations::voltage_drop::{VoltageDropInput, VoltageDropResult};
use crate::calculations::DemandResult;
use crate::errors::{CalcError, CalcResult};
use crate::loads::{LoadCategory, LoadItem};
use crate::numeric::round2;
use crate::units::{Kilowatts, VoltAmperes};

/// Column headings for [`ReportRow`]s
pub const ROW_HEADINGS: [&str; 5] = ["Category", "Name", "VA", "Qty", "Total (VA)"];

/// A label / value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

impl ReportLine {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        ReportLine {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// One load line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub category: LoadCategory,
    pub name: String,
    /// Per-unit VA
    pub va: f64,
    pub quantity: u32,
    /// Effective VA of the line
    pub total_va: f64,
}

impl ReportRow {
    fn from_item(category: LoadCategory, item: &LoadItem) -> Self {
        ReportRow {
            category,
            name: item.name.clone(),
            va: item.rated_va,
            quantity: item.quantity,
            total_va: item.effective_va(),
        }
    }

    fn single(category: LoadCategory, name: &str, va: f64) -> Self {
        ReportRow {
            category,
            name: name.to_string(),
            va,
            quantity: 1,
            total_va: va,
        }
    }

    /// Cell values in [`ROW_HEADINGS`] order
    pub fn fields(&self) -> [String; 5] {
        [
            self.category.key().to_string(),
            self.name.clone(),
            number(self.va),
            self.quantity.to_string(),
            number(self.total_va),
        ]
    }
}

/// Everything a report needs from one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub title: String,
    /// Settings the calculation ran with
    pub header: Vec<ReportLine>,
    /// Subtotals and results
    pub summary: Vec<ReportLine>,
    pub rows: Vec<ReportRow>,
    /// Formatted rule annotations
    pub annotations: Vec<String>,
}

/// 2-decimal value without trailing zeros ("7800", "28.26")
fn number(value: f64) -> String {
    round2(value).to_string()
}

fn demand_summary(result: &DemandResult, summary: &mut Vec<ReportLine>) {
    summary.push(ReportLine::new("Total Demand Load (VA)", result.demand_va.round()));
    summary.push(ReportLine::new("Current (A)", format!("{:.2}", result.display_amps())));
    summary.push(ReportLine::new("Recommended breaker", &result.breaker_label));
}

impl LoadReport {
    /// Report for a dwelling calculation.
    ///
    /// Fails with `Internal` if `result` did not come from the residential engine.
    pub fn residential(input: &ResidentialInput, result: &DemandResult) -> CalcResult<Self> {
        let detail = result.residential_detail().ok_or_else(|| CalcError::Internal {
            message: "residential report requires a residential result".to_string(),
        })?;
        let totals = &result.subtotals;

        let header = vec![
            ReportLine::new("Method", detail.method),
            ReportLine::new("Voltage", result.voltage),
            ReportLine::new("Unit", detail.area_unit.symbol()),
            ReportLine::new("Floor area", detail.floor_area),
            ReportLine::new("VA per unit", detail.va_per_area),
            ReportLine::new("Demand settings", detail.demand_table.settings()),
        ];

        let mut summary = vec![
            ReportLine::new(
                "General group (lighting + small appliance + laundry)",
                number(totals.general_va),
            ),
            ReportLine::new("Other fixed loads (sum)", number(totals.other_va)),
            ReportLine::new("Heating total", number(totals.heating_va)),
            ReportLine::new("Cooling total", number(totals.cooling_va)),
            ReportLine::new("HVAC used (larger)", number(totals.hvac_va)),
            ReportLine::new("Motor loads (incl. 25% of largest)", number(totals.motor_va)),
            ReportLine::new("EV loads (excluded from demand)", number(totals.ev_va)),
            ReportLine::new("Demand-factored base", number(detail.tiered_va)),
        ];
        demand_summary(result, &mut summary);

        let mut rows = Vec::new();
        for category in LoadCategory::ALL {
            if category == LoadCategory::General {
                rows.extend([
                    ReportRow::single(category, "Floor Area", detail.floor_va),
                    ReportRow::single(category, "Small Appliance Circuits", detail.small_appliance_va),
                    ReportRow::single(category, "Laundry Circuits", detail.laundry_va),
                ]);
            }
            rows.extend(dwelling_group(input, category).iter().map(|item| ReportRow::from_item(category, item)));
        }

        Ok(LoadReport {
            title: title("Residential Load Calculation", &input.label),
            header,
            summary,
            rows,
            annotations: result.annotations(),
        })
    }

    /// Report for a cooking appliance calculation.
    ///
    /// Fails with `Internal` if `result` did not come from the range engine.
    pub fn range(input: &RangeInput, result: &DemandResult) -> CalcResult<Self> {
        let detail = result.range_detail().ok_or_else(|| CalcError::Internal {
            message: "range report requires a range result".to_string(),
        })?;

        let header = vec![
            ReportLine::new("Method", detail.method),
            ReportLine::new("Voltage", result.voltage),
            ReportLine::new("Note 3 for small appliances", input.policy.apply_note3_to_small),
            ReportLine::new("Note 6 combine", input.policy.combine_cooktop_and_ovens),
            ReportLine::new("Alternate Note 2 averaging", input.policy.alternate_note2_averaging),
        ];

        let mut summary = Vec::new();
        if let Some(small) = &detail.small {
            summary.push(ReportLine::new("Columns A/B demand (kW)", number(small.demand_kw)));
        }
        if let Some(c) = &detail.column_c {
            summary.push(ReportLine::new(
                "Column C demand (kW)",
                format!("{} ({} x {} kW x {})", number(c.demand_kw), c.count, c.base_kw, number(c.factor())),
            ));
            summary.push(ReportLine::new("Column C adjustment", c.adjustment.note()));
        }
        summary.push(ReportLine::new("Demand (kW)", number(detail.demand_kw)));
        demand_summary(result, &mut summary);

        let rows = input
            .appliances
            .iter()
            .map(|row| {
                let va = VoltAmperes::from(Kilowatts(row.kw)).value();
                ReportRow {
                    category: LoadCategory::Cooking,
                    name: row.kind.display_name().to_string(),
                    va,
                    quantity: row.qty,
                    total_va: va * f64::from(row.qty),
                }
            })
            .collect();

        Ok(LoadReport {
            title: title("Cooking Appliance Demand (NEC Table 220.55)", &input.label),
            header,
            summary,
            rows,
            annotations: result.annotations(),
        })
    }

    /// Report for a voltage drop batch. Rows carry one line per circuit.
    pub fn voltage_drop(input: &VoltageDropInput, result: &VoltageDropResult) -> Self {
        let system = result.unit_system;
        let header = vec![
            ReportLine::new("Unit system", system),
            ReportLine::new("Length unit", system.length_symbol()),
            ReportLine::new("Impedance unit", system.impedance_symbol()),
        ];

        let mut summary: Vec<ReportLine> = input
            .circuits
            .iter()
            .zip(&result.circuits)
            .map(|(spec, c)| {
                ReportLine::new(
                    format!("{} ({}, {} {})", c.label, spec.wire_size.label(system), spec.length, system.length_symbol()),
                    format!(
                        "I {:.2} A, Ze {:.3}, VD {:.2} V, {:.2}%{}",
                        c.current,
                        c.effective_impedance,
                        c.display_voltage_drop(),
                        c.display_percent_drop(),
                        if c.exceeds_recommended() { " (over 3%)" } else { "" }
                    ),
                )
            })
            .collect();
        summary.push(ReportLine::new("Maximum drop (%)", format!("{:.2}", round2(result.max_percent_drop))));

        LoadReport {
            title: title("Voltage Drop", &input.label),
            header,
            summary,
            rows: Vec::new(),
            annotations: result.trace.lines(),
        }
    }

    /// Plain-text tabular dump.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", "=".repeat(self.title.chars().count()));

        for line in &self.header {
            let _ = writeln!(out, "{}: {}", line.label, line.value);
        }

        section(&mut out, "Summary");
        for line in &self.summary {
            let _ = writeln!(out, "{}: {}", line.label, line.value);
        }

        if !self.rows.is_empty() {
            section(&mut out, "Loads");
            let cells: Vec<[String; 5]> = self.rows.iter().map(ReportRow::fields).collect();
            let mut widths = ROW_HEADINGS.map(|h| h.chars().count());
            for row in &cells {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }
            let headings = ROW_HEADINGS.map(String::from);
            for row in std::iter::once(&headings).chain(&cells) {
                let padded: Vec<String> = row
                    .iter()
                    .zip(widths)
                    .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                    .collect();
                let _ = writeln!(out, "{}", padded.join("  ").trim_end());
            }
        }

        if !self.annotations.is_empty() {
            section(&mut out, "Rules applied");
            for line in &self.annotations {
                let _ = writeln!(out, "- {}", line);
            }
        }
        out
    }
}

/// Listed load lines a dwelling input holds for `category`.
fn dwelling_group(input: &ResidentialInput, category: LoadCategory) -> &[LoadItem] {
    match category {
        LoadCategory::Other => &input.other_loads,
        LoadCategory::Heating => &input.heating_loads,
        LoadCategory::Cooling => &input.cooling_loads,
        LoadCategory::Motor => &input.motor_loads,
        LoadCategory::Ev => &input.ev_loads,
        LoadCategory::General | LoadCategory::Cooking => &[],
    }
}

fn title(kind: &str, label: &str) -> String {
    if label.is_empty() {
        kind.to_string()
    } else {
        format!("{}: {}", kind, label)
    }
}

fn section(out: &mut String, heading: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}", "-".repeat(heading.len()));
}
