//! CSV export for load reports.
//!
//! Layout: title, header lines and summary lines as two-cell `label,value`
//! records, a blank separator, then the load table under `ROW_HEADINGS`.
//! Every field is quoted.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use elec_core::report::{LoadReport, ROW_HEADINGS};

/// Export a report to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(report: &LoadReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(report, buf)
}

/// Write a report as CSV to any writer.
pub fn write_csv(report: &LoadReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record([report.title.as_str()])?;
    for line in report.header.iter().chain(&report.summary) {
        wtr.write_record([line.label.as_str(), line.value.as_str()])?;
    }

    if !report.rows.is_empty() {
        wtr.write_record([""])?;
        wtr.write_record(ROW_HEADINGS)?;
        for row in &report.rows {
            wtr.write_record(row.fields())?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use elec_core::calculations::residential::{self, GeneralLoad, ResidentialInput};
    use elec_core::loads::LoadItem;

    fn report() -> LoadReport {
        let input = ResidentialInput {
            label: "Lot 7".to_string(),
            general: GeneralLoad {
                floor_area: 100.0,
                area_unit: Default::default(),
                va_per_area: None,
                small_appliance_circuits: 2,
                laundry_circuits: 1,
            },
            other_loads: vec![LoadItem::new("Dryer, electric", 5000.0, 1)],
            heating_loads: vec![],
            cooling_loads: vec![],
            motor_loads: vec![],
            ev_loads: vec![],
            method: Default::default(),
            demand_table: None,
            voltage: 240.0,
            optional_motor_handling: Default::default(),
        };
        let result = residential::calculate(&input).unwrap();
        LoadReport::residential(&input, &result).unwrap()
    }

    fn to_string(report: &LoadReport) -> String {
        let mut buf = Vec::new();
        write_csv(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_title_summary_and_rows() {
        let report = report();
        let csv = to_string(&report);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "\"Residential Load Calculation: Lot 7\"");
        assert!(lines.contains(&"\"Category\",\"Name\",\"VA\",\"Qty\",\"Total (VA)\""));
        assert!(lines.iter().any(|l| l.starts_with("\"Total Demand Load (VA)\",")));
        // Commas inside names survive because every field is quoted
        assert!(lines.contains(&"\"other\",\"Dryer, electric\",\"5000\",\"1\",\"5000\""));

        let expected_lines = 1 + report.header.len() + report.summary.len() + 2 + report.rows.len();
        assert_eq!(lines.len(), expected_lines);
    }

    #[test]
    fn omits_table_without_rows() {
        let mut report = report();
        report.rows.clear();
        let csv = to_string(&report);
        assert!(!csv.contains("\"Category\""));
        assert_eq!(csv.lines().count(), 1 + report.header.len() + report.summary.len());
    }

    #[test]
    fn output_is_deterministic() {
        let report = report();
        assert_eq!(to_string(&report), to_string(&report));
    }
}
