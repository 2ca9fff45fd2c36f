//! Text presentation of inventory records.

use comstat_platform::{Inventory, Section, SystemTime};

use crate::catalog::{Domain, FieldCatalog};

/// Horizontal rule framing section banners.
pub const RULE: &str = "--------------------------";

/// Column where values start in console output.
const LABEL_WIDTH: usize = 26;

/// How labelled lines are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Console: labels padded to a fixed column.
    Aligned,
    /// Files: `Label: value`.
    Plain,
}

fn label_line(label: &str, value: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Aligned => format!("{:<LABEL_WIDTH$}{value}\n", format!("{label}:")),
        LabelStyle::Plain => format!("{label}: {value}\n"),
    }
}

/// Selected fields, field-major: every record's value of the first field,
/// then of the second, one value per line. Multi-record output of a
/// multi-instance section ends with one blank line.
pub fn render_fields(inventory: &Inventory, catalog: &FieldCatalog, fields: &[usize]) -> String {
    let records = inventory.records(catalog.section);
    let mut out = String::new();
    for spec in fields.iter().filter_map(|&i| catalog.get(i)) {
        for record in &records {
            if let Some(value) = record.field(spec.keyword) {
                out.push_str(&format!("{value}\n"));
            }
        }
    }
    if catalog.section.is_multi_instance() && records.len() > 1 {
        out.push('\n');
    }
    out
}

/// Every field of every record as labelled lines; records separated by a
/// blank line.
pub fn render_section(inventory: &Inventory, catalog: &FieldCatalog, style: LabelStyle) -> String {
    let mut out = String::new();
    for (n, record) in inventory.records(catalog.section).iter().enumerate() {
        if n > 0 {
            out.push('\n');
        }
        for (_, spec) in catalog.selectable() {
            if let Some(value) = record.field(spec.keyword) {
                out.push_str(&label_line(spec.label, &value.to_string(), style));
            }
        }
    }
    out
}

pub fn banner(title: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Aligned => format!("{RULE}\n|{title:^24}|\n{RULE}\n"),
        LabelStyle::Plain => format!("{RULE}\n{title:^26}\n{RULE}\n"),
    }
}

/// All eight sections, each under its banner.
pub fn render_all(inventory: &Inventory, style: LabelStyle) -> String {
    let mut out = String::new();
    for section in Section::ALL {
        let Some(catalog) = Domain::for_section(section).catalog() else {
            continue;
        };
        out.push('\n');
        out.push_str(&banner(section.title(), style));
        out.push('\n');
        out.push_str(&render_section(inventory, catalog, style));
    }
    out
}

/// One `save` session for the statistics file.
pub fn render_statistics(inventory: &Inventory, saved_at: SystemTime) -> String {
    format!(
        "\nSaved time: {saved_at}\n{}",
        render_all(inventory, LabelStyle::Plain)
    )
}
