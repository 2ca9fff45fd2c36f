//! Inventory records and typed field values.
//!
//! Each record answers `field(keyword)` for the keywords its domain exposes,
//! so callers can drive presentation from a keyword list instead of a
//! branch per record type.

use std::fmt;

/// A single typed field value read from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text (names, identifiers, versions).
    Text(String),
    /// Integer with an optional display unit.
    Integer {
        value: i64,
        unit: Option<&'static str>,
    },
    /// Yes/no flag.
    Flag(bool),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Unitless integer (counts, rates).
    pub fn count(value: impl Into<i64>) -> Self {
        Self::Integer { value: value.into(), unit: None }
    }

    /// Integer carrying a unit suffix such as `GB` or `MB`.
    pub fn sized(value: u64, unit: &'static str) -> Self {
        Self::Integer {
            value: i64::try_from(value).unwrap_or(i64::MAX),
            unit: Some(unit),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer { value, unit: Some(unit) } => write!(f, "{value} {unit}"),
            Self::Integer { value, unit: None } => write!(f, "{value}"),
            Self::Flag(true) => f.write_str("Yes"),
            Self::Flag(false) => f.write_str("No"),
        }
    }
}

/// A record whose fields are addressable by lowercase keyword.
pub trait Record {
    /// Read one field. `None` if this record has no such keyword.
    fn field(&self, keyword: &str) -> Option<FieldValue>;
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// The eight inventory sections, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Disk,
    Firmware,
    Gpu,
    Cpu,
    Network,
    System,
    Memory,
    Registry,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Disk,
        Section::Firmware,
        Section::Gpu,
        Section::Cpu,
        Section::Network,
        Section::System,
        Section::Memory,
        Section::Registry,
    ];

    /// Whether the section holds a list of records rather than exactly one.
    pub fn is_multi_instance(self) -> bool {
        matches!(self, Section::Disk | Section::Gpu | Section::Network)
    }

    /// Heading used in banners.
    pub fn title(self) -> &'static str {
        match self {
            Section::Disk => "Disks",
            Section::Firmware => "SMBIOS",
            Section::Gpu => "GPUs",
            Section::Cpu => "CPU",
            Section::Network => "Network",
            Section::System => "System",
            Section::Memory => "Memory",
            Section::Registry => "Registry",
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Storage medium of a disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaType {
    #[default]
    Unspecified,
    Hdd,
    Ssd,
    Nvme,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Unspecified => f.write_str(""),
            MediaType::Hdd => f.write_str("HDD"),
            MediaType::Ssd => f.write_str("SSD"),
            MediaType::Nvme => f.write_str("NVMe"),
        }
    }
}

/// One physical disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskRecord {
    pub serial_number: String,
    pub model: String,
    pub interface: String,
    /// Primary mount point (the closest thing to a drive letter).
    pub drive_letter: String,
    pub size_gb: u64,
    pub free_space_gb: u64,
    pub media_type: MediaType,
    pub is_boot_drive: bool,
}

impl Record for DiskRecord {
    fn field(&self, keyword: &str) -> Option<FieldValue> {
        Some(match keyword {
            "serialnumber" => FieldValue::text(&self.serial_number),
            "model" => FieldValue::text(&self.model),
            "interface" => FieldValue::text(&self.interface),
            "driveletter" => FieldValue::text(&self.drive_letter),
            "size" => FieldValue::sized(self.size_gb, "GB"),
            "freespace" => FieldValue::sized(self.free_space_gb, "GB"),
            "mediatype" => FieldValue::text(self.media_type.to_string()),
            "isbootdrive" => FieldValue::Flag(self.is_boot_drive),
            _ => return None,
        })
    }
}

/// Baseboard (SMBIOS) identification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirmwareRecord {
    pub serial_number: String,
    pub manufacturer: String,
    pub product: String,
    pub version: String,
}

impl Record for FirmwareRecord {
    fn field(&self, keyword: &str) -> Option<FieldValue> {
        Some(match keyword {
            "serialnumber" => FieldValue::text(&self.serial_number),
            "manufacturer" => FieldValue::text(&self.manufacturer),
            "product" => FieldValue::text(&self.product),
            "version" => FieldValue::text(&self.version),
            _ => return None,
        })
    }
}

/// One display adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpuRecord {
    pub name: String,
    pub driver_version: String,
    pub x_resolution: u32,
    pub y_resolution: u32,
    /// Refresh rate in Hz, 0 if unknown.
    pub refresh_rate: u32,
}

impl Record for GpuRecord {
    fn field(&self, keyword: &str) -> Option<FieldValue> {
        Some(match keyword {
            "name" => FieldValue::text(&self.name),
            "driverversion" => FieldValue::text(&self.driver_version),
            "resolution" => {
                FieldValue::Text(format!("{}x{}", self.x_resolution, self.y_resolution))
            },
            "refreshrate" => FieldValue::count(self.refresh_rate),
            _ => return None,
        })
    }
}

/// Processor identification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuRecord {
    pub processor_id: String,
    pub manufacturer: String,
    pub name: String,
    pub cores: u32,
    pub threads: u32,
}

impl Record for CpuRecord {
    fn field(&self, keyword: &str) -> Option<FieldValue> {
        Some(match keyword {
            "processorid" => FieldValue::text(&self.processor_id),
            "manufacturer" => FieldValue::text(&self.manufacturer),
            "name" => FieldValue::text(&self.name),
            "cores" => FieldValue::count(self.cores),
            "threads" => FieldValue::count(self.threads),
            _ => return None,
        })
    }
}

/// One network interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkAdapterRecord {
    pub name: String,
    pub mac: String,
}

impl Record for NetworkAdapterRecord {
    fn field(&self, keyword: &str) -> Option<FieldValue> {
        Some(match keyword {
            "name" => FieldValue::text(&self.name),
            "mac" => FieldValue::text(&self.mac),
            _ => return None,
        })
    }
}

/// Host and operating system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemRecord {
    pub name: String,
    pub is_hypervisor_present: bool,
    pub os_version: String,
    pub os_title: String,
    pub os_architecture: String,
    pub os_serial_number: String,
}

impl Record for SystemRecord {
    fn field(&self, keyword: &str) -> Option<FieldValue> {
        Some(match keyword {
            "name" => FieldValue::text(&self.name),
            "ishypervisorpresent" => FieldValue::Flag(self.is_hypervisor_present),
            "osversion" => FieldValue::text(&self.os_version),
            "ostitle" => FieldValue::text(&self.os_title),
            "osarchitecture" => FieldValue::text(&self.os_architecture),
            "osserialnumber" => FieldValue::text(&self.os_serial_number),
            _ => return None,
        })
    }
}

/// Memory sizes, all in MB.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRecord {
    pub part_number: String,
    pub total_mb: u64,
    pub available_mb: u64,
    pub total_virtual_mb: u64,
    pub available_virtual_mb: u64,
    pub total_page_file_mb: u64,
    pub available_page_file_mb: u64,
}

impl Record for MemoryRecord {
    fn field(&self, keyword: &str) -> Option<FieldValue> {
        Some(match keyword {
            "partnumber" => FieldValue::text(&self.part_number),
            "totalsize" => FieldValue::sized(self.total_mb, "MB"),
            "availablesize" => FieldValue::sized(self.available_mb, "MB"),
            "totalvirtualsize" => FieldValue::sized(self.total_virtual_mb, "MB"),
            "availablevirtualsize" => FieldValue::sized(self.available_virtual_mb, "MB"),
            "totalpagefilesize" => FieldValue::sized(self.total_page_file_mb, "MB"),
            "availablepagefilesize" => FieldValue::sized(self.available_page_file_mb, "MB"),
            _ => return None,
        })
    }
}

/// Vendor-assigned machine identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryRecord {
    pub computer_hardware_id: String,
    pub computer_manufacturer: String,
    pub computer_product_name: String,
}

impl Record for RegistryRecord {
    fn field(&self, keyword: &str) -> Option<FieldValue> {
        Some(match keyword {
            "computerhardwareid" => FieldValue::text(&self.computer_hardware_id),
            "computermanufacturer" => FieldValue::text(&self.computer_manufacturer),
            "computerproductname" => FieldValue::text(&self.computer_product_name),
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// Inventory snapshot
// ---------------------------------------------------------------------------

/// Everything collected at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub disks: Vec<DiskRecord>,
    pub firmware: FirmwareRecord,
    pub gpus: Vec<GpuRecord>,
    pub cpu: CpuRecord,
    pub network: Vec<NetworkAdapterRecord>,
    pub system: SystemRecord,
    pub memory: MemoryRecord,
    pub registry: RegistryRecord,
}

impl Inventory {
    /// All records of a section, in collection order.
    pub fn records(&self, section: Section) -> Vec<&dyn Record> {
        match section {
            Section::Disk => self.disks.iter().map(|d| d as &dyn Record).collect(),
            Section::Firmware => vec![&self.firmware as &dyn Record],
            Section::Gpu => self.gpus.iter().map(|g| g as &dyn Record).collect(),
            Section::Cpu => vec![&self.cpu as &dyn Record],
            Section::Network => self.network.iter().map(|n| n as &dyn Record).collect(),
            Section::System => vec![&self.system as &dyn Record],
            Section::Memory => vec![&self.memory as &dyn Record],
            Section::Registry => vec![&self.registry as &dyn Record],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_renders_yes_no() {
        assert_eq!(FieldValue::Flag(true).to_string(), "Yes");
        assert_eq!(FieldValue::Flag(false).to_string(), "No");
    }

    #[test]
    fn sized_renders_unit() {
        assert_eq!(FieldValue::sized(512, "GB").to_string(), "512 GB");
        assert_eq!(FieldValue::count(8).to_string(), "8");
    }

    #[test]
    fn sized_saturates() {
        match FieldValue::sized(u64::MAX, "MB") {
            FieldValue::Integer { value, .. } => assert_eq!(value, i64::MAX),
            other => panic!("expected integer, got {other:?}"),
        }
    }

    #[test]
    fn gpu_resolution_is_joined() {
        let gpu = GpuRecord {
            x_resolution: 1920,
            y_resolution: 1080,
            ..Default::default()
        };
        assert_eq!(gpu.field("resolution").unwrap().to_string(), "1920x1080");
    }

    #[test]
    fn unknown_keyword_is_none() {
        assert!(CpuRecord::default().field("mac").is_none());
        assert!(DiskRecord::default().field("").is_none());
    }

    #[test]
    fn media_type_display() {
        assert_eq!(MediaType::Ssd.to_string(), "SSD");
        assert_eq!(MediaType::Hdd.to_string(), "HDD");
        assert_eq!(MediaType::Unspecified.to_string(), "");
    }

    #[test]
    fn records_per_section() {
        let inv = Inventory {
            disks: vec![DiskRecord::default(), DiskRecord::default()],
            ..Default::default()
        };
        assert_eq!(inv.records(Section::Disk).len(), 2);
        assert_eq!(inv.records(Section::Gpu).len(), 0);
        assert_eq!(inv.records(Section::Cpu).len(), 1);
    }

    #[test]
    fn multi_instance_sections() {
        let multi: Vec<_> = Section::ALL
            .iter()
            .filter(|s| s.is_multi_instance())
            .collect();
        assert_eq!(multi, [&Section::Disk, &Section::Gpu, &Section::Network]);
    }
}
