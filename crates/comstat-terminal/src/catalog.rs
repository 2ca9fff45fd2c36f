//! Domain catalog: top-level keywords and per-domain field keywords.
//!
//! Index 0 of every field catalog is a sentinel that contains a space and so
//! can never match whitespace-stripped input. Selectable fields start at 1;
//! their order is the display order and the tie-break order.

use comstat_platform::Section;

/// Sentinel keyword at index 0 of every field catalog.
pub const INVALID_KEYWORD: &str = "invalid command";

/// One selectable field: the keyword users type and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub keyword: &'static str,
    pub label: &'static str,
}

/// Ordered field keywords of one data domain.
#[derive(Debug)]
pub struct FieldCatalog {
    pub section: Section,
    fields: &'static [FieldSpec],
}

impl FieldCatalog {
    /// All entries, sentinel included.
    pub fn entries(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn get(&self, index: usize) -> Option<&'static FieldSpec> {
        self.fields.get(index).filter(|_| index > 0)
    }

    /// Selectable fields with their catalog index.
    pub fn selectable(&self) -> impl Iterator<Item = (usize, &'static FieldSpec)> {
        self.fields.iter().enumerate().skip(1)
    }
}

const fn field(keyword: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { keyword, label }
}

const SENTINEL: FieldSpec = field(INVALID_KEYWORD, "");

static DISK: FieldCatalog = FieldCatalog {
    section: Section::Disk,
    fields: &[
        SENTINEL,
        field("serialnumber", "Serial Number"),
        field("model", "Model"),
        field("interface", "Interface Type"),
        field("driveletter", "Drive Letter"),
        field("size", "Size"),
        field("freespace", "Free Space"),
        field("mediatype", "Media Type"),
        field("isbootdrive", "Boot Drive"),
    ],
};

static SMBIOS: FieldCatalog = FieldCatalog {
    section: Section::Firmware,
    fields: &[
        SENTINEL,
        field("serialnumber", "Serial Number"),
        field("manufacturer", "Manufacturer"),
        field("product", "Product"),
        field("version", "Version"),
    ],
};

static GPU: FieldCatalog = FieldCatalog {
    section: Section::Gpu,
    fields: &[
        SENTINEL,
        field("name", "Name"),
        field("driverversion", "Driver Version"),
        field("resolution", "Resolution"),
        field("refreshrate", "Refresh Rate"),
    ],
};

static CPU: FieldCatalog = FieldCatalog {
    section: Section::Cpu,
    fields: &[
        SENTINEL,
        field("processorid", "Processor Id"),
        field("manufacturer", "Manufacturer"),
        field("name", "Name"),
        field("cores", "Cores"),
        field("threads", "Threads"),
    ],
};

static NETWORK: FieldCatalog = FieldCatalog {
    section: Section::Network,
    fields: &[
        SENTINEL,
        field("name", "Name"),
        field("mac", "MAC Address"),
    ],
};

static SYSTEM: FieldCatalog = FieldCatalog {
    section: Section::System,
    fields: &[
        SENTINEL,
        field("name", "System Name"),
        field("ishypervisorpresent", "Hypervisor Present"),
        field("osversion", "OS Version"),
        field("ostitle", "OS Title"),
        field("osarchitecture", "OS Architecture"),
        field("osserialnumber", "OS Serial Number"),
    ],
};

static PHYSICAL_MEMORY: FieldCatalog = FieldCatalog {
    section: Section::Memory,
    fields: &[
        SENTINEL,
        field("partnumber", "Part Number"),
        field("totalsize", "Total Physical Size"),
        field("availablesize", "Available Physical Size"),
        field("totalvirtualsize", "Total Virtual Size"),
        field("availablevirtualsize", "Available Virtual Size"),
        field("totalpagefilesize", "Total Page File Size"),
        field("availablepagefilesize", "Available Page File Size"),
    ],
};

static REGISTRY: FieldCatalog = FieldCatalog {
    section: Section::Registry,
    fields: &[
        SENTINEL,
        field("computerhardwareid", "Computer Hardware Id"),
        field("computermanufacturer", "Computer Manufacturer"),
        field("computerproductname", "Computer Product Name"),
    ],
};

/// Top-level command domain. `Invalid` is the default and error state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Domain {
    #[default]
    Invalid,
    Disk,
    Smbios,
    Gpu,
    Cpu,
    Network,
    System,
    PhysicalMemory,
    Registry,
    All,
    RealTime,
    MusicOn,
    MusicOff,
    Save,
    Help,
    Exit,
}

impl Domain {
    /// Every domain in matching order, sentinel first.
    pub const ALL: [Domain; 16] = [
        Domain::Invalid,
        Domain::Disk,
        Domain::Smbios,
        Domain::Gpu,
        Domain::Cpu,
        Domain::Network,
        Domain::System,
        Domain::PhysicalMemory,
        Domain::Registry,
        Domain::All,
        Domain::RealTime,
        Domain::MusicOn,
        Domain::MusicOff,
        Domain::Save,
        Domain::Help,
        Domain::Exit,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Domain::Invalid => INVALID_KEYWORD,
            Domain::Disk => "disk",
            Domain::Smbios => "smbios",
            Domain::Gpu => "gpu",
            Domain::Cpu => "cpu",
            Domain::Network => "network",
            Domain::System => "system",
            Domain::PhysicalMemory => "physicalmemory",
            Domain::Registry => "registry",
            Domain::All => "all",
            Domain::RealTime => "realtime",
            Domain::MusicOn => "musicon",
            Domain::MusicOff => "musicoff",
            Domain::Save => "save",
            Domain::Help => "help",
            Domain::Exit => "exit",
        }
    }

    /// Field catalog of a data domain; `None` for control domains.
    pub fn catalog(self) -> Option<&'static FieldCatalog> {
        match self {
            Domain::Disk => Some(&DISK),
            Domain::Smbios => Some(&SMBIOS),
            Domain::Gpu => Some(&GPU),
            Domain::Cpu => Some(&CPU),
            Domain::Network => Some(&NETWORK),
            Domain::System => Some(&SYSTEM),
            Domain::PhysicalMemory => Some(&PHYSICAL_MEMORY),
            Domain::Registry => Some(&REGISTRY),
            _ => None,
        }
    }

    pub fn is_data(self) -> bool {
        self.catalog().is_some()
    }

    /// Domain whose catalog covers `section`.
    pub fn for_section(section: Section) -> Domain {
        match section {
            Section::Disk => Domain::Disk,
            Section::Firmware => Domain::Smbios,
            Section::Gpu => Domain::Gpu,
            Section::Cpu => Domain::Cpu,
            Section::Network => Domain::Network,
            Section::System => Domain::System,
            Section::Memory => Domain::PhysicalMemory,
            Section::Registry => Domain::Registry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_domains() -> impl Iterator<Item = Domain> {
        Domain::ALL.into_iter().filter(|d| d.is_data())
    }

    #[test]
    fn no_domain_keyword_prefixes_another() {
        for a in Domain::ALL {
            for b in Domain::ALL {
                if a != b {
                    assert!(
                        !b.keyword().starts_with(a.keyword()),
                        "{} prefixes {}",
                        a.keyword(),
                        b.keyword()
                    );
                }
            }
        }
    }

    #[test]
    fn eight_data_domains() {
        assert_eq!(data_domains().count(), 8);
        assert!(!Domain::Exit.is_data());
        assert!(Domain::Invalid.catalog().is_none());
    }

    #[test]
    fn sentinel_leads_every_catalog() {
        for domain in data_domains() {
            let catalog = domain.catalog().unwrap();
            assert_eq!(catalog.entries()[0].keyword, INVALID_KEYWORD);
            assert!(catalog.get(0).is_none());
            assert!(catalog.get(1).is_some());
        }
    }

    #[test]
    fn field_keywords_are_independent() {
        for domain in data_domains() {
            let catalog = domain.catalog().unwrap();
            for (i, a) in catalog.selectable() {
                assert!(!a.keyword.contains("get"), "{} contains get", a.keyword);
                assert!(!a.label.is_empty());
                for (j, b) in catalog.selectable() {
                    if i != j {
                        assert!(
                            !b.keyword.contains(a.keyword),
                            "{}: {} inside {}",
                            domain.keyword(),
                            a.keyword,
                            b.keyword
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn section_mapping_round_trips() {
        for section in Section::ALL {
            let domain = Domain::for_section(section);
            assert_eq!(domain.catalog().unwrap().section, section);
        }
    }

    #[test]
    fn catalog_sizes() {
        let sizes: Vec<usize> = data_domains()
            .map(|d| d.catalog().unwrap().selectable().count())
            .collect();
        assert_eq!(sizes, [8, 4, 4, 5, 2, 6, 7, 3]);
    }
}
