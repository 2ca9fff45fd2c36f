//! Linux inventory collection via /proc and /sys.
//!
//! All reads go through a configurable root so the collector can run against
//! a fixture tree. Missing files degrade to `Unknown` or zero; nothing here
//! fails the whole snapshot.

use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use comstat_types::error::{ComstatError, Result};

use crate::record::{
    CpuRecord, DiskRecord, FirmwareRecord, GpuRecord, Inventory, MediaType, MemoryRecord,
    NetworkAdapterRecord, RegistryRecord, SystemRecord,
};

const UNKNOWN: &str = "Unknown";
const GIB: u64 = 1024 * 1024 * 1024;
const SECTOR_BYTES: u64 = 512;

/// Block device name prefixes treated as physical disks.
const DISK_PREFIXES: [&str; 6] = ["sd", "nvme", "vd", "xvd", "hd", "mmcblk"];

/// Mount points that mark a disk as the boot drive.
const BOOT_MOUNTS: [&str; 3] = ["/", "/boot", "/boot/efi"];

/// Aggregate CPU jiffies from the first line of `/proc/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub idle: u64,
    pub total: u64,
}

/// Reads inventory and live counters from procfs/sysfs under `root`.
pub struct LinuxCollector {
    root: PathBuf,
    previous_cpu: Cell<Option<CpuTimes>>,
}

impl LinuxCollector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            previous_cpu: Cell::new(None),
        }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel.trim_start_matches('/'))
    }

    fn read(&self, rel: &str) -> Option<String> {
        read_trimmed(&self.path(rel))
    }

    /// Collect every section.
    pub fn collect_inventory(&self) -> Inventory {
        let cpuinfo = fs::read_to_string(self.path("proc/cpuinfo")).unwrap_or_else(|e| {
            log::debug!("cpuinfo unavailable: {e}");
            String::new()
        });
        let cpu = parse_cpuinfo(&cpuinfo);
        let meminfo = fs::read_to_string(self.path("proc/meminfo"))
            .map(|s| parse_meminfo(&s))
            .unwrap_or_default();

        let inventory = Inventory {
            disks: self.collect_disks(),
            firmware: self.collect_firmware(),
            gpus: self.collect_gpus(),
            cpu: cpu.to_record(),
            network: self.collect_network(),
            system: self.collect_system(&cpu),
            memory: memory_record(&meminfo),
            registry: self.collect_registry(),
        };
        log::info!(
            "Inventory collected: {} disk(s), {} GPU(s), {} network adapter(s)",
            inventory.disks.len(),
            inventory.gpus.len(),
            inventory.network.len(),
        );
        inventory
    }

    // -----------------------------------------------------------------------
    // Disk: /sys/block/*, /proc/mounts and statvfs
    // -----------------------------------------------------------------------

    fn collect_disks(&self) -> Vec<DiskRecord> {
        let block_dir = match fs::read_dir(self.path("sys/block")) {
            Ok(rd) => rd,
            Err(e) => {
                log::debug!("sys/block unavailable: {e}");
                return Vec::new();
            },
        };
        let mounts = fs::read_to_string(self.path("proc/mounts"))
            .map(|s| parse_mounts(&s))
            .unwrap_or_default();

        let mut names: Vec<String> = block_dir
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| DISK_PREFIXES.iter().any(|p| n.starts_with(p)))
            .collect();
        names.sort();

        names
            .iter()
            .filter_map(|name| self.disk_record(name, &mounts))
            .collect()
    }

    fn disk_record(&self, name: &str, mounts: &[Mount]) -> Option<DiskRecord> {
        let base = self.path("sys/block").join(name);
        let sectors = read_trimmed_u64(&base.join("size")).unwrap_or(0);
        if sectors == 0 {
            return None;
        }

        let rotational = read_trimmed(&base.join("queue/rotational"));
        let vendor = read_trimmed(&base.join("device/vendor"));
        let serial = read_trimmed(&base.join("device/serial"))
            .filter(|s| !s.is_empty())
            .or_else(|| read_trimmed(&base.join("device/wwid")));

        let disk_mounts: Vec<&Mount> = mounts
            .iter()
            .filter(|m| device_belongs_to(&m.device, name))
            .collect();
        let drive_letter = disk_mounts
            .iter()
            .find(|m| m.mount_point == "/")
            .or_else(|| disk_mounts.first())
            .map(|m| m.mount_point.clone())
            .unwrap_or_default();
        let free_space_gb = if drive_letter.is_empty() {
            0
        } else {
            free_space_bytes(&self.path(&drive_letter)).unwrap_or(0) / GIB
        };

        Some(DiskRecord {
            // Serials are padded with spaces by some controllers.
            serial_number: or_unknown(serial.map(|s| s.split_whitespace().collect())),
            model: or_unknown(read_trimmed(&base.join("device/model"))),
            interface: interface_for(name, vendor.as_deref()).to_string(),
            drive_letter,
            size_gb: sectors * SECTOR_BYTES / GIB,
            free_space_gb,
            media_type: media_type_for(name, rotational.as_deref()),
            is_boot_drive: disk_mounts
                .iter()
                .any(|m| BOOT_MOUNTS.contains(&m.mount_point.as_str())),
        })
    }

    // -----------------------------------------------------------------------
    // Firmware and identifiers: /sys/class/dmi/id
    // -----------------------------------------------------------------------

    fn collect_firmware(&self) -> FirmwareRecord {
        FirmwareRecord {
            serial_number: or_unknown(self.read("sys/class/dmi/id/board_serial")),
            manufacturer: or_unknown(self.read("sys/class/dmi/id/board_vendor")),
            product: or_unknown(self.read("sys/class/dmi/id/board_name")),
            version: or_unknown(self.read("sys/class/dmi/id/board_version")),
        }
    }

    fn collect_registry(&self) -> RegistryRecord {
        RegistryRecord {
            computer_hardware_id: or_unknown(self.read("sys/class/dmi/id/product_uuid")),
            computer_manufacturer: or_unknown(self.read("sys/class/dmi/id/sys_vendor")),
            computer_product_name: or_unknown(self.read("sys/class/dmi/id/product_name")),
        }
    }

    // -----------------------------------------------------------------------
    // GPU: /sys/class/drm/card*, falling back to PCI class 0x03
    // -----------------------------------------------------------------------

    fn collect_gpus(&self) -> Vec<GpuRecord> {
        let drm = self.path("sys/class/drm");
        let entries: Vec<String> = match fs::read_dir(&drm) {
            Ok(rd) => rd
                .flatten()
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => return self.collect_pci_gpus(),
        };

        let mut cards: Vec<&String> = entries.iter().filter(|n| is_card_name(n)).collect();
        cards.sort();
        if cards.is_empty() {
            return self.collect_pci_gpus();
        }

        let kernel = self.read("proc/sys/kernel/osrelease");
        cards
            .into_iter()
            .map(|card| {
                let device = drm.join(card).join("device");
                let driver = driver_from_uevent(&device.join("uevent"));
                let vendor = read_trimmed(&device.join("vendor")).unwrap_or_default();
                let device_id = read_trimmed(&device.join("device")).unwrap_or_default();
                // In-tree drivers carry no module version; they match the kernel.
                let driver_version = driver
                    .as_deref()
                    .and_then(|d| self.read(&format!("sys/module/{d}/version")))
                    .or_else(|| kernel.clone());
                let (x, y) = self.connected_mode(&drm, card, &entries).unwrap_or((0, 0));
                GpuRecord {
                    name: gpu_name(driver.as_deref(), &vendor, &device_id),
                    driver_version: or_unknown(driver_version),
                    x_resolution: x,
                    y_resolution: y,
                    refresh_rate: 0,
                }
            })
            .collect()
    }

    /// First mode of the first connected connector belonging to `card`.
    fn connected_mode(&self, drm: &Path, card: &str, entries: &[String]) -> Option<(u32, u32)> {
        let prefix = format!("{card}-");
        let mut connectors: Vec<&String> =
            entries.iter().filter(|n| n.starts_with(&prefix)).collect();
        connectors.sort();
        connectors.into_iter().find_map(|conn| {
            let dir = drm.join(conn);
            if read_trimmed(&dir.join("status")).as_deref() != Some("connected") {
                return None;
            }
            let modes = fs::read_to_string(dir.join("modes")).ok()?;
            parse_mode(modes.lines().next()?)
        })
    }

    fn collect_pci_gpus(&self) -> Vec<GpuRecord> {
        let pci_dir = match fs::read_dir(self.path("sys/bus/pci/devices")) {
            Ok(rd) => rd,
            Err(_) => return Vec::new(),
        };
        let mut paths: Vec<PathBuf> = pci_dir.flatten().map(|e| e.path()).collect();
        paths.sort();

        paths
            .into_iter()
            .filter(|p| {
                // VGA compatible controller = 0x030000, 3D controller = 0x030200
                read_trimmed(&p.join("class")).is_some_and(|c| c.starts_with("0x03"))
            })
            .map(|p| {
                let driver = driver_from_uevent(&p.join("uevent"));
                let vendor = read_trimmed(&p.join("vendor")).unwrap_or_default();
                let device_id = read_trimmed(&p.join("device")).unwrap_or_default();
                GpuRecord {
                    name: gpu_name(driver.as_deref(), &vendor, &device_id),
                    driver_version: or_unknown(self.read("proc/sys/kernel/osrelease")),
                    ..Default::default()
                }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Network: /sys/class/net/*
    // -----------------------------------------------------------------------

    fn collect_network(&self) -> Vec<NetworkAdapterRecord> {
        let net_dir = match fs::read_dir(self.path("sys/class/net")) {
            Ok(rd) => rd,
            Err(_) => return Vec::new(),
        };

        let mut adapters: Vec<NetworkAdapterRecord> = net_dir
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name == "lo" {
                    return None;
                }
                let mac = read_trimmed(&entry.path().join("address")).unwrap_or_default();
                if mac.is_empty() || mac == "00:00:00:00:00:00" {
                    return None;
                }
                Some(NetworkAdapterRecord { name, mac })
            })
            .collect();
        adapters.sort_by(|a, b| a.name.cmp(&b.name));
        adapters
    }

    // -----------------------------------------------------------------------
    // System
    // -----------------------------------------------------------------------

    fn collect_system(&self, cpu: &CpuInfo) -> SystemRecord {
        let os_title = fs::read_to_string(self.path("etc/os-release"))
            .ok()
            .and_then(|s| parse_os_release(&s));
        SystemRecord {
            name: or_unknown(self.read("proc/sys/kernel/hostname")),
            is_hypervisor_present: cpu.hypervisor,
            os_version: or_unknown(self.read("proc/sys/kernel/osrelease")),
            os_title: or_unknown(os_title),
            os_architecture: std::env::consts::ARCH.to_string(),
            os_serial_number: or_unknown(self.read("etc/machine-id")),
        }
    }

    // -----------------------------------------------------------------------
    // Live counters
    // -----------------------------------------------------------------------

    /// CPU load since the previous call (since boot on the first call).
    pub fn sample_cpu_load(&self) -> Result<f32> {
        let stat = fs::read_to_string(self.path("proc/stat"))?;
        let now = parse_cpu_times(&stat).ok_or_else(|| {
            ComstatError::Platform("proc/stat has no aggregate cpu line".to_string())
        })?;
        let previous = self.previous_cpu.replace(Some(now)).unwrap_or_default();
        Ok(cpu_load_between(previous, now))
    }

    pub fn sample_memory_load(&self) -> Result<f32> {
        let meminfo = parse_meminfo(&fs::read_to_string(self.path("proc/meminfo"))?);
        let total = meminfo.get("MemTotal").copied().unwrap_or(0);
        if total == 0 {
            return Err(ComstatError::Platform(
                "proc/meminfo reports no MemTotal".to_string(),
            ));
        }
        let available = available_kb(&meminfo).min(total);
        Ok((total - available) as f32 / total as f32 * 100.0)
    }
}

// ---------------------------------------------------------------------------
// CPU: /proc/cpuinfo
// ---------------------------------------------------------------------------

/// Fields of interest from `/proc/cpuinfo` (first processor block wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuInfo {
    pub vendor: Option<String>,
    pub model_name: Option<String>,
    pub family: Option<u32>,
    pub model: Option<u32>,
    pub stepping: Option<u32>,
    pub physical_cores: Option<u32>,
    pub logical_cores: u32,
    pub hypervisor: bool,
}

impl CpuInfo {
    fn to_record(&self) -> CpuRecord {
        let processor_id = match (self.family, self.model, self.stepping) {
            (Some(f), Some(m), Some(s)) => processor_signature(f, m, s),
            _ => UNKNOWN.to_string(),
        };
        CpuRecord {
            processor_id,
            manufacturer: or_unknown(self.vendor.clone()),
            name: or_unknown(self.model_name.clone()),
            cores: self.physical_cores.unwrap_or(self.logical_cores),
            threads: self.logical_cores,
        }
    }
}

pub fn parse_cpuinfo(cpuinfo: &str) -> CpuInfo {
    let mut info = CpuInfo::default();

    for line in cpuinfo.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "vendor_id" if info.vendor.is_none() => info.vendor = Some(value.to_string()),
            "model name" if info.model_name.is_none() => {
                info.model_name = Some(value.to_string());
            },
            "cpu family" if info.family.is_none() => info.family = value.parse().ok(),
            "model" if info.model.is_none() => info.model = value.parse().ok(),
            "stepping" if info.stepping.is_none() => info.stepping = value.parse().ok(),
            "cpu cores" if info.physical_cores.is_none() => {
                info.physical_cores = value.parse().ok();
            },
            "processor" => info.logical_cores += 1,
            "flags" => {
                info.hypervisor |= value.split_whitespace().any(|f| f == "hypervisor");
            },
            _ => {},
        }
    }

    info
}

/// CPUID leaf-1 EAX signature rebuilt from the decoded family/model/stepping.
pub fn processor_signature(family: u32, model: u32, stepping: u32) -> String {
    let base_family = family.min(0xF);
    let ext_family = family.saturating_sub(0xF);
    let eax = (stepping & 0xF)
        | ((model & 0xF) << 4)
        | (base_family << 8)
        | (((model >> 4) & 0xF) << 16)
        | ((ext_family & 0xFF) << 20);
    format!("{eax:08X}")
}

/// Parse the aggregate `cpu` line of `/proc/stat`.
pub fn parse_cpu_times(stat: &str) -> Option<CpuTimes> {
    let line = stat.lines().find(|l| l.starts_with("cpu "))?;
    let values: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .filter_map(|v| v.parse().ok())
        .collect();
    if values.len() < 4 {
        return None;
    }
    // user nice system idle iowait irq softirq steal ...
    let idle = values[3] + values.get(4).copied().unwrap_or(0);
    let total: u64 = values.iter().take(8).sum();
    Some(CpuTimes { idle, total })
}

pub fn cpu_load_between(previous: CpuTimes, now: CpuTimes) -> f32 {
    let total = now.total.saturating_sub(previous.total);
    let idle = now.idle.saturating_sub(previous.idle);
    if total == 0 {
        return 0.0;
    }
    (1.0 - idle as f32 / total as f32) * 100.0
}

// ---------------------------------------------------------------------------
// RAM: /proc/meminfo
// ---------------------------------------------------------------------------

/// `/proc/meminfo` as key → kB.
pub fn parse_meminfo(meminfo: &str) -> HashMap<String, u64> {
    meminfo
        .lines()
        .filter_map(|line| {
            let (key, rest) = line.split_once(':')?;
            // Format: "16384000 kB"
            let kb = rest.split_whitespace().next()?.parse().ok()?;
            Some((key.trim().to_string(), kb))
        })
        .collect()
}

fn available_kb(meminfo: &HashMap<String, u64>) -> u64 {
    meminfo
        .get("MemAvailable")
        .or_else(|| meminfo.get("MemFree"))
        .copied()
        .unwrap_or(0)
}

fn memory_record(meminfo: &HashMap<String, u64>) -> MemoryRecord {
    let mb = |key: &str| meminfo.get(key).copied().unwrap_or(0) / 1024;
    let commit_limit = mb("CommitLimit");
    MemoryRecord {
        part_number: UNKNOWN.to_string(),
        total_mb: mb("MemTotal"),
        available_mb: available_kb(meminfo) / 1024,
        total_virtual_mb: commit_limit,
        available_virtual_mb: commit_limit.saturating_sub(mb("Committed_AS")),
        total_page_file_mb: mb("SwapTotal"),
        available_page_file_mb: mb("SwapFree"),
    }
}

// ---------------------------------------------------------------------------
// Mounts, os-release, drm helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub device: String,
    pub mount_point: String,
}

pub fn parse_mounts(mounts: &str) -> Vec<Mount> {
    mounts
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let device = parts.next()?.to_string();
            let mount_point = parts.next()?.replace("\\040", " ");
            Some(Mount { device, mount_point })
        })
        .collect()
}

/// `/dev/sda1` belongs to `sda`, `/dev/nvme0n1p2` to `nvme0n1`; `/dev/sdaa1`
/// does not belong to `sda`.
fn device_belongs_to(device: &str, disk: &str) -> bool {
    let Some(rest) = device.strip_prefix("/dev/") else {
        return false;
    };
    let Some(suffix) = rest.strip_prefix(disk) else {
        return false;
    };
    let digits = suffix.strip_prefix('p').unwrap_or(suffix);
    suffix.is_empty() || (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn interface_for(name: &str, vendor: Option<&str>) -> &'static str {
    if name.starts_with("nvme") {
        "NVMe"
    } else if name.starts_with("sd") {
        if vendor == Some("ATA") { "SATA" } else { "SCSI" }
    } else if name.starts_with("vd") {
        "VirtIO"
    } else if name.starts_with("xvd") {
        "Xen"
    } else if name.starts_with("hd") {
        "IDE"
    } else if name.starts_with("mmcblk") {
        "MMC"
    } else {
        UNKNOWN
    }
}

fn media_type_for(name: &str, rotational: Option<&str>) -> MediaType {
    if name.starts_with("nvme") {
        return MediaType::Nvme;
    }
    match rotational {
        Some("0") => MediaType::Ssd,
        Some("1") => MediaType::Hdd,
        _ => MediaType::Unspecified,
    }
}

pub fn parse_os_release(os_release: &str) -> Option<String> {
    let pretty = os_release
        .lines()
        .find_map(|l| l.strip_prefix("PRETTY_NAME="))
        .or_else(|| os_release.lines().find_map(|l| l.strip_prefix("NAME=")))?;
    let title = pretty.trim().trim_matches('"').to_string();
    (!title.is_empty()).then_some(title)
}

fn is_card_name(name: &str) -> bool {
    name.strip_prefix("card")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse a DRM mode line such as `1920x1080` or `1920x1080i`.
pub fn parse_mode(mode: &str) -> Option<(u32, u32)> {
    let (x, y) = mode.trim().split_once('x')?;
    let y: String = y.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some((x.parse().ok()?, y.parse().ok()?))
}

fn driver_from_uevent(path: &Path) -> Option<String> {
    let uevent = fs::read_to_string(path).ok()?;
    uevent
        .lines()
        .find_map(|l| l.strip_prefix("DRIVER="))
        .map(|d| d.trim().to_string())
}

fn gpu_name(driver: Option<&str>, vendor: &str, device: &str) -> String {
    match driver {
        Some(d) if !d.is_empty() => format!("{d} ({vendor}:{device})"),
        _ if !vendor.is_empty() => format!("PCI {vendor}:{device}"),
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_cast)]
fn free_space_bytes(path: &Path) -> Option<u64> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;
    // SAFETY: statvfs is plain old data; an all-zero value is valid.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is NUL-terminated and stat is a valid out-pointer.
    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) } == 0 {
        Some(stat.f_bavail as u64 * stat.f_frsize as u64)
    } else {
        None
    }
}

#[cfg(not(unix))]
fn free_space_bytes(_path: &Path) -> Option<u64> {
    None
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn read_trimmed_u64(path: &Path) -> Option<u64> {
    read_trimmed(path)?.parse().ok()
}

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    const CPUINFO: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 158
model name\t: Intel(R) Core(TM) i7-8700 CPU @ 3.20GHz
stepping\t: 10
cpu cores\t: 6
flags\t\t: fpu vme de pse hypervisor

processor\t: 1
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 158
cpu cores\t: 6
";

    const MEMINFO: &str = "\
MemTotal:       16384000 kB
MemFree:         1024000 kB
MemAvailable:    8192000 kB
SwapTotal:       2097152 kB
SwapFree:        1048576 kB
CommitLimit:    10289152 kB
Committed_AS:    5144576 kB
";

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        put(root, "proc/cpuinfo", CPUINFO);
        put(root, "proc/meminfo", MEMINFO);
        put(root, "proc/stat", "cpu  100 0 100 800 0 0 0 0 0 0\ncpu0 1 2 3 4\n");
        put(
            root,
            "proc/mounts",
            "/dev/sda2 / ext4 rw 0 0\n/dev/sda1 /boot/efi vfat rw 0 0\n/dev/sdb1 /mnt/my\\040data ext4 rw 0 0\n",
        );
        put(root, "proc/sys/kernel/hostname", "workstation\n");
        put(root, "proc/sys/kernel/osrelease", "6.8.0-45-generic\n");
        put(root, "etc/os-release", "NAME=\"Ubuntu\"\nPRETTY_NAME=\"Ubuntu 24.04.1 LTS\"\n");
        put(root, "etc/machine-id", "0123456789abcdef0123456789abcdef\n");

        put(root, "sys/block/sda/size", "1000215216\n");
        put(root, "sys/block/sda/queue/rotational", "0\n");
        put(root, "sys/block/sda/device/model", "Samsung SSD 860\n");
        put(root, "sys/block/sda/device/vendor", "ATA     \n");
        put(root, "sys/block/sda/device/serial", "  S3Z9NB0K  \n");
        put(root, "sys/block/sdb/size", "3907029168\n");
        put(root, "sys/block/sdb/queue/rotational", "1\n");
        put(root, "sys/block/loop0/size", "1024\n");
        put(root, "sys/block/nvme0n1/size", "0\n");

        put(root, "sys/class/net/lo/address", "00:00:00:00:00:00\n");
        put(root, "sys/class/net/eth0/address", "52:54:00:12:34:56\n");
        put(root, "sys/class/net/dummy0/address", "00:00:00:00:00:00\n");

        put(root, "sys/class/dmi/id/board_vendor", "ASUSTeK COMPUTER INC.\n");
        put(root, "sys/class/dmi/id/board_name", "PRIME Z370-A\n");
        put(root, "sys/class/dmi/id/board_version", "Rev 1.xx\n");
        put(root, "sys/class/dmi/id/sys_vendor", "System manufacturer\n");
        put(root, "sys/class/dmi/id/product_name", "System Product Name\n");

        put(root, "sys/class/drm/card0/device/uevent", "DRIVER=i915\nPCI_ID=8086:3E92\n");
        put(root, "sys/class/drm/card0/device/vendor", "0x8086\n");
        put(root, "sys/class/drm/card0/device/device", "0x3e92\n");
        put(root, "sys/class/drm/card0-DP-1/status", "disconnected\n");
        put(root, "sys/class/drm/card0-HDMI-A-1/status", "connected\n");
        put(root, "sys/class/drm/card0-HDMI-A-1/modes", "2560x1440\n1920x1080\n");
        put(root, "sys/class/drm/renderD128/dev", "226:128\n");
        dir
    }

    #[test]
    fn cpuinfo_first_block_wins() {
        let info = parse_cpuinfo(CPUINFO);
        assert_eq!(info.vendor.as_deref(), Some("GenuineIntel"));
        assert_eq!(info.family, Some(6));
        assert_eq!(info.model, Some(158));
        assert_eq!(info.stepping, Some(10));
        assert_eq!(info.physical_cores, Some(6));
        assert_eq!(info.logical_cores, 2);
        assert!(info.hypervisor);
    }

    #[test]
    fn signature_intel_and_amd() {
        assert_eq!(processor_signature(6, 158, 10), "000906EA");
        // Zen 2: family 0x17 = 0xF + 0x8, model 0x71.
        assert_eq!(processor_signature(23, 113, 0), "00870F10");
    }

    #[test]
    fn cpu_times_and_load() {
        let t0 = parse_cpu_times("cpu  100 0 100 800 0 0 0 0 0 0\n").unwrap();
        assert_eq!(t0, CpuTimes { idle: 800, total: 1000 });
        let t1 = parse_cpu_times("cpu  150 0 150 900 0 0 0 0 0 0\n").unwrap();
        let load = cpu_load_between(t0, t1);
        assert!((load - 50.0).abs() < 0.01);
        assert_eq!(cpu_load_between(t1, t1), 0.0);
    }

    #[test]
    fn cpu_times_requires_aggregate_line() {
        assert!(parse_cpu_times("cpu0 1 2 3 4\n").is_none());
        assert!(parse_cpu_times("").is_none());
    }

    #[test]
    fn meminfo_values_in_kb() {
        let m = parse_meminfo(MEMINFO);
        assert_eq!(m["MemTotal"], 16_384_000);
        assert_eq!(m["SwapFree"], 1_048_576);
    }

    #[test]
    fn mounts_decode_spaces() {
        let mounts = parse_mounts("/dev/sdb1 /mnt/my\\040data ext4 rw 0 0\n");
        assert_eq!(mounts[0].mount_point, "/mnt/my data");
    }

    #[test]
    fn partition_ownership() {
        assert!(device_belongs_to("/dev/sda1", "sda"));
        assert!(device_belongs_to("/dev/sda", "sda"));
        assert!(device_belongs_to("/dev/nvme0n1p2", "nvme0n1"));
        assert!(!device_belongs_to("/dev/sdaa1", "sda"));
        assert!(!device_belongs_to("tmpfs", "sda"));
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(parse_mode("1920x1080"), Some((1920, 1080)));
        assert_eq!(parse_mode("1920x1080i"), Some((1920, 1080)));
        assert_eq!(parse_mode("garbage"), None);
    }

    #[test]
    fn os_release_prefers_pretty_name() {
        assert_eq!(
            parse_os_release("NAME=\"Fedora\"\nPRETTY_NAME=\"Fedora Linux 40\"\n").as_deref(),
            Some("Fedora Linux 40")
        );
        assert_eq!(parse_os_release("NAME=Arch\n").as_deref(), Some("Arch"));
        assert_eq!(parse_os_release(""), None);
    }

    #[test]
    fn fixture_inventory() {
        let dir = fixture();
        let inv = LinuxCollector::new(dir.path()).collect_inventory();

        // loop0 is filtered, nvme0n1 has zero size.
        assert_eq!(inv.disks.len(), 2);
        let sda = &inv.disks[0];
        assert_eq!(sda.model, "Samsung SSD 860");
        assert_eq!(sda.serial_number, "S3Z9NB0K");
        assert_eq!(sda.interface, "SATA");
        assert_eq!(sda.drive_letter, "/");
        assert_eq!(sda.size_gb, 476);
        assert_eq!(sda.media_type, MediaType::Ssd);
        assert!(sda.is_boot_drive);

        let sdb = &inv.disks[1];
        assert_eq!(sdb.model, UNKNOWN);
        assert_eq!(sdb.interface, "SCSI");
        assert_eq!(sdb.drive_letter, "/mnt/my data");
        assert_eq!(sdb.media_type, MediaType::Hdd);
        assert!(!sdb.is_boot_drive);

        assert_eq!(inv.cpu.processor_id, "000906EA");
        assert_eq!(inv.cpu.cores, 6);
        assert_eq!(inv.cpu.threads, 2);

        assert_eq!(inv.network.len(), 1);
        assert_eq!(inv.network[0].name, "eth0");
        assert_eq!(inv.network[0].mac, "52:54:00:12:34:56");

        assert_eq!(inv.system.name, "workstation");
        assert_eq!(inv.system.os_title, "Ubuntu 24.04.1 LTS");
        assert!(inv.system.is_hypervisor_present);
        assert_eq!(inv.system.os_serial_number, "0123456789abcdef0123456789abcdef");

        assert_eq!(inv.memory.total_mb, 16_000);
        assert_eq!(inv.memory.available_mb, 8_000);
        assert_eq!(inv.memory.total_virtual_mb, 10_048);
        assert_eq!(inv.memory.available_virtual_mb, 5_024);
        assert_eq!(inv.memory.total_page_file_mb, 2_048);

        assert_eq!(inv.firmware.manufacturer, "ASUSTeK COMPUTER INC.");
        assert_eq!(inv.firmware.serial_number, UNKNOWN);
        assert_eq!(inv.registry.computer_product_name, "System Product Name");
        assert_eq!(inv.registry.computer_hardware_id, UNKNOWN);

        assert_eq!(inv.gpus.len(), 1);
        assert_eq!(inv.gpus[0].name, "i915 (0x8086:0x3e92)");
        assert_eq!(inv.gpus[0].driver_version, "6.8.0-45-generic");
        assert_eq!((inv.gpus[0].x_resolution, inv.gpus[0].y_resolution), (2560, 1440));
    }

    #[test]
    fn empty_root_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let inv = LinuxCollector::new(dir.path()).collect_inventory();
        assert!(inv.disks.is_empty());
        assert!(inv.gpus.is_empty());
        assert!(inv.network.is_empty());
        assert_eq!(inv.cpu.name, UNKNOWN);
        assert_eq!(inv.system.os_version, UNKNOWN);
        assert_eq!(inv.memory.total_mb, 0);
    }

    #[test]
    fn load_sampling_uses_previous_sample() {
        let dir = fixture();
        let collector = LinuxCollector::new(dir.path());
        // First sample is measured against boot.
        let first = collector.sample_cpu_load().unwrap();
        assert!((first - 20.0).abs() < 0.01);
        put(dir.path(), "proc/stat", "cpu  200 0 200 900 0 0 0 0 0 0\n");
        let second = collector.sample_cpu_load().unwrap();
        assert!((second - 66.666).abs() < 0.01);

        let mem = collector.sample_memory_load().unwrap();
        assert!((mem - 50.0).abs() < 0.01);
    }

    #[test]
    fn load_without_procfs_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let collector = LinuxCollector::new(dir.path());
        assert!(collector.sample_cpu_load().is_err());
        assert!(collector.sample_memory_load().is_err());
    }
}
