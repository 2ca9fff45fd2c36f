//! Platform service traits and desktop implementation.

use std::path::{Path, PathBuf};

use comstat_types::error::Result;

use crate::linux::LinuxCollector;
use crate::process::ProcessOpener;
use crate::record::Inventory;

// ---------------------------------------------------------------------------
// Inventory service
// ---------------------------------------------------------------------------

/// Source of the inventory snapshot.
pub trait InventoryService {
    /// Acquire every section once. Missing data degrades to defaults.
    fn collect(&self) -> Result<Inventory>;
}

// ---------------------------------------------------------------------------
// Load service
// ---------------------------------------------------------------------------

/// Live counters sampled by the continuous monitor.
pub trait LoadService {
    /// CPU load in percent (0-100) since the previous sample.
    fn cpu_load(&self) -> Result<f32>;

    /// Physical memory in use, in percent (0-100).
    fn memory_load(&self) -> Result<f32>;
}

// ---------------------------------------------------------------------------
// Time service
// ---------------------------------------------------------------------------

/// A simple wall-clock timestamp (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl std::fmt::Display for SystemTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second,
        )
    }
}

/// Abstraction over platform time services.
pub trait TimeService {
    /// Current wall-clock time.
    fn now(&self) -> Result<SystemTime>;
}

// ---------------------------------------------------------------------------
// Audio service
// ---------------------------------------------------------------------------

/// Background audio playback.
pub trait AudioService {
    /// Start looping playback of `path`, replacing any current playback.
    fn play_loop(&mut self, path: &Path) -> Result<()>;

    /// Stop the current playback. Errors if nothing is playing.
    fn stop(&mut self) -> Result<()>;

    fn is_playing(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Document service
// ---------------------------------------------------------------------------

/// Opens a static document in the user's default viewer.
pub trait DocumentService {
    fn open(&self, path: &Path) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Unified platform trait
// ---------------------------------------------------------------------------

/// Aggregate trait for the read-only services the interpreter needs.
pub trait Platform: InventoryService + LoadService + TimeService + DocumentService {}

// ---------------------------------------------------------------------------
// Desktop implementation
// ---------------------------------------------------------------------------

/// Default platform implementation reading `/proc` and `/sys`.
pub struct DesktopPlatform {
    collector: LinuxCollector,
    opener: ProcessOpener,
}

impl DesktopPlatform {
    pub fn new(sysfs_root: impl Into<PathBuf>, document_opener: Vec<String>) -> Self {
        Self {
            collector: LinuxCollector::new(sysfs_root),
            opener: ProcessOpener::new(document_opener),
        }
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new("/", vec!["xdg-open".to_string()])
    }
}

impl InventoryService for DesktopPlatform {
    fn collect(&self) -> Result<Inventory> {
        Ok(self.collector.collect_inventory())
    }
}

impl LoadService for DesktopPlatform {
    fn cpu_load(&self) -> Result<f32> {
        self.collector.sample_cpu_load()
    }

    fn memory_load(&self) -> Result<f32> {
        self.collector.sample_memory_load()
    }
}

impl TimeService for DesktopPlatform {
    fn now(&self) -> Result<SystemTime> {
        use std::time::SystemTime as StdTime;
        let dur = StdTime::now()
            .duration_since(StdTime::UNIX_EPOCH)
            .unwrap_or_default();
        Ok(system_time_from_unix(dur.as_secs()))
    }
}

impl DocumentService for DesktopPlatform {
    fn open(&self, path: &Path) -> Result<()> {
        self.opener.open(path)
    }
}

impl Platform for DesktopPlatform {}

// ---------------------------------------------------------------------------
// Date helper
// ---------------------------------------------------------------------------

/// Break seconds since the Unix epoch into a UTC timestamp.
pub fn system_time_from_unix(secs: u64) -> SystemTime {
    let days = secs / 86400;
    let time_of_day = secs % 86400;
    let (year, month, day) = days_to_ymd(days);
    SystemTime {
        year,
        month,
        day,
        hour: (time_of_day / 3600) as u8,
        minute: ((time_of_day % 3600) / 60) as u8,
        second: (time_of_day % 60) as u8,
    }
}

/// Convert days since Unix epoch to (year, month, day).
pub(crate) fn days_to_ymd(mut days: u64) -> (u16, u8, u8) {
    let mut year = 1970u16;
    loop {
        let year_days = if is_leap(year) { 366 } else { 365 };
        if days < year_days {
            break;
        }
        days -= year_days;
        year += 1;
    }
    let leap = is_leap(year);
    let month_days: [u64; 12] = [
        31,
        if leap { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut month = 0u8;
    for (i, &md) in month_days.iter().enumerate() {
        if days < md {
            month = (i + 1) as u8;
            break;
        }
        days -= md;
    }
    if month == 0 {
        month = 12;
    }
    (year, month, (days + 1) as u8)
}

pub(crate) fn is_leap(y: u16) -> bool {
    (y.is_multiple_of(4) && !y.is_multiple_of(100)) || y.is_multiple_of(400)
}

// ---------------------------------------------------------------------------
// In-module tests
// ---------------------------------------------------------------------------
