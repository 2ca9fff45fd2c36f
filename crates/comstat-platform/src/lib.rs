//! Platform layer for ComStat.
//!
//! Collects the hardware/OS inventory from procfs and sysfs, samples live
//! load counters, and drives the external audio player and document viewer.

pub mod linux;
pub mod process;
pub mod record;
pub mod services;

pub use linux::LinuxCollector;
pub use process::{ProcessAudio, ProcessOpener};
pub use record::{FieldValue, Inventory, Record, Section};
pub use services::{
    AudioService, DesktopPlatform, DocumentService, InventoryService, LoadService, Platform,
    SystemTime, TimeService,
};
