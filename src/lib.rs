//! PBS Backup: Proxmox Backup Server client
//!
//! A library for resolving the runtime configuration of the backup client
//! from a JSON file and command-line overrides, and checking that it is
//! complete enough to run a backup and send a notification mail.

pub mod config;
