//! Configuration system for the Tomasulo simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline machine constants (station pools, ROB, memory, latencies).
//! 2. **Structures:** Hierarchical config for general options, station pools,
//!    operation latencies and machine sizing.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or use
//! `Config::default()`.

use serde::Deserialize;

use crate::isa::instruction::OpKind;

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine when not explicitly overridden.
mod defaults {
    /// Number of reservation stations shared by ADD and SUB.
    pub const ADD_STATIONS: usize = 3;

    /// Number of reservation stations shared by MUL and DIV.
    pub const MUL_STATIONS: usize = 2;

    /// Number of reservation stations for LOAD.
    pub const LOAD_STATIONS: usize = 3;

    /// Number of reservation stations for STORE.
    pub const STORE_STATIONS: usize = 3;

    /// Number of reorder buffer entries.
    pub const ROB_ENTRIES: usize = 16;

    /// Number of data memory words. Word `i` is initialized to `i`.
    pub const MEMORY_WORDS: usize = 1024;

    /// Initial value of every architectural register.
    pub const REGISTER_INIT: i64 = 10;

    /// Functional-unit latency in cycles for ADD and SUB.
    pub const ADD_LATENCY: u64 = 2;

    /// Functional-unit latency in cycles for MUL.
    pub const MUL_LATENCY: u64 = 10;

    /// Functional-unit latency in cycles for DIV.
    pub const DIV_LATENCY: u64 = 40;

    /// Functional-unit latency in cycles for LOAD.
    pub const LOAD_LATENCY: u64 = 2;

    /// Functional-unit latency in cycles for STORE.
    pub const STORE_LATENCY: u64 = 2;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use tomsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.stations.add, 3);
/// assert_eq!(config.machine.rob_entries, 16);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// General simulation options.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Reservation station pool sizes.
    #[serde(default)]
    pub stations: StationConfig,
    /// Functional-unit latencies in cycles.
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Machine sizing (ROB, memory, register init).
    #[serde(default)]
    pub machine: MachineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            stations: StationConfig::default(),
            latency: LatencyConfig::default(),
            machine: MachineConfig::default(),
        }
    }
}

/// General simulation options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-stage trace lines on stderr (issue, execute, write, commit).
    #[serde(default)]
    pub trace: bool,
}

/// Reservation station pool sizes, one pool per functional-unit class.
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    /// Stations shared by ADD and SUB.
    #[serde(default = "StationConfig::default_add")]
    pub add: usize,

    /// Stations shared by MUL and DIV.
    #[serde(default = "StationConfig::default_mul")]
    pub mul: usize,

    /// Stations for LOAD.
    #[serde(default = "StationConfig::default_load")]
    pub load: usize,

    /// Stations for STORE.
    #[serde(default = "StationConfig::default_store")]
    pub store: usize,
}

impl StationConfig {
    /// Returns the default ADD/SUB station count.
    fn default_add() -> usize {
        defaults::ADD_STATIONS
    }

    /// Returns the default MUL/DIV station count.
    fn default_mul() -> usize {
        defaults::MUL_STATIONS
    }

    /// Returns the default LOAD station count.
    fn default_load() -> usize {
        defaults::LOAD_STATIONS
    }

    /// Returns the default STORE station count.
    fn default_store() -> usize {
        defaults::STORE_STATIONS
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            add: defaults::ADD_STATIONS,
            mul: defaults::MUL_STATIONS,
            load: defaults::LOAD_STATIONS,
            store: defaults::STORE_STATIONS,
        }
    }
}

/// Functional-unit latencies in cycles.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    /// ADD and SUB latency.
    #[serde(default = "LatencyConfig::default_add")]
    pub add: u64,

    /// MUL latency.
    #[serde(default = "LatencyConfig::default_mul")]
    pub mul: u64,

    /// DIV latency.
    #[serde(default = "LatencyConfig::default_div")]
    pub div: u64,

    /// LOAD latency.
    #[serde(default = "LatencyConfig::default_load")]
    pub load: u64,

    /// STORE latency.
    #[serde(default = "LatencyConfig::default_store")]
    pub store: u64,
}

impl LatencyConfig {
    /// Returns the default ADD/SUB latency.
    fn default_add() -> u64 {
        defaults::ADD_LATENCY
    }

    /// Returns the default MUL latency.
    fn default_mul() -> u64 {
        defaults::MUL_LATENCY
    }

    /// Returns the default DIV latency.
    fn default_div() -> u64 {
        defaults::DIV_LATENCY
    }

    /// Returns the default LOAD latency.
    fn default_load() -> u64 {
        defaults::LOAD_LATENCY
    }

    /// Returns the default STORE latency.
    fn default_store() -> u64 {
        defaults::STORE_LATENCY
    }

    /// Returns the latency of an operation, clamped to at least one cycle.
    pub fn of(&self, kind: OpKind) -> u64 {
        let cycles = match kind {
            OpKind::Add | OpKind::Sub => self.add,
            OpKind::Mul => self.mul,
            OpKind::Div => self.div,
            OpKind::Load => self.load,
            OpKind::Store => self.store,
        };
        cycles.max(1)
    }

    /// Returns the largest configured latency.
    pub fn max(&self) -> u64 {
        self.add
            .max(self.mul)
            .max(self.div)
            .max(self.load)
            .max(self.store)
            .max(1)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            add: defaults::ADD_LATENCY,
            mul: defaults::MUL_LATENCY,
            div: defaults::DIV_LATENCY,
            load: defaults::LOAD_LATENCY,
            store: defaults::STORE_LATENCY,
        }
    }
}

/// Machine sizing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineConfig {
    /// Reorder buffer capacity.
    #[serde(default = "MachineConfig::default_rob_entries")]
    pub rob_entries: usize,

    /// Data memory size in words.
    #[serde(default = "MachineConfig::default_memory_words")]
    pub memory_words: usize,

    /// Initial value of every architectural register.
    #[serde(default = "MachineConfig::default_register_init")]
    pub register_init: i64,
}

impl MachineConfig {
    /// Returns the default reorder buffer capacity.
    fn default_rob_entries() -> usize {
        defaults::ROB_ENTRIES
    }

    /// Returns the default data memory size in words.
    fn default_memory_words() -> usize {
        defaults::MEMORY_WORDS
    }

    /// Returns the default register initial value.
    fn default_register_init() -> i64 {
        defaults::REGISTER_INIT
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            rob_entries: defaults::ROB_ENTRIES,
            memory_words: defaults::MEMORY_WORDS,
            register_init: defaults::REGISTER_INIT,
        }
    }
}
