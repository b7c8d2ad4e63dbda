//! Transmit power conversion for the co-processor PA.
//!
//! The radio takes a power-level code rather than dBm. Requests between
//! table entries round down; requests below the table clamp to its first
//! entry and requests above it to its last.

/// (dBm, power level) pairs in ascending dBm order.
pub const TX_POWER_TABLE: [(i8, u8); 16] = [
    (-30, 0x01),
    (-24, 0x02),
    (-20, 0x03),
    (-16, 0x04),
    (-14, 0x05),
    (-12, 0x06),
    (-10, 0x08),
    (-8, 0x0A),
    (-6, 0x0D),
    (-4, 0x10),
    (-3, 0x12),
    (-2, 0x14),
    (-1, 0x17),
    (0, 0x1A),
    (2, 0x1E),
    (3, 0x20),
];

/// Lowest supported output power.
pub const TX_POWER_MIN_DBM: i8 = TX_POWER_TABLE[0].0;

/// Highest supported output power.
pub const TX_POWER_MAX_DBM: i8 = TX_POWER_TABLE[TX_POWER_TABLE.len() - 1].0;

/// Power level code for a requested output power.
#[must_use]
pub fn level_for_dbm(dbm: i8) -> u8 {
    let mut level = TX_POWER_TABLE[0].1;
    for &(entry_dbm, entry_level) in TX_POWER_TABLE.iter() {
        if entry_dbm > dbm {
            break;
        }
        level = entry_level;
    }
    level
}
