//! Modbus CRC-16 (reflected polynomial 0xA001, seed 0xFFFF)

use crate::consts::MODBUS_CRC_SEED;

/// Update CRC with a single byte
///
/// Useful when bytes arrive one by one: start from [`MODBUS_CRC_SEED`] and fold every byte in.
#[inline]
pub fn crc16_update(crc: u16, byte: u8) -> u16 {
    let mut crc = crc ^ u16::from(byte);
    for _ in 0..8 {
        if (crc & 0x0001) == 0 {
            crc >>= 1;
        } else {
            crc >>= 1;
            crc ^= 0xA001;
        }
    }
    crc
}

/// Calculate CRC of a byte slice
///
/// On the wire the result is sent low byte first (`crc.to_le_bytes()`).
pub fn crc16(data: &[u8]) -> u16 {
    data.iter()
        .fold(MODBUS_CRC_SEED, |crc, byte| crc16_update(crc, *byte))
}
