//! MODBUS Constants

// MODBUS Functions
pub const MODBUS_GET_COILS: u8 = 1;
pub const MODBUS_GET_DISCRETES: u8 = 2;
pub const MODBUS_GET_HOLDINGS: u8 = 3;
pub const MODBUS_GET_INPUTS: u8 = 4;
pub const MODBUS_SET_COIL: u8 = 5;
pub const MODBUS_SET_HOLDING: u8 = 6;
pub const MODBUS_SET_COILS_BULK: u8 = 15;
pub const MODBUS_SET_HOLDINGS_BULK: u8 = 16;

/// Set on the function byte of an exception response
pub const MODBUS_EXCEPTION_FLAG: u8 = 0x80;

// Write single coil values
pub const MODBUS_COIL_ON: u16 = 0xFF00;
pub const MODBUS_COIL_OFF: u16 = 0x0000;

// Bulk write limits, so the frame stays within 256 bytes
pub const MODBUS_MAX_WRITE_COILS: u16 = 0x07B0;
pub const MODBUS_MAX_WRITE_HOLDINGS: u16 = 0x007B;

/// CRC-16 initial value
pub const MODBUS_CRC_SEED: u16 = 0xFFFF;
