
use crc16::{State, MODBUS};

/// Append Modbus CRC, calculated with an independent implementation
pub fn with_crc(body: &[u8]) -> Vec<u8> {
    let mut frame = body.to_vec();
    frame.extend_from_slice(&State::<MODBUS>::calculate(body).to_le_bytes());
    frame
}
