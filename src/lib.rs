#![ doc = include_str!( concat!( env!( "CARGO_MANIFEST_DIR" ), "/", "README.md" ) ) ]
#![ doc = include_str!( concat!( env!( "CARGO_MANIFEST_DIR" ), "/", "CHANGELOG.md" ) ) ]
#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[macro_use]
mod logging;

pub mod consts;

mod crc;
pub use crc::{crc16, crc16_update};

mod error;
pub use error::ErrorKind;

mod func;
pub use func::{function_name, ModbusFunction};

pub mod parser;
pub use parser::hooks::{Abort, HookResult, NoHooks, ParserHooks, ParserSettings};
pub use parser::{ModbusParser, ParserState, PayloadWindow};

mod query;
pub use query::ModbusQuery;

mod vector;
pub use vector::VectorTrait;

#[cfg(test)]
mod tests;

/// Frame kind selection for the parser
///
/// * for **Query**, frames are master requests
/// * for **Response**, frames are slave replies, exception replies included
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameKind {
    Query,
    Response,
}

/// Standard Modbus frame buffer
///
/// As max length of Modbus RTU frame is always 256 bytes or less, the frame buffer is a fixed
/// [u8; 256] array.
pub type ModbusFrameBuf = [u8; 256];

/// Guess total frame length, CRC included
///
/// Frames are often read byte-by-byte. The function allows to guess total frame length, having
/// the first bytes read: 3 for responses, 7 for queries (only 2 are required for queries with
/// functions other than 15 and 16).
///
/// * the function may return wrong result for broken frames
///
/// Errors:
///
/// * **FrameBroken** not enough bytes to guess
/// * **IllegalFunction** the function is unknown
pub fn guess_frame_len(buf: &[u8], kind: FrameKind) -> Result<usize, ErrorKind> {
    let code = *buf.get(1).ok_or(ErrorKind::FrameBroken)?;
    let byte_at = |pos: usize| {
        buf.get(pos)
            .map(|b| usize::from(*b))
            .ok_or(ErrorKind::FrameBroken)
    };
    match kind {
        FrameKind::Response => {
            if code & consts::MODBUS_EXCEPTION_FLAG != 0 {
                ModbusFunction::try_from(code & !consts::MODBUS_EXCEPTION_FLAG)?;
                return Ok(5);
            }
            let func = ModbusFunction::try_from(code)?;
            if func.is_read() {
                Ok(byte_at(2)? + 5)
            } else {
                Ok(8)
            }
        }
        FrameKind::Query => {
            let func = ModbusFunction::try_from(code)?;
            if func.is_multi_write() {
                Ok(byte_at(6)? + 9)
            } else {
                Ok(8)
            }
        }
    }
}
