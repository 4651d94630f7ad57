use crate::consts::{
    MODBUS_COIL_OFF, MODBUS_COIL_ON, MODBUS_MAX_WRITE_COILS, MODBUS_MAX_WRITE_HOLDINGS,
};
use crate::{crc16, ErrorKind, ModbusFunction, VectorTrait};

/// Modbus RTU query generator
///
/// Meaning of `values` depends on the function:
///
/// * **WriteCoil** - `values[0]` must be [`MODBUS_COIL_ON`] or [`MODBUS_COIL_OFF`]
/// * **WriteHolding** - `values[0]` is the register value
/// * **WriteCoils** - coil bitmap, least significant bit of `values[0]` is the coil at `reg`,
///   bit 0 of `values[1]` is the coil at `reg + 16` and so on
/// * **WriteHoldings** - register values
/// * read functions ignore `values`
///
/// ```
/// use modbus_rtu_parser::ModbusQuery;
///
/// let mut buf = [0u8; 8];
/// let len = ModbusQuery::read_coils(0x11, 0x13, 10).generate(&mut buf).unwrap();
/// assert_eq!(&buf[..len - 2], &[0x11, 0x01, 0x00, 0x13, 0x00, 0x0A]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize))]
pub struct ModbusQuery<'a> {
    pub unit_id: u8,
    pub func: ModbusFunction,
    /// register / coil, starting one for bulk functions
    pub reg: u16,
    /// registers / coils to read or write. For WriteHoldings 0 means `values.len()`, any other
    /// value must match it
    pub count: u16,
    pub values: &'a [u16],
}

impl<'a> ModbusQuery<'a> {
    pub fn new(unit_id: u8, func: ModbusFunction) -> Self {
        Self {
            unit_id,
            func,
            reg: 0,
            count: 0,
            values: &[],
        }
    }

    fn read(unit_id: u8, func: ModbusFunction, reg: u16, count: u16) -> Self {
        Self {
            unit_id,
            func,
            reg,
            count,
            values: &[],
        }
    }

    pub fn read_coils(unit_id: u8, reg: u16, count: u16) -> Self {
        Self::read(unit_id, ModbusFunction::ReadCoils, reg, count)
    }

    pub fn read_discretes(unit_id: u8, reg: u16, count: u16) -> Self {
        Self::read(unit_id, ModbusFunction::ReadDiscretes, reg, count)
    }

    pub fn read_holdings(unit_id: u8, reg: u16, count: u16) -> Self {
        Self::read(unit_id, ModbusFunction::ReadHoldings, reg, count)
    }

    pub fn read_inputs(unit_id: u8, reg: u16, count: u16) -> Self {
        Self::read(unit_id, ModbusFunction::ReadInputs, reg, count)
    }

    pub fn write_coil(unit_id: u8, reg: u16, value: bool) -> Self {
        Self {
            unit_id,
            func: ModbusFunction::WriteCoil,
            reg,
            count: 1,
            values: if value {
                &[MODBUS_COIL_ON]
            } else {
                &[MODBUS_COIL_OFF]
            },
        }
    }

    pub fn write_holding(unit_id: u8, reg: u16, value: &'a u16) -> Self {
        Self {
            unit_id,
            func: ModbusFunction::WriteHolding,
            reg,
            count: 1,
            values: core::slice::from_ref(value),
        }
    }

    /// `count` coils taken from the `bitmap` words, see the struct docs for the bit order
    pub fn write_coils(unit_id: u8, reg: u16, count: u16, bitmap: &'a [u16]) -> Self {
        Self {
            unit_id,
            func: ModbusFunction::WriteCoils,
            reg,
            count,
            values: bitmap,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn write_holdings(unit_id: u8, reg: u16, values: &'a [u16]) -> Self {
        Self {
            unit_id,
            func: ModbusFunction::WriteHoldings,
            reg,
            count: values.len() as u16,
            values,
        }
    }

    /// Total length of the encoded frame, CRC included
    ///
    /// Fails if the query can not be encoded (see [`ModbusQuery::generate`])
    pub fn frame_len(&self) -> Result<usize, ErrorKind> {
        Ok(match self.func {
            ModbusFunction::ReadCoils
            | ModbusFunction::ReadDiscretes
            | ModbusFunction::ReadHoldings
            | ModbusFunction::ReadInputs => 8,
            ModbusFunction::WriteCoil => {
                match self.values.first().copied() {
                    Some(MODBUS_COIL_ON | MODBUS_COIL_OFF) => {}
                    _ => return Err(ErrorKind::IllegalDataValue),
                }
                8
            }
            ModbusFunction::WriteHolding => {
                if self.values.is_empty() {
                    return Err(ErrorKind::IllegalDataValue);
                }
                8
            }
            ModbusFunction::WriteCoils => 9 + self.coil_bytes()?,
            ModbusFunction::WriteHoldings => 9 + self.holding_bytes()?,
        })
    }

    fn coil_bytes(&self) -> Result<usize, ErrorKind> {
        let count = usize::from(self.count);
        if self.count == 0
            || self.count > MODBUS_MAX_WRITE_COILS
            || count > self.values.len() * 16
        {
            return Err(ErrorKind::IllegalDataValue);
        }
        Ok((count + 7) / 8)
    }

    fn holding_bytes(&self) -> Result<usize, ErrorKind> {
        let l = self.values.len();
        if l == 0
            || l > usize::from(MODBUS_MAX_WRITE_HOLDINGS)
            || (self.count != 0 && usize::from(self.count) != l)
        {
            return Err(ErrorKind::IllegalDataValue);
        }
        Ok(l * 2)
    }

    /// Encode the query into `buf`
    ///
    /// Returns the frame length. If the frame does not fit, [`ErrorKind::OOB`] is returned and the
    /// buffer is left untouched.
    pub fn generate(&self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        let len = self.checked_frame_len()?;
        if len > buf.len() {
            mb_debug!("query frame of {} bytes, buffer is {}", len, buf.len());
            return Err(ErrorKind::OOB);
        }
        let mut writer = SliceWriter { buf, pos: 0 };
        self.write_frame(&mut writer)?;
        Ok(writer.pos)
    }

    /// Encode the query into a vector, previous vector content is cleared
    ///
    /// Invalid queries are rejected before the vector is touched. If the vector runs out of
    /// capacity, [`ErrorKind::OOB`] is returned and the vector holds a partial frame.
    pub fn generate_to<V: VectorTrait<u8>>(&self, request: &mut V) -> Result<(), ErrorKind> {
        self.checked_frame_len()?;
        request.clear();
        self.write_frame(request)
    }

    fn checked_frame_len(&self) -> Result<usize, ErrorKind> {
        self.frame_len().map_err(|e| {
            mb_debug!("query for function {} rejected", self.func.code());
            e
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_frame<V: VectorTrait<u8>>(&self, request: &mut V) -> Result<(), ErrorKind> {
        request.extend(&[self.unit_id, self.func.code()])?;
        request.extend(&self.reg.to_be_bytes())?;
        match self.func {
            ModbusFunction::ReadCoils
            | ModbusFunction::ReadDiscretes
            | ModbusFunction::ReadHoldings
            | ModbusFunction::ReadInputs => {
                request.extend(&self.count.to_be_bytes())?;
            }
            ModbusFunction::WriteCoil | ModbusFunction::WriteHolding => {
                request.extend(&self.values[0].to_be_bytes())?;
            }
            ModbusFunction::WriteCoils => {
                let bytes = self.coil_bytes()?;
                request.extend(&self.count.to_be_bytes())?;
                request.push(bytes as u8)?;
                // unused bits of the last byte are zero-padded
                let rest = self.count % 8;
                for i in 0..bytes {
                    let mut b = self.values[i / 2].to_le_bytes()[i % 2];
                    if i == bytes - 1 && rest > 0 {
                        b &= (1u8 << rest) - 1;
                    }
                    request.push(b)?;
                }
            }
            ModbusFunction::WriteHoldings => {
                let bytes = self.holding_bytes()?;
                request.extend(&(self.values.len() as u16).to_be_bytes())?;
                request.push(bytes as u8)?;
                for v in self.values {
                    request.extend(&v.to_be_bytes())?;
                }
            }
        }
        let crc = crc16(request.as_slice());
        request.extend(&crc.to_le_bytes())
    }
}

/// Fixed buffer writer, fails with [`ErrorKind::OOB`] when the buffer is full
struct SliceWriter<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl VectorTrait<u8> for SliceWriter<'_> {
    fn push(&mut self, value: u8) -> Result<(), ErrorKind> {
        *self.buf.get_mut(self.pos).ok_or(ErrorKind::OOB)? = value;
        self.pos += 1;
        Ok(())
    }
    fn extend(&mut self, values: &[u8]) -> Result<(), ErrorKind> {
        let end = self.pos + values.len();
        self.buf
            .get_mut(self.pos..end)
            .ok_or(ErrorKind::OOB)?
            .copy_from_slice(values);
        self.pos = end;
        Ok(())
    }
    fn clear(&mut self) {
        self.pos = 0;
    }
    fn as_slice(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}
