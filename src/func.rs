use crate::consts::{
    MODBUS_GET_COILS, MODBUS_GET_DISCRETES, MODBUS_GET_HOLDINGS, MODBUS_GET_INPUTS,
    MODBUS_SET_COIL, MODBUS_SET_COILS_BULK, MODBUS_SET_HOLDING, MODBUS_SET_HOLDINGS_BULK,
};
use crate::ErrorKind;

/// Function codes understood by the parser and the query generator
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ModbusFunction {
    ReadCoils = MODBUS_GET_COILS,
    ReadDiscretes = MODBUS_GET_DISCRETES,
    ReadHoldings = MODBUS_GET_HOLDINGS,
    ReadInputs = MODBUS_GET_INPUTS,
    WriteCoil = MODBUS_SET_COIL,
    WriteHolding = MODBUS_SET_HOLDING,
    WriteCoils = MODBUS_SET_COILS_BULK,
    WriteHoldings = MODBUS_SET_HOLDINGS_BULK,
}

impl ModbusFunction {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ModbusFunction::ReadCoils => "Read Coils",
            ModbusFunction::ReadDiscretes => "Read Discrete Inputs",
            ModbusFunction::ReadHoldings => "Read Holding Registers",
            ModbusFunction::ReadInputs => "Read Input Registers",
            ModbusFunction::WriteCoil => "Write Single Coil",
            ModbusFunction::WriteHolding => "Write Single Register",
            ModbusFunction::WriteCoils => "Write Multiple Coils",
            ModbusFunction::WriteHoldings => "Write Multiple Registers",
        }
    }

    /// Functions 1-4
    pub fn is_read(self) -> bool {
        matches!(
            self,
            ModbusFunction::ReadCoils
                | ModbusFunction::ReadDiscretes
                | ModbusFunction::ReadHoldings
                | ModbusFunction::ReadInputs
        )
    }

    /// Functions 5 and 6
    pub fn is_single_write(self) -> bool {
        matches!(self, ModbusFunction::WriteCoil | ModbusFunction::WriteHolding)
    }

    /// Functions 15 and 16
    pub fn is_multi_write(self) -> bool {
        matches!(
            self,
            ModbusFunction::WriteCoils | ModbusFunction::WriteHoldings
        )
    }
}

impl TryFrom<u8> for ModbusFunction {
    type Error = ErrorKind;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            MODBUS_GET_COILS => Ok(ModbusFunction::ReadCoils),
            MODBUS_GET_DISCRETES => Ok(ModbusFunction::ReadDiscretes),
            MODBUS_GET_HOLDINGS => Ok(ModbusFunction::ReadHoldings),
            MODBUS_GET_INPUTS => Ok(ModbusFunction::ReadInputs),
            MODBUS_SET_COIL => Ok(ModbusFunction::WriteCoil),
            MODBUS_SET_HOLDING => Ok(ModbusFunction::WriteHolding),
            MODBUS_SET_COILS_BULK => Ok(ModbusFunction::WriteCoils),
            MODBUS_SET_HOLDINGS_BULK => Ok(ModbusFunction::WriteHoldings),
            _ => Err(ErrorKind::IllegalFunction),
        }
    }
}

impl From<ModbusFunction> for u8 {
    fn from(func: ModbusFunction) -> u8 {
        func.code()
    }
}

impl core::fmt::Display for ModbusFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Display name of a raw function code, `"<unknown>"` for codes the crate does not handle
pub fn function_name(code: u8) -> &'static str {
    ModbusFunction::try_from(code).map_or("<unknown>", ModbusFunction::name)
}
