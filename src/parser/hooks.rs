use super::ModbusParser;

/// Returned by a hook to stop the parser
///
/// The parser sets [`crate::ErrorKind::HookAborted`] and consumes no more bytes until reset.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Abort;

pub type HookResult = Result<(), Abort>;

/// Parser notifications
///
/// Every hook gets read access to the parser, fields are already set when a hook is called.
/// All hooks are optional, default implementations do nothing.
///
/// Data slices passed to the data hooks borrow the input of the current
/// [`ModbusParser::execute`] call and must be copied if required later.
#[allow(unused_variables)]
pub trait ParserHooks<C = ()> {
    fn on_slave_addr(&mut self, parser: &ModbusParser<C>) -> HookResult {
        Ok(())
    }
    fn on_function(&mut self, parser: &ModbusParser<C>) -> HookResult {
        Ok(())
    }
    /// Called after both address bytes are received
    fn on_addr(&mut self, parser: &ModbusParser<C>) -> HookResult {
        Ok(())
    }
    /// Called after both quantity bytes are received
    fn on_qty(&mut self, parser: &ModbusParser<C>) -> HookResult {
        Ok(())
    }
    /// Called after the byte count is received
    fn on_data_len(&mut self, parser: &ModbusParser<C>) -> HookResult {
        Ok(())
    }
    /// Called on the first data byte. `data` is the part of the data region available in the
    /// current input
    fn on_data_start(&mut self, parser: &ModbusParser<C>, data: &[u8]) -> HookResult {
        Ok(())
    }
    /// Called once per execute call for each contiguous piece of the data region
    fn on_data(&mut self, parser: &ModbusParser<C>, chunk: &[u8]) -> HookResult {
        Ok(())
    }
    /// Called on the last data byte
    ///
    /// `data` covers the data region from its first byte in the current input. It is the whole
    /// payload only when the data region has been supplied in a single execute call, use
    /// [`ParserHooks::on_data`] to collect split payloads.
    fn on_data_end(&mut self, parser: &ModbusParser<C>, data: &[u8]) -> HookResult {
        Ok(())
    }
    /// Called when an exception response code is received
    fn on_exception(&mut self, parser: &ModbusParser<C>) -> HookResult {
        Ok(())
    }
    fn on_crc_error(&mut self, parser: &ModbusParser<C>) -> HookResult {
        Ok(())
    }
    /// Called when a frame is received and its CRC is valid
    fn on_complete(&mut self, parser: &ModbusParser<C>) -> HookResult {
        Ok(())
    }
}

/// Hooks which do nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl<C> ParserHooks<C> for NoHooks {}

pub type ParserCallback<C> = fn(&ModbusParser<C>) -> HookResult;
pub type ParserDataCallback<C> = fn(&ModbusParser<C>, &[u8]) -> HookResult;

/// Hook table of plain function pointers, `None` entries are skipped
///
/// ```
/// use modbus_rtu_parser::{FrameKind, ModbusParser, ParserSettings};
///
/// let mut settings: ParserSettings = ParserSettings::new();
/// settings.on_complete = Some(|p: &ModbusParser| {
///     assert_eq!(p.unit_id(), 0x11);
///     Ok(())
/// });
/// let mut parser = ModbusParser::new(FrameKind::Response);
/// let frame = [0x11, 0x06, 0x00, 0x01, 0x00, 0x03, 0x9A, 0x9B];
/// assert_eq!(parser.execute(&mut settings, &frame), frame.len());
/// assert!(parser.is_complete());
/// ```
pub struct ParserSettings<C = ()> {
    pub on_slave_addr: Option<ParserCallback<C>>,
    pub on_function: Option<ParserCallback<C>>,
    pub on_addr: Option<ParserCallback<C>>,
    pub on_qty: Option<ParserCallback<C>>,
    pub on_data_len: Option<ParserCallback<C>>,
    pub on_data_start: Option<ParserDataCallback<C>>,
    pub on_data: Option<ParserDataCallback<C>>,
    pub on_data_end: Option<ParserDataCallback<C>>,
    pub on_exception: Option<ParserCallback<C>>,
    pub on_crc_error: Option<ParserCallback<C>>,
    pub on_complete: Option<ParserCallback<C>>,
}

impl<C> ParserSettings<C> {
    pub const fn new() -> Self {
        Self {
            on_slave_addr: None,
            on_function: None,
            on_addr: None,
            on_qty: None,
            on_data_len: None,
            on_data_start: None,
            on_data: None,
            on_data_end: None,
            on_exception: None,
            on_crc_error: None,
            on_complete: None,
        }
    }

    /// Unset all callbacks
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<C> Default for ParserSettings<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn call<C>(cb: Option<ParserCallback<C>>, parser: &ModbusParser<C>) -> HookResult {
    cb.map_or(Ok(()), |f| f(parser))
}

#[inline]
fn call_data<C>(
    cb: Option<ParserDataCallback<C>>,
    parser: &ModbusParser<C>,
    data: &[u8],
) -> HookResult {
    cb.map_or(Ok(()), |f| f(parser, data))
}

impl<C> ParserHooks<C> for ParserSettings<C> {
    fn on_slave_addr(&mut self, parser: &ModbusParser<C>) -> HookResult {
        call(self.on_slave_addr, parser)
    }
    fn on_function(&mut self, parser: &ModbusParser<C>) -> HookResult {
        call(self.on_function, parser)
    }
    fn on_addr(&mut self, parser: &ModbusParser<C>) -> HookResult {
        call(self.on_addr, parser)
    }
    fn on_qty(&mut self, parser: &ModbusParser<C>) -> HookResult {
        call(self.on_qty, parser)
    }
    fn on_data_len(&mut self, parser: &ModbusParser<C>) -> HookResult {
        call(self.on_data_len, parser)
    }
    fn on_data_start(&mut self, parser: &ModbusParser<C>, data: &[u8]) -> HookResult {
        call_data(self.on_data_start, parser, data)
    }
    fn on_data(&mut self, parser: &ModbusParser<C>, chunk: &[u8]) -> HookResult {
        call_data(self.on_data, parser, chunk)
    }
    fn on_data_end(&mut self, parser: &ModbusParser<C>, data: &[u8]) -> HookResult {
        call_data(self.on_data_end, parser, data)
    }
    fn on_exception(&mut self, parser: &ModbusParser<C>) -> HookResult {
        call(self.on_exception, parser)
    }
    fn on_crc_error(&mut self, parser: &ModbusParser<C>) -> HookResult {
        call(self.on_crc_error, parser)
    }
    fn on_complete(&mut self, parser: &ModbusParser<C>) -> HookResult {
        call(self.on_complete, parser)
    }
}
