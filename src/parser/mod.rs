pub mod hooks;

use crate::consts::{MODBUS_CRC_SEED, MODBUS_EXCEPTION_FLAG};
use crate::crc::crc16_update;
use crate::{ErrorKind, FrameKind, ModbusFunction};
use hooks::{HookResult, ParserHooks};

/// Parser state machine position
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParserState {
    SlaveAddr,
    Function,
    /// byte count of read responses and bulk write queries
    ByteCount,
    /// single write functions
    SingleAddrHi,
    SingleAddrLo,
    /// bulk functions
    StartAddrHi,
    StartAddrLo,
    QtyHi,
    QtyLo,
    ExceptionCode,
    Data,
    CrcLo,
    CrcHi,
    /// frame received, CRC valid
    Complete,
    /// unknown function or CRC mismatch
    Failed,
}

impl ParserState {
    /// The state does not accept more input
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ParserState::Complete | ParserState::Failed)
    }
}

/// Data region of the frame, as offset and length in the input of the current
/// [`ModbusParser::execute`] call
///
/// The window is only meaningful while the call which has set it is running (i.e. inside data
/// hooks). It never owns the bytes.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PayloadWindow {
    pub offset: usize,
    pub len: usize,
}

impl PayloadWindow {
    /// Get the window bytes from the input it has been set for
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        self.offset
            .checked_add(self.len)
            .and_then(|end| input.get(self.offset..end))
            .unwrap_or(&[])
    }
}

/// Streaming Modbus RTU frame parser
///
/// Bytes may be supplied in chunks of any size, the parser keeps its position between
/// [`ModbusParser::execute`] calls. Field values are read-only for the embedder, the only
/// writable part is the user context `C`, which is kept on reset.
///
/// The parser is not synchronized, one parser must be fed from a single thread at a time.
///
/// ```
/// use modbus_rtu_parser::{crc16, FrameKind, ModbusFunction, ModbusParser, NoHooks};
///
/// let mut frame = [0x11, 0x03, 0x06, 0x02, 0x2B, 0x00, 0x00, 0x00, 0x64, 0, 0];
/// let crc = crc16(&frame[..9]);
/// frame[9..].copy_from_slice(&crc.to_le_bytes());
/// let mut parser = ModbusParser::new(FrameKind::Response);
/// let mut n = parser.execute(&mut NoHooks, &frame[..3]);
/// n += parser.execute(&mut NoHooks, &frame[3..]);
/// assert_eq!(n, frame.len());
/// assert!(parser.is_complete());
/// assert_eq!(parser.func(), Some(ModbusFunction::ReadHoldings));
/// assert_eq!(parser.data_len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct ModbusParser<C = ()> {
    kind: FrameKind,
    state: ParserState,
    unit_id: u8,
    func_code: u8,
    func: Option<ModbusFunction>,
    reg: u16,
    count: u16,
    data_len: u8,
    data_cnt: u8,
    payload: PayloadWindow,
    exception_code: Option<u8>,
    frame_crc: u16,
    calc_crc: u16,
    error: Option<ErrorKind>,
    context: C,
}

impl ModbusParser<()> {
    pub fn new(kind: FrameKind) -> Self {
        Self::with_context(kind, ())
    }
}

impl<C> ModbusParser<C> {
    pub fn with_context(kind: FrameKind, context: C) -> Self {
        Self {
            kind,
            state: ParserState::SlaveAddr,
            unit_id: 0,
            func_code: 0,
            func: None,
            reg: 0,
            count: 0,
            data_len: 0,
            data_cnt: 0,
            payload: PayloadWindow::default(),
            exception_code: None,
            frame_crc: 0,
            calc_crc: MODBUS_CRC_SEED,
            error: None,
            context,
        }
    }

    /// Reset all fields except the user context and set the frame kind
    pub fn init(&mut self, kind: FrameKind) {
        self.kind = kind;
        self.state = ParserState::SlaveAddr;
        self.unit_id = 0;
        self.func_code = 0;
        self.func = None;
        self.reg = 0;
        self.count = 0;
        self.data_len = 0;
        self.data_cnt = 0;
        self.payload = PayloadWindow::default();
        self.exception_code = None;
        self.frame_crc = 0;
        self.calc_crc = MODBUS_CRC_SEED;
        self.error = None;
    }

    /// Prepare the parser for the next frame of the same kind
    #[inline]
    pub fn reset(&mut self) {
        self.init(self.kind);
    }

    #[inline]
    pub fn kind(&self) -> FrameKind {
        self.kind
    }
    #[inline]
    pub fn state(&self) -> ParserState {
        self.state
    }
    #[inline]
    pub fn unit_id(&self) -> u8 {
        self.unit_id
    }
    /// Function code as received, exception flag included
    #[inline]
    pub fn func_code(&self) -> u8 {
        self.func_code
    }
    /// Recognized function, for exception responses the function the exception is for
    #[inline]
    pub fn func(&self) -> Option<ModbusFunction> {
        self.func
    }
    /// Register / coil, starting one for bulk functions
    #[inline]
    pub fn reg(&self) -> u16 {
        self.reg
    }
    /// Quantity of registers / coils (bulk writes only)
    #[inline]
    pub fn count(&self) -> u16 {
        self.count
    }
    /// Data length: byte count field, 2 for single writes
    #[inline]
    pub fn data_len(&self) -> u8 {
        self.data_len
    }
    #[inline]
    pub fn payload(&self) -> PayloadWindow {
        self.payload
    }
    #[inline]
    pub fn exception_code(&self) -> Option<u8> {
        self.exception_code
    }
    /// Exception response error, if the frame is an exception response
    pub fn exception(&self) -> Option<ErrorKind> {
        self.exception_code.map(ErrorKind::from_modbus_error)
    }
    /// CRC as sent in the frame
    #[inline]
    pub fn frame_crc(&self) -> u16 {
        self.frame_crc
    }
    /// CRC calculated over the received bytes, CRC field excluded
    #[inline]
    pub fn calc_crc(&self) -> u16 {
        self.calc_crc
    }
    #[inline]
    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == ParserState::Complete
    }
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.state == ParserState::Failed
    }
    #[inline]
    pub fn context(&self) -> &C {
        &self.context
    }
    #[inline]
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Parse the input
    ///
    /// Returns number of bytes consumed. Less than `data.len()` means that the frame has been
    /// finished (complete or failed) or a hook has aborted parsing, the byte the hook has been
    /// called for is counted as consumed. Once finished or aborted, the parser consumes nothing
    /// until [`ModbusParser::reset`].
    pub fn execute<H: ParserHooks<C>>(&mut self, hooks: &mut H, data: &[u8]) -> usize {
        let mut parsed = 0;
        // start of the data region in this input
        let mut chunk_start: Option<usize> = None;
        for (pos, &byte) in data.iter().enumerate() {
            if self.error.is_some() || self.state.is_terminal() {
                break;
            }
            if !matches!(self.state, ParserState::CrcLo | ParserState::CrcHi) {
                self.calc_crc = crc16_update(self.calc_crc, byte);
            }
            match self.state {
                ParserState::SlaveAddr => {
                    self.unit_id = byte;
                    self.state = ParserState::Function;
                    let r = hooks.on_slave_addr(self);
                    self.notify(r);
                }
                ParserState::Function => self.parse_function(hooks, byte),
                ParserState::ByteCount => {
                    self.data_len = byte;
                    self.data_cnt = 0;
                    self.state = if byte == 0 {
                        ParserState::CrcLo
                    } else {
                        ParserState::Data
                    };
                    let r = hooks.on_data_len(self);
                    self.notify(r);
                }
                ParserState::SingleAddrHi => {
                    self.reg = u16::from(byte) << 8;
                    self.state = ParserState::SingleAddrLo;
                }
                ParserState::SingleAddrLo => {
                    self.reg |= u16::from(byte);
                    self.data_len = 2;
                    self.data_cnt = 0;
                    self.state = ParserState::Data;
                    let r = hooks.on_addr(self);
                    self.notify(r);
                }
                ParserState::StartAddrHi => {
                    self.reg = u16::from(byte) << 8;
                    self.state = ParserState::StartAddrLo;
                }
                ParserState::StartAddrLo => {
                    self.reg |= u16::from(byte);
                    self.state = ParserState::QtyHi;
                    let r = hooks.on_addr(self);
                    self.notify(r);
                }
                ParserState::QtyHi => {
                    self.count = u16::from(byte) << 8;
                    self.state = ParserState::QtyLo;
                }
                ParserState::QtyLo => {
                    self.count |= u16::from(byte);
                    self.state = match (self.kind, self.func) {
                        (FrameKind::Query, Some(f)) if f.is_multi_write() => {
                            ParserState::ByteCount
                        }
                        _ => ParserState::CrcLo,
                    };
                    let r = hooks.on_qty(self);
                    self.notify(r);
                }
                ParserState::ExceptionCode => {
                    self.exception_code = Some(byte);
                    self.state = ParserState::CrcLo;
                    let r = hooks.on_exception(self);
                    self.notify(r);
                }
                ParserState::Data => {
                    let start = *chunk_start.get_or_insert(pos);
                    if pos == start {
                        let remaining = usize::from(self.data_len - self.data_cnt);
                        self.payload = PayloadWindow {
                            offset: pos,
                            len: remaining.min(data.len() - pos),
                        };
                    }
                    if self.data_cnt == 0 {
                        let r = hooks.on_data_start(self, self.payload.slice(data));
                        self.notify(r);
                    }
                    self.data_cnt += 1;
                    if self.data_cnt == self.data_len {
                        chunk_start = None;
                        self.state = ParserState::CrcLo;
                        if self.error.is_none() {
                            let window = self.payload.slice(data);
                            let r = hooks.on_data(self, window);
                            self.notify(r);
                            if self.error.is_none() {
                                let r = hooks.on_data_end(self, window);
                                self.notify(r);
                            }
                        }
                    }
                }
                ParserState::CrcLo => {
                    self.frame_crc = u16::from(byte);
                    self.state = ParserState::CrcHi;
                }
                ParserState::CrcHi => self.check_crc(hooks, byte),
                ParserState::Complete | ParserState::Failed => {}
            }
            parsed += 1;
        }
        if let Some(start) = chunk_start {
            // data region continues in the next input
            if self.error.is_none() {
                let r = hooks.on_data(self, &data[start..parsed]);
                self.notify(r);
            }
        }
        parsed
    }

    fn parse_function<H: ParserHooks<C>>(&mut self, hooks: &mut H, byte: u8) {
        self.func_code = byte;
        match ModbusFunction::try_from(byte) {
            Ok(func) => {
                self.func = Some(func);
                self.state = match self.kind {
                    FrameKind::Response if func.is_read() => ParserState::ByteCount,
                    _ if func.is_single_write() => ParserState::SingleAddrHi,
                    _ => ParserState::StartAddrHi,
                };
            }
            Err(_) => {
                let exception = self.kind == FrameKind::Response
                    && byte & MODBUS_EXCEPTION_FLAG == MODBUS_EXCEPTION_FLAG;
                match ModbusFunction::try_from(byte & !MODBUS_EXCEPTION_FLAG) {
                    Ok(func) if exception => {
                        self.func = Some(func);
                        self.state = ParserState::ExceptionCode;
                    }
                    _ => {
                        mb_warn!("unit {}: unknown function {:#x}", self.unit_id, byte);
                        self.error = Some(ErrorKind::IllegalFunction);
                        self.state = ParserState::Failed;
                        return;
                    }
                }
            }
        }
        let r = hooks.on_function(self);
        self.notify(r);
    }

    fn check_crc<H: ParserHooks<C>>(&mut self, hooks: &mut H, byte: u8) {
        self.frame_crc |= u16::from(byte) << 8;
        if self.frame_crc == self.calc_crc {
            mb_trace!("unit {}: frame complete, function {}", self.unit_id, self.func_code);
            self.state = ParserState::Complete;
            let r = hooks.on_complete(self);
            self.notify(r);
        } else {
            mb_warn!(
                "unit {}: CRC error, frame {:#x}, calculated {:#x}",
                self.unit_id,
                self.frame_crc,
                self.calc_crc
            );
            self.error = Some(ErrorKind::FrameCRCError);
            self.state = ParserState::Failed;
            let r = hooks.on_crc_error(self);
            self.notify(r);
        }
    }

    #[inline]
    fn notify(&mut self, result: HookResult) {
        if result.is_err() {
            mb_debug!(
                "unit {}: parser aborted by hook, state {}",
                self.unit_id,
                self.state as u8
            );
            if self.error.is_none() {
                self.error = Some(ErrorKind::HookAborted);
            }
        }
    }
}
