#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use modbus_rtu_parser::{FrameKind, HookResult, ModbusParser, ParserHooks};

#[derive(Debug, Arbitrary)]
enum FuzzKind {
    Query,
    Response,
}

impl From<FuzzKind> for FrameKind {
    fn from(k: FuzzKind) -> Self {
        match k {
            FuzzKind::Query => FrameKind::Query,
            FuzzKind::Response => FrameKind::Response,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzInput<'a> {
    kind: FuzzKind,
    split: usize,
    buf: &'a [u8],
}

struct Checker;

impl ParserHooks for Checker {
    fn on_data_end(&mut self, parser: &ModbusParser, data: &[u8]) -> HookResult {
        assert!(data.len() <= usize::from(parser.data_len()));
        Ok(())
    }
}

fuzz_target!(|input: FuzzInput| {
    // we only care about panics, results are not checked
    let mut parser = ModbusParser::new(input.kind.into());
    let split = if input.buf.is_empty() {
        0
    } else {
        input.split % input.buf.len()
    };
    let n = parser.execute(&mut Checker, &input.buf[..split]);
    if n == split {
        let m = parser.execute(&mut Checker, &input.buf[split..]);
        assert!(m <= input.buf.len() - split);
    }
});
