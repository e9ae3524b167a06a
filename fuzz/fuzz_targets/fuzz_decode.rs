#![no_main]
use libfuzzer_sys::fuzz_target;
use phpmodem::{DecodeOptions, Scope, StringEncoding, decode_with};

// One flag byte selects the option combination; the rest is the input
// buffer. The decoder must return a value or an error, never panic.
fn decode(data: &[u8]) {
    let Some((&flags, input)) = data.split_first() else {
        return;
    };

    let mut scope = Scope::new();
    scope.register_generic("stdClass");

    let options = DecodeOptions {
        strict: flags & 1 != 0,
        encoding: if flags & 2 != 0 {
            StringEncoding::Binary
        } else {
            StringEncoding::Utf8
        },
    };
    let _ = decode_with(input, &scope, &options);
}

fuzz_target!(|data: &[u8]| decode(data));
