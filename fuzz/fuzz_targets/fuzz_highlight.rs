#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    tersed::fuzz::highlight_does_not_panic(data);
});
