#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate zap;

fuzz_target!(|data: &[u8]| {
    let mut output: Vec<u8> = Vec::new();
    _ = zap::decoding::decompress(data, &mut output);
});
