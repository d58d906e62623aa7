#![no_main]
use arith::{Decoder, DigitSlice, Encoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, u8, Vec<u8>)| {
    let (radix_seed, mass_seed, input_bytes) = data;
    if input_bytes.is_empty() {
        return;
    }

    let radix = 2 + u64::from(radix_seed) % 255; // 2..=256
    let mass0 = 1 + u32::from(mass_seed % 31);
    let mass1 = 1 + u32::from((mass_seed >> 3) % 31);
    let freqs = [mass0, mass0 + mass1];
    let input: Vec<usize> = input_bytes.iter().map(|&b| (b % 2) as usize).collect();

    let mut encoder = Encoder::binary(Vec::new());
    for &s in &input {
        encoder.write(s, &freqs).unwrap();
    }
    let digits = encoder.flush().unwrap();
    let mut decoder = Decoder::binary(DigitSlice::new(&digits)).unwrap();
    for &s in &input {
        assert_eq!(decoder.read(&freqs).unwrap(), s);
    }

    let mut encoder = Encoder::arbitrary(radix, Vec::new()).unwrap();
    for &s in &input {
        encoder.write(s, &freqs).unwrap();
    }
    let digits = encoder.flush().unwrap();
    assert!(digits.iter().all(|&d| d < radix));
    let mut decoder = Decoder::arbitrary(radix, DigitSlice::new(&digits)).unwrap();
    for &s in &input {
        assert_eq!(decoder.read(&freqs).unwrap(), s);
    }
});
