use arith::{Decoder, DigitSlice, Encoder, Error, PackedDigitReader, PackedDigitWriter};
use proptest::prelude::*;

/// Sum per-symbol masses into the cumulative form the coder consumes.
fn cumulative_from_counts(counts: &[u32]) -> Vec<u32> {
    let mut sum = 0u32;
    counts
        .iter()
        .map(|&c| {
            sum += c;
            sum
        })
        .collect()
}

proptest! {
    #[test]
    fn test_binary_roundtrip(
        input in prop::collection::vec(0usize..4, 1..300),
        masses in prop::collection::vec(1u32..64, 4..=4),
    ) {
        let freqs = cumulative_from_counts(&masses);

        let mut encoder = Encoder::binary(Vec::new());
        for &s in &input {
            encoder.write(s, &freqs).unwrap();
        }
        let digits = encoder.flush().unwrap();

        let mut decoder = Decoder::binary(DigitSlice::new(&digits)).unwrap();
        let output: Vec<usize> = (0..input.len())
            .map(|_| decoder.read(&freqs).unwrap())
            .collect();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn test_arbitrary_radix_roundtrip(
        radix in 2u64..300,
        input in prop::collection::vec(0usize..3, 1..200),
        masses in prop::collection::vec(1u32..40, 3..=3),
    ) {
        let freqs = cumulative_from_counts(&masses);

        let mut encoder = Encoder::arbitrary(radix, Vec::new()).unwrap();
        for &s in &input {
            encoder.write(s, &freqs).unwrap();
        }
        let digits = encoder.flush().unwrap();
        for &d in &digits {
            prop_assert!(d < radix);
        }

        let mut decoder = Decoder::arbitrary(radix, DigitSlice::new(&digits)).unwrap();
        let output: Vec<usize> = (0..input.len())
            .map(|_| decoder.read(&freqs).unwrap())
            .collect();
        prop_assert_eq!(input, output);
    }

    // The power-of-two strategy has no underflow handling: encoding may
    // legitimately exhaust its precision, but whenever it succeeds the
    // decode must be exact.
    #[test]
    fn test_power_of_two_roundtrip_or_loud_failure(
        digit_bits in 1u32..16,
        input in prop::collection::vec(0usize..3, 1..200),
        masses in prop::collection::vec(1u32..40, 3..=3),
    ) {
        let freqs = cumulative_from_counts(&masses);

        let mut encoder = Encoder::power_of_two(digit_bits, Vec::new()).unwrap();
        let mut failure = None;
        for &s in &input {
            if let Err(e) = encoder.write(s, &freqs) {
                failure = Some(e);
                break;
            }
        }

        match failure {
            Some(e) => prop_assert!(matches!(e, Error::IrrecoverableUnderflow)),
            None => {
                let digits = encoder.flush().unwrap();
                let mut decoder =
                    Decoder::power_of_two(digit_bits, DigitSlice::new(&digits)).unwrap();
                for &s in &input {
                    prop_assert_eq!(decoder.read(&freqs).unwrap(), s);
                }
            }
        }
    }

    #[test]
    fn test_binary_matches_arbitrary_radix_two(
        input in prop::collection::vec(0usize..3, 1..150),
        masses in prop::collection::vec(1u32..32, 3..=3),
    ) {
        let freqs = cumulative_from_counts(&masses);

        let mut binary = Encoder::binary(Vec::new());
        let mut radix_two = Encoder::arbitrary(2, Vec::new()).unwrap();
        for &s in &input {
            binary.write(s, &freqs).unwrap();
            radix_two.write(s, &freqs).unwrap();
        }
        // Identical window geometry, identical stream.
        prop_assert_eq!(binary.flush().unwrap(), radix_two.flush().unwrap());
    }

    #[test]
    fn test_packed_bit_stream_roundtrip(
        input in prop::collection::vec(0usize..2, 1..200),
        mass0 in 1u32..20,
        mass1 in 1u32..20,
    ) {
        let freqs = [mass0, mass0 + mass1];

        let mut encoder = Encoder::binary(PackedDigitWriter::new(Vec::new(), 1));
        for &s in &input {
            encoder.write(s, &freqs).unwrap();
        }
        let bytes = encoder.flush().unwrap().finish().unwrap();

        let source = PackedDigitReader::new(&bytes[..], 1);
        let mut decoder = Decoder::binary(source).unwrap();
        let output: Vec<usize> = (0..input.len())
            .map(|_| decoder.read(&freqs).unwrap())
            .collect();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn test_trailing_zero_padding_is_idempotent(
        input in prop::collection::vec(0usize..3, 1..100),
        padding in 0usize..80,
    ) {
        let freqs = [4, 5, 16];

        let mut encoder = Encoder::binary(Vec::new());
        for &s in &input {
            encoder.write(s, &freqs).unwrap();
        }
        let mut digits = encoder.flush().unwrap();
        digits.extend(std::iter::repeat(0).take(padding));

        let mut decoder = Decoder::binary(DigitSlice::new(&digits)).unwrap();
        let output: Vec<usize> = (0..input.len())
            .map(|_| decoder.read(&freqs).unwrap())
            .collect();
        prop_assert_eq!(input, output);
    }
}
