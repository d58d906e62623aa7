use arith::{Decoder, DigitSlice, Encoder};

fn main() {
    let freqs = [100, 130, 256];
    let input = (0..10000)
        .map(|i| match i % 7 {
            0 | 1 | 2 | 3 => 0usize,
            4 | 5 => 1,
            _ => 2,
        })
        .collect::<Vec<_>>();

    for _ in 0..1000 {
        let mut encoder = Encoder::binary(Vec::new());
        for &s in &input {
            encoder.write(s, &freqs).unwrap();
        }
        let digits = encoder.flush().unwrap();

        let mut decoder = Decoder::binary(DigitSlice::new(&digits)).unwrap();
        for &s in &input {
            assert_eq!(decoder.read(&freqs).unwrap(), s);
        }
    }
}
