#![no_main]

use libfuzzer_sys::fuzz_target;
use shiftpoint::change::{detect_change, Confidence};

fuzz_target!(|data: &[u8]| {
    // First two bytes pick min_sample_size and confidence, the rest are samples
    let Some((&min, rest)) = data.split_first() else {
        return;
    };
    let Some((&conf, rest)) = rest.split_first() else {
        return;
    };

    let window: Vec<f64> = rest
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            f64::from_le_bytes(bytes)
        })
        .collect();
    let confidence = Confidence::ALL[conf as usize % Confidence::ALL.len()];

    // Must never panic, whatever the samples (NaN and infinities included)
    let cp = detect_change(&window, min as usize, confidence);
    assert!(cp.index < window.len().max(1));
});
