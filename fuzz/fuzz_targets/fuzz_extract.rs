#![no_main]

use langid_ga::Alphabet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let alphabet = Alphabet::latin();

    let fv = alphabet.extract(text);
    assert_eq!(fv.len(), alphabet.len());

    // Splitting into lines never finds more letters than the whole text
    let per_line: u64 = alphabet.instances(text).iter().map(|fv| fv.total()).sum();
    assert_eq!(per_line, fv.total());
});
