#![no_main]

use libfuzzer_sys::fuzz_target;

// Any UTF-8 input must produce output without panicking
fuzz_target!(|data: &[u8]| {
    if let Ok(markdown) = std::str::from_utf8(data) {
        let _ = markdown_sanitizer::sanitize(markdown);
    }
});
