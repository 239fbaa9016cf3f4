// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_note_markup(size: usize) -> String {
    let base = "\\rtl# عنوان\n\\ltr## Section\nParagraph with **bold**, *italic* and a [link](https://x.test).\n- Bullet point\n  - Nested item\n- \\*literal\\* stars\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_plain_text(lines: usize) -> String {
    let mut content = String::new();
    for i in 0..lines {
        content.push_str(&format!("Line {i} of plain text, no markup\n"));
    }
    content
}
