// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* **styled** content and ~~struck~~ words.\nA second line with an \\*escaped\\* star.\n\n*outer **inner** outer* text.\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_emphasis(depth: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        let run = ["*", "**", "~~"][level % 3];
        content.push_str(run);
        content.push_str("word ");
    }
    for level in (0..depth).rev() {
        let run = ["*", "**", "~~"][level % 3];
        content.push_str(" word");
        content.push_str(run);
    }
    content
}
