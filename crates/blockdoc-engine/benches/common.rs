// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_document(sections: usize) -> String {
    let mut content = String::from("---\ntitle: Bench\ntags: [a, b]\n---\n");
    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n\n"));
        content.push_str("Paragraph with some content.\nSecond line.\n\n");
        content.push_str("- Bullet point\n\t- Nested item\n- [ ] open task\n- [x] done task\n");
        content.push_str("1. first\n2. second\n\t1. nested\n\n");
        content.push_str("> quoted\n> lines\n\n> [!NOTE] Heads up\n> body\n\n");
        content.push_str(">> [collapsed] Details\n\tinner\n\n");
        content.push_str("```rust\nfn example() {}\n```\n\n");
        content.push_str("| a | b |\n| --- | --- |\n| 1 | 2 |\n\n![[image.png]]\n---\n");
    }
    content
}
