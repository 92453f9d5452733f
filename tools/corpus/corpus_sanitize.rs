//! Corpus sanitization check
//!
//! Reads a markdown file, prints the sanitized HTML and a summary of what
//! was removed on stderr.

use markdown_sanitizer::MarkdownSanitizer;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <markdown_file>", args[0]);
        process::exit(1);
    }

    let filename = &args[1];

    // Read markdown file
    let markdown = match fs::read(filename) {
        Ok(content) => String::from_utf8_lossy(&content).into_owned(),
        Err(e) => {
            eprintln!("Error reading file {}: {}", filename, e);
            process::exit(1);
        }
    };

    let sanitizer = MarkdownSanitizer::new();
    let (html, report) = sanitizer.sanitize_with_report(&markdown);

    eprintln!(
        "{}: removed {} elements, {} attributes, {} other nodes",
        filename, report.removed_elements, report.removed_attributes, report.removed_nodes
    );

    // Print result
    println!("{}", html);
}
