//! Print the text content of a DOCX file, one line per paragraph.
//!
//! Handy for checking what a conversion engine actually produced without
//! opening Word.
//!
//! Usage:
//!   docx-text <file.docx>          print paragraph text
//!   docx-text <file.docx> --raw    dump word/document.xml unformatted

use std::fs;
use std::io::{self, Read, Write};
use zip::ZipArchive;

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage:");
        eprintln!("  docx-text <file.docx>          print paragraph text");
        eprintln!("  docx-text <file.docx> --raw    dump word/document.xml");
        std::process::exit(1);
    }

    let file = fs::File::open(&args[1]).unwrap_or_else(|e| {
        eprintln!("Cannot open '{}': {e}", args[1]);
        std::process::exit(1);
    });
    let mut archive = ZipArchive::new(file).unwrap_or_else(|e| {
        eprintln!("Not a valid ZIP/DOCX: {e}");
        std::process::exit(1);
    });

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap_or_else(|_| {
            eprintln!("No word/document.xml in '{}'", args[1]);
            std::process::exit(1);
        })
        .read_to_string(&mut xml)
        .unwrap_or_else(|e| {
            eprintln!("Cannot read word/document.xml: {e}");
            std::process::exit(1);
        });

    if args.get(2).map(String::as_str) == Some("--raw") {
        io::stdout().write_all(xml.as_bytes()).unwrap();
        return;
    }

    let doc = roxmltree::Document::parse(&xml).unwrap_or_else(|e| {
        eprintln!("Invalid document XML: {e}");
        std::process::exit(1);
    });

    for para in doc
        .descendants()
        .filter(|n| n.tag_name().name() == "p" && n.tag_name().namespace() == Some(WML_NS))
    {
        println!("{}", paragraph_text(para));
    }
}

/// Concatenate the visible text of one paragraph: w:t content plus tab and
/// line-break markers.
fn paragraph_text(para: roxmltree::Node) -> String {
    let mut text = String::new();
    for node in para.descendants() {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "t" => text.push_str(node.text().unwrap_or("")),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
    text
}
