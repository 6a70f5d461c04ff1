use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfside-docx", about = "Convert PDF files to DOCX")]
struct Args {
    /// Input PDF file
    input: Option<PathBuf>,
    /// Output DOCX file
    output: Option<PathBuf>,
}

fn usage_exit() -> ! {
    println!("Usage: pdfside-docx <input.pdf> <output.docx>");
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    // Every argument error is this program's usage error (stdout, exit 1);
    // clap's own error path exits 2, a code reserved for the
    // output-missing result.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => usage_exit(),
    };

    // Optional at the parser level: a missing positional is a usage
    // error too, not a clap parse failure.
    let (Some(input), Some(output)) = (args.input, args.output) else {
        usage_exit();
    };

    if let Err(e) = pdfside_docx::convert_pdf_to_docx(&input, &output) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if output.exists() {
        println!(
            "Converted '{}' to '{}' successfully.",
            input.display(),
            output.display()
        );
    } else {
        println!("Error: '{}' not created.", output.display());
        std::process::exit(2);
    }
}
