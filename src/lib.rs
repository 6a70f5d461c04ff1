mod convert;
mod error;

pub use convert::Converter;
pub use error::Error;

use std::path::Path;

pub fn convert_pdf_to_docx(input: &Path, output: &Path) -> Result<(), Error> {
    let input = std::path::absolute(input)?;
    let output = std::path::absolute(output)?;
    println!(
        "Start converting\n  input:  {}\n  output: {}",
        input.display(),
        output.display()
    );

    let mut converter = Converter::open(&input)?;
    converter.convert(&output)?;
    converter.close();

    println!("Conversion complete.\n  File saved at: {}", output.display());
    Ok(())
}
