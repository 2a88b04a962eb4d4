//! Structural validation of a roster export before it enters the pipeline.
//!
//! Mirrors the checks the import tooling applies: the header must carry the
//! required fields, and every row needs a conflict key, a plausible Glovo
//! email, a positive hour count, and a city.

use anyhow::{Result, bail};
use log::info;

use crate::{cli::CheckArgs, io_utils, loader::RecordLoader};

const REQUIRED_FIELDS: &[&str] = &["id_glovo", "email_glovo", "nombre", "apellido", "horas"];

pub fn execute(args: &CheckArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let loader = RecordLoader::open(&args.input, delimiter, encoding)?;

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !loader.headers().iter().any(|h| h == *field))
        .copied()
        .collect();
    if !missing.is_empty() {
        bail!("Missing required column(s): {}", missing.join(", "));
    }
    info!(
        "Header carries {} column(s), all required fields present",
        loader.headers().len()
    );

    let mut rows = 0usize;
    for item in loader {
        let record = item?;
        let row = record.row();
        if record.get("id_glovo").is_empty() {
            bail!("Row {row}: id_glovo is empty");
        }
        let email = record.get("email_glovo");
        if email.is_empty() || !email.contains('@') {
            bail!("Row {row}: email_glovo '{email}' is not a valid address");
        }
        match record.get("horas").parse::<i64>() {
            Ok(horas) if horas > 0 => {}
            Ok(_) => bail!("Row {row}: horas must be greater than 0"),
            Err(_) => bail!("Row {row}: horas '{}' is not a number", record.get("horas")),
        }
        if record.get("ciudad").is_empty() {
            bail!("Row {row}: ciudad is empty");
        }
        rows += 1;
    }

    info!("Validated {rows} row(s) in {:?}", args.input);
    Ok(())
}
