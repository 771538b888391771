use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{DelivererRoute, Error, Result, TextStop, io::options::RouteOptions, tour::RoutedStop};

/// Opens `--output`, or stdout when unset.
pub fn open_output(options: &RouteOptions) -> Result<Box<dyn Write>> {
    match options.output_path() {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!(
                    "failed to create output file {}: {e}",
                    path.display()
                ))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// One line per stop: `k lat,lng[ label]`.
pub fn write_text_route<W: Write>(out: &mut W, route: &[RoutedStop<TextStop>]) -> Result<()> {
    for routed in route {
        writeln!(out, "{} {}", routed.sequence, routed.stop)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_json_routes<W: Write>(out: &mut W, routes: &[DelivererRoute]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, routes)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
