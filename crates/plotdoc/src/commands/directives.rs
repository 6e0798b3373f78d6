//! `plotdoc directives` command implementation.

use std::io::Write;

use plotdoc_renderer::directive::registered_directives;

use crate::error::CliError;

/// List registered directive names, one per line.
pub(crate) fn execute() -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    write_names(&mut stdout)?;
    Ok(())
}

fn write_names(out: &mut impl Write) -> std::io::Result<()> {
    for name in registered_directives() {
        writeln!(out, "{name}")?;
    }
    out.flush()
}
