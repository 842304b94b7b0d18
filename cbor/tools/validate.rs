/*!
Validate command - check CBOR data for well-formedness
*/

use super::io::Input;
use clap::Parser;
use rill_cbor::io::SliceSource;
use rill_cbor::validate::{DEFAULT_MAX_DEPTH, validate_with_depth};

/// Check CBOR data for well-formedness
#[derive(Parser, Debug)]
#[command(about = "Check that the input is well-formed CBOR", long_about = None)]
pub struct Command {
    /// Maximum nesting depth to allow
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Treat the input as a CBOR sequence of any number of items
    #[arg(short = 's', long)]
    sequence: bool,

    /// Input CBOR file (use '-' for stdin)
    input: Input,
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        let data = self.input.read_all()?;
        let mut source = SliceSource::new(&data);

        let mut items = 0usize;
        loop {
            match validate_with_depth(&mut source, self.max_depth) {
                Ok(Some(major)) => {
                    items += 1;
                    println!("{major:?}");
                    if !self.sequence {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => anyhow::bail!(
                    "{e} at byte {} (after {items} well-formed item(s))",
                    source.position()
                ),
            }
        }

        if items == 0 {
            anyhow::bail!("empty input");
        }
        if !self.sequence && source.position() != data.len() {
            anyhow::bail!(
                "{} trailing byte(s) after the first item",
                data.len() - source.position()
            );
        }
        Ok(())
    }
}
