/*!
CBOR Tools - a CLI for working with streamed CBOR data

# Commands

- `inspect`: stream the incremental reader over the input and print one
  classified item per line
- `validate`: check that the input is well-formed CBOR

# Examples

```bash
# Print every item in a file
cbor inspect data.cbor

# Check a file for structural validity
cbor validate data.cbor

# Check a whole CBOR sequence from stdin
cat seq.cbor | cbor validate -s -
```
*/

use clap::{Parser, Subcommand};

mod inspect;
mod io;
mod validate;

/// A CLI tool for working with CBOR data
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A CLI tool for inspecting and validating CBOR data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Stream the incremental reader over the input
    Inspect(inspect::Command),

    /// Check the input for well-formedness
    Validate(validate::Command),
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Commands::Inspect(args) => args.exec(),
        Commands::Validate(args) => args.exec(),
    }
}
