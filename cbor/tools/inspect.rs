/*!
Inspect command - stream the incremental reader over CBOR data
*/

use super::io::{Input, Output};
use clap::Parser;
use rill_cbor::decode::{DataType, Reader};
use rill_cbor::io::SliceSource;
use std::fmt::Write;

/// Classify and print CBOR items
#[derive(Parser, Debug)]
#[command(about = "Print each CBOR item in the input, one per line", long_about = None)]
pub struct Command {
    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<Output>,

    /// Input CBOR file (use '-' for stdin)
    input: Input,
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        let data = self.input.read_all()?;
        let mut source = SliceSource::new(&data);
        let mut reader = Reader::new(&mut source);

        let mut out = String::new();
        loop {
            let item = match reader.try_next() {
                Ok(Some(item)) => item,
                Ok(None) => break,
                Err(e) => {
                    anyhow::bail!(
                        "syntax error at byte {}: {e}",
                        reader.source_mut().position()
                    );
                }
            };
            describe(&mut reader, item, &data, &mut out)?;
        }

        let output = self.output.unwrap_or(Output::Stdout);
        output.write_str(&out)?;
        Ok(())
    }
}

fn describe(
    reader: &mut Reader<&mut SliceSource>,
    item: DataType,
    data: &[u8],
    out: &mut String,
) -> anyhow::Result<()> {
    match item {
        DataType::UnsignedInt => writeln!(out, "unsigned {}", reader.unsigned_int())?,
        DataType::NegativeInt => writeln!(out, "negative {}", reader.int())?,
        DataType::Bytes if reader.is_indefinite() => writeln!(out, "bytes (indefinite)")?,
        DataType::Bytes => {
            let payload = read_payload(reader, data)?;
            writeln!(out, "bytes {}", hex::encode(&payload))?;
        }
        DataType::Text if reader.is_indefinite() => writeln!(out, "text (indefinite)")?,
        DataType::Text => {
            let payload = read_payload(reader, data)?;
            writeln!(out, "text {:?}", String::from_utf8_lossy(&payload))?;
        }
        DataType::Array if reader.is_indefinite() => writeln!(out, "array (indefinite)")?,
        DataType::Array => writeln!(out, "array of {}", reader.length())?,
        DataType::Map if reader.is_indefinite() => writeln!(out, "map (indefinite)")?,
        DataType::Map => writeln!(out, "map of {}", reader.length())?,
        DataType::Tag => writeln!(out, "tag {}", reader.tag())?,
        DataType::Boolean => writeln!(out, "{}", reader.boolean())?,
        DataType::Null => writeln!(out, "null")?,
        DataType::Undefined => writeln!(out, "undefined")?,
        DataType::SimpleValue => writeln!(out, "simple {}", reader.simple_value())?,
        DataType::Float => writeln!(out, "float {}", reader.float())?,
        DataType::Double => writeln!(out, "double {}", reader.double())?,
        DataType::Break => writeln!(out, "break")?,
    }
    Ok(())
}

fn read_payload(
    reader: &mut Reader<&mut SliceSource>,
    data: &[u8],
) -> anyhow::Result<Vec<u8>> {
    let length = reader.length();
    // Bound the allocation before trusting a declared length
    if length > data.len() as u64 {
        anyhow::bail!(
            "string of {length} bytes declared at byte {}, but only {} bytes of input remain",
            reader.source_mut().position(),
            data.len() - reader.source_mut().position()
        );
    }
    let mut payload = vec![0; length as usize];
    if reader.read_payload(&mut payload) != payload.len() {
        anyhow::bail!("truncated string payload");
    }
    Ok(payload)
}
