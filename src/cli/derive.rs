//! Identifier derivation command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::identifiers::{derive, derive_alternate, IdentifierFamily};
use clap::Args;
use serde::Serialize;

/// Print the identifiers derived from a rack name
#[derive(Debug, Clone, Args)]
pub struct DeriveArgs {
    /// Full rack name, e.g. fra2-rk5
    #[arg(short, long, value_name = "RACK")]
    pub rack: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DeriveOutput<'a> {
    rack: &'a str,
    plain_rack: String,
    #[serde(flatten)]
    family: IdentifierFamily,
    #[serde(skip_serializing_if = "Option::is_none")]
    alternate: Option<IdentifierFamily>,
}

impl DeriveArgs {
    /// Execute the derive command
    pub fn execute(&self) -> CliResult<()> {
        let derivation = derive(&self.rack).ok_or_else(|| {
            CliError::validation(format!(
                "Rack name '{}' does not contain an rk<number> token",
                self.rack
            ))
        })?;

        let output = DeriveOutput {
            rack: &self.rack,
            plain_rack: derivation.plain_rack,
            family: derivation.family,
            alternate: derive_alternate(&self.rack),
        };

        if self.json {
            return print_json(&output);
        }

        println!("rack:       {}", output.rack);
        println!("plain_rack: {}", output.plain_rack);
        print_family(&output.family, "");
        if let Some(alternate) = &output.alternate {
            println!();
            println!("sr family:");
            print_family(alternate, "  ");
        }
        Ok(())
    }
}

fn print_family(family: &IdentifierFamily, indent: &str) {
    println!("{indent}mtor:       {}", family.mtor);
    println!("{indent}tor:        {}", family.tor);
    println!("{indent}pdu:        {}", family.pdu);
    println!("{indent}bmc:        {}", family.bmc);
    println!("{indent}server:     {}", family.server);
}
