//! Host list command.

use crate::cli::common::{print_json, CliResult};
use crate::services::hosts::{generate_hosts, host_list_text};
use clap::Args;

/// Print the server host names for a rack
#[derive(Debug, Clone, Args)]
pub struct HostsArgs {
    /// Full rack name used as the host prefix
    #[arg(short, long, value_name = "RACK")]
    pub rack: String,

    /// Output a JSON array
    #[arg(long)]
    pub json: bool,
}

impl HostsArgs {
    /// Execute the hosts command
    pub fn execute(&self) -> CliResult<()> {
        let hosts = generate_hosts(&self.rack);
        if self.json {
            print_json(&hosts)
        } else {
            print!("{}", host_list_text(&hosts));
            Ok(())
        }
    }
}
