//! Host list generation.
//!
//! Servers sit in even slots 2..=50; slots 22, 24 and 26 hold the switches
//! and PDU, so a full rack has exactly 22 server hosts.

/// Highest slot considered.
const LAST_SLOT: u32 = 50;

/// Slots occupied by network and power gear.
const EXCLUDED_SLOTS: [u32; 3] = [22, 24, 26];

/// Maximum number of hosts in a rack.
pub const MAX_HOSTS: usize = 22;

/// Generates the ordered server host names for `rack`.
///
/// Output is `{rack}-s02`, `{rack}-s04`, ... in ascending slot order,
/// skipping the excluded slots and capped at [`MAX_HOSTS`] entries.
pub fn generate_hosts(rack: &str) -> Vec<String> {
    (2..=LAST_SLOT)
        .step_by(2)
        .filter(|slot| !EXCLUDED_SLOTS.contains(slot))
        .take(MAX_HOSTS)
        .map(|slot| format!("{rack}-s{slot:02}"))
        .collect()
}

/// Host list as plain text, one host per line.
pub fn host_list_text(hosts: &[String]) -> String {
    let mut output = hosts.join("\n");
    if !output.is_empty() {
        output.push('\n');
    }
    output
}
