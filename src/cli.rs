//! CLI domain: parse, route, input checks and output only.
//! No lookup logic; the route table dispatches to the lookup services.

mod checks;
mod output;
mod parse;
mod route;

pub use checks::{parse_key_value_params, require_provisioning_endpoint};
pub use output::{format_node_filter, format_nodes_json, format_nodes_text, map_error};
pub use parse::{Cli, Commands};
pub use route::{load_selectors, RunContext};
