//! Integration tests for the Shipyard node lookup client

mod node_filter;
mod node_lookup;
