//! CLI command implementations.

pub mod auto;
pub mod tour;

use anyhow::{Context, Result};
use carousel_runtime::StateSnapshot;

/// Print the final state as pretty JSON.
pub fn print_state(state: &StateSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("Failed to serialize state")?;
    println!("{}", json);
    Ok(())
}
