//! Output channel towards the orchestration tool.
//!
//! Kestra picks task outputs up from stdout lines of the form
//! `::{"outputs": {...}}::`.

use serde::Serialize;

/// Formats a value as a Kestra outputs line.
pub fn format_outputs<T: Serialize>(outputs: &T) -> Result<String, serde_json::Error> {
    let wrapped = serde_json::json!({ "outputs": outputs });
    Ok(format!("::{}::", serde_json::to_string(&wrapped)?))
}

/// Emits the outputs line on stdout.
pub fn emit<T: Serialize>(outputs: &T) -> Result<(), serde_json::Error> {
    println!("{}", format_outputs(outputs)?);
    Ok(())
}
