//! Breach check and password commands.

use crate::cli::{output, prompt, Context};
use crate::core::breach::{BreachChecker, HttpRangeSource};
use crate::core::generator;
use crate::error::Result;

/// Check a password read from a hidden prompt or stdin.
pub fn execute(ctx: &Context, endpoint: Option<String>, json: bool) -> Result<()> {
    let endpoint = endpoint.unwrap_or_else(|| ctx.config.range_endpoint().to_string());
    let password = prompt::secret("Password to check")?;

    let checker = BreachChecker::new(HttpRangeSource::new(&endpoint)?);
    let verdict = checker.check(&password)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else if verdict.is_breached {
        output::warn(&format!(
            "found in breaches {} times; do not use this password",
            verdict.times_seen
        ));
    } else {
        output::success("not found in any known breach");
    }
    Ok(())
}

/// Print a generated password without storing it.
pub fn password(ctx: &Context, length: Option<usize>, special: bool) -> Result<()> {
    let length = length.unwrap_or_else(|| ctx.config.length());
    let value = generator::generate(length, special)?;
    println!("{}", value.as_str());
    Ok(())
}
