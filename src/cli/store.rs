//! Store commands: new, list, get, set, generate, rm.

use tracing::info;
use zeroize::Zeroizing;

use crate::cli::{output, prompt, Context};
use crate::core::store::{DeleteOutcome, SetOutcome};
use crate::error::Result;

/// Create an empty store.
pub fn new(ctx: &Context, force: bool) -> Result<()> {
    let store = ctx.store_for_create()?;
    store.create(force)?;
    output::success(&format!("created {}", store.path().display()));
    Ok(())
}

/// List property names.
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let names = ctx.open_store()?.list_properties()?;

    if json {
        let result = serde_json::json!({
            "names": names,
            "count": names.len()
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if names.is_empty() {
        output::dimmed("no properties stored");
    } else {
        output::section(&format!("{} properties", names.len()));
        for name in &names {
            output::list_item(name);
        }
    }

    Ok(())
}

/// Print a property value.
pub fn get(ctx: &Context, name: &str) -> Result<()> {
    let value = ctx.open_store()?.get_property(name)?;
    // Plain output for scripting
    println!("{}", value.as_str());
    Ok(())
}

/// Set a property, prompting for the value if none was given.
pub fn set(ctx: &Context, name: &str, value: Option<String>) -> Result<()> {
    let store = ctx.open_store()?;
    let value = match value {
        Some(v) => Zeroizing::new(v),
        None => prompt::secret(&format!("Value for {}", name))?,
    };

    let outcome = store.set_property(name, &value)?;
    let verb = match outcome {
        SetOutcome::Created => "set",
        SetOutcome::Updated => "updated",
    };
    output::success(&format!("{} {}", verb, output::key(name)));
    Ok(())
}

/// Set a property to a random value.
pub fn generate(
    ctx: &Context,
    name: &str,
    length: Option<usize>,
    special: bool,
    show: bool,
) -> Result<()> {
    let length = length.unwrap_or_else(|| ctx.config.length());

    info!(property = name, length, special, "auto-setting property");
    let value = ctx.open_store()?.auto_set_property(name, length, special)?;

    if show {
        println!("{}", value.as_str());
    } else {
        output::success(&format!(
            "generated {} ({} characters)",
            output::key(name),
            length
        ));
    }
    Ok(())
}

/// Delete a property after confirmation.
pub fn rm(ctx: &Context, name: &str, yes: bool) -> Result<()> {
    let store = ctx.open_store()?;

    if !yes && !prompt::confirm(&format!("Delete {}?", name))? {
        output::dimmed("aborted");
        return Ok(());
    }

    match store.delete_property(name)? {
        DeleteOutcome::Removed => output::success(&format!("removed {}", output::key(name))),
        DeleteOutcome::NotFound => output::warn(&format!("{} not found", output::key(name))),
    }
    Ok(())
}
