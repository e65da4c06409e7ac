//! Config file discovery and templates.

use atelier_commerce::DEFAULT_STORAGE_KEY;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["atelier.toml", ".atelier.toml", "atelier.json"];

/// Generate a default config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Atelier cart store configuration

# Key of the storage slot holding the cart
storage_key = "{DEFAULT_STORAGE_KEY}"

# Currency checkout summaries are totalled in: USD, EUR, GBP, JPY or INR
currency = "USD"

# What to do when the cart cannot be written: "swallow" logs a warning and
# keeps going, "surface" fails the command
on_write_failure = "swallow"
"#
    )
}
