use super::ui::is_interactive;
use color_eyre::Result;
use dialoguer::{Confirm, Password};

/// Prompt for a secret. Uses a masked terminal prompt when attached to a TTY,
/// otherwise reads one line from stdin so keys can be piped in.
pub fn prompt_secret(prompt: &str) -> Result<String> {
    if is_interactive() {
        Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read secret: {}", e))
    } else {
        rpassword::read_password()
            .map(|s| s.trim().to_string())
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read secret from stdin: {}", e))
    }
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}
