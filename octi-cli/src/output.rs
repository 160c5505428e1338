use anyhow::Context;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output configuration derived from CLI flags.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output file path. When set, output is saved as JSON.
    pub output: Option<PathBuf>,
    /// Suppress informational messages on stderr.
    pub quiet: bool,
}

impl OutputConfig {
    /// Emit output: if `-o` is set, save as JSON; otherwise print human text.
    pub fn emit(&self, human_text: &str, json_value: &serde_json::Value) -> anyhow::Result<()> {
        if let Some(ref path) = self.output {
            let content =
                serde_json::to_string_pretty(json_value).context("Failed to serialize JSON")?;
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !self.quiet {
                eprintln!("Wrote {}", path.display());
            }
        } else {
            println!("{human_text}");
        }
        Ok(())
    }
}

/// Whether colored output should be used (TTY + not NO_COLOR).
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn fmt_section(text: &str) -> String {
    if use_color() {
        format!("{}", text.cyan())
    } else {
        text.to_string()
    }
}

pub fn fmt_dim(text: &str) -> String {
    if use_color() {
        format!("{}", text.dimmed())
    } else {
        text.to_string()
    }
}
