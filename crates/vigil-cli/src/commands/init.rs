//! The `vigil init` subcommand.
//!
//! Writes commented `identity.txt` and `consent.txt` templates listing
//! every recognized key, for the operator to fill in by hand.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::eyre::{Result, WrapErr, eyre};
use vigil_gate::{DocumentKind, Field, GateConfig};

/// Arguments for `vigil init`.
#[derive(Args)]
pub struct InitArgs {
    /// Directory to write the templates into (default: current directory).
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite existing declaration files.
    #[arg(long)]
    pub force: bool,
}

/// Execute the init command.
pub fn execute(args: &InitArgs, config: &GateConfig) -> Result<()> {
    let targets: Vec<(DocumentKind, PathBuf)> = DocumentKind::ALL
        .iter()
        .map(|&kind| (kind, args.dir.join(kind.default_file_name())))
        .collect();

    if !args.force {
        let existing: Vec<String> = targets
            .iter()
            .filter(|(_, path)| path.exists())
            .map(|(_, path)| path.display().to_string())
            .collect();
        if !existing.is_empty() {
            return Err(eyre!(
                "refusing to overwrite {} (use --force)",
                existing.join(", ")
            ));
        }
    }

    for (kind, path) in &targets {
        write_template(*kind, path, config)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

fn write_template(kind: DocumentKind, path: &Path, config: &GateConfig) -> Result<()> {
    std::fs::write(path, template(kind, config))
        .wrap_err_with(|| format!("failed to write {}", path.display()))
}

/// Template text for `kind`: a comment header, then one empty line per key.
fn template(kind: DocumentKind, config: &GateConfig) -> String {
    let mut out = String::new();
    match kind {
        DocumentKind::Identity => {
            let _ = writeln!(out, "# Identity declaration");
            let _ = writeln!(out, "#");
            let _ = writeln!(out, "# full_name: your full legal name");
            let _ = writeln!(out, "# email:     an address you can be contacted at");
        }
        DocumentKind::Consent => {
            let _ = writeln!(out, "# Consent declaration");
            let _ = writeln!(out, "#");
            let _ = writeln!(
                out,
                "# acknowledgement: one of {}",
                config
                    .acknowledgement
                    .accepted_phrases
                    .iter()
                    .map(|p| format!("\"{p}\""))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            let _ = writeln!(out, "# scope:           what you will use the toolkit for");
            let _ = writeln!(out, "# full_name:       must match full_name in identity.txt");
        }
    }
    let _ = writeln!(
        out,
        "# date:      declaration date ({})",
        config.dates.formats.join(" or ")
    );
    let _ = writeln!(out, "#");
    let _ = writeln!(out, "# One field per line as `key: value`. Lines starting with # are ignored.");
    let _ = writeln!(out);
    for field in kind.fields() {
        let _ = writeln!(out, "{}:", Field::key(*field));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_list_every_key_in_order() {
        let config = GateConfig::default();
        let identity = template(DocumentKind::Identity, &config);
        let keys: Vec<&str> = identity.lines().filter(|l| !l.starts_with('#') && !l.is_empty()).collect();
        assert_eq!(keys, ["full_name:", "email:", "date:"]);

        let consent = template(DocumentKind::Consent, &config);
        assert!(consent.contains("\"I agree\""));
        let keys: Vec<&str> = consent.lines().filter(|l| !l.starts_with('#') && !l.is_empty()).collect();
        assert_eq!(keys, ["acknowledgement:", "scope:", "date:", "full_name:"]);
    }
}
