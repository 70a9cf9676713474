//! `md2confl languages` command implementation.

use clap::Args;
use md2confl_renderer::{Language, alias_table};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the languages command.
#[derive(Args)]
pub(crate) struct LanguagesArgs {
    /// Code fence hint to resolve (e.g. "js", "golang"). Lists all languages when omitted.
    hint: Option<String>,
}

impl LanguagesArgs {
    /// Execute the languages command.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        match self.hint.as_deref() {
            Some(hint) => {
                let language = Language::resolve(Some(hint));
                output.write_entry(language.as_str(), "")?;
            }
            None => {
                for (language, aliases) in language_listing() {
                    output.write_entry(language.as_str(), &aliases)?;
                }
                output.info(&format!("{} languages", Language::ALL.len()));
            }
        }
        Ok(())
    }
}

/// Every language with its aliases joined for display.
fn language_listing() -> Vec<(Language, String)> {
    let mut listing: Vec<(Language, String)> = alias_table()
        .iter()
        .map(|(language, aliases)| (*language, aliases.join(", ")))
        .collect();
    // Languages without aliases only appear in the closed enumeration
    for language in Language::ALL {
        if !listing.iter().any(|(listed, _)| *listed == language) {
            listing.push((language, String::new()));
        }
    }
    listing
}
