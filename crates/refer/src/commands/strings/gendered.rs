use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use refer_lang::{load_package_strings, EnglishHandler};
use std::{fs::File, path::PathBuf};

#[derive(Args)]
pub struct GenderedArgs {
    /// An input package file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl GenderedArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let strings = load_package_strings(f, &EnglishHandler)?;

        for (key, text) in &strings.gendered {
            println!("0x{key:08X}\t{text}");
        }

        Ok(())
    }
}
