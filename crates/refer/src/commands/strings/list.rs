use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use refer_package::PackageArchive;
use refer_stbl::StringTable;
use std::{fs::File, path::PathBuf};

#[derive(Args)]
pub struct ListArgs {
    /// An input package file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let mut package = PackageArchive::new(f)?;

        println!(
            "{:<16} {:>12} {:>12} {:>8} {}",
            "instance", "stored", "decompressed", "entries", "compression"
        );

        for entry in package.entries().to_vec() {
            let entries = package
                .read_entry(&entry)
                .ok()
                .and_then(|bytes| StringTable::read(&bytes).ok())
                .map(|table| table.len().to_string())
                .unwrap_or_else(|| "-".to_owned());

            println!(
                "{:<16} {:>12} {:>12} {:>8} {:?}",
                entry.instance_hex_id(),
                entry.stored_size,
                entry.decompressed_size,
                entries,
                entry.compression,
            );
        }

        Ok(())
    }
}
