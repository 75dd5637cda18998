use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use refer_package::PackageArchive;
use refer_stbl::StringTable;
use std::{fs::File, path::PathBuf};
use tracing::{info, warn};

#[derive(Args)]
pub struct ExportArgs {
    /// An input package file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExportArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let mut package = PackageArchive::new(f)?;

        std::fs::create_dir_all(&self.directory).into_diagnostic()?;

        for entry in package.entries().to_vec() {
            let bytes = match package.read_entry(&entry) {
                Ok(bytes) => bytes,
                Err(error) => {
                    warn!(
                        instance = entry.instance_hex_id(),
                        %error,
                        "skipping a resource that could not be read"
                    );
                    continue;
                }
            };

            let table = match StringTable::read(&bytes) {
                Ok(table) => table,
                Err(error) => {
                    warn!(
                        instance = entry.instance_hex_id(),
                        %error,
                        "skipping a resource that could not be decoded"
                    );
                    continue;
                }
            };

            let p = self.directory.join(format!("{}.json", entry.instance_hex_id()));
            info!("writing {}", p.display());

            let out = if !self.overwrite {
                File::create_new(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            } else {
                File::create(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            };

            serde_json::to_writer_pretty(out, &table).into_diagnostic()?;
        }

        Ok(())
    }
}
