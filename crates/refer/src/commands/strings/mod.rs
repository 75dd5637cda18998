pub mod export;
pub mod gendered;
pub mod list;

#[derive(clap::Subcommand)]
pub enum StringsCommands {
    /// List the string table resources of a package file
    List(list::ListArgs),
    /// Decode every string table of a package file into JSON files
    Export(export::ExportArgs),
    /// Print the strings containing gendered language
    Gendered(gendered::GenderedArgs),
}

impl StringsCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            StringsCommands::List(list) => list.handle(),
            StringsCommands::Export(export) => export.handle(),
            StringsCommands::Gendered(gendered) => gendered.handle(),
        }
    }
}
