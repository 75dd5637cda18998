//! Batch loading of localization strings from package files.

use std::io::{Read, Seek};

use refer_package::PackageArchive;
use refer_stbl::StringTable;
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::handlers::LanguageHandler;
use crate::tags::detect_gendered_tags;

/// The decoded strings of one package, indexed two ways.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LocalizationStrings {
    /// Every decoded string, keyed by string key.
    pub all: StringTable,

    /// Only the strings containing eligible gendered tag pairs, with the handler's
    /// tag-usage fixes already applied.
    pub gendered: StringTable,
}

impl LocalizationStrings {
    /// Merge another package's strings into this one; colliding keys take the other's text.
    pub fn merge(&mut self, other: LocalizationStrings) {
        self.all.merge(other.all);
        self.gendered.merge(other.gendered);
    }
}

/// Decode every string table of the handler's language from a package file.
///
/// Fails only when the container itself cannot be read. A single bad resource is logged and
/// skipped; the rest of the package still loads.
#[instrument(skip_all, fields(language = handler.language_code()))]
pub fn load_package_strings<R: Read + Seek>(
    reader: R,
    handler: &dyn LanguageHandler,
) -> Result<LocalizationStrings> {
    let mut archive = PackageArchive::new(reader)?;
    let mut strings = LocalizationStrings::default();

    for entry in archive.entries().to_vec() {
        if !handler.handles_stbl_instance(&entry.instance_hex_id()) {
            continue;
        }

        let bytes = match archive.read_entry(&entry) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(
                    instance = entry.instance_hex_id(),
                    %error,
                    "skipping a string table resource that could not be read"
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
                    "skipping a string table resource that could not be decoded"
                );
                continue;
            }
        };

        for (key, text) in &table {
            let (is_gendered, matches) = detect_gendered_tags(text);

            if is_gendered {
                strings
                    .gendered
                    .insert(*key, handler.fix_tag_usage_inconsistency(text, &matches));
            }
        }

        strings.all.merge(table);
    }

    info!(
        total = strings.all.len(),
        gendered = strings.gendered.len(),
        "loaded localization strings"
    );

    Ok(strings)
}
