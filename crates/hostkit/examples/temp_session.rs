//! Example walking through a temp-file session with logging enabled
//!
//! 1. Initialize logging from the environment
//! 2. Canonicalize a user-supplied name
//! 3. Create one temp file per kind, using the name as content
//! 4. List them through the registry, then delete the ones created here
//!
//! Run with `RUST_LOG=debug` to see the core library's own events.

use std::io::Write;

use hostkit_core::temp::{TempFileFactory, TempFileKind, TempFileRegistry};
use hostkit_core::{physical_memory, TextNormalizer};
use hostkit_utils::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>>
{
    let _guard = init_logging()?;

    let span = tracing::info_span!("temp_session");
    let _entered = span.enter();

    let normalizer = TextNormalizer::new();
    let name = normalizer.canonicalize("Ｓｋｅｔｃｈ \u{2460}")?;
    tracing::info!(canonical = %name, "Canonicalized session name");

    let factory = TempFileFactory::new();
    let mut created = Vec::new();
    for kind in TempFileKind::ALL {
        let (mut handle, path) = factory.create(kind)?;
        writeln!(handle, "{name}")?;
        tracing::info!(kind = %kind, path = %path.display(), "Created");
        created.push(path);
    }

    let registry = TempFileRegistry::new();
    for path in registry.find_all() {
        println!("{}", path.display());
    }

    // Other processes may own temp files in the same directory
    for path in &created {
        if let Err(e) = registry.delete(path) {
            tracing::warn!(path = %path.display(), "{e}");
        }
    }
    tracing::info!(removed = created.len(), "Cleaned up session files");

    println!("Physical memory: {}", physical_memory());
    Ok(())
}
