use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::Result;

pub const FIXTURE_EXTENSIONS: [&str; 4] = [".pdf", ".xlsx", ".jpg", ".docx"];
pub const PLACEHOLDER_TEXT: &str = "This is a dummy file for testing purposes.\n";
pub const DEFAULT_FIXTURE_COUNT: usize = 300;

/// Fills `dir` with `count` placeholder files named like `483920.pdf`.
pub fn generate_fixtures(dir: &Path, count: usize) -> Result<Vec<PathBuf>> {
    generate_fixtures_with_rng(dir, count, &mut rand::thread_rng())
}

/// Same as [`generate_fixtures`] with a caller supplied random source.
///
/// Names are not deduplicated: a repeated name overwrites the earlier file,
/// and the returned list holds one path per write.
pub fn generate_fixtures_with_rng<R: Rng + ?Sized>(
    dir: &Path,
    count: usize,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(count);
    for _ in 0..count {
        let number: u32 = rng.gen_range(100_000..=999_999);
        let extension = FIXTURE_EXTENSIONS.choose(&mut *rng).copied().unwrap_or(".pdf");
        let path = dir.join(format!("{}{}", number, extension));

        debug!("Writing fixture: {:?}", path);
        fs::write(&path, PLACEHOLDER_TEXT)?;
        written.push(path);
    }

    info!("{} test files were created in: {:?}", count, dir);
    Ok(written)
}
