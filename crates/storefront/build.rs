//! Build script for the storefront crate.
//!
//! Fingerprints `static/css/main.css` so the stylesheet can be served under
//! an immutable, content-addressed name.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in the file name.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let static_dir = Path::new(&manifest_dir).join("static/css");
    let css_path = static_dir.join("main.css");
    println!("cargo:rerun-if-changed={}", css_path.display());

    let hash = match fs::read(&css_path) {
        Ok(content) => fingerprint(&static_dir, &content),
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            None
        }
    };

    // An empty hash makes templates fall back to the unhashed file.
    println!("cargo:rustc-env=CSS_HASH={}", hash.unwrap_or_default());
}

/// Copy the stylesheet to `derived/main.<hash>.css` and return the hash.
fn fingerprint(static_dir: &Path, content: &[u8]) -> Option<String> {
    let digest = format!("{:x}", Sha256::digest(content));
    let hash = digest.get(..HASH_LEN)?.to_string();

    let derived_dir = static_dir.join("derived");
    let written = fs::create_dir_all(&derived_dir)
        .and_then(|()| fs::write(derived_dir.join(format!("main.{hash}.css")), content));
    match written {
        Ok(()) => Some(hash),
        Err(e) => {
            println!("cargo:warning=Could not write hashed stylesheet: {e}");
            None
        }
    }
}
