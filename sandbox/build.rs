use fs_extra::dir::{copy, CopyOptions};
use std::env;
use std::path::{Path, PathBuf};

const ASSETS_FOLDER_NAME: &str = "assets";

// OUT_DIR is target/<profile>/build/<package>-<hash>/out; the binary lives in target/<profile>.
const PROFILE_DIRECTORY_UP_LEVEL: usize = 3;

fn main() {
    println!("cargo:rerun-if-changed={ASSETS_FOLDER_NAME}");

    let assets = Path::new(ASSETS_FOLDER_NAME);
    let out_directory = env::var("OUT_DIR").expect("cargo did not provide OUT_DIR");

    let profile_directory = PathBuf::from(&out_directory)
        .ancestors()
        .nth(PROFILE_DIRECTORY_UP_LEVEL)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| panic!("unexpected build output layout: {out_directory}"));

    let mut options = CopyOptions::new();
    options.overwrite = true;
    copy(assets, &profile_directory, &options)
        .unwrap_or_else(|error| panic!("failed to copy {assets:?} into {profile_directory:?}: {error}"));
}
