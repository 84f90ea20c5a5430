// vidcheck-core/tests/common/mod.rs
//
// Shared fixtures: a fake ffmpeg that classifies inputs by their first bytes,
// and helpers to lay out video directories.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Behaves like `ffmpeg -v error -i <input> -f null -` for fixture files:
/// - `CORRUPT...`  two error lines on stderr, exit 1
/// - `HANG...`     never finishes
/// - `GARBLED...`  invalid UTF-8 on stderr
/// - `ARGV...`     echoes its own arguments to stderr
/// - anything else decodes silently
const FAKE_FFMPEG: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "ffmpeg version n0.0-fake"
    exit 0
fi
all="$*"
input=""
while [ $# -gt 0 ]; do
    if [ "$1" = "-i" ]; then
        shift
        input="$1"
    fi
    shift
done
case "$(head -c 8 "$input")" in
    CORRUPT*)
        echo "[mov,mp4,m4a,3gp,3g2,mj2 @ 0x5581] moov atom not found" >&2
        echo "$input: Invalid data found when processing input" >&2
        exit 1
        ;;
    HANG*)
        exec sleep 30
        ;;
    ARGV*)
        printf '%s\n' "$all" >&2
        exit 0
        ;;
    GARBLED*)
        printf '\377\376 broken\n' >&2
        exit 1
        ;;
esac
exit 0
"#;

/// Writes the fake ffmpeg into `dir` and returns its path.
pub fn fake_ffmpeg(dir: &Path) -> PathBuf {
    let path = dir.join("ffmpeg");
    fs::write(&path, FAKE_FFMPEG).expect("write fake ffmpeg");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake ffmpeg");
    path
}

/// Creates `relative` under `root` (with parents) holding `contents`.
pub fn video(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dirs");
    }
    fs::write(&path, contents).expect("write fixture");
    path
}

pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
