//! Saving and loading rule-set programs.
//!
//! A program is a small fixed table, so it is stored as a pretty-printed JSON
//! document. Populations are never persisted; only single programs travel
//! between the `evolve`, `run`, and `watch` commands.

use std::fs;
use std::io;
use std::path::Path;

use crate::sim::Program;

/// Save a program to `path` as JSON.
///
/// # Errors
///
/// Returns an error if serialization or file I/O fails.
pub fn save_program(program: &Program, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(program)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Load a program from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid program
/// document.
pub fn load_program(path: &Path) -> io::Result<Program> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_save_load_round_trip() {
        let mut rng = SmallRng::seed_from_u64(51);
        let program = Program::random(&mut rng);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("best.json");

        save_program(&program, &path).expect("save");
        let loaded = load_program(&path).expect("load");

        assert_eq!(program, loaded);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "not a program").expect("write");

        let err = load_program(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_program(&dir.path().join("absent.json")).is_err());
    }
}
