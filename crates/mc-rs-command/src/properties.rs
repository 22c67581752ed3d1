//! Plain-text server files: the op allow-list and `server.properties`.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

const SPAWN_MONSTERS: &str = "spawn-monsters";

/// Read the op allow-list, one name per line. A missing file yields no ops.
pub fn load_ops(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let ops: Vec<String> = contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(String::from)
                .collect();
            info!("Loaded {} ops from {}", ops.len(), path.display());
            ops
        }
        Err(e) => {
            warn!("Failed to read {}: {e}", path.display());
            Vec::new()
        }
    }
}

/// Parse `key=value` lines in file order, skipping comments.
pub fn parse_properties(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

/// Read `server.properties`, or nothing if the file cannot be read.
pub fn load_properties(path: &Path) -> Vec<(String, String)> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_properties(&contents),
        Err(e) => {
            warn!("Failed to read {}: {e}", path.display());
            Vec::new()
        }
    }
}

/// Flip `spawn-monsters` in place and return the new value. Other lines are
/// written back untouched.
pub fn toggle_mobs(path: &Path) -> io::Result<bool> {
    let contents = fs::read_to_string(path)?;
    let mut enabled = None;
    let mut lines: Vec<String> = contents
        .lines()
        .map(|line| match line.split_once('=') {
            Some((key, value)) if key.trim() == SPAWN_MONSTERS => {
                let flipped = value.trim() != "true";
                enabled = Some(flipped);
                format!("{SPAWN_MONSTERS}={flipped}")
            }
            _ => line.to_string(),
        })
        .collect();

    let enabled = match enabled {
        Some(enabled) => enabled,
        None => {
            lines.push(format!("{SPAWN_MONSTERS}=false"));
            false
        }
    };
    let mut out = lines.join("\n");
    out.push('\n');
    fs::write(path, out)?;
    Ok(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("mc-rs-props-{}", rand::random::<u64>()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn properties_keep_file_order() {
        let props = parse_properties("#Minecraft server properties\nlevel-name=world\nspawn-monsters=true\n\npvp = false\n");
        assert_eq!(
            props,
            vec![
                ("level-name".to_string(), "world".to_string()),
                ("spawn-monsters".to_string(), "true".to_string()),
                ("pvp".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn ops_skip_blank_lines() {
        let path = temp_file("ops.txt", "basicxman\n\n  Mike_N_7 \n");
        assert_eq!(load_ops(&path), vec!["basicxman", "Mike_N_7"]);
        assert!(load_ops(&path.with_file_name("missing.txt")).is_empty());
    }

    #[test]
    fn toggle_mobs_flips_and_restores() {
        let path = temp_file("server.properties", "level-name=world\nspawn-monsters=true\n");
        assert!(!toggle_mobs(&path).unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "level-name=world\nspawn-monsters=false\n"
        );
        assert!(toggle_mobs(&path).unwrap());
    }
}
