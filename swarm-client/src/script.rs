use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use swarm_shared::ScheduledCommand;

/// Parse a command script: one JSON `ScheduledCommand` per line. Blank lines
/// and lines starting with `#` are skipped. The result is ordered by tick;
/// commands sharing a tick keep their file order.
pub fn parse_script(text: &str) -> Result<Vec<ScheduledCommand>> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command: ScheduledCommand = serde_json::from_str(line)
            .with_context(|| format!("Invalid command on line {}", index + 1))?;
        commands.push(command);
    }
    commands.sort_by_key(|c| c.tick);
    Ok(commands)
}

pub fn load_script(path: &Path) -> Result<Vec<ScheduledCommand>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let commands =
        parse_script(&text).with_context(|| format!("Failed to parse script {}", path.display()))?;
    log::info!("Loaded {} scripted commands from {}", commands.len(), path.display());
    Ok(commands)
}
