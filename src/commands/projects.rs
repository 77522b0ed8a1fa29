//! Project listing command.

use anyhow::Result;

use crate::accessors::CursorDb;

/// Print the registered projects as a table, or as JSON with `json`.
pub fn list(db: &CursorDb, detailed: bool, json: bool) -> Result<()> {
    if json {
        let listing = db.list_projects(detailed);
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let snapshot = db.snapshot();

    if snapshot.project_count() == 0 {
        println!("No Cursor projects found.");
        match db.registry().cursor_path() {
            Some(path) => println!("\nSearched: {}", path.display()),
            None => println!("\nNo Cursor data directory could be determined."),
        }
        println!("Use --cursor-path or --project-dirs to point at your Cursor data.");
        return Ok(());
    }

    println!("Cursor projects:\n");
    if detailed {
        println!("{:<24} {:<50} DATABASE", "NAME", "FOLDER");
        println!("{}", "-".repeat(110));
    } else {
        println!("{:<24} DATABASE", "NAME");
        println!("{}", "-".repeat(80));
    }

    for name in snapshot.project_names() {
        let Some(project) = snapshot.project(&name) else {
            continue;
        };
        if detailed {
            let folder = project.folder_uri.as_deref().unwrap_or("-");
            println!(
                "{:<24} {:<50} {}",
                truncate_string(&name, 22),
                truncate_string(folder, 48),
                project.display_path()
            );
        } else {
            println!(
                "{:<24} {}",
                truncate_string(&name, 22),
                project.display_path()
            );
        }
    }

    println!("\nTotal: {} project(s)", snapshot.project_count());
    match snapshot.global_db_path() {
        Some(path) => println!("Global storage: {}", path.display()),
        None => println!("Global storage: not found"),
    }
    if detailed && !snapshot.skipped().is_empty() {
        println!("\nSkipped workspaces:");
        for skipped in snapshot.skipped() {
            println!("  {} ({})", skipped.path.display(), skipped.reason);
        }
    }

    Ok(())
}

/// Truncate a string to fit within max_len, adding "..." if needed.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
