//! Command handlers for CLI subcommands.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use takeoff_core::export::{export_file_name, render_print_view, to_csv, write_csv, TakeoffReport};
use takeoff_core::file_io::{atomic_write, load_project_or_input, save_project};
use takeoff_core::input::{ProjectInput, RoofConfig};
use takeoff_core::units::FeetInches;
use takeoff_core::{FileLock, MaterialItem, TakeoffError, TakeoffProject, TakeoffResult};
use tracing::{info, warn};

use crate::cli::{Commands, OutputFormat};

/// Execute a CLI command.
pub fn execute(command: Commands) -> TakeoffResult<()> {
    match command {
        Commands::Calc { file, format, output } => cmd_calc(&file, format, output.as_deref()),
        Commands::New {
            file,
            name,
            estimator,
            job,
            force,
        } => cmd_new(&file, name, &estimator, &job, force),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Quick => cmd_quick(),
    }
}

fn load_checked(file: &Path) -> TakeoffResult<TakeoffProject> {
    if let Some(lock) = FileLock::check(file) {
        warn!(
            "{} is open by {} on {} since {}",
            file.display(),
            lock.user_id,
            lock.machine,
            lock.locked_at.format("%Y-%m-%d %H:%M")
        );
    }
    let project = load_project_or_input(file)?;
    project.input.validate()?;
    Ok(project)
}

fn cmd_calc(file: &Path, format: OutputFormat, output: Option<&Path>) -> TakeoffResult<()> {
    let project = load_checked(file)?;
    let items = project.calculate();
    let today = Local::now().date_naive();

    match output {
        Some(path) => {
            let path = resolve_output_path(path, project.name(), format, today);
            if format == OutputFormat::Csv {
                write_csv(&path, &items)?;
            } else {
                atomic_write(&path, render(&project, items, format, today)?.as_bytes())?;
                info!(path = %path.display(), "wrote takeoff");
            }
            println!("Wrote {}", path.display());
        }
        None => println!("{}", render(&project, items, format, today)?),
    }
    Ok(())
}

fn render(
    project: &TakeoffProject,
    items: Vec<MaterialItem>,
    format: OutputFormat,
    date: NaiveDate,
) -> TakeoffResult<String> {
    match format {
        OutputFormat::Table => Ok(render_print_view(&items, project.name(), date)),
        OutputFormat::Csv => Ok(to_csv(&items)),
        OutputFormat::Json => TakeoffReport::new(project, items).to_json(),
    }
}

/// A directory gets the generated export file name joined onto it.
fn resolve_output_path(path: &Path, project_name: Option<&str>, format: OutputFormat, date: NaiveDate) -> PathBuf {
    if !path.is_dir() {
        return path.to_path_buf();
    }
    path.join(export_file_name(project_name, date)).with_extension(format.extension())
}

fn cmd_new(file: &Path, name: Option<String>, estimator: &str, job: &str, force: bool) -> TakeoffResult<()> {
    if file.exists() && !force {
        return Err(TakeoffError::file_error(
            "create",
            file.display().to_string(),
            "file already exists (use --force to overwrite)",
        ));
    }

    let mut input = ProjectInput::single_room(FeetInches::new(20.0, 0.0), FeetInches::new(15.0, 0.0));
    input.project_name = name;
    let project = TakeoffProject::new(estimator, job).with_input(input);

    let lock = FileLock::acquire(file, lock_user(estimator))?;
    save_project(&project, lock.project_path())?;
    println!("Created {}", file.display());
    Ok(())
}

fn lock_user(estimator: &str) -> String {
    if estimator.is_empty() {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "lumberly".to_string())
    } else {
        estimator.to_string()
    }
}

fn cmd_validate(file: &Path) -> TakeoffResult<()> {
    let project = load_checked(file)?;
    println!(
        "{}: OK ({} room(s), {} opening(s), roof {})",
        file.display(),
        project.input.rooms.len(),
        project.input.openings.len(),
        if project.input.roof.include_roof { "included" } else { "not included" }
    );
    Ok(())
}

fn cmd_quick() -> TakeoffResult<()> {
    println!("Lumberly - Quick Takeoff");
    println!("========================");
    println!();

    let length_ft = prompt_f64("Building length (ft) [20.0]: ", 20.0);
    let width_ft = prompt_f64("Building width (ft) [15.0]: ", 15.0);
    let ceiling_ft = prompt_f64("Ceiling height (ft) [8.0]: ", 8.0);
    let waste_pct = prompt_f64("Waste factor (%) [10]: ", 10.0);
    let with_roof = prompt_yes_no("Include gable roof? [y/N]: ", false);

    let input = quick_input(length_ft, width_ft, ceiling_ft, waste_pct, with_roof)?;
    let items = takeoff_core::calculate_takeoff(&input);
    println!();
    println!("{}", render_print_view(&items, None, Local::now().date_naive()));
    Ok(())
}

/// Out-of-range waste is clamped, not rejected; dimensions are still validated.
fn quick_input(length_ft: f64, width_ft: f64, ceiling_ft: f64, waste_pct: f64, with_roof: bool) -> TakeoffResult<ProjectInput> {
    let mut input = ProjectInput::single_room(FeetInches::new(length_ft, 0.0), FeetInches::new(width_ft, 0.0));
    input.rooms[0].ceiling_height_ft = ceiling_ft;
    input.waste_factor_pct = waste_pct;
    if with_roof {
        input.roof = RoofConfig::included();
    }
    let input = input.normalized();
    input.validate()?;
    Ok(input)
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    Some(input.trim().to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn prompt_yes_no(prompt: &str, default: bool) -> bool {
    match prompt_line(prompt).as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("y") | Some("yes") => true,
        Some("n") | Some("no") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garage() -> TakeoffProject {
        let mut input = ProjectInput::single_room(FeetInches::new(20.0, 0.0), FeetInches::new(15.0, 0.0));
        input.project_name = Some("Smith Garage".to_string());
        TakeoffProject::from_input(input)
    }

    fn oct_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    #[test]
    fn test_render_table_is_print_view() {
        let project = garage();
        let out = render(&project, project.calculate(), OutputFormat::Table, oct_15()).unwrap();
        assert!(out.starts_with("Lumberly - Smith Garage\nMaterial List - 2026-10-15\n\nDescription"));
        assert!(out.ends_with(takeoff_core::export::ESTIMATE_DISCLAIMER));
    }

    #[test]
    fn test_render_csv_and_json() {
        let project = garage();
        let csv = render(&project, project.calculate(), OutputFormat::Csv, oct_15()).unwrap();
        assert!(csv.starts_with("Description,Quantity,Unit,Notes\n2x10 x 22' floor joists,13,pcs,"));

        let json = render(&project, project.calculate(), OutputFormat::Json, oct_15()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["project_name"], "Smith Garage");
        assert_eq!(value["items"][0]["quantity"], 13);
    }

    #[test]
    fn test_resolve_output_path() {
        let file = Path::new("/definitely/not/a/dir/out.csv");
        assert_eq!(resolve_output_path(file, None, OutputFormat::Csv, oct_15()), file);

        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_output_path(dir.path(), Some("Smith Garage"), OutputFormat::Json, oct_15());
        assert_eq!(resolved, dir.path().join("lumberly-Smith-Garage-2026-10-15.json"));
    }

    #[test]
    fn test_lock_user_prefers_estimator() {
        assert_eq!(lock_user("Pat"), "Pat");
        assert!(!lock_user("").is_empty());
    }

    #[test]
    fn test_calc_csv_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("garage.lbr");
        save_project(&garage(), &project_path).unwrap();

        cmd_calc(&project_path, OutputFormat::Csv, Some(dir.path())).unwrap();

        let name = export_file_name(Some("Smith Garage"), Local::now().date_naive());
        let written = std::fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(written, to_csv(&garage().calculate()));
    }

    #[test]
    fn test_calc_rejects_waste_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("garage.lbr");
        let mut project = garage();
        project.input.waste_factor_pct = 75.0;
        save_project(&project, &project_path).unwrap();

        let err = cmd_calc(&project_path, OutputFormat::Csv, Some(dir.path())).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_quick_input_clamps_waste() {
        let input = quick_input(20.0, 15.0, 8.0, 80.0, true).unwrap();
        assert_eq!(input.waste_factor_pct, 50.0);
        assert!(input.roof.include_roof);

        let input = quick_input(20.0, 15.0, 8.0, -5.0, false).unwrap();
        assert_eq!(input.waste_factor_pct, 0.0);

        let err = quick_input(0.0, 15.0, 8.0, 10.0, false).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_new_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.lbr");
        cmd_new(&path, Some("Deck".to_string()), "Pat", "26-014", false).unwrap();
        assert!(cmd_new(&path, None, "Pat", "", false).is_err());
        cmd_new(&path, None, "Pat", "", true).unwrap();
        assert!(FileLock::check(&path).is_none());
    }
}
