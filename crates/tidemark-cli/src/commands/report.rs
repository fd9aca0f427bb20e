use std::path::PathBuf;

pub(super) fn run(input: PathBuf) -> Result<(), String> {
    let results_path = input.join("results.json");
    if !results_path.exists() {
        return Err(format!("results.json not found in {}", input.display()));
    }
    let results = std::fs::read_to_string(results_path)
        .map_err(|err| format!("failed to read results: {}", err))?;
    println!(
        "{} cli: run results\n{}",
        tidemark_core::engine_name(),
        results
    );
    Ok(())
}
