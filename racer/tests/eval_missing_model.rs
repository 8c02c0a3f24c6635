use std::process::Command;
use tempdir::TempDir;

#[test]
fn test_eval_without_model_exits_with_status_1() -> anyhow::Result<()> {
    let dir = TempDir::new("eval_missing_model")?;
    let output = Command::new(env!("CARGO_BIN_EXE_eval_car_racing"))
        .current_dir(dir.path())
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Model file not found: ./models/final_car_racing_driver"));
    assert!(stdout.contains("train_car_racing"));
    assert!(!stdout.contains("Episode"));
    Ok(())
}
