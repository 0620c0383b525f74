use std::process::Command;

fn service_agent() -> Command {
    Command::new(env!("CARGO_BIN_EXE_service-agent"))
}

#[test]
fn test_relative_path_exits_with_failure() {
    let output = service_agent()
        .args(["--path", "org/bluez/agent"])
        .output()
        .expect("failed to run service-agent");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid path"));
}

#[test]
fn test_inline_relative_path_exits_with_failure() {
    let output = service_agent()
        .arg("--path=relative")
        .output()
        .expect("failed to run service-agent");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_successfully() {
    let output = service_agent()
        .arg("--help")
        .output()
        .expect("failed to run service-agent");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--description"));
}

#[test]
fn test_version_exits_successfully() {
    let output = service_agent()
        .arg("-V")
        .output()
        .expect("failed to run service-agent");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_option_exits_with_failure() {
    let output = service_agent()
        .arg("--frobnicate")
        .output()
        .expect("failed to run service-agent");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_value_exits_with_failure() {
    let output = service_agent()
        .arg("--name")
        .output()
        .expect("failed to run service-agent");

    assert_eq!(output.status.code(), Some(1));
}
