use std::path::Path;

use crate::{
    utils::{parse_device_list, parse_file_listing, select_device},
    Adb, BridgeError, CommandOutput, MockCommandRunner,
};

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn failed(stderr: &str) -> CommandOutput {
    CommandOutput {
        code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

fn expect_once(args: &'static [&'static str], output: CommandOutput) -> MockCommandRunner {
    let mut runner = MockCommandRunner::new();
    runner
        .expect_run()
        .withf(move |actual: &[String]| actual == args)
        .times(1)
        .returning(move |_| Ok(output.clone()));
    runner
}

#[test]
fn test_parse_device_list_keeps_only_ready_devices() {
    let output = "List of devices attached\nABC123\tdevice\nXYZ789\tunauthorized\n";
    assert_eq!(parse_device_list(output), vec!["ABC123".to_string()]);
}

#[test]
fn test_parse_device_list_handles_long_format_and_blank_lines() {
    let output = "* daemon started successfully\nList of devices attached\n\
                  emulator-5554          device product:sdk_gphone64 model:sdk transport_id:1\n\
                  R58M12345  offline\n\n0123456789ABCDEF\tdevice\r\n";
    assert_eq!(
        parse_device_list(output),
        vec!["emulator-5554".to_string(), "0123456789ABCDEF".to_string()]
    );
}

#[test]
fn test_parse_device_list_ignores_header_only_output() {
    assert!(parse_device_list("List of devices attached\n\n").is_empty());
    assert!(parse_device_list("").is_empty());
}

#[test]
fn test_parse_file_listing_drops_blank_entries() {
    let output = "/data/misc/keystore/a\r\n\n/data/misc/keystore/user_0/b\n  \n";
    assert_eq!(
        parse_file_listing(output),
        vec![
            "/data/misc/keystore/a".to_string(),
            "/data/misc/keystore/user_0/b".to_string()
        ]
    );
}

#[test]
fn test_select_device() {
    let connected = vec!["first".to_string(), "second".to_string()];
    assert_eq!(select_device(&connected, None).unwrap(), "first");
    assert_eq!(select_device(&connected, Some("second")).unwrap(), "second");
    assert!(matches!(
        select_device(&connected, Some("third")),
        Err(BridgeError::DeviceNotFound { device, .. }) if device == "third"
    ));
    assert!(matches!(
        select_device(&[], None),
        Err(BridgeError::NoDeviceConnected)
    ));
}

#[tokio::test]
async fn test_start_server_failure_is_transport_unavailable() {
    let adb = Adb::new(expect_once(&["start-server"], failed("cannot bind")));
    match adb.start_server().await {
        Err(BridgeError::TransportUnavailable { command, reason }) => {
            assert_eq!(command, "adb start-server");
            assert_eq!(reason, "cannot bind");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_devices() {
    let adb = Adb::new(expect_once(
        &["devices"],
        ok("List of devices attached\nABC123\tdevice\nXYZ789\tunauthorized\n"),
    ));
    assert_eq!(adb.list_devices().await.unwrap(), vec!["ABC123".to_string()]);
}

#[tokio::test]
async fn test_list_devices_without_ready_device() {
    let adb = Adb::new(expect_once(
        &["devices"],
        ok("List of devices attached\nXYZ789\tunauthorized\n"),
    ));
    assert!(matches!(
        adb.list_devices().await,
        Err(BridgeError::NoDeviceConnected)
    ));
}

#[tokio::test]
async fn test_pull_file_argument_shape() {
    let adb = Adb::new(expect_once(
        &["-s", "ABC123", "pull", "/data/keybox.xml", "/tmp/out/keybox.xml"],
        ok("1 file pulled"),
    ));
    adb.pull_file("ABC123", "/data/keybox.xml", Path::new("/tmp/out/keybox.xml"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_pull_file_failure_names_remote_path() {
    let adb = Adb::new(expect_once(
        &["-s", "ABC123", "pull", "/data/missing", "/tmp/out/missing"],
        failed("adb: error: remote object '/data/missing' does not exist"),
    ));
    let err = adb
        .pull_file("ABC123", "/data/missing", Path::new("/tmp/out/missing"))
        .await
        .unwrap_err();
    assert!(matches!(
        &err,
        BridgeError::PullFailed { remote_path, .. } if remote_path == "/data/missing"
    ));
    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
async fn test_list_remote_files() {
    let adb = Adb::new(expect_once(
        &["-s", "ABC123", "shell", "find", "/data/misc/keystore/", "-type", "f"],
        ok("/data/misc/keystore/persistent.sqlite\n/data/misc/keystore/user_0/key\n"),
    ));
    let files = adb
        .list_remote_files("ABC123", "/data/misc/keystore/")
        .await
        .unwrap();
    assert_eq!(
        files,
        vec![
            "/data/misc/keystore/persistent.sqlite".to_string(),
            "/data/misc/keystore/user_0/key".to_string()
        ]
    );
}

#[tokio::test]
async fn test_list_remote_files_empty_directory_is_not_an_error() {
    let adb = Adb::new(expect_once(
        &["-s", "ABC123", "shell", "find", "/vendor/etc/keystore/", "-type", "f"],
        ok(""),
    ));
    assert!(adb
        .list_remote_files("ABC123", "/vendor/etc/keystore/")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_list_remote_files_failure() {
    let adb = Adb::new(expect_once(
        &["-s", "ABC123", "shell", "find", "/mnt/vendor/keystore/", "-type", "f"],
        failed("find: '/mnt/vendor/keystore/': Permission denied"),
    ));
    assert!(matches!(
        adb.list_remote_files("ABC123", "/mnt/vendor/keystore/").await,
        Err(BridgeError::RemoteListFailed { remote_dir, .. }) if remote_dir == "/mnt/vendor/keystore/"
    ));
}

#[tokio::test]
async fn test_run_remote_shell_returns_exit_status() {
    let adb = Adb::new(expect_once(
        &["-s", "ABC123", "shell", "su", "-c", "id"],
        failed("/system/bin/sh: su: not found"),
    ));
    let output = adb
        .run_remote_shell("ABC123", &["su", "-c", "id"])
        .await
        .unwrap();
    assert_eq!(output.code, Some(1));
    assert!(!output.success());
}

#[tokio::test]
async fn test_root_refused_on_production_build() {
    let adb = Adb::new(expect_once(
        &["-s", "ABC123", "root"],
        ok("adbd cannot run as root in production builds\n"),
    ));
    match adb.root("ABC123").await {
        Err(BridgeError::RootRestartFailed { reason }) => {
            assert_eq!(reason, "adbd cannot run as root in production builds");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_root_success() {
    let adb = Adb::new(expect_once(
        &["-s", "ABC123", "root"],
        ok("restarting adbd as root\n"),
    ));
    adb.root("ABC123").await.unwrap();
}

#[test]
fn test_failure_reason_fallbacks() {
    let mut output = CommandOutput {
        code: Some(3),
        stdout: "  from stdout \n".to_string(),
        stderr: " \n".to_string(),
    };
    assert_eq!(output.failure_reason(), "from stdout");
    output.stdout.clear();
    assert_eq!(output.failure_reason(), "exit status 3");
    output.code = None;
    assert_eq!(output.failure_reason(), "terminated by signal");
}

#[cfg(unix)]
mod process_runner {
    use std::time::Duration;

    use crate::{Adb, BridgeError, CommandRunner, ProcessRunner};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[tokio::test]
    async fn test_captures_output_and_exit_code() {
        let runner = ProcessRunner::new("sh", Some(Duration::from_secs(10)));
        let output = runner
            .run(&args(&["-c", "echo out; echo err >&2; exit 3"]))
            .await
            .unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[tokio::test]
    async fn test_missing_program_is_transport_unavailable() {
        let runner = ProcessRunner::new("/nonexistent/keypull-adb", None);
        assert!(matches!(
            runner.run(&args(&["devices"])).await,
            Err(BridgeError::TransportUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_timeout_kills_hung_command() {
        let runner = ProcessRunner::new("sh", Some(Duration::from_millis(100)));
        match runner.run(&args(&["-c", "sleep 5"])).await {
            Err(BridgeError::CommandTimedOut { command, timeout }) => {
                assert_eq!(command, "sh -c sleep 5");
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_start_server_names_configured_program() {
        let adb = Adb::with_program("false", Some(Duration::from_secs(10)));
        assert_eq!(adb.program(), "false");
        match adb.start_server().await {
            Err(BridgeError::TransportUnavailable { command, reason }) => {
                assert_eq!(command, "false start-server");
                assert_eq!(reason, "exit status 1");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
