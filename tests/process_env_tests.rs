//! Tests against the real process environment

use envconf::{EnvConfig, LoadError, load};
use serial_test::serial;
use std::time::Duration;

#[derive(Debug, Default, EnvConfig)]
pub struct ServerConfig {
    #[env("host")]
    pub host: String,
    #[env("port")]
    pub port: u16,
    #[env("tags")]
    pub tags: Vec<String>,
    #[env("debug")]
    pub debug: bool,
    #[env("shutdown_timeout")]
    pub shutdown_timeout: Duration,
}

#[test]
#[serial]
fn test_load_from_process_env() {
    temp_env::with_vars(
        [
            ("ENVCONF_PROC_HOST", Some("0.0.0.0")),
            ("ENVCONF_PROC_PORT", Some("9000")),
            ("ENVCONF_PROC_TAGS", Some("a, b,,c")),
            ("ENVCONF_PROC_DEBUG", None),
            ("ENVCONF_PROC_SHUTDOWN_TIMEOUT", Some("1m30s")),
        ],
        || {
            let mut config = ServerConfig {
                debug: true,
                ..Default::default()
            };
            let report = load("envconf_proc", &mut config).unwrap();

            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 9000);
            assert_eq!(config.tags, vec!["a", "b", "c"]);
            assert!(config.debug);
            assert_eq!(config.shutdown_timeout, Duration::from_secs(90));
            assert_eq!(report.get("ENVCONF_PROC_DEBUG"), Some(false));
            assert_eq!(report.set_keys().count(), 4);
        },
    );
}

#[test]
#[serial]
fn test_process_env_parse_failure() {
    temp_env::with_var("ENVCONF_FAIL_PORT", Some("70000"), || {
        let err = load("ENVCONF_FAIL", &mut ServerConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { ref key, .. } if key == "ENVCONF_FAIL_PORT"));
    });
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_unicode_value_fails() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    temp_env::with_var(
        "ENVCONF_BYTES_HOST",
        Some(OsStr::from_bytes(b"\xffhost")),
        || {
            let err = load("envconf_bytes", &mut ServerConfig::default()).unwrap_err();
            assert_eq!(
                err,
                LoadError::NotUnicode {
                    key: "ENVCONF_BYTES_HOST".into()
                }
            );
        },
    );
}
