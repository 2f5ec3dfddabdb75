use std::fs;
use std::path::PathBuf;
use std::sync::Once;

use sectconf::{
    load, load_file, load_file_or_panic, load_new, record, Conf, ConfError, LookupError,
    ParseOptions, Parser, SyntaxError, TypeError, GLOBAL_SECTION,
};
use tempfile::TempDir;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

const SAMPLE: &str = r#"# service config
StringItem: value
IntItem: 1000
FloatItem: 90.5
[@IntArray]: 10 12 13
[@FloatArray@,]: 1.1, 1.2, 12.33
[@Names@;]: alpha; beta;; gamma

[Database]
host: db.internal
port: 5432
[@replicas@,]: r1.internal, r2.internal

[Cache]
host: cache.internal
ttl_seconds: 30
"#;

fn write_conf(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[derive(Debug, Default, PartialEq)]
struct Database {
    host: String,
    port: u16,
    replicas: Vec<String>,
}

#[derive(Debug, Default, PartialEq)]
struct Cache {
    host: String,
    ttl_seconds: u32,
}

#[derive(Debug, Default)]
struct Service {
    string_item: String,
    int_item: i32,
    float_item: f64,
    int_array: Vec<i64>,
    float_array: Vec<f32>,
    names: Vec<String>,
    database: Database,
    cache: Cache,
}

record!(Database {
    field "Host" => host,
    field "Port" => port,
    field "Replicas" => replicas,
});

record!(Cache {
    field "Host" => host,
    field "TtlSeconds" => ttl_seconds,
});

record!(Service {
    field "StringItem" => string_item,
    field "IntItem" => int_item,
    field "FloatItem" => float_item,
    field "IntArray" => int_array,
    field "FloatArray" => float_array,
    field "Names" => names,
    section "Database" => database,
    section "Cache" => cache,
});

// ===========================================
// Parsing from disk
// ===========================================

#[test]
fn test_parse_file_and_read_values() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_conf(&dir, "service.conf", SAMPLE);

    let mut conf = Conf::from_file(&path).unwrap();

    assert_eq!(conf.get_string("StringItem").unwrap(), "value");
    assert_eq!(conf.get_int("IntItem").unwrap(), 1000);
    assert_eq!(conf.get_float("FloatItem").unwrap(), 90.5);
    assert_eq!(conf.get_int_array("IntArray").unwrap(), vec![10, 12, 13]);
    assert_eq!(
        conf.get_float_array("FloatArray").unwrap(),
        vec![1.1, 1.2, 12.33]
    );
    assert_eq!(
        conf.get_string_array("Names").unwrap(),
        vec!["alpha", "beta", "gamma"]
    );

    assert_eq!(
        conf.section_names(),
        vec![GLOBAL_SECTION, "Database", "Cache"]
    );

    conf.section("Database").unwrap();
    assert_eq!(conf.get_string("host").unwrap(), "db.internal");
    assert!(!conf.has_item("StringItem"));

    conf.section("Cache").unwrap();
    assert_eq!(conf.get_string("host").unwrap(), "cache.internal");

    conf.set_global_section();
    assert!(conf.has_item("StringItem"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Conf::from_file(dir.path().join("absent.conf"));
    match result {
        Err(ConfError::Io { path, .. }) => assert!(path.ends_with("absent.conf")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_parse_error_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = write_conf(&dir, "bad.conf", "a: 1\n\n# note\n[S]\nb: 2\n[S]\n");

    let err = Conf::from_file(&path).unwrap_err();
    assert_eq!(err.line(), Some(6));
    assert!(matches!(
        err,
        ConfError::Syntax(SyntaxError::DuplicateSection { first: 4, .. })
    ));
}

#[test]
fn test_crlf_file() {
    let dir = TempDir::new().unwrap();
    let path = write_conf(&dir, "crlf.conf", "a: 1\r\n[S]\r\nb: two words\r\n");

    let mut conf = Conf::from_file(&path).unwrap();
    assert_eq!(conf.get_int("a").unwrap(), 1);
    conf.section("S").unwrap();
    assert_eq!(conf.get_string("b").unwrap(), "two words");
}

#[test]
fn test_options_from_toml_file() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let options_path = write_conf(&dir, "sectconf.toml", "separator = \",\"\ncomment = \";\"\n");
    let conf_path = write_conf(&dir, "app.conf", "; header\n[@ports]: 80,443\n");

    let options = ParseOptions::load(&options_path).unwrap();
    let conf = Parser::from_path(&conf_path)
        .with_options(options)
        .parse()
        .unwrap();
    assert_eq!(conf.get_int_array("ports").unwrap(), vec![80, 443]);
}

// ===========================================
// Loading records
// ===========================================

#[test]
fn test_load_file_into_record() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_conf(&dir, "service.conf", SAMPLE);

    let mut service = Service::default();
    load_file(&mut service, &path).unwrap();

    assert_eq!(service.string_item, "value");
    assert_eq!(service.int_item, 1000);
    assert_eq!(service.float_item, 90.5);
    assert_eq!(service.int_array, vec![10, 12, 13]);
    assert_eq!(service.float_array, vec![1.1f32, 1.2, 12.33]);
    assert_eq!(service.names, vec!["alpha", "beta", "gamma"]);
    assert_eq!(
        service.database,
        Database {
            host: "db.internal".into(),
            port: 5432,
            replicas: vec!["r1.internal".into(), "r2.internal".into()],
        }
    );
    assert_eq!(
        service.cache,
        Cache {
            host: "cache.internal".into(),
            ttl_seconds: 30,
        }
    );
}

#[test]
fn test_load_file_or_panic() {
    let dir = TempDir::new().unwrap();
    let path = write_conf(&dir, "service.conf", SAMPLE);

    let mut service = Service::default();
    load_file_or_panic(&mut service, &path);
    assert_eq!(service.cache.ttl_seconds, 30);
}

#[test]
#[should_panic(expected = "empty value")]
fn test_load_file_or_panic_on_bad_file() {
    let dir = TempDir::new().unwrap();
    let path = write_conf(&dir, "bad.conf", "a:\nb: 1\n");

    let mut service = Service::default();
    load_file_or_panic(&mut service, &path);
}

#[test]
fn test_load_keeps_defaults_for_absent_keys() {
    let mut conf: Conf = "[cache]\nttl_seconds: 5".parse().unwrap();
    let mut service = Service {
        string_item: "fallback".into(),
        ..Default::default()
    };
    service.database.port = 6543;

    load(&mut service, &mut conf).unwrap();
    assert_eq!(service.string_item, "fallback");
    assert_eq!(service.database.port, 6543);
    assert_eq!(service.cache.ttl_seconds, 5);
}

#[test]
fn test_load_new_reports_bad_element() {
    let mut conf: Conf = "[@IntArray]: 1 2 x".parse().unwrap();
    match load_new::<Service>(&mut conf) {
        Err(ConfError::Type(TypeError::InvalidInt { value, .. })) => assert_eq!(value, "x"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_load_reports_missing_section_for_item() {
    let mut conf: Conf = "database: sqlite".parse().unwrap();
    let err = load_new::<Service>(&mut conf).unwrap_err();
    assert!(matches!(
        err,
        ConfError::Lookup(LookupError::MissingSection { .. })
    ));
}

#[test]
fn test_same_file_parses_identically_twice() {
    let dir = TempDir::new().unwrap();
    let path = write_conf(&dir, "bad.conf", "ok: 1\nbroken\n");

    let first = Conf::from_file(&path).unwrap_err().to_string();
    let second = Conf::from_file(&path).unwrap_err().to_string();
    assert_eq!(first, second);
}
