//! Tests for single password encryption.

use crate::support::*;

use travis_encrypt::core::document::{ConfigDocument, Node};

fn env_global(contents: &str) -> Vec<Node> {
    let doc = ConfigDocument::parse(contents).unwrap();
    doc.get(&["env", "global"])
        .and_then(Node::as_sequence)
        .expect("env.global is a list")
        .to_vec()
}

#[test]
fn test_password_printed_to_stdout() {
    let t = Test::new();

    let output = t.encrypt("SUPER_SECURE_PASSWORD", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "Please add the following to your .travis.yml:");
    assert_eq!(decrypt(&printed_secure(&output)), "SUPER_SECURE_PASSWORD");
}

#[test]
fn test_password_read_from_stdin() {
    let t = Test::new();

    let output = t
        .cmd()
        .args([USERNAME, REPOSITORY])
        .write_stdin("piped secret\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(decrypt(&printed_secure(&output)), "piped secret");
}

#[test]
fn test_each_run_yields_new_ciphertext() {
    let t = Test::new();

    let first = printed_secure(&t.encrypt("same", &[]));
    let second = printed_secure(&t.encrypt("same", &[]));
    assert_ne!(first, second);
    assert_eq!(decrypt(&first), decrypt(&second));
}

#[test]
fn test_password_added_to_empty_file() {
    let t = Test::new();
    t.write(".travis.yml", "");

    let output = t.encrypt_to_file("SUPER_SECURE_PASSWORD", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "Encrypted password added to .travis.yml");

    let contents = t.read(".travis.yml");
    assert!(contents.starts_with("password:\n  secure: "));
    assert_eq!(
        decrypt(&secure_at(&contents, &["password", "secure"])),
        "SUPER_SECURE_PASSWORD"
    );
}

#[test]
fn test_password_appended_after_existing_keys() {
    let t = Test::new();
    t.write(".travis.yml", "language: python\ndist: trusty\nsudo: false\n");

    let output = t.encrypt_to_file("SUPER_SECURE_PASSWORD", &[]);
    assert_success(&output);

    let contents = t.read(".travis.yml");
    assert!(
        contents.starts_with("language: python\ndist: trusty\nsudo: false\npassword:\n  secure: "),
        "unexpected layout:\n{}",
        contents
    );
}

#[test]
fn test_missing_file_is_created() {
    let t = Test::new();

    let output = t.encrypt_to_file("SUPER_SECURE_PASSWORD", &[]);
    assert_success(&output);

    let contents = t.read(".travis.yml");
    assert_eq!(
        decrypt(&secure_at(&contents, &["password", "secure"])),
        "SUPER_SECURE_PASSWORD"
    );
}

#[test]
fn test_deploy_password_keeps_siblings() {
    let t = Test::new();
    t.travis_yml();

    let output = t.encrypt_to_file("SUPER_SECURE_PASSWORD", &["--deploy"]);
    assert_success(&output);

    let contents = t.read(".travis.yml");
    let doc = ConfigDocument::parse(&contents).unwrap();
    let deploy = doc.get(&["deploy"]).and_then(Node::as_mapping).unwrap();
    assert_eq!(
        deploy.keys().collect::<Vec<_>>(),
        ["provider", "user", "password", "on"]
    );
    assert_eq!(
        decrypt(&secure_at(&contents, &["deploy", "password", "secure"])),
        "SUPER_SECURE_PASSWORD"
    );
    assert_eq!(
        doc.keys().collect::<Vec<_>>(),
        [
            "language",
            "dist",
            "sudo",
            "python",
            "addons",
            "install",
            "script",
            "after_success",
            "env",
            "deploy",
            "notifications"
        ]
    );
}

#[test]
fn test_deploy_created_when_absent() {
    let t = Test::new();
    t.write(".travis.yml", "language: python\n");

    assert_success(&t.encrypt_to_file("pw", &["--deploy"]));

    let contents = t.read(".travis.yml");
    assert!(contents.starts_with("language: python\ndeploy:\n  password:\n    secure: "));
    assert_eq!(decrypt(&secure_at(&contents, &["deploy", "password", "secure"])), "pw");
}

#[test]
fn test_env_secure_created_when_absent() {
    let t = Test::new();
    t.write(".travis.yml", "language: python\n");

    assert_success(&t.encrypt_to_file("pw", &["--env"]));

    let contents = t.read(".travis.yml");
    assert!(contents.starts_with("language: python\nenv:\n  global:\n    secure: "));
    assert_eq!(decrypt(&secure_at(&contents, &["env", "global", "secure"])), "pw");
}

#[test]
fn test_env_list_updates_secure_item() {
    let t = Test::new();
    t.travis_yml();

    let output = t.encrypt_to_file("SUPER_SECURE_PASSWORD", &["--env"]);
    assert_success(&output);

    let items = env_global(&t.read(".travis.yml"));
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_str(), Some("PYTHONHASHSEED=0"));
    let secure = items[1].get("secure").and_then(Node::as_str).unwrap();
    assert_eq!(decrypt(secure), "SUPER_SECURE_PASSWORD");
}

#[test]
fn test_env_list_without_secure_item_appends_and_warns() {
    let t = Test::new();
    t.write(".travis.yml", "env:\n  global:\n  - A=1\n  - B=2\n");

    let output = t.encrypt_to_file("pw", &["--env"]);
    assert_success(&output);
    assert_stderr_contains(&output, "appended");

    let items = env_global(&t.read(".travis.yml"));
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_str(), Some("A=1"));
    assert_eq!(items[1].as_str(), Some("B=2"));
    assert_eq!(decrypt(items[2].get("secure").and_then(Node::as_str).unwrap()), "pw");
}

#[test]
fn test_existing_secure_value_overwritten() {
    let t = Test::new();
    t.write(".travis.yml", "password:\n  secure: OLD\nlanguage: python\n");

    assert_success(&t.encrypt_to_file("new", &[]));

    let contents = t.read(".travis.yml");
    assert!(contents.starts_with("password:\n  secure: "));
    assert!(contents.ends_with("language: python\n"));
    assert!(!contents.contains("OLD"));
}
