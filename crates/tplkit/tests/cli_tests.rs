use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::process::Command;
use tplkit_testkit::TemplateDir;

fn tplkit() -> Command {
    let mut cmd = Command::new(cargo_bin!("tplkit"));
    cmd.env_remove("TPLKIT_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_render_with_set() {
    let dir = TemplateDir::new().with("hello", "Hi <!--[name]-->!");

    tplkit()
        .arg("render")
        .arg("hello")
        .arg("--folder")
        .arg(dir.path())
        .arg("--set")
        .arg("name=<b>")
        .assert()
        .success()
        .stdout("Hi &lt;b&gt;!");
}

#[test]
fn test_render_for_and_for_each() {
    let dir = TemplateDir::new().with(
        "list",
        "<!--for[items]-->[<!--{value}-->]<!--end[items]-->\n<!--forEach[rows]--><!--{i}-->:<!--{name}--> <!--end[rows]-->",
    );

    tplkit()
        .args(["render", "list", "--folder"])
        .arg(dir.path())
        .args(["--for", "items=a,b"])
        .args(["--for-each", r#"rows=[{"i":"%i1","name":"x"},{"i":"%i1","name":"y"}]"#])
        .assert()
        .success()
        .stdout("[a][b]\n1:x 2:y ");
}

#[test]
fn test_render_uses_document_root() {
    let dir = TemplateDir::new();
    std::fs::create_dir_all(dir.path().join("tmpl")).unwrap();
    std::fs::write(dir.path().join("tmpl").join("index.tpl"), "root page").unwrap();

    tplkit()
        .env("DOCUMENT_ROOT", dir.path())
        .args(["render", "index"])
        .assert()
        .success()
        .stdout("root page");
}

#[test]
fn test_render_keep_comments() {
    let dir = TemplateDir::new().with("c", "a<!-- x -->b");

    tplkit()
        .args(["render", "c", "--keep-comments", "--folder"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("a<!-- x -->b");
}

#[test]
fn test_render_missing_template_fails() {
    let dir = TemplateDir::new();

    tplkit()
        .args(["render", "absent", "--folder"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("TEMPLATE_NOT_FOUND"));
}

#[test]
fn test_render_missing_template_shown_with_errors() {
    let dir = TemplateDir::new();

    tplkit()
        .args(["render", "absent", "--show-errors", "--folder"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Template \"absent\" does not exist"));
}

#[test]
fn test_render_invalid_parameter_fails() {
    let dir = TemplateDir::new().with("t", "<!--[a]-->");

    tplkit()
        .args(["render", "t", "--set", "a..b=x", "--folder"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("TEMPLATE_INVALID_PARAMETER"));
}

#[test]
fn test_render_too_many_includes_fails() {
    let text: String = (0..3).map(|i| format!("<!--include[p{}]-->", i)).collect();
    let dir = TemplateDir::new().with("fan", &text);

    tplkit()
        .args(["render", "fan", "--max-includes", "2", "--folder"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("TEMPLATE_TOO_MANY_INCLUDES"));
}

#[test]
fn test_render_bad_pair_fails() {
    let dir = TemplateDir::new().with("t", "x");

    tplkit()
        .args(["render", "t", "--set", "novalue", "--folder"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--set expects NAME=VALUE"));
}

#[test]
fn test_render_config_file() {
    let dir = TemplateDir::new();
    std::fs::write(dir.path().join("page.html"), "from html").unwrap();
    let config = dir.path().join("tplkit.toml");
    std::fs::write(
        &config,
        format!(
            "[loader]\nfolder = {:?}\nextension = \".html\"\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    tplkit()
        .args(["render", "page", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout("from html");
}

#[test]
fn test_cache_list_and_clear() {
    let dir = TemplateDir::new().with("p", "cached <!--[v]-->");

    tplkit()
        .args(["render", "p", "--cache", "--set", "v=1", "--folder"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("cached 1");

    // served from cache, the new value is ignored
    tplkit()
        .args(["render", "p", "--cache", "--set", "v=2", "--folder"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("cached 1");

    let output = tplkit()
        .args(["cache", "list", "--json", "--folder"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed[0]["template_name"], "p");
    assert_eq!(listed[0]["age_hours"], 0);

    tplkit()
        .args(["cache", "clear", "--folder"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache cleared"));
    assert!(dir.read_cache().is_none());

    tplkit()
        .args(["cache", "list", "--folder"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No cached templates"));
}
