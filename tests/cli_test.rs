//! Tests for the `shareon` binary.

use std::fs;
use std::process::Command;

fn shareon() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shareon"))
}

#[test]
fn test_render_writes_bound_html() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("post.html");
    let output = dir.path().join("out.html");
    fs::write(
        &input,
        r#"<html><head><title>A Post</title></head><body>
<div class="shareon"><a class="telegram" data-text="hi">Telegram</a></div>
</body></html>"#,
    )
    .expect("write input");

    let status = shareon()
        .args(["render", input.to_str().unwrap(), "--url", "https://e.test/p"])
        .args(["-o", output.to_str().unwrap()])
        .status()
        .expect("run shareon");
    assert!(status.success());

    let html = fs::read_to_string(&output).expect("read output");
    assert!(html.contains(
        r#"href="https://telegram.me/share/url?url=https%3A%2F%2Fe.test%2Fp&amp;text=hi""#
    ));
    assert!(html.contains(r#"rel="noopener noreferrer""#));
}

#[test]
fn test_render_report_is_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("post.html");
    fs::write(
        &input,
        r#"<div class="shareon"><button class="vkontakte">VK</button><i>x</i></div>"#,
    )
    .expect("write input");

    let out = shareon()
        .args(["render", input.to_str().unwrap(), "--url", "u", "--title", "T"])
        .arg("--report")
        .output()
        .expect("run shareon");
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["containers"], 1);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["bindings"][0]["network"], "vkontakte");
    assert_eq!(report["bindings"][0]["target"], "click");
    assert_eq!(
        report["bindings"][0]["url"],
        "https://vk.com/share.php?url=u&title=T"
    );
}

#[test]
fn test_link_prints_single_url() {
    let out = shareon()
        .args(["link", "twitter", "--url", "https://e.test", "--title", "Hi there"])
        .args(["--via", "me"])
        .output()
        .expect("run shareon");
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "https://twitter.com/intent/tweet?url=https%3A%2F%2Fe.test&text=Hi%20there&via=me"
    );
}

#[test]
fn test_unknown_network_fails() {
    let out = shareon()
        .args(["link", "myspace", "--url", "u"])
        .output()
        .expect("run shareon");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unknown network: myspace"));
}

#[test]
fn test_missing_input_fails() {
    let out = shareon()
        .args(["render", "/nonexistent/page.html", "--url", "u"])
        .output()
        .expect("run shareon");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("error: I/O error"));
}

#[test]
fn test_networks_lists_all() {
    let out = shareon().arg("networks").output().expect("run shareon");
    let listing = String::from_utf8_lossy(&out.stdout);
    assert_eq!(listing.lines().count(), 13);
    assert!(listing.contains("whatsapp       https://wa.me/?text="));
}
