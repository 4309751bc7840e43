//! `set` substitution tests

use super::*;

#[test]
fn test_set_replaces_marker() {
    let mut text = "Hi <!--[name]-->!".to_string();
    set(&mut text, "name", "<b>").unwrap();
    assert_eq!(text, "Hi &lt;b&gt;!");
}

#[test]
fn test_set_replaces_every_occurrence() {
    let mut text = "<!--[a]-->,<!--[a]-->,<!--[a]-->".to_string();
    set(&mut text, "a", "x").unwrap();
    assert_eq!(text, "x,x,x");
}

#[test]
fn test_set_leaves_other_markers() {
    let mut text = "<!--[user.name]--> <!--[user]--> <!--[name]-->".to_string();
    set(&mut text, "user.name", "Ann").unwrap();
    assert_eq!(text, "Ann <!--[user]--> <!--[name]-->");
}

#[test]
fn test_set_empty_name_is_noop() {
    let mut text = "<!--[]-->".to_string();
    set(&mut text, "", "value").unwrap();
    assert_eq!(text, "<!--[]-->");
}

#[test]
fn test_set_missing_marker_is_noop() {
    let mut text = "no markers here".to_string();
    set(&mut text, "title", "x").unwrap();
    assert_eq!(text, "no markers here");
}

#[test]
fn test_set_on_page() {
    let mut text = super::helpers::page();
    set(&mut text, "page.title", "Docs & Notes").unwrap();
    assert!(text.starts_with("<h1>Docs &amp; Notes</h1>\n"));
}
