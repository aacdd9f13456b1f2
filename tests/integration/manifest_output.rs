//! Integration tests for manifest rendering and artifact writing

use filelist::manifest::{Manifest, ManifestWriter};
use filelist::source::{ListingSource, PathSource};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const URL: &str = "https://raw.githubusercontent.com/Sleitnick/AeroGameFramework/master/";

fn listed_manifest() -> Manifest {
    let source = ListingSource::from_text(
        "src/ServerStorage/Aero/Services/DataService.lua\nsrc/ReplicatedStorage/Aero/Shared/Thread.lua\nsrc/StarterPlayer/README.md\n",
        "src",
    );
    Manifest::tree(URL, source.build_tree().unwrap())
}

/// Test that both artifacts are written and describe the same document
#[test]
fn test_written_artifacts_are_equivalent() {
    let temp_dir = TempDir::new().unwrap();
    let writer = ManifestWriter::new(temp_dir.path(), "filelist.json", "filelist.min.json");
    let written = writer.write(&listed_manifest()).unwrap();

    let pretty = fs::read_to_string(&written.pretty_path).unwrap();
    let compact = fs::read_to_string(&written.compact_path).unwrap();

    assert!(pretty.lines().count() > 1);
    assert_eq!(compact.lines().count(), 1);
    assert!(!compact.contains(' '));
    assert!(compact.len() < pretty.len());

    let pretty: Value = serde_json::from_str(&pretty).unwrap();
    let compact: Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(pretty, compact);
}

/// Test the document shape end to end
#[test]
fn test_tree_document_shape() {
    let manifest = listed_manifest();
    let value: Value = serde_json::from_slice(&manifest.render_compact().unwrap()).unwrap();

    assert_eq!(value["url"], URL);
    assert_eq!(value["paths"]["type"], "directory");
    assert_eq!(value["paths"]["name"], "src");

    let server = &value["paths"]["children"][0];
    assert_eq!(server["name"], "ServerStorage");
    assert_eq!(
        server["children"][0]["children"][0]["children"][0],
        json!({"type": "file", "name": "DataService.lua"})
    );

    // A leaf without the source extension is recorded as an empty directory
    let starter = &value["paths"]["children"][2];
    assert_eq!(
        starter["children"][0],
        json!({"type": "directory", "name": "README.md", "children": []})
    );
}

/// Test the documented flat ordering example
#[test]
fn test_flat_ordering_example() {
    let manifest = Manifest::flat(
        URL,
        ["d/e/f.lua", "bb/c.lua", "a.lua", "zz.lua", "yy.lua"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    let value: Value = serde_json::from_slice(&manifest.render_compact().unwrap()).unwrap();
    assert_eq!(
        value["paths"],
        json!(["a.lua", "zz.lua", "yy.lua", "bb/c.lua", "d/e/f.lua"])
    );
}

/// Test that rebuilding overwrites previous artifacts in place
#[test]
fn test_rewrite_replaces_previous_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let writer = ManifestWriter::new(temp_dir.path(), "filelist.json", "filelist.min.json");
    writer.write(&listed_manifest()).unwrap();

    let smaller = Manifest::flat(URL, vec!["a.lua".to_string()]);
    let written = writer.write(&smaller).unwrap();

    let compact = fs::read_to_string(&written.compact_path).unwrap();
    assert_eq!(compact, format!(r#"{{"url":"{}","paths":["a.lua"]}}"#, URL));

    let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 2);
}
