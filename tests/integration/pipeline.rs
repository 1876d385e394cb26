//! End-to-end revisioner behavior: renaming, ordering, passthrough, and the
//! streamed-contents hard failure.

use asset_rev::fingerprint::fingerprint;
use asset_rev::{FileRecord, PipelineItem, RevConfig, RevError, Revisioner};
use std::path::PathBuf;

fn empty_hash() -> String {
    fingerprint(b"", 8)
}

#[test]
fn test_revs_files() {
    let mut rev = Revisioner::new(RevConfig::default());

    let item = rev
        .process(FileRecord::new("unicorn.css", ".", Vec::new()))
        .unwrap()
        .unwrap();

    let expected = PathBuf::from(format!("unicorn-{}.css", empty_hash()));
    assert_eq!(item.record().path, expected);

    let revisioned = item.as_revisioned().unwrap();
    assert_eq!(revisioned.original_path, PathBuf::from("unicorn.css"));
    assert_eq!(revisioned.original_base, PathBuf::from("."));
}

#[test]
fn test_hash_is_stored_for_later() {
    let mut rev = Revisioner::new(RevConfig::default());

    let item = rev
        .process(FileRecord::new("unicorn.css", ".", Vec::new()))
        .unwrap()
        .unwrap();

    assert_eq!(item.as_revisioned().unwrap().hash, empty_hash());
}

#[test]
fn test_handles_dot_in_folder_name() {
    let mut rev = Revisioner::new(RevConfig::default());

    let item = rev
        .process(FileRecord::new("mysite.io/unicorn.css", ".", Vec::new()))
        .unwrap()
        .unwrap();

    let expected = PathBuf::from(format!("mysite.io/unicorn-{}.css", empty_hash()));
    assert_eq!(item.record().path, expected);
}

#[test]
fn test_contentless_records_pass_through_untouched() {
    let mut rev = Revisioner::new(RevConfig::default());

    let item = rev
        .process(FileRecord::absent("unicorn.css", "."))
        .unwrap()
        .unwrap();

    assert!(matches!(item, PipelineItem::Passthrough(_)));
    assert_eq!(item.record().path, PathBuf::from("unicorn.css"));
}

#[test]
fn test_streamed_contents_abort_the_run() {
    let mut rev = Revisioner::new(RevConfig::default());

    let error = rev
        .process(FileRecord::streamed("unicorn.css", "."))
        .unwrap_err();

    assert!(matches!(error, RevError::StreamedContents(_)));
}

#[test]
fn test_assets_emit_before_all_sourcemaps() {
    let mut rev = Revisioner::new(RevConfig::default());
    let mut emitted = Vec::new();

    for record in [
        FileRecord::new("a.js", ".", b"aaa".to_vec()),
        FileRecord::new("a.js.map", ".", b"not json".to_vec()),
        FileRecord::new("b.js", ".", b"bbb".to_vec()),
        FileRecord::new("b.js.map", ".", b"not json either".to_vec()),
    ] {
        if let Some(item) = rev.process(record).unwrap() {
            emitted.push(item);
        }
    }
    emitted.extend(rev.finalize().unwrap());

    let names: Vec<String> = emitted
        .iter()
        .map(|item| item.record().path.to_string_lossy().into_owned())
        .collect();

    assert_eq!(names.len(), 4);
    assert!(names[0].starts_with("a-") && names[0].ends_with(".js"));
    assert!(names[1].starts_with("b-") && names[1].ends_with(".js"));
    // Maps come last, in their original relative order.
    assert!(names[2].starts_with("a-") && names[2].ends_with(".js.map"));
    assert!(names[3].starts_with("b-") && names[3].ends_with(".js.map"));
}

#[test]
fn test_identical_content_same_hash_across_paths() {
    let mut rev = Revisioner::new(RevConfig::default());

    let first = rev
        .process(FileRecord::new("one/app.js", ".", b"same".to_vec()))
        .unwrap()
        .unwrap();
    let second = rev
        .process(FileRecord::new("two/app.js", ".", b"same".to_vec()))
        .unwrap()
        .unwrap();

    assert_eq!(
        first.as_revisioned().unwrap().hash,
        second.as_revisioned().unwrap().hash
    );
}

#[test]
fn test_fresh_instances_share_no_state() {
    let mut first = Revisioner::new(RevConfig::default());
    first
        .process(FileRecord::new("pastissada.css", ".", Vec::new()))
        .unwrap();

    // A second run must not see the first run's path index.
    let mut second = Revisioner::new(RevConfig::default());
    let held = second
        .process(FileRecord::new(
            "pastissada.css.map",
            ".",
            br#"{"file":"pastissada.css"}"#.to_vec(),
        ))
        .unwrap();
    assert!(held.is_none());

    let drained = second.finalize().unwrap();
    let map = drained[0].as_revisioned().unwrap();
    // Miss: the map is hashed on its own bytes, not the other run's asset.
    assert_eq!(map.hash, fingerprint(br#"{"file":"pastissada.css"}"#, 8));
}
