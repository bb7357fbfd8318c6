//! End-to-end runs against a stand-in font compiler
//!
//! The stand-in is a small shell script that records its arguments and
//! complains on stderr for WOFF2 only, so both outcomes are exercised.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use subfont_core::{
    dry_run, run, CompileOutcome, Flavor, FontDocument, IconList, SubsetConfig, SubsetError,
};

const FONT_SVG: &str = r#"<?xml version="1.0" standalone="no"?>
<svg xmlns="http://www.w3.org/2000/svg">
<defs>
<font id="myfont" horiz-adv-x="1024">
<font-face font-family="myfont" units-per-em="1024" ascent="960" descent="-64" font-weight="normal" font-style="normal" />
<missing-glyph horiz-adv-x="1024" />
<glyph glyph-name="home" unicode="&#xe901;" d="M0 0h1v1z" />
<glyph glyph-name="star" unicode="&#xe902;" d="M2 2h1v1z" />
<glyph glyph-name="settings" unicode="&#xe903;" d="M3 3h1v1z" />
</font>
</defs>
</svg>"#;

fn icons(names: &[&str]) -> IconList {
    names.iter().copied().collect()
}

#[cfg(unix)]
fn fake_compiler(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-pyftsubset");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_dry_run_reports_found_and_missing() {
    let doc = FontDocument::parse(FONT_SVG);

    let report = dry_run(&icons(&["home", "star"]), &doc);
    assert_eq!(report.requested, 2);
    assert_eq!(report.available, 3);
    let found: Vec<String> = report
        .selection
        .found
        .iter()
        .map(|icon| format!("{} {}", icon.name, icon.selectors[0]))
        .collect();
    assert_eq!(found, ["home U+E901", "star U+E902"]);
    assert!(report.selection.missing.is_empty());

    let report = dry_run(&icons(&["home", "ghost"]), &doc);
    assert_eq!(report.selection.found.len(), 1);
    assert_eq!(report.selection.missing, ["ghost"]);
}

#[cfg(unix)]
#[test]
fn test_full_run_writes_svg_and_invokes_compiler_per_flavor() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("args.log");
    let compiler = fake_compiler(
        dir.path(),
        &format!(
            r#"for arg in "$@"; do echo "$arg" >> "{log}"; done
case "$*" in
  *--flavor=woff2*) echo "WARNING: noise" >&2; echo "ERROR: missing glyphs" >&2 ;;
esac"#,
            log = log.display()
        ),
    );
    let out = dir.path().join("subset");
    let config = SubsetConfig::default()
        .with_output_dir(&out)
        .with_compiler(&compiler);

    let doc = FontDocument::parse(FONT_SVG);
    let report = run(&icons(&["star", "home"]), &doc, Path::new("icons/myfont.ttf"), &config).unwrap();

    assert_eq!(report.svg_path, out.join("myfont.subset.svg"));
    assert_eq!(report.retained, 2);
    let written = FontDocument::parse(&fs::read_to_string(&report.svg_path).unwrap());
    let names: Vec<_> = written.glyphs().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["home", "star"]);
    assert_eq!(written.defs.font.font_face, doc.defs.font.font_face);

    assert_eq!(report.binaries.len(), 2);
    assert_eq!(
        report.binaries[0],
        (
            Flavor::Woff,
            CompileOutcome::Succeeded {
                output: out.join("myfont.subset.woff")
            }
        )
    );
    assert_eq!(
        report.binaries[1],
        (
            Flavor::Woff2,
            CompileOutcome::Failed {
                output: out.join("myfont.subset.woff2"),
                diagnostic: "ERROR: missing glyphs".into(),
            }
        )
    );
    assert!(!report.all_succeeded());
    assert_eq!(report.failures().count(), 1);

    let args = fs::read_to_string(&log).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args.len(), 10);
    assert_eq!(args[0], "icons/myfont.ttf");
    assert_eq!(args[1], "--unicodes=U+E901,U+E902");
    assert_eq!(args[2], "--flavor=woff");
    assert_eq!(
        args[3],
        format!("--output-file={}", out.join("myfont.subset.woff").display())
    );
    assert_eq!(args[4], "--no-ignore-missing-unicodes");
    assert_eq!(args[7], "--flavor=woff2");
}

#[cfg(unix)]
#[test]
fn test_dedupe_selectors_before_compiling() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("args.log");
    let compiler = fake_compiler(
        dir.path(),
        &format!(r#"echo "$2" >> "{}""#, log.display()),
    );
    let doc = FontDocument::parse(
        r#"<svg><defs><font>
<glyph glyph-name="home" unicode="&#xe901;"/>
<glyph glyph-name="home" unicode="&#xe901;"/>
</font></defs></svg>"#,
    );
    let base = SubsetConfig::default()
        .with_output_dir(dir.path().join("out"))
        .with_compiler(&compiler)
        .with_flavors(vec![Flavor::Woff]);

    run(&icons(&["home"]), &doc, Path::new("f.ttf"), &base).unwrap();
    run(
        &icons(&["home"]),
        &doc,
        Path::new("f.ttf"),
        &base.clone().with_dedupe_selectors(true),
    )
    .unwrap();

    let lines = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = lines.lines().collect();
    assert_eq!(lines, ["--unicodes=U+E901,U+E901", "--unicodes=U+E901"]);
}

#[cfg(unix)]
#[test]
fn test_timeout_kills_a_hung_compiler() {
    let dir = tempfile::tempdir().unwrap();
    let compiler = fake_compiler(dir.path(), "exec sleep 30");
    let config = SubsetConfig::default()
        .with_output_dir(dir.path().join("out"))
        .with_compiler(&compiler)
        .with_flavors(vec![Flavor::Woff2])
        .with_timeout(Some(Duration::from_secs(1)));

    let doc = FontDocument::parse(FONT_SVG);
    let report = run(&icons(&["home"]), &doc, Path::new("myfont.ttf"), &config).unwrap();
    match &report.binaries[0].1 {
        CompileOutcome::Failed { diagnostic, .. } => {
            assert!(diagnostic.contains("did not finish within 1s"), "{diagnostic}")
        },
        other => panic!("expected a timeout failure, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_timeout_returns_while_a_descendant_holds_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let compiler = fake_compiler(dir.path(), "sleep 30 &\nexec sleep 30");
    let config = SubsetConfig::default()
        .with_output_dir(dir.path().join("out"))
        .with_compiler(&compiler)
        .with_flavors(vec![Flavor::Woff])
        .with_timeout(Some(Duration::from_secs(1)));

    let doc = FontDocument::parse(FONT_SVG);
    let started = Instant::now();
    let report = run(&icons(&["home"]), &doc, Path::new("myfont.ttf"), &config).unwrap();
    assert!(started.elapsed() < Duration::from_secs(10), "{:?}", started.elapsed());
    assert!(!report.binaries[0].1.is_success());
}

#[test]
fn test_missing_compiler_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = SubsetConfig::default()
        .with_output_dir(dir.path().join("out"))
        .with_compiler(dir.path().join("no-such-compiler"));
    let doc = FontDocument::parse(FONT_SVG);
    let err = run(&icons(&["home"]), &doc, Path::new("myfont.ttf"), &config).unwrap_err();
    assert!(matches!(err, SubsetError::Spawn { .. }));
    // The SVG is written before any compiler runs
    assert!(dir.path().join("out/myfont.subset.svg").exists());
}

#[test]
fn test_output_dir_blocked_by_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("subset");
    fs::write(&blocked, b"file").unwrap();
    let config = SubsetConfig::default().with_output_dir(&blocked);
    let doc = FontDocument::parse(FONT_SVG);
    let err = run(&icons(&["home"]), &doc, Path::new("myfont.ttf"), &config).unwrap_err();
    assert!(matches!(err, SubsetError::OutputDir { .. }));
}
