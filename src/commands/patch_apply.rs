use std::path::Path;

use tracing::{debug, info, warn};

use crate::patch::{copy_into, verify_copy, CopyReport, PatchError, PatchKind};
use crate::utils::dir_scan::list_class_files;
use crate::utils::layout::Layout;

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Hash-check every copy against its source
    pub verify: bool,
}

/// Line printed once a patch file has been copied.
pub fn format_confirmation(report: &CopyReport) -> String {
    let name = report
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match report.kind {
        PatchKind::Class => format!(
            "Class  {}  successfully copied into Exoplayer project",
            report.source.display()
        ),
        PatchKind::Manifest => {
            "Android manifest successfully copied into Exoplayer project".to_string()
        }
        PatchKind::Gradle | PatchKind::Strings => {
            format!("{} successfully copied into Exoplayer project", name)
        }
    }
}

/// Copy all patch files of a layout into the target project.
///
/// Order is fixed:
/// 1. Every class file in the source directory, sorted by name
/// 2. The Android manifest
/// 3. The gradle build script
/// 4. The string resources
///
/// The first failure stops the run. Files copied before it are left in place.
pub fn run<F>(
    layout: &Layout,
    options: ApplyOptions,
    mut on_copied: Option<F>,
) -> Result<Vec<CopyReport>, PatchError>
where
    F: FnMut(&CopyReport),
{
    for (a, b) in layout.case_conflicts() {
        warn!(
            "destination roots '{}' and '{}' differ only by case; \
             one may not exist on this filesystem",
            a, b
        );
    }

    let source_dir = &layout.source_dir;
    if !source_dir.is_dir() {
        return Err(PatchError::SourceDirMissing(source_dir.display().to_string()));
    }
    let classes = list_class_files(source_dir, &layout.class_extension).map_err(|e| {
        PatchError::CopyFailed {
            file: source_dir.display().to_string(),
            reason: format!("failed to list patch directory: {}", e),
        }
    })?;
    debug!(count = classes.len(), dir = %source_dir.display(), "found class files");

    let mut plan = Vec::with_capacity(classes.len() + 3);
    for class in classes {
        plan.push((PatchKind::Class, class, layout.classes_dst.as_path()));
    }
    plan.push((PatchKind::Manifest, layout.manifest_source(), layout.manifest_dst.as_path()));
    plan.push((PatchKind::Gradle, layout.gradle_source(), layout.gradle_dst.as_path()));
    plan.push((PatchKind::Strings, layout.strings_source(), layout.strings_dst.as_path()));

    let mut reports = Vec::with_capacity(plan.len());
    for (kind, source, dest_dir) in plan {
        let report = copy_one(kind, &source, dest_dir, options)?;
        if let Some(ref mut callback) = on_copied {
            callback(&report);
        }
        reports.push(report);
    }

    info!(copied = reports.len(), "patch applied");
    Ok(reports)
}

fn copy_one(
    kind: PatchKind,
    source: &Path,
    dest_dir: &Path,
    options: ApplyOptions,
) -> Result<CopyReport, PatchError> {
    let target = copy_into(source, dest_dir)?;
    let hash = if options.verify {
        Some(verify_copy(source, &target)?)
    } else {
        None
    };
    debug!(%kind, source = %source.display(), target = %target.display(), "copied");

    Ok(CopyReport {
        kind,
        source: source.to_path_buf(),
        target,
        hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Lay out a staged patch directory and an empty checkout under `root`.
    fn setup(root: &Path, classes: &[(&str, &[u8])]) -> Layout {
        let layout = Layout::default().resolve(root);

        fs::create_dir_all(&layout.source_dir).unwrap();
        for (name, content) in classes {
            fs::write(layout.source_dir.join(name), content).unwrap();
        }
        fs::write(layout.manifest_source(), b"<manifest package=\"demo\"/>").unwrap();
        fs::write(layout.gradle_source(), b"apply plugin: 'com.android.application'").unwrap();
        fs::write(layout.strings_source(), b"<resources/>").unwrap();

        for dst in layout.destinations() {
            fs::create_dir_all(dst).unwrap();
        }
        layout
    }

    fn collect(
        layout: &Layout,
        options: ApplyOptions,
    ) -> (Result<Vec<CopyReport>, PatchError>, Vec<String>) {
        let mut lines = Vec::new();
        let result = run(
            layout,
            options,
            Some(|r: &CopyReport| lines.push(format_confirmation(r))),
        );
        (result, lines)
    }

    #[test]
    fn copies_classes_then_fixed_files() {
        let root = tempdir().unwrap();
        let layout = setup(
            root.path(),
            &[("Foo.java", b"class Foo {}"), ("Bar.java", b"class Bar {}")],
        );

        let (result, lines) = collect(&layout, ApplyOptions::default());
        let reports = result.unwrap();

        let kinds: Vec<PatchKind> = reports.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PatchKind::Class,
                PatchKind::Class,
                PatchKind::Manifest,
                PatchKind::Gradle,
                PatchKind::Strings
            ]
        );
        assert_eq!(
            lines,
            vec![
                format!(
                    "Class  {}  successfully copied into Exoplayer project",
                    layout.source_dir.join("Bar.java").display()
                ),
                format!(
                    "Class  {}  successfully copied into Exoplayer project",
                    layout.source_dir.join("Foo.java").display()
                ),
                "Android manifest successfully copied into Exoplayer project".to_string(),
                "build.gradle successfully copied into Exoplayer project".to_string(),
                "strings.xml successfully copied into Exoplayer project".to_string(),
            ]
        );

        assert_eq!(fs::read(layout.classes_dst.join("Foo.java")).unwrap(), b"class Foo {}");
        assert_eq!(fs::read(layout.classes_dst.join("Bar.java")).unwrap(), b"class Bar {}");
        assert_eq!(
            fs::read(layout.manifest_dst.join("AndroidManifest.xml")).unwrap(),
            b"<manifest package=\"demo\"/>"
        );
        assert_eq!(
            fs::read(layout.gradle_dst.join("build.gradle")).unwrap(),
            b"apply plugin: 'com.android.application'"
        );
        assert_eq!(fs::read(layout.strings_dst.join("strings.xml")).unwrap(), b"<resources/>");
    }

    #[test]
    fn fixed_files_copied_without_classes() {
        let root = tempdir().unwrap();
        let layout = setup(root.path(), &[]);

        let (result, lines) = collect(&layout, ApplyOptions::default());

        assert_eq!(result.unwrap().len(), 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Android manifest"));
    }

    #[test]
    fn non_class_files_are_not_copied_as_classes() {
        let root = tempdir().unwrap();
        let layout = setup(
            root.path(),
            &[("Foo.java", &b"class Foo {}"[..]), ("notes.txt", &b"todo"[..])],
        );

        let reports = run(&layout, ApplyOptions::default(), None::<fn(&CopyReport)>).unwrap();

        let classes: Vec<&CopyReport> = reports
            .iter()
            .filter(|r| r.kind == PatchKind::Class)
            .collect();
        assert_eq!(classes.len(), 1);
        assert!(!layout.classes_dst.join("notes.txt").exists());
        // The fixed xml/gradle files are never treated as classes either
        assert!(!layout.classes_dst.join("strings.xml").exists());
    }

    #[test]
    fn missing_source_dir_fails_before_copying() {
        let root = tempdir().unwrap();
        let layout = Layout::default().resolve(root.path());
        for dst in layout.destinations() {
            fs::create_dir_all(dst).unwrap();
        }

        let (result, lines) = collect(&layout, ApplyOptions::default());

        assert!(matches!(result, Err(PatchError::SourceDirMissing(_))));
        assert!(lines.is_empty());
    }

    #[test]
    fn missing_destination_stops_remaining_copies() {
        let root = tempdir().unwrap();
        let layout = setup(root.path(), &[("Foo.java", b"class Foo {}")]);
        fs::remove_dir_all(&layout.gradle_dst).unwrap();

        let (result, lines) = collect(&layout, ApplyOptions::default());

        assert!(matches!(result, Err(PatchError::DestinationMissing { .. })));
        // Class and manifest went through; strings was never attempted
        assert_eq!(lines.len(), 2);
        assert!(layout.classes_dst.join("Foo.java").exists());
        assert!(layout.manifest_dst.join("AndroidManifest.xml").exists());
        assert!(!layout.strings_dst.join("strings.xml").exists());
    }

    #[test]
    fn missing_fixed_source_file_fails() {
        let root = tempdir().unwrap();
        let layout = setup(root.path(), &[]);
        fs::remove_file(layout.strings_source()).unwrap();

        let (result, lines) = collect(&layout, ApplyOptions::default());

        assert!(matches!(result, Err(PatchError::SourceMissing(_))));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn applying_twice_gives_same_contents() {
        let root = tempdir().unwrap();
        let layout = setup(root.path(), &[("Foo.java", b"class Foo {}")]);

        run(&layout, ApplyOptions::default(), None::<fn(&CopyReport)>).unwrap();
        let first = fs::read(layout.classes_dst.join("Foo.java")).unwrap();
        run(&layout, ApplyOptions::default(), None::<fn(&CopyReport)>).unwrap();
        let second = fs::read(layout.classes_dst.join("Foo.java")).unwrap();

        assert_eq!(first, second);
        assert_eq!(second, b"class Foo {}");
    }

    #[test]
    fn verify_records_hashes() {
        let root = tempdir().unwrap();
        let layout = setup(root.path(), &[("Foo.java", b"class Foo {}")]);

        let reports = run(&layout, ApplyOptions { verify: true }, None::<fn(&CopyReport)>).unwrap();

        assert!(reports.iter().all(|r| r.hash.is_some()));
        assert_eq!(
            reports[0].hash.as_deref(),
            Some(crate::utils::hash::hash_bytes(b"class Foo {}").as_str())
        );
    }

    #[test]
    fn reports_point_at_written_files() {
        let root = tempdir().unwrap();
        let layout = setup(root.path(), &[("WebviewActivity.java", b"class W {}")]);

        let reports = run(&layout, ApplyOptions::default(), None::<fn(&CopyReport)>).unwrap();

        assert_eq!(reports[0].target, layout.classes_dst.join("WebviewActivity.java"));
        assert_eq!(reports[0].hash, None);
        assert!(reports.iter().all(|r| r.target.is_file()));
    }

    #[test]
    fn custom_gradle_name_used_in_confirmation() {
        let report = CopyReport {
            kind: PatchKind::Gradle,
            source: PathBuf::from("./patch/build.gradle.kts"),
            target: PathBuf::from("./ExoPlayer/demos/main/build.gradle.kts"),
            hash: None,
        };

        assert_eq!(
            format_confirmation(&report),
            "build.gradle.kts successfully copied into Exoplayer project"
        );
    }

    #[test]
    fn class_confirmation_uses_source_path() {
        let report = CopyReport {
            kind: PatchKind::Class,
            source: PathBuf::from("./patch/NetworkOps.java"),
            target: PathBuf::from("./ExoPlayer/NetworkOps.java"),
            hash: None,
        };

        assert_eq!(
            format_confirmation(&report),
            "Class  ./patch/NetworkOps.java  successfully copied into Exoplayer project"
        );
    }

    #[cfg(unix)]
    #[test]
    fn hard_linked_target_keeps_source_intact() {
        let root = tempdir().unwrap();
        let layout = setup(root.path(), &[("Foo.java", b"class Foo { int x; }")]);
        fs::hard_link(
            layout.source_dir.join("Foo.java"),
            layout.classes_dst.join("Foo.java"),
        )
        .unwrap();

        let (result, lines) = collect(&layout, ApplyOptions { verify: true });

        assert!(matches!(result, Err(PatchError::CopyFailed { .. })));
        assert!(lines.is_empty());
        assert_eq!(
            fs::read(layout.source_dir.join("Foo.java")).unwrap(),
            b"class Foo { int x; }"
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_class_names_are_copied() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = tempdir().unwrap();
        let layout = setup(root.path(), &[]);
        let name = OsStr::from_bytes(b"Caf\xe9.java");
        fs::write(layout.source_dir.join(name), b"class Cafe {}").unwrap();

        let reports = run(&layout, ApplyOptions::default(), None::<fn(&CopyReport)>).unwrap();

        assert_eq!(reports[0].kind, PatchKind::Class);
        assert_eq!(fs::read(layout.classes_dst.join(name)).unwrap(), b"class Cafe {}");
    }
}
