// Integration tests for the file operations
// Tests use a REAL filesystem fixture under a temp dir

use mooshak_tools::operations::{
    cmpbin, cmpsize, cmptext, copy, is_zip, read, read_stream, search_regex, search_text, test,
    teststr, write, SearchOptions,
};
use mooshak_tools::operations::file::CHUNK_SIZE;
use mooshak_tools::ToolsError;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NOT_EXIST: &str = "__NotExist__";

/// Sample files shared by the tests
struct Samples {
    dir: TempDir,
}

impl Samples {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path();

        let files: [(&str, &str); 11] = [
            ("file0.txt", ""),
            ("file0.ro.txt", ""),
            ("file0.copy.txt", "stale"),
            ("file1.txt", "one\n"),
            ("file2.txt", "one\ntwo\n"),
            ("file2n.txt", "one\ntwo\n\n"),
            ("file3.txt", "one\ntwo\nthree\n"),
            ("file3e.txt", "one\ntwo\nthree\n"),
            ("file3n.txt", "one\ntwo!\nthree\n"),
            ("file3nes.txt", "one\ntxo\nthree\n"),
            ("file4.txt", "one,\ntwo\nthree,\nfour\n"),
        ];
        for (name, content) in files {
            fs::write(root.join(name), content).expect("Failed to write sample");
        }

        fs::create_dir(root.join("inner")).expect("Failed to create inner dir");
        fs::write(root.join("inner").join("file0.txt"), "").expect("Failed to write sample");

        let ro = root.join("file0.ro.txt");
        let mut perms = fs::metadata(&ro).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&ro, perms).unwrap();

        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Expected search output for the given relative names
    fn listing(&self, names: &[&str]) -> String {
        names
            .iter()
            .map(|name| format!("{}\n", self.path(name).display()))
            .collect()
    }
}

const FILES_0_TO_2: [&str; 6] = [
    "file0.copy.txt",
    "file0.ro.txt",
    "file0.txt",
    "file1.txt",
    "file2.txt",
    "file2n.txt",
];
const FILES_3_TO_4: [&str; 5] = [
    "file3.txt",
    "file3e.txt",
    "file3n.txt",
    "file3nes.txt",
    "file4.txt",
];
const INNER: [&str; 1] = ["inner/file0.txt"];

/// Root is exempt from permission bits, so some checks only make sense as a normal user
fn permissions_enforced(path: &Path) -> bool {
    fs::OpenOptions::new().write(true).open(path).is_err()
}

// ----------------------------------------------------------------------------
// Copy
// ----------------------------------------------------------------------------

#[test]
fn test_copy_missing_paths() {
    let samples = Samples::new();
    let file0 = samples.path("file0.txt");
    let file0c = samples.path("file0.copy.txt");

    let err = copy(&file0, "").unwrap_err();
    assert!(matches!(err, ToolsError::NotFound { .. }));
    assert_eq!(err.to_string(), " error: 2");

    assert_eq!(copy("", &file0c).unwrap_err().to_string(), " error: 2");
    assert_eq!(
        copy(NOT_EXIST, &file0c).unwrap_err().to_string(),
        format!("{} error: 2", NOT_EXIST)
    );
}

#[test]
fn test_copy_read_only_destination() {
    let samples = Samples::new();
    let file0ro = samples.path("file0.ro.txt");
    if !permissions_enforced(&file0ro) {
        return;
    }

    let err = copy(samples.path("file0.txt"), &file0ro).unwrap_err();
    assert!(matches!(err, ToolsError::PermissionDenied { .. }));
    assert_eq!(err.to_string(), format!("{} error: 13", file0ro.display()));
}

#[test]
fn test_copy_then_compare() {
    let samples = Samples::new();
    let file4 = samples.path("file4.txt");
    let file0c = samples.path("file0.copy.txt");

    copy(&file4, &file0c).unwrap();
    assert!(cmpbin(&file4, &file0c).unwrap());
    assert!(cmptext(&file4, &file0c).unwrap().is_empty());
}

// ----------------------------------------------------------------------------
// Read / Write
// ----------------------------------------------------------------------------

#[test]
fn test_read_file_and_stream() {
    let samples = Samples::new();
    let file3 = samples.path("file3.txt");

    assert_eq!(read(&file3).unwrap(), b"one\ntwo\nthree\n");

    let mut stream = File::open(&file3).unwrap();
    assert_eq!(read_stream(&mut stream).unwrap(), b"one\ntwo\nthree\n");
}

#[test]
fn test_write_missing_directory() {
    let samples = Samples::new();
    let target = samples.path("no_such_dir/out.txt");

    let err = write(&target, "data").unwrap_err();
    assert_eq!(err.to_string(), format!("{} error: 2", target.display()));
}

// ----------------------------------------------------------------------------
// Search
// ----------------------------------------------------------------------------

#[test]
fn test_search_patterns() {
    let samples = Samples::new();
    let root = samples.root();

    assert_eq!(search_text(root, "", None).unwrap(), "");

    let expected = samples.listing(&[&FILES_0_TO_2[..], &INNER[..]].concat());
    assert_eq!(search_text(root, "file[0-2](.*)", None).unwrap(), expected);

    let expected = samples.listing(&[&FILES_0_TO_2[..], &FILES_3_TO_4[..], &INNER[..]].concat());
    assert_eq!(search_text(root, "(.*)txt", None).unwrap(), expected);
}

#[test]
fn test_search_depth() {
    let samples = Samples::new();
    let root = samples.root();

    let top_level = samples.listing(&[&FILES_0_TO_2[..], &FILES_3_TO_4[..]].concat());
    let everything = samples.listing(&[&FILES_0_TO_2[..], &FILES_3_TO_4[..], &INNER[..]].concat());

    assert_eq!(search_text(root, "(.*)txt", Some(0)).unwrap(), top_level);
    assert_eq!(search_text(root, "(.*)txt", Some(1)).unwrap(), everything);
    assert_eq!(search_text(root, "(.*)txt", Some(2)).unwrap(), everything);
    assert_eq!(search_text(root, "(.*)txt", Some(3)).unwrap(), everything);
}

#[test]
fn test_search_reports_directories() {
    let samples = Samples::new();
    let options = SearchOptions::default().with_max_depth(None).sorted(true);

    let found = search_regex(samples.root(), "inn.r", options).unwrap();
    assert_eq!(found, vec![samples.path("inner")]);
}

#[test]
fn test_search_unsorted_has_same_entries() {
    let samples = Samples::new();
    let sorted = search_regex(samples.root(), "file3(.*)", SearchOptions::default().sorted(true)).unwrap();
    let mut unsorted =
        search_regex(samples.root(), "file3(.*)", SearchOptions::default().sorted(false)).unwrap();

    unsorted.sort();
    assert_eq!(sorted, unsorted);
    assert_eq!(sorted.len(), 4);
}

#[test]
fn test_search_with_closure_matcher() {
    let samples = Samples::new();
    let options = SearchOptions::default().with_max_depth(Some(0)).sorted(true);

    let found = mooshak_tools::operations::search(
        samples.root(),
        &|name: &str| name.ends_with("n.txt"),
        options,
    )
    .unwrap();
    assert_eq!(found, vec![samples.path("file2n.txt"), samples.path("file3n.txt")]);
}

#[test]
fn test_search_invalid_pattern() {
    let samples = Samples::new();
    let err = search_text(samples.root(), "file[", None).unwrap_err();
    assert!(matches!(err, ToolsError::InvalidPattern { .. }));
}

#[test]
fn test_search_missing_root() {
    let err = search_text(NOT_EXIST, "(.*)", None).unwrap_err();
    assert_eq!(err.to_string(), format!("{} error: 2", NOT_EXIST));
}

#[cfg(unix)]
#[test]
fn test_search_file_root() {
    let samples = Samples::new();
    let file0 = samples.path("file0.txt");

    let err = search_text(&file0, "(.*)", None).unwrap_err();
    // ENOTDIR
    assert_eq!(err.to_string(), format!("{} error: 20", file0.display()));
}

#[cfg(unix)]
#[test]
fn test_search_skips_unreadable_directory() {
    use std::os::unix::fs::PermissionsExt;

    let samples = Samples::new();
    let locked = samples.path("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("file9.txt"), "").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let result = search_text(samples.root(), "(.*)txt", None);
    let enforced = fs::read_dir(&locked).is_err();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if enforced {
        let expected =
            samples.listing(&[&FILES_0_TO_2[..], &FILES_3_TO_4[..], &INNER[..]].concat());
        assert_eq!(result.unwrap(), expected);
    }
}

// ----------------------------------------------------------------------------
// Compare
// ----------------------------------------------------------------------------

#[test]
fn test_compare_not_found() {
    let samples = Samples::new();
    let file0 = samples.path("file0.txt");

    assert_eq!(cmpbin("", &file0).unwrap_err().to_string(), " error: 2");
    assert_eq!(cmpbin(&file0, "").unwrap_err().to_string(), " error: 2");
    assert_eq!(cmpbin("", "").unwrap_err().to_string(), " error: 2");

    let expected = format!("{} error: 2", NOT_EXIST);
    assert_eq!(cmpbin(NOT_EXIST, &file0).unwrap_err().to_string(), expected);
    assert_eq!(cmpbin(&file0, NOT_EXIST).unwrap_err().to_string(), expected);
    assert_eq!(cmpbin(NOT_EXIST, NOT_EXIST).unwrap_err().to_string(), expected);

    assert!(cmpsize(NOT_EXIST, &file0).is_err());
    assert!(cmptext(&file0, NOT_EXIST).is_err());
}

#[test]
fn test_compare_size() {
    let s = Samples::new();
    assert!(cmpsize(s.path("file0.txt"), s.path("file0.txt")).unwrap());
    assert!(cmpsize(s.path("file3.txt"), s.path("file3e.txt")).unwrap());
    assert!(cmpsize(s.path("file3.txt"), s.path("file3nes.txt")).unwrap());
    assert!(!cmpsize(s.path("file0.txt"), s.path("file1.txt")).unwrap());
    assert!(!cmpsize(s.path("file2.txt"), s.path("file2n.txt")).unwrap());
}

#[test]
fn test_compare_binary() {
    let s = Samples::new();
    assert!(cmpbin(s.path("file0.txt"), s.path("file0.txt")).unwrap());
    assert!(cmpbin(s.path("file3.txt"), s.path("file3e.txt")).unwrap());
    assert!(!cmpbin(s.path("file0.txt"), s.path("file1.txt")).unwrap());
    assert!(!cmpbin(s.path("file2.txt"), s.path("file2n.txt")).unwrap());
    // same size, one byte apart
    assert!(!cmpbin(s.path("file3.txt"), s.path("file3nes.txt")).unwrap());
}

#[test]
fn test_compare_binary_late_mismatch() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");

    // equal sizes, only the last byte of the third chunk differs
    let left: Vec<u8> = (0..CHUNK_SIZE * 2 + 5).map(|i| (i % 251) as u8).collect();
    let mut right = left.clone();
    let last = right.len() - 1;
    right[last] ^= 0xFF;
    write(&a, &left).unwrap();
    write(&b, &right).unwrap();

    assert!(cmpsize(&a, &b).unwrap());
    assert!(!cmpbin(&a, &b).unwrap());

    write(&b, &left).unwrap();
    assert!(cmpbin(&a, &b).unwrap());
}

#[test]
fn test_compare_text() {
    let s = Samples::new();
    let cmp = |a: &str, b: &str| cmptext(s.path(a), s.path(b)).unwrap();

    assert!(cmp("file0.txt", "file0.txt").is_empty());
    assert!(cmp("file3.txt", "file3e.txt").is_empty());

    assert_eq!(cmp("file0.txt", "file1.txt"), "0:\none\n");
    assert_eq!(cmp("file1.txt", "file0.txt"), "0:\none\n");

    assert_eq!(cmp("file2.txt", "file2n.txt"), "2:\n\n");
    assert_eq!(cmp("file3.txt", "file3n.txt"), "1:\ntwo\ntwo!\n");

    assert_eq!(cmp("file1.txt", "file3.txt"), "1:\ntwo\n2:\nthree\n");
    assert_eq!(cmp("file3.txt", "file1.txt"), "1:\ntwo\n2:\nthree\n");

    assert_eq!(cmp("file3.txt", "file3nes.txt"), "1:\ntwo\ntxo\n");
    assert_eq!(cmp("file3nes.txt", "file3.txt"), "1:\ntxo\ntwo\n");

    assert_eq!(
        cmp("file3.txt", "file4.txt"),
        "0:\none\none,\n2:\nthree\nthree,\n3:\nfour\n"
    );
    assert_eq!(
        cmp("file4.txt", "file3.txt"),
        "0:\none,\none\n2:\nthree,\nthree\n3:\nfour\n"
    );
}

#[test]
fn test_compare_text_trailing_line() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    write(&a, "one\ntwo\nthree\n").unwrap();
    write(&b, "one\ntwo\nthree,\nfour\n").unwrap();

    assert_eq!(cmptext(&a, &b).unwrap(), "2:\nthree\nthree,\n3:\nfour\n");
}

#[test]
fn test_compare_text_long_lines() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");

    // differs only in the second 255-byte piece of the first line
    let mut left = "x".repeat(300);
    let mut right = left.clone();
    right.replace_range(299..300, "y");
    left.push('\n');
    right.push('\n');
    write(&a, &left).unwrap();
    write(&b, &right).unwrap();

    let report = cmptext(&a, &b).unwrap();
    assert!(report.starts_with("1:\n"));
    assert!(!report.contains("0:\n"));
}

#[test]
fn test_whole_content_test() {
    let s = Samples::new();
    let t = |a: &str, b: &str| test(s.path(a), s.path(b)).unwrap();

    assert!(t("file0.txt", "file0.txt").is_empty());
    assert!(t("file3.txt", "file3e.txt").is_empty());

    assert_eq!(t("file0.txt", "file1.txt"), "Expected:\nActual:\none\n");
    assert_eq!(t("file1.txt", "file0.txt"), "Expected:\none\nActual:\n");

    assert_eq!(
        t("file3.txt", "file3nes.txt"),
        "Expected:\none\ntwo\nthree\nActual:\none\ntxo\nthree\n"
    );
    assert_eq!(
        t("file3nes.txt", "file3.txt"),
        "Expected:\none\ntxo\nthree\nActual:\none\ntwo\nthree\n"
    );

    assert_eq!(
        t("file3.txt", "file4.txt"),
        "Expected:\none\ntwo\nthree\nActual:\none,\ntwo\nthree,\nfour\n"
    );
    assert_eq!(
        t("file4.txt", "file3.txt"),
        "Expected:\none,\ntwo\nthree,\nfour\nActual:\none\ntwo\nthree\n"
    );
}

#[test]
fn test_whole_content_teststr() {
    let s = Samples::new();
    let t = |expected: &str, actual: &str| {
        teststr(s.path(expected), read(s.path(actual)).unwrap()).unwrap()
    };

    assert!(t("file0.txt", "file0.txt").is_empty());
    assert!(t("file3.txt", "file3e.txt").is_empty());
    assert_eq!(t("file0.txt", "file1.txt"), "Expected:\nActual:\none\n");
    assert_eq!(t("file1.txt", "file0.txt"), "Expected:\none\nActual:\n");
    assert_eq!(
        t("file3.txt", "file4.txt"),
        "Expected:\none\ntwo\nthree\nActual:\none,\ntwo\nthree,\nfour\n"
    );
}

#[test]
fn test_teststr_missing_expected() {
    let err = teststr(NOT_EXIST, "anything").unwrap_err();
    assert!(matches!(err, ToolsError::NotFound { .. }));
    assert_eq!(err.to_string(), format!("{} error: 2", NOT_EXIST));
}

// ----------------------------------------------------------------------------
// Zip sniffing
// ----------------------------------------------------------------------------

#[test]
fn test_is_zip() {
    let s = Samples::new();
    let zip = s.path("sample.zip");
    write(&zip, [b'P', b'K', 0x03, 0x04, 0x0A, 0x00, 0x00, 0x00]).unwrap();

    assert!(is_zip(&zip).unwrap());
    assert!(!is_zip(s.path("file3.txt")).unwrap());
    assert!(!is_zip(s.path("file0.txt")).unwrap());
}
