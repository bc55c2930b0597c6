use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use pdf_reduce::cli::Method;
use pdf_reduce::config::{RecompressSettings, SplitSettings};
use pdf_reduce::error::Error;
use pdf_reduce::model::ResolvedMethod;
use pdf_reduce::{compress_document, split_document};

fn gradient(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width) as u8);
            data.push((y * 255 / height) as u8);
            data.push(96);
        }
    }
    data
}

/// Write a PDF with `pages` pages; each page draws its own raw RGB image
/// when `with_images` is set.
fn write_pdf(path: &Path, pages: u32, with_images: bool) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();

    for _ in 0..pages {
        let mut resources = Dictionary::new();
        let mut ops = Vec::new();
        if with_images {
            let image = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 64,
                    "Height" => 64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                },
                gradient(64, 64),
            ));
            resources.set("XObject", dictionary! { "Im0" => image });
            ops.extend_from_slice(b"q 64 0 0 64 0 0 cm /Im0 Do Q\n");
        }
        let content = doc.add_object(Stream::new(Dictionary::new(), ops));
        let page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources,
            "Contents" => content,
        });
        kids.push(Object::Reference(page));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => pages as i64,
            "Kids" => kids,
        }),
    );
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog);
    doc.save(path).expect("Failed to write test PDF");
}

fn page_count(path: &Path) -> usize {
    Document::load(path)
        .expect("Failed to load PDF")
        .get_pages()
        .len()
}

/// Stream bytes of the image drawn on each page, in page order
fn page_image_bytes(path: &Path) -> Vec<Vec<u8>> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .values()
        .map(|page_id| {
            let page = doc.get_dictionary(*page_id).unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
            let id: ObjectId = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
            doc.get_object(id).unwrap().as_stream().unwrap().content.clone()
        })
        .collect()
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_split_ten_pages_into_three() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    write_pdf(&input, 10, false);

    let out_dir = dir.path().join("parts");
    let settings = SplitSettings::new(&input, 3).with_output_dir(&out_dir);
    let parts = split_document(&settings).expect("Failed to split");

    let expected: Vec<PathBuf> = (1..=3)
        .map(|i| out_dir.join(format!("report_part_{}of3.pdf", i)))
        .collect();
    assert_eq!(parts, expected);

    let counts: Vec<usize> = parts.iter().map(|p| page_count(p)).collect();
    assert_eq!(counts, vec![4, 3, 3]);
}

#[test]
fn test_split_clamps_to_page_count() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("short.pdf");
    write_pdf(&input, 5, false);

    let parts = split_document(&SplitSettings::new(&input, 10)).expect("Failed to split");
    assert_eq!(parts.len(), 5);
    assert!(parts[4].ends_with("short_part_5of5.pdf"));
    assert!(parts.iter().all(|p| page_count(p) == 1));
}

#[test]
fn test_split_keeps_page_content() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images.pdf");
    write_pdf(&input, 4, true);
    let original = page_image_bytes(&input);

    let parts = split_document(&SplitSettings::new(&input, 2).with_output_prefix("half"))
        .expect("Failed to split");
    let rejoined: Vec<Vec<u8>> = parts.iter().flat_map(|p| page_image_bytes(p)).collect();
    assert_eq!(rejoined, original);
}

#[test]
fn test_split_refuses_overwrite_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.pdf");
    write_pdf(&input, 6, false);
    let existing = dir.path().join("doc_part_2of3.pdf");
    fs::write(&existing, b"keep me").unwrap();

    let err = split_document(&SplitSettings::new(&input, 3)).unwrap_err();
    assert!(matches!(err, Error::OutputExists(_)));
    assert_eq!(fs::read(&existing).unwrap(), b"keep me");
    assert_eq!(sorted_names(dir.path()), vec!["doc.pdf", "doc_part_2of3.pdf"]);

    let parts = split_document(&SplitSettings::new(&input, 3).with_overwrite(true))
        .expect("Failed to split with overwrite");
    assert_eq!(page_count(&parts[1]), 2);
}

#[test]
fn test_split_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = split_document(&SplitSettings::new(dir.path().join("nope.pdf"), 2)).unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));
}

#[test]
fn test_in_process_compression_shrinks_images() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.pdf");
    let output = dir.path().join("scan_small.pdf");
    write_pdf(&input, 3, true);

    let settings =
        RecompressSettings::new(&input, &output, 60).with_method(Method::InProcess);
    let outcome = compress_document(&settings).expect("Failed to compress");

    assert_eq!(outcome.method, ResolvedMethod::InProcess);
    assert!(!outcome.fell_back);
    assert_eq!(page_count(&output), 3);
    assert!(outcome.output_bytes < outcome.input_bytes);
    assert!(outcome.achieved_percent() > 0.0);

    let images = outcome.images.expect("in-process run reports images");
    assert_eq!(images.replaced, 3);
    assert_eq!(images.pages_compressed, 3);
}

#[test]
fn test_page_filter_leaves_other_pages_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mixed.pdf");
    let output = dir.path().join("mixed_out.pdf");
    write_pdf(&input, 5, true);
    let before = page_image_bytes(&input);

    let settings = RecompressSettings::new(&input, &output, 70).with_pages("2-4");
    let outcome = compress_document(&settings).expect("Failed to compress");
    assert_eq!(outcome.method, ResolvedMethod::InProcess);

    let after = page_image_bytes(&output);
    assert_eq!(after.len(), 5);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[4], before[4]);
    for page in 1..4 {
        assert!(after[page].len() < before[page].len());
    }
}

#[test]
fn test_page_out_of_range_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("three.pdf");
    let output = dir.path().join("out.pdf");
    write_pdf(&input, 3, true);

    let settings = RecompressSettings::new(&input, &output, 50).with_pages("2,9");
    let err = compress_document(&settings).unwrap_err();
    assert!(matches!(err, Error::PageOutOfRange { page: 9, total: 3 }));
    assert!(!output.exists());
}

#[test]
fn test_compress_refuses_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    write_pdf(&input, 1, true);
    fs::write(&output, b"old").unwrap();

    let settings = RecompressSettings::new(&input, &output, 50).with_method(Method::InProcess);
    assert!(matches!(
        compress_document(&settings),
        Err(Error::OutputExists(_))
    ));
    assert_eq!(fs::read(&output).unwrap(), b"old");

    compress_document(&settings.with_overwrite(true)).expect("Failed to overwrite");
    assert_eq!(page_count(&output), 1);
}

#[test]
fn test_cli_external_without_tool_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let empty_path = dir.path().join("bin");
    fs::create_dir(&empty_path).unwrap();
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    write_pdf(&input, 2, true);

    let status = Command::new(env!("CARGO_BIN_EXE_recompress"))
        .arg(&input)
        .arg(&output)
        .args(["-p", "50", "-m", "external"])
        .env("PATH", &empty_path)
        .output()
        .expect("Failed to run recompress");

    assert_eq!(status.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&status.stderr).contains("not found"));
    assert!(!output.exists());
}

#[test]
fn test_cli_rejects_bad_percent() {
    let status = Command::new(env!("CARGO_BIN_EXE_recompress"))
        .args(["in.pdf", "out.pdf", "-p", "150"])
        .output()
        .expect("Failed to run recompress");
    assert_eq!(status.status.code(), Some(2));
}

#[test]
fn test_cli_bad_page_list_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    write_pdf(&input, 2, false);

    let status = Command::new(env!("CARGO_BIN_EXE_recompress"))
        .arg(&input)
        .arg(dir.path().join("out.pdf"))
        .args(["-p", "50", "--pages", "3-1"])
        .output()
        .expect("Failed to run recompress");
    assert_eq!(status.status.code(), Some(2));
}

#[test]
fn test_cli_split() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("book.pdf");
    write_pdf(&input, 7, false);

    let status = Command::new(env!("CARGO_BIN_EXE_split"))
        .arg(&input)
        .args(["-n", "2"])
        .output()
        .expect("Failed to run split");

    assert!(status.status.success());
    let stdout = String::from_utf8_lossy(&status.stdout);
    assert!(stdout.contains("book_part_1of2.pdf"));
    assert_eq!(page_count(&dir.path().join("book_part_1of2.pdf")), 4);
    assert_eq!(page_count(&dir.path().join("book_part_2of2.pdf")), 3);
}

#[test]
fn test_huge_page_range_rejected_quickly() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("one.pdf");
    let output = dir.path().join("out.pdf");
    write_pdf(&input, 1, true);

    let settings = RecompressSettings::new(&input, &output, 50)
        .with_method(Method::InProcess)
        .with_pages("1-400000000");
    assert!(matches!(
        compress_document(&settings),
        Err(Error::PageOutOfRange { page: 400_000_000, total: 1 })
    ));
    assert!(!output.exists());
}

/// Directory holding a `gs` shell script with `body`, for use as PATH
#[cfg(unix)]
fn fake_gs(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let script = bin.join("gs");
    fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    bin
}

/// Copies the input (last argument) to the `-sOutputFile=` target
#[cfg(unix)]
const COPYING_GS: &str = r#"out=""
for arg in "$@"; do
  case "$arg" in
    -sOutputFile=*) out="${arg#-sOutputFile=}" ;;
  esac
  last="$arg"
done
/bin/cp "$last" "$out""#;

#[cfg(unix)]
const FAILING_GS: &str = "echo boom >&2\nexit 1";

#[cfg(unix)]
fn leftover_temp_files(dir: &Path) -> usize {
    sorted_names(dir)
        .iter()
        .filter(|name| name.starts_with(".pdf-reduce-"))
        .count()
}

#[cfg(unix)]
fn run_recompress(
    path_dir: &Path,
    input: &Path,
    output: &Path,
    extra: &[&str],
) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_recompress"))
        .arg(input)
        .arg(output)
        .args(extra)
        .env("PATH", path_dir)
        .output()
        .expect("Failed to run recompress")
}

#[cfg(unix)]
#[test]
fn test_cli_auto_falls_back_when_tool_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path_dir = fake_gs(dir.path(), FAILING_GS);
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    write_pdf(&input, 2, true);

    let result = run_recompress(&path_dir, &input, &output, &["-p", "50"]);

    assert_eq!(result.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Method: in-process (fallback)"), "{}", stdout);
    assert_eq!(page_count(&output), 2);
    assert_eq!(leftover_temp_files(dir.path()), 0);
}

#[cfg(unix)]
#[test]
fn test_cli_external_success() {
    let dir = tempfile::tempdir().unwrap();
    let path_dir = fake_gs(dir.path(), COPYING_GS);
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    write_pdf(&input, 3, true);

    let result = run_recompress(&path_dir, &input, &output, &["-p", "50", "-m", "external"]);

    assert_eq!(result.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Method: external"), "{}", stdout);
    assert_eq!(fs::read(&output).unwrap(), fs::read(&input).unwrap());
    assert_eq!(leftover_temp_files(dir.path()), 0);
}

#[cfg(unix)]
#[test]
fn test_cli_external_ignores_page_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path_dir = fake_gs(dir.path(), COPYING_GS);
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    write_pdf(&input, 3, true);

    let result = run_recompress(
        &path_dir,
        &input,
        &output,
        &["-p", "50", "-m", "external", "--pages", "1"],
    );

    assert_eq!(result.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&result.stdout).contains("Method: external"));
    assert_eq!(page_count(&output), 3);
}

#[cfg(unix)]
#[test]
fn test_cli_external_tool_failure_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let path_dir = fake_gs(dir.path(), FAILING_GS);
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    write_pdf(&input, 2, true);

    let result = run_recompress(&path_dir, &input, &output, &["-p", "50", "-m", "external"]);

    assert_eq!(result.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&result.stderr).contains("boom"));
    assert!(!output.exists());
    assert_eq!(leftover_temp_files(dir.path()), 0);
}
